/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to defaults if the file is missing or incomplete.
///
/// The logger is configured from this file, so problems found while
/// loading are kept in `warnings` and logged once the logger is up.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub gamepad: GamepadConfig,
    pub log_file: Option<PathBuf>,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
}

impl SpeedConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    /// Empty string disables logging.
    #[serde(default = "default_log_file")]
    log_file: String,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 150 }
fn default_confirm() -> Vec<String> { vec!["Start".into(), "A".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into(), "B".into()] }
fn default_log_file() -> String { "arcade-overlay.log".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { log_file: default_log_file() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    pub fn load() -> Self {
        let mut warnings = Vec::new();
        let toml_cfg = load_toml(&candidate_dirs(), &mut warnings);
        GameConfig::from_toml(toml_cfg, warnings)
    }

    /// Parse config text. Errors fall back to defaults with a warning.
    #[cfg(test)]
    pub fn parse(text: &str) -> Self {
        let mut warnings = Vec::new();
        let toml_cfg = parse_toml(text, Path::new("config.toml"), &mut warnings);
        GameConfig::from_toml(toml_cfg, warnings)
    }

    fn from_toml(cfg: TomlConfig, mut warnings: Vec<String>) -> Self {
        let mut tick_rate_ms = cfg.speed.tick_rate_ms;
        if tick_rate_ms == 0 {
            warnings.push(format!(
                "tick_rate_ms = 0 is not allowed, using {}", default_tick_rate()
            ));
            tick_rate_ms = default_tick_rate();
        }

        let log_file = if cfg.general.log_file.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(cfg.general.log_file))
        };

        GameConfig {
            speed: SpeedConfig { tick_rate_ms },
            gamepad: GamepadConfig {
                confirm: cfg.gamepad.confirm,
                cancel: cfg.gamepad.cancel,
            },
            log_file,
            warnings,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text, &path, warnings),
                Err(e) => {
                    warnings.push(format!("could not read {}: {e}", path.display()));
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str, path: &Path, warnings: &mut Vec<String>) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warnings.push(format!("{} parse error, using defaults: {e}", path.display()));
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = GameConfig::parse("");
        assert_eq!(cfg.speed.tick_rate_ms, 150);
        assert_eq!(cfg.speed.tick_interval(), Duration::from_millis(150));
        assert_eq!(cfg.log_file, Some(PathBuf::from("arcade-overlay.log")));
        assert_eq!(cfg.gamepad.confirm, vec!["Start".to_string(), "A".to_string()]);
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = GameConfig::parse("[speed]\ntick_rate_ms = 90\n");
        assert_eq!(cfg.speed.tick_rate_ms, 90);
        assert_eq!(cfg.gamepad.cancel, vec!["Select".to_string(), "B".to_string()]);
    }

    #[test]
    fn empty_log_file_disables_logging() {
        let cfg = GameConfig::parse("[general]\nlog_file = \"\"\n");
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn malformed_file_falls_back_with_warning() {
        let cfg = GameConfig::parse("[speed\ntick_rate_ms = ");
        assert_eq!(cfg.speed.tick_rate_ms, 150);
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let cfg = GameConfig::parse("[speed]\ntick_rate_ms = 0\n");
        assert_eq!(cfg.speed.tick_rate_ms, 150);
        assert_eq!(cfg.warnings.len(), 1);
    }
}
