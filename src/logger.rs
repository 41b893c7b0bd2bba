/// Logging setup.
///
/// The terminal is in raw mode on the alternate screen while the game runs,
/// so log lines go to a file instead of stderr. Filter comes from `RUST_LOG`
/// (default `info`). With no file configured, or if it cannot be created,
/// no logger is installed and the `log` macros are no-ops.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};

pub fn init(log_file: Option<&Path>) -> bool {
    let path = match log_file {
        Some(p) => p,
        None => return false,
    };
    let file = match File::create(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .is_ok()
}
