/// Entry point and main loop.

mod config;
mod domain;
mod host;
mod logger;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use config::GameConfig;
use host::Host;
use sim::event::GameEvent;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::{play_events, SoundEngine};

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let logging = logger::init(config.log_file.as_deref());
    for warning in &config.warnings {
        log::warn!("config: {warning}");
    }
    if !logging {
        // Before raw mode, so this still reaches the user.
        for warning in &config.warnings {
            eprintln!("Warning: {warning}");
        }
    }
    log::info!("starting, tick interval {}ms", config.speed.tick_rate_ms);

    let mut host = Host::new(config.speed.tick_interval());
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        log::error!("terminal init failed: {e}");
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = main_loop(&mut host, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        log::error!("main loop failed: {e}");
        eprintln!("Error: {e}");
    }

    log::info!("exiting after {} overlay opening(s)", host.openings);
}

fn main_loop(
    host: &mut Host,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    if gp.connected {
        log::info!("gamepad connected");
    }

    loop {
        kb.drain_events();
        gp.update();

        let now = Instant::now();
        let mut events: Vec<GameEvent> = Vec::new();

        for &action in kb.actions.iter().chain(gp.actions().iter()) {
            events.extend(host.handle_action(action, now));
            if host.quit {
                return Ok(());
            }
        }

        events.extend(host.advance(now));
        play_events(sound, &events);

        renderer.render(host)?;
        std::thread::sleep(FRAME_SLEEP);
    }
}
