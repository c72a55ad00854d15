//! The application code, used when running the BytePusher and the demos.
//!
//! Uses SDL3 to create a window, play audio and read the keyboard and joysticks.
//! Allows for customizing controls, screen size and volume (see [Config]).
//! All of the actual logic is done by importing from [core][crate::core].
mod audio;
pub use audio::Audio;
mod window;
pub use window::Window;
mod input;
pub use input::Input;
mod key_map;
pub use key_map::{Key, KeyMap};
mod config;
pub use config::{Config, APP_DIR};
pub mod utils;

/// Start logging to the terminal.
pub fn init_logging(level: log::LevelFilter) {
    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to start logging: {}", e);
    }
}
