use std::time::Duration;

use crate::{
    app::{
        key_map::Key,
        utils::{quickload, quicksave},
        Config,
    },
    core::{Status, Vm},
};
use log::*;
use sdl3::{event::Event, keyboard::Keycode};

/// Handles updating the input of the machine
///
/// Tracks which keys are held from SDL's key events, computes the equivalent hex keypad state and
/// updates it in the machine.
/// Also responsible for updating the app specific settings, such as increasing/decreasing volume.
pub struct Input {
    keys: Vec<Keycode>,
    last_keys: Vec<Keycode>,
}

impl Input {
    pub fn new() -> Input {
        Input {
            keys: Vec::new(),
            last_keys: Vec::new(),
        }
    }
    /// Record a key being pressed or released.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::KeyDown {
                keycode: Some(k), ..
            } => {
                if !self.keys.contains(k) {
                    self.keys.push(*k);
                }
            }
            Event::KeyUp {
                keycode: Some(k), ..
            } => self.keys.retain(|held| held != k),
            _ => {}
        }
    }
    fn key_down(k: &Key, keys: &[Keycode]) -> bool {
        keys.contains(&k.code)
    }
    fn key_pressed(&self, k: &Key) -> bool {
        Input::key_down(k, &self.keys) && !Input::key_down(k, &self.last_keys)
    }
    /// The hex keypad state for the keys currently held, bit `n` is hex key `n`.
    pub fn keypad_state(&self, config: &Config) -> u16 {
        config
            .key_map
            .keypad
            .iter()
            .enumerate()
            .filter(|(_, k)| Input::key_down(k, &self.keys))
            .fold(0, |state, (i, _)| state | (1 << i))
    }
    /// Apply the keys held since the last update to the machine and the app.
    /// * `now` Time since the app started, used to time status messages
    pub fn update(&mut self, vm: &mut Vm, config: &mut Config, status: &mut Status, now: Duration) {
        vm.set_keys(self.keypad_state(config));
        let km = config.key_map.clone();
        if self.key_pressed(&km.pause) {
            config.paused = !config.paused;
            status.show(if config.paused { "Paused" } else { "Resumed" }, now);
        }
        let diff = if self.key_pressed(&km.volume_up) {
            0.1
        } else if self.key_pressed(&km.volume_down) {
            -0.1
        } else {
            0.0
        };
        if diff != 0.0 {
            config.change_volume(diff);
            status.show(format!("Volume {:.0}%", config.volume * 100.0), now);
        }

        if self.key_pressed(&km.quicksave) {
            match quicksave(vm, config) {
                Ok(_) => status.show("Saved", now),
                Err(e) => {
                    error!("{}", e);
                    status.show(e, now);
                }
            }
        } else if self.key_pressed(&km.quickload) {
            match quickload(config) {
                Ok(v) => {
                    *vm = v;
                    status.show("Loaded savestate", now);
                }
                Err(e) => {
                    error!("Encountered an error while quickloading, aborting: {}", e);
                    status.show(e, now);
                }
            }
        } else if self.key_pressed(&km.reset) {
            match config.program_path.clone() {
                Some(path) => match vm.load_file(&path) {
                    Ok(_) => status.show("Reset", now),
                    Err(e) => status.show_persistent(e.to_string()),
                },
                None => info!("No program to reset"),
            }
        }

        self.last_keys = self.keys.clone();
    }
}

impl Default for Input {
    fn default() -> Input {
        Input::new()
    }
}
