use std::path::{Path, PathBuf};

use log::*;
use serde::{Deserialize, Serialize};

use crate::app::KeyMap;

/// Name of the directory the config and savestates are kept in.
pub const APP_DIR: &str = "bytepusher";
const CONFIG_FILE: &str = "config.yaml";

/// Configuration of the BytePusher app.
///
/// Everything but the runtime state is read from and written to a YAML file, see
/// [Config::default_path].
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    /// Volume multiplier, from 0 to 3
    pub volume: f32,
    /// Size of a BytePusher pixel on screen
    pub scale: u32,
    /// Keyboard controls
    pub key_map: KeyMap,
    /// Where quicksaves are written to
    pub savestate_dir: PathBuf,
    /// Whether the machine is currently paused
    #[serde(skip)]
    pub paused: bool,
    /// The last savestate written, loaded by a quickload
    #[serde(skip)]
    pub quickload_file: Option<PathBuf>,
    /// The file the current program was loaded from
    #[serde(skip)]
    pub program_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            volume: 1.0,
            scale: 3,
            key_map: KeyMap::default(),
            savestate_dir: dirs::data_dir()
                .map(|d| d.join(APP_DIR).join("savestates"))
                .unwrap_or_else(|| PathBuf::from(".")),
            paused: false,
            quickload_file: None,
            program_path: None,
        }
    }
}

impl Config {
    /// The default location of the config file, inside the platform's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }
    /// Read the config at `path`.
    ///
    /// If there is no file there, a default one is written.
    /// If the file can't be parsed the default config is used and the file is left untouched.
    pub fn load(path: &Path) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    error!("Unable to parse config {:?}, using defaults: {}", path, e);
                    Config::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Config::default();
                match config.save(path) {
                    Ok(_) => info!("Wrote default config to {:?}", path),
                    Err(e) => warn!("Unable to write default config: {}", e),
                }
                config
            }
            Err(e) => {
                error!("Unable to read config {:?}, using defaults: {}", path, e);
                Config::default()
            }
        }
    }
    /// Write the config to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        }
        let contents = serde_yaml::to_string(self).map_err(|e| e.to_string())?;
        std::fs::write(path, contents).map_err(|e| e.to_string())
    }
    /// Nudge the volume, keeping it between 0 and 3.
    pub fn change_volume(&mut self, diff: f32) {
        self.volume = (self.volume + diff).clamp(0.0, 3.0);
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::app::Key;
    use sdl3::keyboard::Keycode;

    #[test]
    fn test_partial_file() {
        let config: Config = serde_yaml::from_str("volume: 2.0\n").unwrap();
        assert_eq!(config.volume, 2.0);
        assert_eq!(config.scale, Config::default().scale);
        assert!(!config.paused);
        assert!(config.program_path.is_none());
    }

    #[test]
    fn test_volume_clamped() {
        let mut config = Config::default();
        config.change_volume(5.0);
        assert_eq!(config.volume, 3.0);
        config.change_volume(-10.0);
        assert_eq!(config.volume, 0.0);
    }

    #[test]
    fn test_runtime_state_not_saved() {
        let mut config = Config::default();
        config.paused = true;
        config.program_path = Some("game.BytePusher".into());
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("paused"));
        assert!(!yaml.contains("program_path"));
    }

    #[test]
    fn test_missing_file_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bytepusher").join("config.yaml");
        let config = Config::load(&path);
        assert_eq!(config.volume, Config::default().volume);
        assert!(path.exists());
        // The written file loads back the same
        let reloaded = Config::load(&path);
        assert_eq!(reloaded.scale, config.scale);
        assert_eq!(reloaded.key_map.pause, config.key_map.pause);
    }

    #[test]
    fn test_bad_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let contents = "volume: [this is not a number\n";
        std::fs::write(&path, contents).unwrap();
        let config = Config::load(&path);
        assert_eq!(config.volume, Config::default().volume);
        assert_eq!(config.scale, Config::default().scale);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn test_partial_key_map() {
        let config: Config = serde_yaml::from_str("scale: 2\nkey_map:\n  reset: F6\n").unwrap();
        assert_eq!(config.scale, 2);
        assert_eq!(config.key_map.reset, Key::from(Keycode::F6));
        assert_eq!(config.key_map.pause, Key::from(Keycode::P));
    }
}
