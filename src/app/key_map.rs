use sdl3::keyboard::Keycode;
use serde::{de::Visitor, Deserialize, Serialize};

/// Simple wrapper around [sdl3::keyboard::Keycode] that implements [serde::Deserialize] and [serde::Serialize].
///
/// Keys are stored by their SDL name, i.e. `"Q"`, `"Up"` or `"Left Shift"`.
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    pub code: Keycode,
}
impl From<Keycode> for Key {
    fn from(code: Keycode) -> Self {
        Key { code }
    }
}

struct KeyVisitor;
impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;
    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("the name of an SDL key")
    }
    fn visit_str<E>(self, name: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match Keycode::from_name(name) {
            Some(code) => Ok(Key { code }),
            None => Err(E::custom(format!("Can't parse key from name {}", name))),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(KeyVisitor {})
    }
}
impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let name = self.code.name();
        if name.is_empty() {
            Err(serde::ser::Error::custom(format!(
                "Unable to serialize key {:?}",
                self.code
            )))
        } else {
            serializer.serialize_str(&name)
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
/// Controls for running the BytePusher.
///
/// Map of SDL key codes to the 16 keys of the hex keypad, and to actions in the app (pause,
/// volume up, etc).
/// Bindings missing from a config file keep their default.
pub struct KeyMap {
    /// The key for each hex key, `keypad[0xA]` is the key for `A`
    pub keypad: [Key; 16],
    pub pause: Key,
    pub volume_up: Key,
    pub volume_down: Key,
    pub quicksave: Key,
    pub quickload: Key,
    /// Reload the program from disk
    pub reset: Key,
}

impl Default for KeyMap {
    /// The keypad is laid out on the left side of a QWERTY keyboard:
    /// ```text
    /// 1 2 3 4      1 2 3 C
    /// Q W E R  ->  4 5 6 D
    /// A S D F      7 8 9 E
    /// Z X C V      A 0 B F
    /// ```
    fn default() -> Self {
        macro_rules! sdl_key {
            ($key: ident) => {
                Keycode::$key.into()
            };
        }
        KeyMap {
            keypad: [
                sdl_key!(X),
                sdl_key!(_1),
                sdl_key!(_2),
                sdl_key!(_3),
                sdl_key!(Q),
                sdl_key!(W),
                sdl_key!(E),
                sdl_key!(A),
                sdl_key!(S),
                sdl_key!(D),
                sdl_key!(Z),
                sdl_key!(C),
                sdl_key!(_4),
                sdl_key!(R),
                sdl_key!(F),
                sdl_key!(V),
            ],
            pause: sdl_key!(P),
            volume_up: sdl_key!(Up),
            volume_down: sdl_key!(Down),
            quicksave: sdl_key!(F1),
            quickload: sdl_key!(F2),
            reset: sdl_key!(F5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyMap};
    use sdl3::keyboard::Keycode;

    #[test]
    fn test_key_names() {
        let key: Key = Keycode::Up.into();
        assert_eq!(serde_yaml::to_string(&key).unwrap().trim(), "Up");
        let parsed: Key = serde_yaml::from_str("Up").unwrap();
        assert_eq!(parsed, key);
        assert!(serde_yaml::from_str::<Key>("NotAKey").is_err());
    }
    #[test]
    fn test_missing_bindings_use_defaults() {
        let km: KeyMap = serde_yaml::from_str("pause: Space\n").unwrap();
        assert_eq!(km.pause, Key::from(Keycode::Space));
        assert_eq!(km.reset, KeyMap::default().reset);
        assert_eq!(km.keypad, KeyMap::default().keypad);
    }
    #[test]
    fn test_round_trip() {
        let yaml = serde_yaml::to_string(&KeyMap::default()).unwrap();
        let km: KeyMap = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(km.keypad, KeyMap::default().keypad);
        assert_eq!(km.quickload, KeyMap::default().quickload);
    }
}
