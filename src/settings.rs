//! Game settings and preferences
//!
//! Read from a flat JSON file owned by the settings collaborator. The round
//! core only ever reads these; a missing or malformed file yields defaults.

use std::io;
use std::path::Path;

use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Like `from_name`, but unknown names fall back to Medium
    pub fn resolve(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using medium", s);
            Self::default()
        })
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::resolve(&name))
    }
}

/// Player character skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Skin {
    #[default]
    Robot,
    Bird,
    Plane,
}

impl Skin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Robot => "robot",
            Skin::Bird => "bird",
            Skin::Plane => "plane",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "robot" => Some(Skin::Robot),
            "bird" => Some(Skin::Bird),
            "plane" => Some(Skin::Plane),
            _ => None,
        }
    }

    /// Collision box of the player sprite (sprite size at 0.6 scale)
    pub fn hitbox(&self) -> Vec2 {
        match self {
            Skin::Robot => Vec2::new(57.6, 76.8),
            Skin::Bird => Vec2::new(51.0, 36.0),
            Skin::Plane => Vec2::new(59.4, 45.0),
        }
    }
}

impl Serialize for Skin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Skin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name).unwrap_or_else(|| {
            log::warn!("Unknown skin {:?}, using robot", name);
            Skin::default()
        }))
    }
}

/// Default master volume (percent)
pub const DEFAULT_VOLUME: u8 = 80;
/// Name used when none is configured
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Game settings/preferences
///
/// Each key is read on its own: a missing or mistyped key falls back to its
/// default without affecting the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "or_default")]
    pub difficulty: Difficulty,
    #[serde(deserialize_with = "or_default")]
    pub skin: Skin,
    /// Master volume, 0-100
    #[serde(deserialize_with = "volume_from_number")]
    pub volume: u8,
    #[serde(deserialize_with = "name_or_default")]
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            skin: Skin::Robot,
            volume: DEFAULT_VOLUME,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        log::warn!("Bad settings value ({}), using default", e);
        T::default()
    }))
}

fn volume_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        other => {
            log::warn!("Bad volume {}, using {}", other, DEFAULT_VOLUME);
            None
        }
    };
    Ok(raw
        .filter(|v| !v.is_nan())
        .map(|v| v.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(DEFAULT_VOLUME))
}

fn name_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name = match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        other => {
            log::warn!("Bad player name {}, using {:?}", other, DEFAULT_PLAYER_NAME);
            String::new()
        }
    };
    let name = name.trim();
    if name.is_empty() {
        Ok(DEFAULT_PLAYER_NAME.to_string())
    } else {
        Ok(name.to_string())
    }
}

impl Settings {
    /// Volume as a 0.0-1.0 gain
    pub fn volume_gain(&self) -> f32 {
        self.volume as f32 / 100.0
    }

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON (settings collaborator only)
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.skin, Skin::Robot);
        assert_eq!(settings.volume, 80);
        assert_eq!(settings.player_name, "Player");
    }

    #[test]
    fn test_malformed_json_gives_defaults() {
        assert_eq!(Settings::from_json("{ not json"), Settings::default());
        assert_eq!(Settings::from_json("[1, 2]"), Settings::default());
    }

    #[test]
    fn test_mistyped_key_only_resets_itself() {
        let settings = Settings::from_json(r#"{"difficulty": "hard", "volume": "loud"}"#);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.volume, 80);

        let settings = Settings::from_json(
            r#"{"difficulty": 3, "skin": "bird", "volume": 40, "player_name": false}"#,
        );
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.skin, Skin::Bird);
        assert_eq!(settings.volume, 40);
        assert_eq!(settings.player_name, "Player");
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        let settings = Settings::from_json(r#"{"difficulty": "hard"}"#);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.skin, Skin::Robot);
        assert_eq!(settings.volume, 80);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let settings =
            Settings::from_json(r#"{"difficulty": "nightmare", "skin": "dragon", "volume": 55}"#);
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.skin, Skin::Robot);
        assert_eq!(settings.volume, 55);
    }

    #[test]
    fn test_volume_clamped_and_name_trimmed() {
        let settings = Settings::from_json(r#"{"volume": 250, "player_name": "   "}"#);
        assert_eq!(settings.volume, 100);
        assert_eq!(settings.player_name, "Player");

        let settings = Settings::from_json(r#"{"volume": -3, "player_name": " Ann "}"#);
        assert_eq!(settings.volume, 0);
        assert_eq!(settings.player_name, "Ann");
    }

    #[test]
    fn test_difficulty_names_case_insensitive() {
        assert_eq!(Difficulty::from_name("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_name(" Hard "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::resolve("???"), Difficulty::Medium);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            difficulty: Difficulty::Easy,
            skin: Skin::Plane,
            volume: 30,
            player_name: "Kit".to_string(),
        };
        settings.save(&path).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"easy\""));
        assert_eq!(Settings::load(&path), settings);
    }
}
