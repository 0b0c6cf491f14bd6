//! Daemon configuration.
//!
//! Layering follows file -> environment -> validation: an optional TOML file
//! named by `HANDWAVE_CONFIG` supplies overrides over built-in defaults,
//! `HANDWAVE_*` environment variables override the file, and `validate`
//! rejects unusable values before the daemon starts.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::classify::GeometryThresholds;
use crate::dispatch::ActionId;

const DEFAULT_SOURCE_URL: &str = "stub://hand_tracker";
const DEFAULT_TARGET_FPS: u32 = 30;
const DEFAULT_GESTURE_THRESHOLD: u32 = 50;
const DEFAULT_COOLDOWN_SECS: u64 = 10;

/// Gesture identifiers a mapping may bind. The two-hand dislike key keeps
/// the original spelling without the plural `s`.
pub const GESTURE_KEYS: [&str; 8] = [
    "is_like",
    "is_dislike",
    "is_stop",
    "is_okay",
    "is_two_stops",
    "is_two_likes",
    "is_two_dislike",
    "is_two_okay",
];

#[derive(Debug, Deserialize, Default)]
struct HandwavedConfigFile {
    source: Option<SourceConfigFile>,
    stabilizer: Option<StabilizerConfigFile>,
    classifier: Option<GeometryThresholds>,
    mapping: Option<HashMap<String, ActionId>>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    url: Option<String>,
    target_fps: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct StabilizerConfigFile {
    gesture_threshold: Option<u32>,
    cooldown_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct HandwavedConfig {
    pub source: SourceSettings,
    pub stabilizer: StabilizerSettings,
    pub classifier: GeometryThresholds,
    pub mapping: GestureMapping,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// Landmark source URL: `stub://...` or a path to a JSONL trace.
    pub url: String,
    /// Pacing target for the frame loop.
    pub target_fps: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct StabilizerSettings {
    /// Consecutive identical frames required to confirm a gesture.
    pub gesture_threshold: u32,
    /// Quiet period after a confirmation.
    pub cooldown: Duration,
}

impl Default for StabilizerSettings {
    fn default() -> Self {
        Self {
            gesture_threshold: DEFAULT_GESTURE_THRESHOLD,
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
        }
    }
}

impl HandwavedConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("HANDWAVE_CONFIG").ok();
        Self::load_from(config_path.as_deref().map(Path::new))
    }

    /// Load with an explicit config file path (CLI override). Environment
    /// variables still apply on top of the file.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_cfg = match path {
            Some(path) => Some(read_config_file(path)?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: HandwavedConfigFile) -> Result<Self> {
        let source = SourceSettings {
            url: file
                .source
                .as_ref()
                .and_then(|source| source.url.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            target_fps: file
                .source
                .as_ref()
                .and_then(|source| source.target_fps)
                .unwrap_or(DEFAULT_TARGET_FPS),
        };
        let stabilizer = StabilizerSettings {
            gesture_threshold: file
                .stabilizer
                .as_ref()
                .and_then(|stabilizer| stabilizer.gesture_threshold)
                .unwrap_or(DEFAULT_GESTURE_THRESHOLD),
            cooldown: Duration::from_secs(
                file.stabilizer
                    .as_ref()
                    .and_then(|stabilizer| stabilizer.cooldown_secs)
                    .unwrap_or(DEFAULT_COOLDOWN_SECS),
            ),
        };
        let classifier = file.classifier.unwrap_or_default();
        let mapping = match file.mapping {
            Some(bindings) => GestureMapping::from_bindings(bindings)?,
            None => GestureMapping::default(),
        };
        Ok(Self {
            source,
            stabilizer,
            classifier,
            mapping,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("HANDWAVE_SOURCE_URL") {
            if !url.trim().is_empty() {
                self.source.url = url;
            }
        }
        if let Ok(fps) = std::env::var("HANDWAVE_TARGET_FPS") {
            self.source.target_fps = fps
                .parse()
                .map_err(|_| anyhow!("HANDWAVE_TARGET_FPS must be an integer"))?;
        }
        if let Ok(threshold) = std::env::var("HANDWAVE_GESTURE_THRESHOLD") {
            self.stabilizer.gesture_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("HANDWAVE_GESTURE_THRESHOLD must be an integer"))?;
        }
        if let Ok(secs) = std::env::var("HANDWAVE_COOLDOWN_SECS") {
            let seconds: u64 = secs
                .parse()
                .map_err(|_| anyhow!("HANDWAVE_COOLDOWN_SECS must be an integer number of seconds"))?;
            self.stabilizer.cooldown = Duration::from_secs(seconds);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.url.trim().is_empty() {
            return Err(anyhow!("source url must not be empty"));
        }
        if self.source.target_fps == 0 {
            return Err(anyhow!("target_fps must be greater than zero"));
        }
        if self.stabilizer.gesture_threshold == 0 {
            return Err(anyhow!("gesture_threshold must be greater than zero"));
        }
        let t = &self.classifier;
        for (name, value) in [
            ("finger_margin", t.finger_margin),
            ("thumb_margin", t.thumb_margin),
            ("fist_closeness", t.fist_closeness),
            ("pinch_closeness", t.pinch_closeness),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(anyhow!("classifier {} must be in (0, 1)", name));
            }
        }
        Ok(())
    }
}

impl Default for HandwavedConfig {
    fn default() -> Self {
        Self {
            source: SourceSettings {
                url: DEFAULT_SOURCE_URL.to_string(),
                target_fps: DEFAULT_TARGET_FPS,
            },
            stabilizer: StabilizerSettings::default(),
            classifier: GeometryThresholds::default(),
            mapping: GestureMapping::default(),
        }
    }
}

/// User-editable association from gesture identifiers to action identifiers.
///
/// Gestures absent from the map, or bound to [`ActionId::None`], dispatch to
/// nothing. Class identity is never touched at runtime: remapping replaces
/// entries here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureMapping {
    bindings: HashMap<String, ActionId>,
}

impl Default for GestureMapping {
    /// The documented default mapping.
    fn default() -> Self {
        let bindings = HashMap::from([
            ("is_like".to_string(), ActionId::OpenPhotos),
            ("is_dislike".to_string(), ActionId::OpenNotes),
            ("is_stop".to_string(), ActionId::OpenCalendar),
            ("is_okay".to_string(), ActionId::TakeScreenshot),
            ("is_two_stops".to_string(), ActionId::TurnMusic),
        ]);
        Self { bindings }
    }
}

impl GestureMapping {
    /// Build a mapping from explicit bindings, rejecting unknown gesture
    /// identifiers.
    pub fn from_bindings(bindings: HashMap<String, ActionId>) -> Result<Self> {
        for key in bindings.keys() {
            if !GESTURE_KEYS.contains(&key.as_str()) {
                return Err(anyhow!("unknown gesture identifier '{}' in mapping", key));
            }
        }
        Ok(Self { bindings })
    }

    /// The configured action for a gesture identifier.
    pub fn action_for(&self, gesture_key: &str) -> Option<ActionId> {
        self.bindings.get(gesture_key).copied()
    }

    /// Bind a gesture to an action.
    pub fn bind(&mut self, gesture_key: &str, action: ActionId) -> Result<()> {
        if !GESTURE_KEYS.contains(&gesture_key) {
            return Err(anyhow!("unknown gesture identifier '{}'", gesture_key));
        }
        self.bindings.insert(gesture_key.to_string(), action);
        Ok(())
    }

    /// Remove a binding entirely (the gesture becomes unmapped).
    pub fn unbind(&mut self, gesture_key: &str) {
        self.bindings.remove(gesture_key);
    }

    /// Restore the documented default mapping.
    pub fn reset_to_default(&mut self) {
        *self = Self::default();
    }

    /// Iterate configured bindings (for status display).
    pub fn iter(&self) -> impl Iterator<Item = (&str, ActionId)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn read_config_file(path: &Path) -> Result<HandwavedConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = toml::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
