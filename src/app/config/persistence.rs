use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Automatically saved session state
/// stored in `state.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentState {
    /// 0.0 – 1.0, applied to the native player at startup
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Reopened when no source is given on the command line
    #[serde(default)]
    pub last_source: Option<String>,
}

fn default_volume() -> f32 {
    0.5
}

impl Default for PersistentState {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            last_source: None,
        }
    }
}

impl PersistentState {
    pub fn from_toml(content: &str) -> Self {
        let mut state: Self = toml::from_str(content).unwrap_or_default();
        state.volume = state.volume.clamp(0.0, 1.0);
        state
    }

    pub fn save_to(&self, path: &Path) {
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = fs::write(path, content) {
                    tracing::warn!(path = %path.display(), error = %e, "could not save state");
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not serialize state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let state = PersistentState::from_toml("");
        assert_eq!(state, PersistentState::default());
        assert_eq!(state.volume, 0.5);
    }

    #[test]
    fn test_volume_is_clamped() {
        let state = PersistentState::from_toml("volume = 3.0\nlast_source = \"osascript:Music\"");
        assert_eq!(state.volume, 1.0);
        assert_eq!(state.last_source.as_deref(), Some("osascript:Music"));
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        assert_eq!(
            PersistentState::from_toml("volume = \"loud\""),
            PersistentState::default()
        );
    }
}
