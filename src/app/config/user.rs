use serde::{Deserialize, Serialize};

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub keys: crate::app::keys::KeyConfig,
    /// Seconds jumped by the seek keys
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: f64,
    /// Fraction of full volume per volume key press
    #[serde(default = "default_volume_step")]
    pub volume_step: f32,
    /// How often the card's clock is refreshed
    #[serde(default = "default_observer_interval")]
    pub observer_interval_ms: u64,
}

fn default_seek_step() -> f64 {
    5.0
}

fn default_volume_step() -> f32 {
    0.05
}

fn default_observer_interval() -> u64 {
    500
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            keys: crate::app::keys::KeyConfig::default(),
            seek_step_secs: default_seek_step(),
            volume_step: default_volume_step(),
            observer_interval_ms: default_observer_interval(),
        }
    }
}
