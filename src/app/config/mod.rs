use std::fs;
use std::path::{Path, PathBuf};

pub mod persistence;
pub mod user;

pub use persistence::PersistentState;
pub use user::UserConfig;

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("audion");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = std::fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    pub fn get_log_dir() -> PathBuf {
        Self::get_config_dir().join("logs")
    }

    /// User-provided face skins, created on first use. `None` if the
    /// directory cannot be created.
    pub fn faces_dir() -> Option<PathBuf> {
        ensure_dir(&dirs::data_dir()?.join("Audion").join("Faces"))
    }

    /// Load both config and state, writing a default config.toml if missing
    pub fn load() -> (UserConfig, PersistentState) {
        let config_path = Self::get_config_path();
        let state_path = Self::get_state_path();

        let user_config = if config_path.exists() {
            fs::read_to_string(&config_path)
                .ok()
                .and_then(|content| toml::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            let c = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&c) {
                let _ = fs::write(&config_path, content);
            }
            c
        };

        let state = fs::read_to_string(&state_path)
            .map(|content| PersistentState::from_toml(&content))
            .unwrap_or_default();

        (user_config, state)
    }
}

/// Creates `path` (and parents) if needed.
pub fn ensure_dir(path: &Path) -> Option<PathBuf> {
    if !path.is_dir() {
        if let Err(e) = fs::create_dir_all(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not create directory");
            return None;
        }
    }
    Some(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let base = std::env::temp_dir().join(format!("audion-test-{}", uuid::Uuid::new_v4()));
        let faces = base.join("Audion").join("Faces");

        assert_eq!(ensure_dir(&faces), Some(faces.clone()));
        assert!(faces.is_dir());
        // Second call finds it
        assert_eq!(ensure_dir(&faces), Some(faces.clone()));

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn test_ensure_dir_fails_under_a_file() {
        let file = std::env::temp_dir().join(format!("audion-file-{}", uuid::Uuid::new_v4()));
        fs::write(&file, b"x").unwrap();

        assert_eq!(ensure_dir(&file.join("Faces")), None);

        let _ = fs::remove_file(file);
    }

    #[test]
    fn test_default_config_round_trips() {
        let text = toml::to_string_pretty(&UserConfig::default()).unwrap();
        let parsed: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.seek_step_secs, 5.0);
        assert_eq!(parsed.keys.quit, "q");
    }
}
