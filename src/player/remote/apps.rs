use std::path::Path;
use std::process::Command;

/// An application we know how to drive over the scripting bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteApp {
    pub bundle_id: &'static str,
    pub name: &'static str,
    /// Reports track duration in milliseconds even though its dictionary
    /// documents seconds.
    pub reports_duration_in_ms: bool,
}

pub const KNOWN_APPS: &[RemoteApp] = &[
    RemoteApp {
        bundle_id: "com.apple.Music",
        name: "Music",
        reports_duration_in_ms: false,
    },
    RemoteApp {
        bundle_id: "com.spotify.client",
        name: "Spotify",
        reports_duration_in_ms: true,
    },
    RemoteApp {
        bundle_id: "com.apple.iTunes",
        name: "iTunes",
        reports_duration_in_ms: false,
    },
];

/// AppleScript resolves application names case-insensitively, so do we.
pub fn find_by_name(app_name: &str) -> Option<&'static RemoteApp> {
    KNOWN_APPS
        .iter()
        .find(|app| app.name.eq_ignore_ascii_case(app_name))
}

pub fn reports_duration_in_ms(app_name: &str) -> bool {
    find_by_name(app_name).is_some_and(|app| app.reports_duration_in_ms)
}

/// Names of the known applications installed on this machine, in
/// catalogue order. Uses Spotlight, so nothing is found off macOS.
pub fn installed_apps() -> Vec<String> {
    KNOWN_APPS
        .iter()
        .filter_map(|app| locate_bundle(app.bundle_id))
        .collect()
}

fn locate_bundle(bundle_id: &str) -> Option<String> {
    let query = format!("kMDItemCFBundleIdentifier == '{}'", bundle_id);
    let output = Command::new("mdfind").arg(query).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .find_map(app_name_from_bundle_path)
}

/// `/Applications/Spotify.app` → `Spotify`
pub fn app_name_from_bundle_path(path: &str) -> Option<String> {
    let path = Path::new(path.trim());
    if path.extension()? != "app" {
        return None;
    }
    path.file_stem().map(|s| s.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_spotify_reports_ms() {
        assert!(reports_duration_in_ms("Spotify"));
        assert!(!reports_duration_in_ms("Music"));
        assert!(!reports_duration_in_ms("Winamp"));
    }

    #[test]
    fn test_names_match_case_insensitively() {
        assert!(reports_duration_in_ms("spotify"));
        assert_eq!(find_by_name("MUSIC").map(|a| a.bundle_id), Some("com.apple.Music"));
    }

    #[test]
    fn test_app_name_from_bundle_path() {
        assert_eq!(
            app_name_from_bundle_path("/Applications/Spotify.app\n"),
            Some("Spotify".to_string())
        );
        assert_eq!(
            app_name_from_bundle_path("/System/Applications/Music.app"),
            Some("Music".to_string())
        );
        assert_eq!(app_name_from_bundle_path("/usr/bin/true"), None);
    }
}
