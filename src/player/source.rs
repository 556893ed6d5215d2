use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const REMOTE_SCHEME: &str = "osascript:";

/// Something the shell can open: a remote application, a stream or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// `osascript:<Application Name>`
    Remote(String),
    Stream(String),
    File(PathBuf),
}

impl MediaSource {
    pub fn remote(app_name: impl Into<String>) -> Self {
        MediaSource::Remote(app_name.into())
    }
}

impl FromStr for MediaSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(app) = s.strip_prefix(REMOTE_SCHEME) {
            return Ok(MediaSource::Remote(app.trim().to_string()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(MediaSource::Stream(s.to_string()));
        }
        Ok(MediaSource::File(PathBuf::from(s)))
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSource::Remote(app) => write!(f, "{}{}", REMOTE_SCHEME, app),
            MediaSource::Stream(url) => f.write_str(url),
            MediaSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        assert_eq!(
            "osascript:Spotify".parse::<MediaSource>().unwrap(),
            MediaSource::remote("Spotify")
        );
        assert_eq!(
            "https://radio.example/stream.mp3".parse::<MediaSource>().unwrap(),
            MediaSource::Stream("https://radio.example/stream.mp3".into())
        );
        assert_eq!(
            "/tmp/song.flac".parse::<MediaSource>().unwrap(),
            MediaSource::File(PathBuf::from("/tmp/song.flac"))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        let source = MediaSource::remote("Music");
        assert_eq!(source.to_string(), "osascript:Music");
        assert_eq!(source.to_string().parse::<MediaSource>().unwrap(), source);
    }
}
