use clap::Parser;

/// Audion - play local audio or remote-control Spotify / Music from your terminal 🎵
#[derive(Parser, Debug)]
#[command(name = "audion", version, about)]
pub struct Args {
    /// File path, http(s) URL, or `osascript:<App>` to drive a running player
    pub source: Option<String>,

    /// Remote-control this application (shorthand for `osascript:<APP>`)
    #[arg(long, short = 'a', conflicts_with = "source")]
    pub app: Option<String>,

    /// List the supported remote applications installed on this Mac
    #[arg(long)]
    pub list_apps: bool,

    /// Print (creating it if needed) the folder for custom faces
    #[arg(long)]
    pub faces_dir: bool,

    /// Log level written to the log file
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The source requested on the command line, if any.
    pub fn requested_source(&self) -> Option<String> {
        match (&self.app, &self.source) {
            (Some(app), _) => Some(format!("osascript:{}", app)),
            (None, source) => source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_flag_becomes_remote_source() {
        let args = Args::parse_from(["audion", "--app", "Spotify"]);
        assert_eq!(args.requested_source().as_deref(), Some("osascript:Spotify"));
    }

    #[test]
    fn test_positional_source() {
        let args = Args::parse_from(["audion", "/music/a.flac"]);
        assert_eq!(args.requested_source().as_deref(), Some("/music/a.flac"));
        assert_eq!(args.log_level, "info");
    }
}
