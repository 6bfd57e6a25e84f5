use std::path::PathBuf;

use clap::Parser;

/// Terminal dashboard for event waste management.
#[derive(Debug, Parser)]
#[command(name = "ecoevent", version, about)]
pub(crate) struct Cli {
    /// Extra configuration file, applied on top of the default locations.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Event to open.
    #[arg(short, long)]
    pub event: Option<String>,

    /// Attendee shown on the rewards tab.
    #[arg(short, long)]
    pub attendee: Option<String>,

    /// Write logs to this file instead of the default location.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "ecoevent",
            "--event",
            "expo",
            "-a",
            "2",
            "--log-file",
            "/tmp/eco.log",
        ]);
        assert_eq!(cli.event.as_deref(), Some("expo"));
        assert_eq!(cli.attendee.as_deref(), Some("2"));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/eco.log")));
        assert!(cli.config.is_none());
    }
}
