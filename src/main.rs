//! epgview - Entry Point

use clap::Parser;
use epgview::model::AppError;
use std::path::PathBuf;
use tracing::info;

/// epgview - terminal electronic program guide
#[derive(Parser, Debug)]
#[command(name = "epgview")]
#[command(version)]
#[command(about = "Browse a program guide as a scrollable channels-by-time grid")]
pub struct Args {
    /// Path to the guide JSON file
    pub guide: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file instead of the default location
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = epgview::config::load_config_with_precedence(args.config.clone())?;
        let merged = epgview::config::merge_config(config_file);
        let with_env = epgview::config::apply_env_overrides(merged);
        epgview::config::apply_cli_overrides(with_env, args.no_color, args.log_file.clone())
    };

    epgview::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let guide = epgview::source::load_guide(&args.guide)?;
    epgview::view::run_guide(guide, &config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["epgview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["epgview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_guide_path_is_required() {
        let result = Args::try_parse_from(["epgview"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_guide_only_defaults() {
        let args = Args::parse_from(["epgview", "guide.json"]);
        assert_eq!(args.guide, PathBuf::from("guide.json"));
        assert_eq!(args.config, None);
        assert!(!args.no_color);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["epgview", "guide.json", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["epgview", "guide.json", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_log_file_path() {
        let args = Args::parse_from(["epgview", "guide.json", "--log-file", "/tmp/epg.log"]);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/epg.log")));
    }

    #[test]
    fn test_unknown_flag_rejects() {
        let result = Args::try_parse_from(["epgview", "guide.json", "--follow"]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_flags_flow_through_config_precedence_chain() {
        use epgview::config::loader::ScrollSection;
        use epgview::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            no_color: Some(false),
            scroll: Some(ScrollSection {
                nudge_step: Some(4),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.params.scroll.nudge_step, 4);
        assert!(!merged.no_color);

        let args = Args::parse_from(["epgview", "g.json", "--no-color", "--log-file", "x.log"]);
        let with_cli = apply_cli_overrides(merged, args.no_color, args.log_file);
        assert!(with_cli.no_color, "CLI --no-color should win over the file");
        assert_eq!(with_cli.log_file_path, PathBuf::from("x.log"));
        assert_eq!(with_cli.params.scroll.nudge_step, 4);
    }
}
