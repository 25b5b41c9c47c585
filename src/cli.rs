use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skypulse",
    version,
    about = "Terminal weather and air-quality dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup and write config.yaml
    Init,
    /// Validate config and test each weather service
    Check,
    /// Print a one-shot report for a city or coordinates
    Show {
        /// City name to look up (defaults to home, then the fallback city)
        city: Option<String>,

        /// Latitude, used together with --lon
        #[arg(long, requires = "lon", conflicts_with = "city", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude, used together with --lat
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Use the calm display mode
        #[arg(long)]
        calm: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List geocoding candidates for a place name
    Search {
        query: String,
    },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "skypulse=debug,info",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["skypulse"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn parses_show_with_coordinates() {
        let cli =
            Cli::try_parse_from(["skypulse", "show", "--lat", "-33.87", "--lon", "151.2", "--json"])
                .unwrap();
        match cli.command {
            Some(Commands::Show {
                city,
                lat,
                lon,
                calm,
                json,
            }) => {
                assert!(city.is_none());
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.2));
                assert!(!calm);
                assert!(json);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["skypulse", "show", "--lat", "10"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["skypulse", "-vv", "search", "Paris"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_filter(), "trace");
        assert!(matches!(cli.command, Some(Commands::Search { ref query }) if query == "Paris"));
    }
}
