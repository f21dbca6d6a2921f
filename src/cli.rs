use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use connscan_core::ModeFilter;

/// Earliest-arrival journey planner over multi-operator timetable feeds
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML file with feed locations and network parameters
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Feed directory, or a root holding one directory per operator. Repeatable.
    #[arg(long = "feed", global = true)]
    pub feeds: Vec<PathBuf>,
    /// Longest walking transfer between two stops, meters
    #[arg(long, global = true)]
    pub max_foot_distance: Option<f64>,
    /// Average walking speed, meters per second
    #[arg(long, global = true)]
    pub walking_speed: Option<f64>,
    /// Stops per ball tree leaf
    #[arg(long = "leaf-size", global = true)]
    pub leaf_capacity: Option<usize>,
    /// Report build phase and query timings
    #[arg(long, global = true)]
    pub timed: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Prompt for queries until `quit` or end of input
    Interactive,
    /// Answer a single query
    Route(RouteArgs),
    /// List the stops around a coordinate
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search radius, meters
        #[arg(long, default_value_t = 500.0)]
        radius: f64,
    },
    /// Print the size of the loaded network
    Stats,
}

#[derive(Debug, Clone, Args)]
pub struct RouteArgs {
    /// Origin stop name
    #[arg(long)]
    pub from: String,
    /// Destination stop name
    #[arg(long)]
    pub to: String,
    /// Departure time as HH;MM or HH;MM;SS, defaults to now
    #[arg(long)]
    pub at: Option<String>,
    /// Comma separated modes to ride, e.g. `bus,tram`. All modes when absent.
    #[arg(long)]
    pub modes: Option<ModeFilter>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Geojson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["connscan", "--feed", "data"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.feeds, vec![PathBuf::from("data")]);
        assert!(!cli.timed);
    }

    #[test]
    fn parses_route_queries() {
        let cli = Cli::try_parse_from([
            "connscan",
            "route",
            "--from",
            "Alpha",
            "--to",
            "Gamma",
            "--at",
            "08;00",
            "--modes",
            "bus,tram",
            "--format",
            "geojson",
            "--leaf-size",
            "8",
        ])
        .unwrap();

        assert_eq!(cli.leaf_capacity, Some(8));
        let Some(Command::Route(args)) = cli.command else {
            panic!("expected the route command");
        };
        assert_eq!(args.from, "Alpha");
        assert_eq!(args.at.as_deref(), Some("08;00"));
        assert_eq!(args.modes, Some("bus,tram".parse().unwrap()));
        assert_eq!(args.format, OutputFormat::Geojson);
    }

    #[test]
    fn rejects_unknown_modes() {
        let result = Cli::try_parse_from([
            "connscan", "route", "--from", "A", "--to", "B", "--modes", "ferry",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn nearby_accepts_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["connscan", "nearby", "--lat", "-33.9", "--lon", "-70.6"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Nearby { radius, .. }) if radius == 500.0
        ));
    }
}
