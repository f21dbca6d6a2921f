mod cli;
mod config;
mod logger;
mod output;
mod repl;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use connscan_core::{Error, TransitNetwork, create_transit_network};
use geo::Point;
use tracing::{error, info};

use crate::cli::{Cli, Command, RouteArgs};
use crate::logger::init_logger;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.timed);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = config::resolve(&cli)?;

    let started = Instant::now();
    let network = create_transit_network(&config)?;
    if cli.timed {
        info!(
            "All data loaded and processed in {} ms",
            started.elapsed().as_millis()
        );
    }
    info!("{}", network.summary());

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let answered = repl::run(&network, std::io::stdin().lock(), std::io::stdout().lock(), cli.timed)?;
            info!("Session closed after {answered} queries");
        }
        Command::Route(args) => route(&network, &args, cli.timed)?,
        Command::Nearby { lat, lon, radius } => {
            let found = network.stops_near(Point::new(lon, lat), radius);
            println!("{}", output::render_nearby(&network, &found));
        }
        Command::Stats => println!("{}", network.summary()),
    }
    Ok(())
}

fn route(network: &TransitNetwork, args: &RouteArgs, timed: bool) -> Result<(), Error> {
    let departure = args.at.clone().unwrap_or_else(output::now_literal);

    let started = Instant::now();
    let answer = network.find_path(&args.from, &args.to, &departure, args.modes)?;
    if timed {
        info!("Query answered in {} µs", started.elapsed().as_micros());
    }

    match answer {
        Some(itinerary) => println!(
            "{}",
            output::render_itinerary(network, &itinerary, args.format, &args.from, &args.to)?
        ),
        None => println!("{}", output::render_not_found(&args.from, &args.to)),
    }
    Ok(())
}
