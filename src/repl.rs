use std::io::{self, BufRead, Write};
use std::time::Instant;

use connscan_core::{ModeFilter, TransitNetwork};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::output::{describe_planner_error, now_literal, render_itinerary, render_not_found};

/// Interactive query loop over `input`, answers go to `output`.
///
/// Ends on `quit`, `exit` or end of input and returns the number of queries
/// answered. Failed queries are reported and the loop carries on.
pub fn run<R: BufRead, W: Write>(
    network: &TransitNetwork,
    mut input: R,
    mut output: W,
    timed: bool,
) -> io::Result<usize> {
    writeln!(output, "{}", network.summary())?;
    writeln!(output, "Type 'quit' to leave.")?;

    let mut answered = 0;
    loop {
        let Some(origin) = prompt(&mut input, &mut output, "Origin: ")? else {
            break;
        };
        let Some(destination) = prompt(&mut input, &mut output, "Destination: ")? else {
            break;
        };
        let Some(departure) = prompt(
            &mut input,
            &mut output,
            "Departure (HH;MM or HH;MM;SS, blank for now): ",
        )?
        else {
            break;
        };
        let Some(modes) = prompt(
            &mut input,
            &mut output,
            "Modes (bus,train,tram,metro, blank for all): ",
        )?
        else {
            break;
        };

        let departure = if departure.is_empty() {
            now_literal()
        } else {
            departure
        };
        let modes = if modes.is_empty() {
            None
        } else {
            match modes.parse::<ModeFilter>() {
                Ok(filter) => Some(filter),
                Err(err) => {
                    writeln!(output, "Invalid query: {err}")?;
                    continue;
                }
            }
        };

        debug!("Query {origin:?} -> {destination:?} at {departure} ({modes:?})");
        let started = Instant::now();
        let answer = network.find_path(&origin, &destination, &departure, modes);
        if timed {
            info!("Query answered in {} µs", started.elapsed().as_micros());
        }

        match answer {
            Ok(Some(itinerary)) => {
                match render_itinerary(network, &itinerary, OutputFormat::Text, &origin, &destination) {
                    Ok(text) => writeln!(output, "{text}")?,
                    Err(err) => writeln!(output, "{err}")?,
                }
                answered += 1;
            }
            Ok(None) => {
                writeln!(output, "{}", render_not_found(&origin, &destination))?;
                answered += 1;
            }
            Err(err) => writeln!(output, "{}", describe_planner_error(&err))?,
        }
    }

    writeln!(output, "Bye.")?;
    Ok(answered)
}

/// Reads one trimmed line; `None` on end of input or a quit command
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }

    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Ok(None);
    }
    Ok(Some(line.to_string()))
}
