use std::fmt::Write as _;

use chrono::Local;
use connscan_core::{Error, Itinerary, PlannerError, StopIdx, TransitNetwork};

use crate::cli::OutputFormat;

/// Current local time as a query literal
pub fn now_literal() -> String {
    Local::now().format("%H;%M;%S").to_string()
}

pub fn render_itinerary(
    network: &TransitNetwork,
    itinerary: &Itinerary,
    format: OutputFormat,
    origin: &str,
    destination: &str,
) -> Result<String, Error> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Path from {} to {}:\n{itinerary}",
            origin.trim(),
            destination.trim()
        )),
        OutputFormat::Json => itinerary.to_json_string(),
        OutputFormat::Geojson => itinerary.to_geojson_string(network),
    }
}

pub fn render_not_found(origin: &str, destination: &str) -> String {
    format!(
        "No path found from {} to {}",
        origin.trim(),
        destination.trim()
    )
}

pub fn describe_planner_error(err: &PlannerError) -> String {
    if err.is_invalid_input() {
        format!("Invalid query: {err}")
    } else {
        format!("Network data error: {err}")
    }
}

/// One line per stop: distance, name and id
pub fn render_nearby(network: &TransitNetwork, found: &[(StopIdx, f64)]) -> String {
    if found.is_empty() {
        return "No stops in range".to_string();
    }

    let mut text = String::new();
    for &(stop, distance) in found {
        let Some(data) = network.stop(stop) else {
            continue;
        };
        let _ = writeln!(text, "{distance:>7.0} m  {} ({})", data.name, data.stop_id);
    }
    text.truncate(text.trim_end().len());
    text
}
