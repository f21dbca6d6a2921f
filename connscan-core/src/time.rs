//! Conversions between clock strings and [`Time`] seconds.

use crate::{PlannerError, Time};

/// Parses a query time literal: `HH;MM` or `HH;MM;SS`, two digits per field.
///
/// Hours above 23 are accepted to reach trips past midnight, minutes and
/// seconds must stay below 60.
pub fn parse_query_time(literal: &str) -> Result<Time, PlannerError> {
    let invalid = || PlannerError::InvalidTime(literal.to_string());

    let fields: Vec<&str> = literal.split(';').collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(invalid());
    }

    let mut values = [0_u32; 3];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = two_digits(field).ok_or_else(invalid)?;
    }

    let [hours, minutes, seconds] = values;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    Ok(hours * 3600 + minutes * 60 + seconds)
}

/// Parses a feed time in `H:MM:SS` / `HH:MM:SS` form. Hours may exceed 23,
/// minutes and seconds may not. Values that overflow [`Time`] are rejected.
pub fn parse_feed_time(time_str: &str) -> Option<Time> {
    let bytes = time_str.trim().as_bytes();

    // Fast path for HH:MM:SS format
    if bytes.len() == 8 && bytes[2] == b':' && bytes[5] == b':' {
        let hours = digit_pair(bytes[0], bytes[1])?;
        let minutes = digit_pair(bytes[3], bytes[4])?;
        let seconds = digit_pair(bytes[6], bytes[7])?;
        return clock_seconds(hours, minutes, seconds);
    }

    let mut parts = time_str.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: u32 = match parts.next() {
        Some(part) => part.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    clock_seconds(hours, minutes, seconds)
}

fn clock_seconds(hours: u32, minutes: u32, seconds: u32) -> Option<Time> {
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)
}

/// Renders seconds as `HH:MM:SS`. Hours are not wrapped at midnight, so
/// `91800` renders as `25:30:00`.
pub fn format_time(time: Time) -> String {
    let hours = time / 3600;
    let minutes = (time % 3600) / 60;
    let seconds = time % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn two_digits(field: &str) -> Option<u32> {
    match field.as_bytes() {
        [tens, units] => digit_pair(*tens, *units),
        _ => None,
    }
}

fn digit_pair(tens: u8, units: u8) -> Option<u32> {
    if tens.is_ascii_digit() && units.is_ascii_digit() {
        Some(u32::from(tens - b'0') * 10 + u32::from(units - b'0'))
    } else {
        None
    }
}
