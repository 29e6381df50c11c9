//! String forms of leads: the compact `[H]HH[MM[SS]]` token used on MET
//! command lines and in file names, and a readable phrase such as `6 hours`.

use crate::delta::{Delta, Unit, parse_delta, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

// zero pads after the sign, so -1 padded to 2 is "-1" and -5 padded to 3 is "-05"
fn zero_pad(value: i64, width: usize) -> String {
    if value < 0 {
        format!("-{:0>w$}", value.unsigned_abs(), w = width.saturating_sub(1))
    } else {
        format!("{:0>w$}", value, w = width)
    }
}

/// Renders seconds as `HH`, or `HHMMSS` when `force_full` is set, when
/// minutes or seconds are non-zero, or when the hour field needs more than
/// two digits (a bare `100` would read as one hour and zero minutes).
pub fn format_compact(total_seconds: i64, force_full: bool) -> String {
    let hours = total_seconds.div_euclid(SECONDS_PER_HOUR);
    let minutes = total_seconds.div_euclid(SECONDS_PER_MINUTE).rem_euclid(60);
    let seconds = total_seconds.rem_euclid(60);
    let hour_field = zero_pad(hours, 2);
    if force_full || hours.unsigned_abs() > 99 || minutes != 0 || seconds != 0 {
        format!("{}{:02}{:02}", hour_field, minutes, seconds)
    } else {
        hour_field
    }
}

/// Renders each non-zero component from years down to seconds, e.g.
/// `6 hours`, `1 day 6 hours`, or `1d6H` with `letter_only`. A single `-`
/// leads when any component is negative. A zero delta is `0 hours`,
/// `0 hour` or `0H`.
pub fn format_phrase(delta: &Delta, plural: bool, letter_only: bool) -> String {
    let parts: Vec<String> = Unit::ALL
        .iter()
        .filter(|unit| delta.component(**unit) != 0)
        .map(|unit| {
            let value = delta.component(*unit).unsigned_abs();
            if letter_only {
                format!("{}{}", value, unit.letter())
            } else if plural && value != 1 {
                format!("{} {}s", value, unit.name())
            } else {
                format!("{} {}", value, unit.name())
            }
        })
        .collect();

    if parts.is_empty() {
        return match (letter_only, plural) {
            (true, _) => "0H".to_string(),
            (false, true) => "0 hours".to_string(),
            (false, false) => "0 hour".to_string(),
        };
    }
    let sign = if delta.is_negative() { "-" } else { "" };
    let separator = if letter_only { "" } else { " " };
    format!("{}{}", sign, parts.join(separator))
}

/// Parses a token such as `3H` or `90M` and renders it for MET.
/// `None` when the token is malformed or uses months or years.
pub fn time_string_to_met_time(token: &str, default_unit: Unit, force_full: bool) -> Option<String> {
    let seconds = parse_delta(token, default_unit)?.total_seconds(None)?;
    Some(format_compact(seconds, force_full))
}
