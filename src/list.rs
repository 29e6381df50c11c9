//! Comma separated lead lists such as `0, 6, 12` or `3H,90M,1d`.
//! Tokens without a unit letter are hours.

use crate::delta::{Delta, Unit, parse_delta};
use crate::error::{Result, TimeInfoError};
use crate::format::format_compact;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeItem {
    Met(String),
    Delta(Delta),
}

fn split(value: &str) -> Vec<&str> {
    // an empty string is an empty list, not one empty token
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::trim).collect()
}

fn parse_token(token: &str) -> Result<Delta> {
    parse_delta(token, Unit::Hour).ok_or_else(|| TimeInfoError::parse("invalid time value in list", token))
}

fn seconds_of(token: &str, delta: &Delta) -> Result<i64> {
    delta
        .total_seconds(None)
        .ok_or_else(|| TimeInfoError::Indeterminate { token: token.to_string() })
}

/// Splits `value` on commas and parses each token.
///
/// With `as_compact` every item is rendered as a full `HHMMSS` token,
/// otherwise kept as a [`Delta`]. With `sort` items are ordered by their
/// length in seconds, which fails for months or years since there is no
/// reference time to measure them against.
pub fn parse_list(value: &str, as_compact: bool, sort: bool) -> Result<Vec<TimeItem>> {
    let mut keyed = Vec::new();
    for token in split(value) {
        let delta = parse_token(token)?;
        if as_compact {
            let seconds = seconds_of(token, &delta)?;
            keyed.push((Some(seconds), TimeItem::Met(format_compact(seconds, true))));
        } else {
            let seconds = if sort { Some(seconds_of(token, &delta)?) } else { None };
            keyed.push((seconds, TimeItem::Delta(delta)));
        }
    }
    if sort {
        // stable, so equal lengths keep their input order
        keyed.sort_by_key(|(seconds, _)| *seconds);
    }
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

/// Lead list as MET `HHMMSS` strings.
pub fn met_time_list(value: &str, sort: bool) -> Result<Vec<String>> {
    Ok(parse_list(value, true, sort)?
        .into_iter()
        .filter_map(|item| match item {
            TimeItem::Met(met) => Some(met),
            TimeItem::Delta(_) => None,
        })
        .collect())
}

/// Lead list as deltas.
pub fn delta_list(value: &str, sort: bool) -> Result<Vec<Delta>> {
    Ok(parse_list(value, false, sort)?
        .into_iter()
        .filter_map(|item| match item {
            TimeItem::Delta(delta) => Some(delta),
            TimeItem::Met(_) => None,
        })
        .collect())
}
