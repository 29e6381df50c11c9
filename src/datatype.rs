// used for the instants themselves
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
// the loop anchor is read from configuration
use serde::Deserialize;

// used to print out readable forms of a data type
use std::fmt;
// used when parsing a string into a Moment
use std::str::FromStr;

use crate::delta::Delta;
use crate::error::{Result, TimeInfoError};

/// The fixed-width form used in file names: `YYYYMMDDHHMMSS`.
pub const MOMENT_FORMAT: &str = "%Y%m%d%H%M%S";
pub const WILDCARD: &str = "*";

/// An instant with one-second resolution, or the wildcard meaning "any".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Moment {
    Any,
    At(NaiveDateTime),
}

impl Moment {
    pub fn is_any(&self) -> bool {
        matches!(self, Moment::Any)
    }
    /// The concrete instant, if any.
    pub fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            Moment::Any => None,
            Moment::At(at) => Some(*at),
        }
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(at: NaiveDateTime) -> Self {
        Moment::At(at)
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Moment::Any => write!(f, "{}", WILDCARD),
            Moment::At(at) => write!(f, "{}", format_moment(at)),
        }
    }
}

impl FromStr for Moment {
    type Err = TimeInfoError;
    fn from_str(s: &str) -> Result<Moment> {
        let s = s.trim();
        if s == WILDCARD {
            return Ok(Moment::Any);
        }
        parse_moment(s).map(Moment::At)
    }
}

pub fn format_moment(at: &NaiveDateTime) -> String {
    at.format(MOMENT_FORMAT).to_string()
}

/// Reads `YYYYMMDD[HH[MM[SS]]]` (missing fields are zero) or an ISO
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_moment(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if s.chars().all(|c| c.is_ascii_digit()) {
        return match s.len() {
            8 => NaiveDate::parse_from_str(s, "%Y%m%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .ok_or_else(|| TimeInfoError::parse("invalid date", s)),
            10 | 12 | 14 => NaiveDateTime::parse_from_str(&format!("{:0<14}", s), MOMENT_FORMAT)
                .map_err(|e| TimeInfoError::parse(&e.to_string(), s)),
            _ => Err(TimeInfoError::parse("expected YYYYMMDD[HH[MM[SS]]]", s)),
        };
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| TimeInfoError::parse(&e.to_string(), s))
}

/// Shifts a `YYYYMMDDHHMMSS` timestamp by `shift` seconds.
pub fn shift_time_seconds(time: &str, shift: i64) -> Result<String> {
    let at = NaiveDateTime::parse_from_str(time, MOMENT_FORMAT)
        .map_err(|e| TimeInfoError::parse(&e.to_string(), time))?;
    TimeDelta::try_seconds(shift)
        .and_then(|delta| at.checked_add_signed(delta))
        .map(|shifted| format_moment(&shifted))
        .ok_or_else(|| TimeInfoError::OutOfRange(format!("{} shifted by {} seconds", time, shift)))
}

/// Which of init and valid is the independent variable of a run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopBy {
    Init,
    Valid,
}

impl fmt::Display for LoopBy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoopBy::Init => write!(f, "init"),
            LoopBy::Valid => write!(f, "valid"),
        }
    }
}

impl FromStr for LoopBy {
    type Err = TimeInfoError;
    fn from_str(s: &str) -> Result<LoopBy> {
        match s.trim().to_ascii_lowercase().as_str() {
            "init" | "retro" => Ok(LoopBy::Init),
            "valid" | "realtime" => Ok(LoopBy::Valid),
            _ => Err(TimeInfoError::parse("expected init or valid", s)),
        }
    }
}

/// The forecast lead as carried in a [`crate::resolve::TimeInfo`].
///
/// Before resolution a lead is a wildcard, a [`Delta`] or raw seconds. After
/// resolution it is `Seconds` when it could be collapsed exactly and stays a
/// `Span` when it carries months or years, so consumers must match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lead {
    Any,
    Span(Delta),
    Seconds(i64),
}

impl Lead {
    pub fn is_any(&self) -> bool {
        matches!(self, Lead::Any)
    }
    /// The lead as a delta; raw seconds are normalized into larger units.
    pub fn delta(&self) -> Option<Delta> {
        match self {
            Lead::Any => None,
            Lead::Span(delta) => Some(*delta),
            Lead::Seconds(seconds) => Delta::from_seconds(*seconds),
        }
    }
    /// Seconds in the lead; a wildcard anchor counts as no anchor.
    pub fn total_seconds(&self, anchor: &Moment) -> Option<i64> {
        match self {
            Lead::Any => None,
            Lead::Seconds(seconds) => Some(*seconds),
            Lead::Span(delta) => delta.total_seconds(anchor.instant()),
        }
    }
    pub fn total_hours(&self, anchor: &Moment) -> Option<i64> {
        self.total_seconds(anchor).map(|seconds| seconds / crate::delta::SECONDS_PER_HOUR)
    }
}

impl From<Delta> for Lead {
    fn from(delta: Delta) -> Self {
        Lead::Span(delta)
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Lead::Any => write!(f, "{}", WILDCARD),
            Lead::Span(delta) => write!(f, "{}", delta),
            Lead::Seconds(seconds) => write!(f, "{}", seconds),
        }
    }
}
