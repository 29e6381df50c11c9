//! Calendar-aware durations.
//!
//! A [`Delta`] keeps years and months apart from the fixed-length units,
//! because a month has no fixed number of seconds. Fixed parts can always
//! be reduced to seconds; calendar parts only against a reference instant.

// used for the calendar arithmetic
use chrono::{Months, NaiveDateTime, TimeDelta};
// the token grammar is compiled once
use lazy_static::lazy_static;
use regex::Regex;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TimeInfoError};
use crate::format::format_phrase;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"^(-)?(\d+)([A-Za-z]*)$").unwrap();
}

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_DAY: i64 = 86400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// Units from largest to smallest, the order in which phrases are built.
    pub const ALL: [Unit; 6] = [Unit::Year, Unit::Month, Unit::Day, Unit::Hour, Unit::Minute, Unit::Second];

    pub fn from_letter(letter: &str) -> Option<Unit> {
        match letter {
            "Y" => Some(Unit::Year),
            "m" => Some(Unit::Month),
            "d" => Some(Unit::Day),
            "H" => Some(Unit::Hour),
            "M" => Some(Unit::Minute),
            "S" => Some(Unit::Second),
            _ => None,
        }
    }
    pub fn letter(&self) -> char {
        match self {
            Unit::Year => 'Y',
            Unit::Month => 'm',
            Unit::Day => 'd',
            Unit::Hour => 'H',
            Unit::Minute => 'M',
            Unit::Second => 'S',
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl Delta {
    pub fn zero() -> Self {
        Self::default()
    }
    pub fn of(unit: Unit, value: i64) -> Self {
        let mut delta = Self::zero();
        match unit {
            Unit::Year => delta.years = value,
            Unit::Month => delta.months = value,
            Unit::Day => delta.days = value,
            Unit::Hour => delta.hours = value,
            Unit::Minute => delta.minutes = value,
            Unit::Second => delta.seconds = value,
        }
        delta
    }
    pub fn new(years: i64, months: i64, days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self { years, months, days, hours, minutes, seconds }
    }
    // The integer constructors carry overflowing units upward, so that
    // 21600 seconds reads as 6 hours and 48 hours as 2 days.
    pub fn from_seconds(seconds: i64) -> Option<Self> {
        Self::of(Unit::Second, seconds).normalized()
    }
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::of(Unit::Minute, minutes).normalized()
    }
    pub fn from_hours(hours: i64) -> Option<Self> {
        Self::of(Unit::Hour, hours).normalized()
    }

    pub fn component(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Year => self.years,
            Unit::Month => self.months,
            Unit::Day => self.days,
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
            Unit::Second => self.seconds,
        }
    }
    pub fn years(&self) -> i64 {
        self.years
    }
    pub fn months(&self) -> i64 {
        self.months
    }
    pub fn is_zero(&self) -> bool {
        Unit::ALL.iter().all(|u| self.component(*u) == 0)
    }
    /// True when months or years are set, i.e. the length depends on where it is applied.
    pub fn is_calendar(&self) -> bool {
        self.years != 0 || self.months != 0
    }
    pub fn is_negative(&self) -> bool {
        Unit::ALL.iter().any(|u| self.component(*u) < 0)
    }

    /// Carries seconds into minutes, minutes into hours, hours into days and
    /// months into years. Days are never carried into months. `None` when a
    /// carry overflows the next component.
    pub fn normalized(&self) -> Option<Self> {
        fn carry(value: &mut i64, next: &mut i64, limit: u64) -> Option<()> {
            let magnitude = value.unsigned_abs();
            if magnitude >= limit {
                let sign = value.signum();
                // both quotient and remainder fit in i64 since limit >= 2
                let quotient = i64::try_from(magnitude / limit).ok()?;
                let remainder = i64::try_from(magnitude % limit).ok()?;
                *next = next.checked_add(quotient * sign)?;
                *value = remainder * sign;
            }
            Some(())
        }
        let mut d = *self;
        carry(&mut d.seconds, &mut d.minutes, 60)?;
        carry(&mut d.minutes, &mut d.hours, 60)?;
        carry(&mut d.hours, &mut d.days, 24)?;
        carry(&mut d.months, &mut d.years, 12)?;
        Some(d)
    }

    /// Every component negated, `None` if one of them is `i64::MIN`.
    pub fn checked_neg(&self) -> Option<Self> {
        Some(Self {
            years: self.years.checked_neg()?,
            months: self.months.checked_neg()?,
            days: self.days.checked_neg()?,
            hours: self.hours.checked_neg()?,
            minutes: self.minutes.checked_neg()?,
            seconds: self.seconds.checked_neg()?,
        })
    }

    /// Every component multiplied by `factor`, `None` on overflow.
    pub fn scaled(&self, factor: i64) -> Option<Self> {
        Some(Self {
            years: self.years.checked_mul(factor)?,
            months: self.months.checked_mul(factor)?,
            days: self.days.checked_mul(factor)?,
            hours: self.hours.checked_mul(factor)?,
            minutes: self.minutes.checked_mul(factor)?,
            seconds: self.seconds.checked_mul(factor)?,
        })
    }

    fn fixed_seconds(&self) -> Option<i64> {
        self.days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(self.hours.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(self.minutes.checked_mul(SECONDS_PER_MINUTE)?)?
            .checked_add(self.seconds)
    }

    /// Applies the delta to an instant: months and years first (clamping the
    /// day to the end of a shorter month), then the fixed part.
    pub fn add_to(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let shifted = if months > 0 {
            at.checked_add_months(Months::new(u32::try_from(months).ok()?))?
        } else if months < 0 {
            at.checked_sub_months(Months::new(u32::try_from(months.checked_neg()?).ok()?))?
        } else {
            at
        };
        shifted.checked_add_signed(TimeDelta::try_seconds(self.fixed_seconds()?)?)
    }
    pub fn sub_from(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        self.checked_neg()?.add_to(at)
    }

    /// Reduces the delta to seconds.
    ///
    /// With an anchor the result is `anchor - (anchor - delta)`, which gives
    /// months and years their actual length just before the anchor. Without
    /// one, a delta with months or years is indeterminate and yields `None`.
    pub fn total_seconds(&self, anchor: Option<NaiveDateTime>) -> Option<i64> {
        match anchor {
            Some(at) => {
                let earlier = self.sub_from(at)?;
                Some((at - earlier).num_seconds())
            }
            None if self.is_calendar() => None,
            None => self.fixed_seconds(),
        }
    }
    /// Whole hours, truncated toward zero so -1.5 hours is -1 and not -2.
    pub fn total_hours(&self, anchor: Option<NaiveDateTime>) -> Option<i64> {
        self.total_seconds(anchor).map(|seconds| seconds / SECONDS_PER_HOUR)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_phrase(self, true, true))
    }
}

/// Parses `[-]<digits>[unit letter]`, e.g. `3H`, `-30M`, `1m`, `3600`.
///
/// A token without a letter is read in `default_unit`. Malformed tokens and
/// unknown letters give `None`. The result has exactly one component set.
pub fn parse_delta(token: &str, default_unit: Unit) -> Option<Delta> {
    let captures = TOKEN.captures(token.trim())?;
    let magnitude = captures.get(2)?.as_str().parse::<i64>().ok()?;
    let value = if captures.get(1).is_some() { -magnitude } else { magnitude };
    let unit = match captures.get(3).map(|m| m.as_str()).unwrap_or("") {
        "" => default_unit,
        letter => Unit::from_letter(letter)?,
    };
    Some(Delta::of(unit, value))
}

/// Parses a token and reduces it to seconds, see [`Delta::total_seconds`].
pub fn seconds_from_string(token: &str, default_unit: Unit, anchor: Option<NaiveDateTime>) -> Option<i64> {
    parse_delta(token, default_unit)?.total_seconds(anchor)
}

// Tokens without a unit letter are seconds.
impl FromStr for Delta {
    type Err = TimeInfoError;
    fn from_str(s: &str) -> Result<Delta> {
        parse_delta(s, Unit::Second)
            .ok_or_else(|| TimeInfoError::parse("expected [-]<digits>[Y|m|d|H|M|S]", s))
    }
}
