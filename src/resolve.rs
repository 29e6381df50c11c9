//! Resolution of the time attributes of a single run.
//!
//! A [`TimeInfo`] starts out as whatever the caller knows (an init time and
//! a lead, a valid time and an offset, a wildcard or two) and [`resolve`]
//! fills in everything that can be derived from it. The output can be fed
//! back in once more is known; a fully resolved record resolves to itself.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, trace};

use std::collections::BTreeMap;

use crate::datatype::{Lead, LoopBy, Moment, format_moment, parse_moment};
use crate::delta::{Delta, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::error::{Result, TimeInfoError};
use crate::format::format_phrase;

/// The attribute record handed to file name and argument substitution.
///
/// Every attribute is optional. Inputs are set with the `with_*` builders,
/// everything is read back through getters once [`resolve`] has run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeInfo {
    loop_by: Option<LoopBy>,
    init: Option<Moment>,
    valid: Option<Moment>,
    lead: Option<Lead>,
    lead_seconds: Option<i64>,
    lead_minutes: Option<i64>,
    lead_hours: Option<i64>,
    lead_string: Option<String>,
    offset: Option<i64>,
    offset_hours: Option<i64>,
    init_fmt: Option<String>,
    valid_fmt: Option<String>,
    da_init: Option<NaiveDateTime>,
    da_init_fmt: Option<String>,
    date: Option<Moment>,
    cycle: Option<NaiveDateTime>,
    now: Option<NaiveDateTime>,
    instance: Option<String>,
    custom: Option<String>,
}

impl TimeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_init(mut self, init: impl Into<Moment>) -> Self {
        self.init = Some(init.into());
        self
    }
    pub fn with_valid(mut self, valid: impl Into<Moment>) -> Self {
        self.valid = Some(valid.into());
        self
    }
    pub fn with_lead(mut self, lead: impl Into<Lead>) -> Self {
        self.lead = Some(lead.into());
        self
    }
    pub fn with_lead_seconds(mut self, seconds: i64) -> Self {
        self.lead_seconds = Some(seconds);
        self
    }
    pub fn with_lead_minutes(mut self, minutes: i64) -> Self {
        self.lead_minutes = Some(minutes);
        self
    }
    pub fn with_lead_hours(mut self, hours: i64) -> Self {
        self.lead_hours = Some(hours);
        self
    }
    /// Data assimilation offset in seconds.
    /// Must be a whole number of hours, or [`resolve`] rejects it.
    pub fn with_offset(mut self, seconds: i64) -> Self {
        self.offset = Some(seconds);
        self
    }
    /// Takes priority over [`TimeInfo::with_offset`].
    pub fn with_offset_hours(mut self, hours: i64) -> Self {
        self.offset_hours = Some(hours);
        self
    }
    pub fn with_loop_by(mut self, loop_by: LoopBy) -> Self {
        self.loop_by = Some(loop_by);
        self
    }
    /// Adds the wall clock time of the run (`YYYYMMDDHHMMSS`), the wrapper
    /// instance name (empty when not given) and a custom loop string (only
    /// when given). These ride along untouched through [`resolve`].
    pub fn with_run_context(mut self, clock_time: Option<&str>, instance: Option<&str>, custom: Option<&str>) -> Result<Self> {
        if let Some(clock_time) = clock_time {
            self.now = Some(parse_moment(clock_time)?);
        }
        self.instance = Some(instance.unwrap_or("").to_string());
        if let Some(custom) = custom {
            self.custom = Some(custom.to_string());
        }
        Ok(self)
    }

    pub fn loop_by(&self) -> Option<LoopBy> {
        self.loop_by
    }
    pub fn init(&self) -> Option<Moment> {
        self.init
    }
    pub fn valid(&self) -> Option<Moment> {
        self.valid
    }
    pub fn lead(&self) -> Option<Lead> {
        self.lead
    }
    pub fn lead_seconds(&self) -> Option<i64> {
        self.lead_seconds
    }
    pub fn lead_minutes(&self) -> Option<i64> {
        self.lead_minutes
    }
    pub fn lead_hours(&self) -> Option<i64> {
        self.lead_hours
    }
    pub fn lead_string(&self) -> Option<&str> {
        self.lead_string.as_deref()
    }
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }
    pub fn offset_hours(&self) -> Option<i64> {
        self.offset_hours
    }
    pub fn init_fmt(&self) -> Option<&str> {
        self.init_fmt.as_deref()
    }
    pub fn valid_fmt(&self) -> Option<&str> {
        self.valid_fmt.as_deref()
    }
    pub fn da_init(&self) -> Option<NaiveDateTime> {
        self.da_init
    }
    pub fn da_init_fmt(&self) -> Option<&str> {
        self.da_init_fmt.as_deref()
    }
    pub fn date(&self) -> Option<Moment> {
        self.date
    }
    pub fn cycle(&self) -> Option<NaiveDateTime> {
        self.cycle
    }
    pub fn now(&self) -> Option<NaiveDateTime> {
        self.now
    }
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }
    pub fn custom(&self) -> Option<&str> {
        self.custom.as_deref()
    }

    /// Every populated attribute as a string, keyed by the name that
    /// file name templates refer to.
    pub fn fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        let mut put = |name: &str, value: Option<String>| {
            if let Some(value) = value {
                fields.insert(name.to_string(), value);
            }
        };
        put("loop_by", self.loop_by.map(|l| l.to_string()));
        put("init", self.init.map(|m| m.to_string()));
        put("valid", self.valid.map(|m| m.to_string()));
        put("lead", self.lead.map(|l| l.to_string()));
        put("lead_seconds", self.lead_seconds.map(|v| v.to_string()));
        put("lead_minutes", self.lead_minutes.map(|v| v.to_string()));
        put("lead_hours", self.lead_hours.map(|v| v.to_string()));
        put("lead_string", self.lead_string.clone());
        put("offset", self.offset.map(|v| v.to_string()));
        put("offset_hours", self.offset_hours.map(|v| v.to_string()));
        put("init_fmt", self.init_fmt.clone());
        put("valid_fmt", self.valid_fmt.clone());
        put("da_init", self.da_init.as_ref().map(format_moment));
        put("da_init_fmt", self.da_init_fmt.clone());
        put("date", self.date.map(|m| m.to_string()));
        put("cycle", self.cycle.as_ref().map(format_moment));
        put("now", self.now.as_ref().map(format_moment));
        put("instance", self.instance.clone());
        put("custom", self.custom.clone());
        fields
    }
}

fn concrete(moment: Option<Moment>) -> Option<NaiveDateTime> {
    moment.and_then(|m| m.instant())
}

fn out_of_range(at: NaiveDateTime, what: &str) -> TimeInfoError {
    TimeInfoError::OutOfRange(format!("{} relative to {}", what, format_moment(&at)))
}

// Keeps an explicit loop_by. Two concrete instants give no hint, otherwise
// whichever of init and valid was given (wildcard or not) becomes the anchor.
fn loop_by_of(input: &TimeInfo) -> Option<LoopBy> {
    if input.loop_by.is_some() {
        return input.loop_by;
    }
    if concrete(input.init).is_some() && concrete(input.valid).is_some() {
        return None;
    }
    if input.init.is_some() {
        Some(LoopBy::Init)
    } else if input.valid.is_some() {
        Some(LoopBy::Valid)
    } else {
        None
    }
}

// None is the wildcard lead. Leads are normalized so that 90 minutes given
// as a span and as 5400 seconds read the same on every pass.
fn lead_of(input: &TimeInfo) -> Result<Option<Delta>> {
    let normalized = match input.lead {
        Some(Lead::Any) => return Ok(None),
        Some(Lead::Span(delta)) => delta.normalized(),
        Some(Lead::Seconds(seconds)) => Delta::from_seconds(seconds),
        None => {
            if let Some(seconds) = input.lead_seconds {
                Delta::from_seconds(seconds)
            } else if let Some(minutes) = input.lead_minutes {
                Delta::from_minutes(minutes)
            } else if let Some(hours) = input.lead_hours {
                Delta::from_hours(hours)
            } else if let (Some(init), Some(valid)) = (concrete(input.init), concrete(input.valid)) {
                // no lead at all, so two known instants define it
                Delta::from_seconds((valid - init).num_seconds())
            } else {
                Some(Delta::zero())
            }
        }
    };
    normalized
        .map(Some)
        .ok_or_else(|| TimeInfoError::OutOfRange("lead does not fit in a duration".to_string()))
}

fn offset_of(input: &TimeInfo) -> Result<i64> {
    match (input.offset_hours, input.offset) {
        (Some(hours), _) => hours
            .checked_mul(SECONDS_PER_HOUR)
            .ok_or_else(|| TimeInfoError::OutOfRange(format!("offset of {} hours", hours))),
        (None, Some(seconds)) if seconds % SECONDS_PER_HOUR == 0 => Ok(seconds),
        (None, Some(seconds)) => Err(TimeInfoError::OutOfRange(format!(
            "offset of {} seconds is not a whole number of hours",
            seconds
        ))),
        (None, None) => Ok(0),
    }
}

/// Fills in init or valid from the other one and the lead.
fn init_valid_of(
    init: Option<Moment>,
    valid: Option<Moment>,
    lead: Option<Delta>,
    loop_by: Option<LoopBy>,
) -> Result<(Option<Moment>, Option<Moment>, Option<LoopBy>)> {
    let wildcards = [init.is_some_and(|m| m.is_any()), valid.is_some_and(|m| m.is_any()), lead.is_none()]
        .iter()
        .filter(|w| **w)
        .count();
    if wildcards >= 2 {
        debug!(wildcards, "init, valid and lead are under-determined");
        return Ok((init, valid, loop_by));
    }
    let Some(lead) = lead else {
        trace!("lead is a wildcard, init and valid left as given");
        return Ok((init, valid, loop_by));
    };
    let forward = |at: NaiveDateTime| lead.add_to(at).map(Moment::At).ok_or_else(|| out_of_range(at, "valid time"));
    let backward = |at: NaiveDateTime| lead.sub_from(at).map(Moment::At).ok_or_else(|| out_of_range(at, "init time"));

    match (concrete(init), concrete(valid), loop_by) {
        (Some(i), Some(_), Some(LoopBy::Init)) => Ok((init, Some(forward(i)?), loop_by)),
        (Some(_), Some(v), Some(LoopBy::Valid)) => Ok((Some(backward(v)?), valid, loop_by)),
        (Some(_), Some(_), None) => Ok((init, valid, loop_by)),
        (Some(i), None, _) => Ok((init, Some(forward(i)?), loop_by.or(Some(LoopBy::Init)))),
        (None, Some(v), _) => Ok((Some(backward(v)?), valid, loop_by.or(Some(LoopBy::Valid)))),
        (None, None, _) => Ok((init, valid, loop_by)),
    }
}

/// Derives every attribute that `input` determines and returns a new record.
///
/// In order: the loop anchor, the lead (and its phrase), the offset, then
/// init or valid from the other plus the lead, their formatted forms, the
/// data assimilation time `da_init = valid + offset` with its `date` and
/// `cycle` aliases, and finally the exact lead as `valid - init`.
///
/// Wildcards are not an error: with two or more of init, valid and lead
/// unknown the record comes back partially resolved. The lead is collapsed
/// to [`Lead::Seconds`] only when it has no months or years; otherwise it
/// stays a [`Lead::Span`] and `lead_hours` and friends are left alone.
///
/// Fails when calendar arithmetic leaves chrono's supported range, when the
/// lead cannot be held in a [`Delta`], or when `offset` is not whole hours.
pub fn resolve(input: &TimeInfo) -> Result<TimeInfo> {
    let mut out = input.clone();

    let lead = lead_of(input)?;
    out.lead_string = Some(match &lead {
        None => "ALL".to_string(),
        Some(delta) => format_phrase(delta, true, false),
    });
    let offset = offset_of(input)?;

    let (init, valid, loop_by) = init_valid_of(input.init, input.valid, lead, loop_by_of(input))?;
    out.init = init;
    out.valid = valid;
    out.loop_by = loop_by;

    out.init_fmt = concrete(init).as_ref().map(format_moment);
    out.valid_fmt = concrete(valid).as_ref().map(format_moment);

    match concrete(valid) {
        Some(at) => {
            let da_init = TimeDelta::try_seconds(offset)
                .and_then(|delta| at.checked_add_signed(delta))
                .ok_or_else(|| out_of_range(at, "data assimilation time"))?;
            out.da_init = Some(da_init);
            out.da_init_fmt = Some(format_moment(&da_init));
            out.date = Some(Moment::At(da_init));
            out.cycle = Some(da_init);
        }
        None => {
            out.da_init = None;
            out.da_init_fmt = None;
            out.cycle = None;
            out.date = init;
        }
    }

    out.offset = Some(offset);
    out.offset_hours = Some(offset / SECONDS_PER_HOUR);

    out.lead = Some(lead.map_or(Lead::Any, Lead::Span));
    let (Some(delta), Some(init_at), Some(valid_at)) = (lead, concrete(init), concrete(valid)) else {
        debug!(lead_string = out.lead_string.as_deref().unwrap_or(""), "partially resolved");
        return Ok(out);
    };

    // measured between the instants, since a calendar lead has no fixed length
    let seconds = (valid_at - init_at).num_seconds();
    if !delta.is_calendar() {
        out.lead = Some(Lead::Seconds(seconds));
        out.lead_hours = Some(seconds.div_euclid(SECONDS_PER_HOUR));
        out.lead_minutes = Some(seconds.div_euclid(SECONDS_PER_MINUTE));
        out.lead_seconds = Some(seconds);
    }
    trace!(init = %format_moment(&init_at), valid = %format_moment(&valid_at), seconds, "resolved");
    Ok(out)
}
