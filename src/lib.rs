//! Timeinfo – time attribute resolution for verification runs.
//!
//! Every run of a verification tool is described by a handful of related
//! times: when the forecast was *initialized*, the time it is *valid* for,
//! the forecast *lead* between the two, and an *offset* from the valid time
//! to the data assimilation cycle. Callers usually know only some of these,
//! sometimes with a wildcard standing in for "any". This crate works out
//! the rest and renders them in the forms that file name templates and
//! command line arguments expect.
//!
//! ## Modules
//! * [`delta`] – Calendar-aware durations ([`delta::Delta`]) and the token parser (`3H`, `-30M`, `1m`).
//! * [`datatype`] – Instants that may be wildcards ([`datatype::Moment`]), the lead ([`datatype::Lead`]) and the loop anchor.
//! * [`format`] – Compact `[H]HH[MM[SS]]` lead tokens and readable phrases such as `6 hours`.
//! * [`list`] – Comma separated lead lists.
//! * [`resolve`] – The attribute record ([`resolve::TimeInfo`]) and [`resolve::resolve`].
//! * [`settings`] – Run loop settings read through the `config` crate.
//!
//! ## Months and years
//! A month has no fixed length, so a [`delta::Delta`] keeps months and years
//! apart from days, hours, minutes and seconds. Reducing such a delta to
//! seconds needs a reference instant and yields `None` without one. After
//! resolution a calendar lead stays a [`datatype::Lead::Span`] while every
//! other lead becomes exact [`datatype::Lead::Seconds`].
//!
//! ## Quick Start
//! ```
//! use chrono::NaiveDate;
//! use timeinfo::datatype::{Lead, LoopBy};
//! use timeinfo::resolve::{resolve, TimeInfo};
//! let init = NaiveDate::from_ymd_opt(2014, 12, 14).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let input = TimeInfo::new().with_init(init).with_lead_hours(6).with_loop_by(LoopBy::Init);
//! let info = resolve(&input).unwrap();
//! assert_eq!(info.valid_fmt(), Some("20141214060000"));
//! assert_eq!(info.lead(), Some(Lead::Seconds(21600)));
//! assert_eq!(info.lead_string(), Some("6 hours"));
//! ```
//!
//! Resolution is a pure function of its input, so records for different
//! runs can be resolved from as many threads as needed.

pub mod datatype;
pub mod delta;
pub mod error;
pub mod format;
pub mod list;
pub mod resolve;
pub mod settings;

pub use error::{Result, TimeInfoError};
