//! Run loop settings.
//!
//! Settings come from an optional file (any format the `config` crate
//! recognises by extension) overlaid with `TIMEINFO_*` environment
//! variables, for example:
//!
//! ```toml
//! loop_by = "init"
//! begin = "2014121400"
//! end = "2014121412"
//! increment = "6H"
//! lead_seq = "0, 3, 6"
//! offset_hours = 0
//! ```

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use std::path::Path;

use crate::datatype::{LoopBy, parse_moment};
use crate::delta::Delta;
use crate::error::{Result, TimeInfoError};
use crate::list::delta_list;
use crate::resolve::TimeInfo;

pub const ENV_PREFIX: &str = "TIMEINFO";

fn default_increment() -> String {
    "6H".to_string()
}
fn default_lead_seq() -> String {
    "0".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub loop_by: LoopBy,
    /// First run time, `YYYYMMDD[HH[MM[SS]]]`.
    pub begin: String,
    /// Last run time, inclusive.
    pub end: String,
    /// Step between run times; plain numbers are seconds.
    #[serde(default = "default_increment")]
    pub increment: String,
    /// Forecast leads; plain numbers are hours.
    #[serde(default = "default_lead_seq")]
    pub lead_seq: String,
    #[serde(default)]
    pub offset_hours: i64,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        debug!(loop_by = %settings.loop_by, begin = %settings.begin, end = %settings.end, "loaded settings");
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Settings> {
        Ok(Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    /// One partial record per run time and lead, in run time order, ready
    /// for [`crate::resolve::resolve`].
    pub fn time_inputs(&self) -> Result<Vec<TimeInfo>> {
        let begin = parse_moment(&self.begin)?;
        let end = parse_moment(&self.end)?;
        if begin > end {
            return Err(TimeInfoError::Config(format!("begin {} is after end {}", self.begin, self.end)));
        }
        let increment: Delta = self.increment.parse()?;
        if increment.is_zero() || increment.is_negative() {
            return Err(TimeInfoError::Config(format!("increment must be positive: {}", self.increment)));
        }
        let leads = delta_list(&self.lead_seq, false)?;

        let mut inputs = Vec::new();
        let mut step: i64 = 0;
        loop {
            // scaled from begin, so month steps from the 31st do not drift
            let run = increment
                .scaled(step)
                .and_then(|offset| offset.add_to(begin))
                .ok_or_else(|| TimeInfoError::OutOfRange(format!("{} steps of {}", step, self.increment)))?;
            if run > end {
                break;
            }
            for lead in &leads {
                let input = TimeInfo::new()
                    .with_loop_by(self.loop_by)
                    .with_lead(*lead)
                    .with_offset_hours(self.offset_hours);
                inputs.push(match self.loop_by {
                    LoopBy::Init => input.with_init(run),
                    LoopBy::Valid => input.with_valid(run),
                });
            }
            step += 1;
        }
        debug!(runs = step, records = inputs.len(), "expanded run loop");
        Ok(inputs)
    }
}
