//! Daily challenge
//!
//! The calendar date becomes a seed (`YYYYMMDD` read as an integer); one
//! Mulberry32 draw picks today's modifier. The same date yields the same
//! challenge on every device.

use serde::{Deserialize, Serialize};

use crate::sim::catalog::{Modifier, Modifiers};
use crate::sim::rng::Mulberry32;

/// Calendar date (proleptic Gregorian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Date for a count of days since 1970-01-01
    pub fn from_days_since_epoch(days: i64) -> Self {
        // Howard Hinnant's civil_from_days
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as i32;
        Self { year, month, day }
    }

    /// `YYYYMMDD`
    pub fn seed_string(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Today's challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub date: CivilDate,
    pub seed: u32,
    pub modifier: Modifier,
    /// Display identifier, e.g. `OP-261019-EXPLOSIVE`
    pub id: String,
}

impl DailyChallenge {
    pub fn for_date(date: CivilDate) -> Self {
        let seed_str = date.seed_string();
        let seed = seed_str.parse::<u32>().unwrap_or_else(|_| {
            log::warn!("Date {seed_str} does not fit a seed, using 0");
            0
        });
        let mut rng = Mulberry32::new(seed);
        let modifier = Modifier::ALL[rng.pick_index(Modifier::ALL.len())];
        let short = seed_str.get(2..).unwrap_or(&seed_str);
        let id = format!("OP-{}-{}", short, modifier.id().to_uppercase());
        Self {
            date,
            seed,
            modifier,
            id,
        }
    }

    /// Challenge for the platform's current date
    pub fn today() -> Self {
        Self::for_date(crate::platform::today())
    }

    /// Fresh modifier set with today's modifier applied
    pub fn modifiers(&self) -> Modifiers {
        let mut mods = Modifiers::default();
        self.modifier.apply(&mut mods);
        mods
    }
}
