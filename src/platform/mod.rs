//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Today's date (daily challenge)
//! - Run seeds
//! - JS bindings (wasm32 only)

use crate::daily::CivilDate;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Today's date in local time (browser) or UTC (native)
#[cfg(target_arch = "wasm32")]
pub fn today() -> CivilDate {
    let now = js_sys::Date::new_0();
    CivilDate::new(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

/// Today's date in local time (browser) or UTC (native)
#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> CivilDate {
    use std::time::{SystemTime, UNIX_EPOCH};

    let secs = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    };
    CivilDate::from_days_since_epoch(secs.div_euclid(86_400))
}

/// Fresh seed for a run's gameplay RNG
#[cfg(target_arch = "wasm32")]
pub fn entropy_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Fresh seed for a run's gameplay RNG
#[cfg(not(target_arch = "wasm32"))]
pub fn entropy_seed() -> u64 {
    rand::random()
}
