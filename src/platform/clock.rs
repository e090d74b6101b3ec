//! Wall clock
//!
//! The RP2350 has no calendar RTC driver, so the wall clock is a software RTC:
//! a configured start date plus the uptime reported by the time driver.
//!
//! # Seconds since epoch
//! The crypto library only needs a rough timestamp (certificate validity
//! windows, benchmark timing). The conversion uses fixed-length years and
//! months and ignores leap years:
//!
//! ```text
//! year   = 365.25 days   = 31_557_600 s
//! month  = 30.4375 days  =  2_629_800 s
//! day    =                     86_400 s
//! ```
//!
//! Dates drift from the true Unix time by up to a few days. This is the
//! value the library's timestamps are checked against, keep it as is.

use super::datetime::DateTime;
use crate::Error;

pub const SECS_PER_YEAR: i64 = 31_557_600;
pub const SECS_PER_MONTH: i64 = 2_629_800;
pub const SECS_PER_DAY: i64 = 86_400;

/// Source of the current date and time
pub trait WallClock {
    fn now(&self) -> Result<DateTime, Error>;
}

/// Whole seconds since the time driver started
pub trait Uptime {
    fn uptime_secs(&self) -> u64;
}

/// Approximate seconds since 1970-01-01 using the fixed-length constants
/// above. Not calendar exact.
pub fn approx_epoch_secs(dt: &DateTime) -> f64 {
    let secs = (i64::from(dt.year) - 1970) * SECS_PER_YEAR
        + (i64::from(dt.month) - 1) * SECS_PER_MONTH
        + (i64::from(dt.day) - 1) * SECS_PER_DAY
        + i64::from(dt.hour) * 3600
        + i64::from(dt.minute) * 60
        + i64::from(dt.second);
    secs as f64
}

/// Software RTC anchored at a start date
pub struct SoftRtc<U> {
    uptime: U,
    start: DateTime,
    /// Uptime at the moment the clock was started
    base: Option<u64>,
}

impl<U: Uptime> SoftRtc<U> {
    /// A stopped clock that will read `start` once started
    pub fn new(uptime: U, start: DateTime) -> Result<Self, Error> {
        start.validate()?;
        Ok(Self {
            uptime,
            start,
            base: None,
        })
    }

    /// Starts counting from the start date. Restarting rewinds to it.
    pub fn start(&mut self) {
        let base = self.uptime.uptime_secs();
        info!("rtc started at {} (uptime {}s)", self.start, base);
        self.base = Some(base);
    }

    pub fn is_running(&self) -> bool {
        self.base.is_some()
    }
}

impl<U: Uptime> WallClock for SoftRtc<U> {
    fn now(&self) -> Result<DateTime, Error> {
        let base = self.base.ok_or(Error::ClockNotRunning)?;
        let elapsed = self.uptime.uptime_secs().saturating_sub(base);
        self.start.add_secs(elapsed)
    }
}
