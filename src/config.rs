//! Build-time configuration
//!
//! # Run mode
//! - default: single-shot
//! - feature `continuous`: loop until the self-test fails
//! - feature `iteration-cap`: loop at most [`LOOP_ITERATION_CAP`] times
//!
//! # Wall clock
//! `HARNESS_RTC_START` (`YYYY-MM-DD HH:MM:SS`) set at build time overrides
//! [`DEFAULT_RTC_START`].

use embassy_time::Duration;

use crate::harness::RunMode;
use crate::platform::DateTime;
use crate::Error;

/// Wait before each loop iteration, so serial output right after boot is
/// not dropped
pub const LOOP_DELAY: Duration = Duration::from_secs(1);

/// Iterations before the loop stops when `iteration-cap` is enabled
pub const LOOP_ITERATION_CAP: u32 = 2;

/// Date the software RTC starts at when none is configured
pub const DEFAULT_RTC_START: DateTime = DateTime {
    year: 2022,
    month: 1,
    day: 1,
    hour: 0,
    minute: 0,
    second: 0,
};

/// Build-time settings the firmware runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HarnessConfig {
    /// Single shot or continuous loop
    pub mode: RunMode,
    /// Date and time the software RTC counts from
    pub rtc_start: DateTime,
}

impl HarnessConfig {
    /// Configuration selected by cargo features and build environment
    pub fn from_build_env() -> Result<Self, Error> {
        Self::resolve(option_env!("HARNESS_RTC_START"))
    }

    fn resolve(rtc_start: Option<&str>) -> Result<Self, Error> {
        let rtc_start = match rtc_start {
            Some(s) => DateTime::parse(s.trim())?,
            None => DEFAULT_RTC_START,
        };

        Ok(Self {
            mode: default_mode(),
            rtc_start,
        })
    }
}

fn default_mode() -> RunMode {
    if cfg!(feature = "continuous") {
        RunMode::Continuous {
            delay: LOOP_DELAY,
            max_iterations: cfg!(feature = "iteration-cap").then_some(LOOP_ITERATION_CAP),
        }
    } else {
        RunMode::SingleShot
    }
}
