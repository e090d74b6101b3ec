//! Harness errors
//!
//! Self-test failures are not errors: they are reported through the return
//! code. These cover the paths where the harness itself cannot continue.

use core::fmt;

use crate::harness::bootstrap::Stage;

/// Errors raised while bringing the board up or driving the external library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A bootstrap stage was run before the stages it depends on
    OutOfOrder {
        /// Stage the sequence was waiting for (`None` once complete)
        expected: Option<Stage>,
        /// Stage that was attempted
        found: Stage,
    },
    /// Bootstrap was finished while stages were still outstanding
    Incomplete(Stage),
    /// The hardware behind a stage did not come up
    Hardware(Stage),
    /// Wall clock read before it was started
    ClockNotRunning,
    /// Date or time field out of range, or unparsable
    InvalidDateTime,
    /// Non-zero status from the external library's init or cleanup
    Library(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfOrder {
                expected: Some(expected),
                found,
            } => write!(f, "bootstrap stage {found} attempted, expected {expected}"),
            Error::OutOfOrder { expected: None, found } => {
                write!(f, "bootstrap stage {found} attempted after bootstrap completed")
            }
            Error::Incomplete(stage) => write!(f, "bootstrap incomplete, {stage} not run"),
            Error::Hardware(stage) => write!(f, "{stage} failed to initialize"),
            Error::ClockNotRunning => f.write_str("wall clock not running"),
            Error::InvalidDateTime => f.write_str("invalid date/time"),
            Error::Library(code) => write!(f, "crypto library returned {code}"),
        }
    }
}
