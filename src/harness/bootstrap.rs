//! Hardware bootstrap ordering
//!
//! The board comes up in a fixed order:
//!
//! ```text
//! Pins -> Clocks -> Peripherals -> Console -> Rtc -> Entropy
//! ```
//!
//! Every stage depends on the ones before it: the console needs clocked
//! peripherals, and the clock and TRNG are only read once the console can
//! report problems. [`Bootstrap`] enforces that order at runtime; the
//! firmware feeds each stage's init closure through [`Bootstrap::step`].

use core::fmt;

use crate::Error;

/// One step of the bring-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Pad and pin singletons
    Pins,
    /// System and peripheral clocks
    Clocks,
    /// Peripheral ownership and interrupt bindings
    Peripherals,
    /// Debug console
    Console,
    /// Wall clock started
    Rtc,
    /// True random number generator started
    Entropy,
}

impl Stage {
    /// All stages in bring-up order
    pub const ORDER: [Stage; 6] = [
        Stage::Pins,
        Stage::Clocks,
        Stage::Peripherals,
        Stage::Console,
        Stage::Rtc,
        Stage::Entropy,
    ];

    /// Stage that follows this one, `None` after the last
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Pins => Some(Stage::Clocks),
            Stage::Clocks => Some(Stage::Peripherals),
            Stage::Peripherals => Some(Stage::Console),
            Stage::Console => Some(Stage::Rtc),
            Stage::Rtc => Some(Stage::Entropy),
            Stage::Entropy => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Stage::Pins => "pins",
            Stage::Clocks => "clocks",
            Stage::Peripherals => "peripherals",
            Stage::Console => "console",
            Stage::Rtc => "rtc",
            Stage::Entropy => "trng",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracks which bootstrap stage may run next
#[derive(Debug)]
pub struct Bootstrap {
    next: Option<Stage>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrap {
    /// A fresh sequence, waiting for [`Stage::Pins`]
    pub const fn new() -> Self {
        Self {
            next: Some(Stage::Pins),
        }
    }

    /// Runs `init` for `stage` if it is the next one due.
    ///
    /// The sequence only advances when `init` succeeds, so a failed stage can
    /// not be skipped over.
    pub fn step<T>(&mut self, stage: Stage, init: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
        if self.next != Some(stage) {
            return Err(Error::OutOfOrder {
                expected: self.next,
                found: stage,
            });
        }

        debug!("bootstrap: {}", stage);
        let out = init()?;
        self.next = stage.next();
        Ok(out)
    }

    /// Stage that has to run next, `None` once complete
    pub fn pending(&self) -> Option<Stage> {
        self.next
    }

    /// True once every stage has run
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    /// Consumes the sequence, failing if any stage is outstanding
    pub fn finish(self) -> Result<(), Error> {
        match self.next {
            None => {
                info!("bootstrap complete");
                Ok(())
            }
            Some(stage) => Err(Error::Incomplete(stage)),
        }
    }
}
