//! Platform adapter
//!
//! The external crypto library expects three hooks from the platform: a
//! floating-point elapsed time, a `time()`-style integer timestamp and a
//! block random fill. [`Platform`] owns the wall clock and the entropy source
//! and provides all three; the firmware exports them over the C ABI.

pub mod clock;
pub mod datetime;
pub mod hooks;
pub mod random;

pub use clock::{approx_epoch_secs, SoftRtc, Uptime, WallClock};
pub use datetime::DateTime;
pub use random::{fill_block, RandomWord, WordSource};

/// Wall clock and entropy source brought up during bootstrap
pub struct Platform<C, S> {
    clock: C,
    entropy: S,
}

impl<C, S> Platform<C, S>
where
    C: WallClock,
    S: WordSource,
{
    pub fn new(clock: C, entropy: S) -> Self {
        Self { clock, entropy }
    }

    /// Approximate seconds since the epoch.
    ///
    /// `reset` is accepted for interface compatibility; the clock cannot be
    /// reset. An unreadable clock reads as 0.
    pub fn current_time(&self, _reset: bool) -> f64 {
        match self.clock.now() {
            Ok(now) => approx_epoch_secs(&now),
            Err(e) => {
                warn!("wall clock unreadable: {}", e);
                0.0
            }
        }
    }

    /// [`Self::current_time`] truncated to whole seconds. Times before the
    /// epoch saturate to 0.
    pub fn custom_time(&self) -> u64 {
        self.current_time(false) as u64
    }

    /// One word straight from the entropy source
    pub fn random_word(&mut self) -> Result<S::Word, S::Error> {
        self.entropy.next_word()
    }

    /// Overwrites all of `out` with random bytes
    pub fn random_block(&mut self, out: &mut [u8]) -> Result<(), S::Error> {
        fill_block(&mut self.entropy, out)
    }
}
