//! embassy-time backed clock sources

use crypt_self_test::harness::Pace;
use crypt_self_test::platform::Uptime;
use embassy_time::{Duration, Instant, Timer};

/// Uptime from the RP2350 time driver
pub struct EmbassyUptime;

impl Uptime for EmbassyUptime {
    fn uptime_secs(&self) -> u64 {
        Instant::now().as_secs()
    }
}

/// Paces the self-test loop with the embassy timer
pub struct TimerPace;

impl Pace for TimerPace {
    async fn pause(&mut self, delay: Duration) {
        Timer::after(delay).await;
    }
}
