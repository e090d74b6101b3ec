//! RP2350 board bring-up
//!
//! Runs the bootstrap stages in order and returns the platform the C hooks
//! use. Any failure here is fatal: without a console, clock and TRNG there
//! is nothing useful left to test.

use core::convert::Infallible;

use crypt_self_test::config::HarnessConfig;
use crypt_self_test::harness::{Bootstrap, Stage};
use crypt_self_test::platform::{Platform, SoftRtc, WordSource};
use crypt_self_test::Error;
use defmt::{debug, info};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::config::Config;
use embassy_rp::peripherals::TRNG;
use embassy_rp::trng::{self, Trng};

use self::platform::HarnessPlatform;
use self::resources::{AssignedResources, EntropyResources, Irqs};
use self::time::EmbassyUptime;

pub mod console;
pub mod platform;
// Brings `split_resources!` into scope for `bootstrap`
#[macro_use]
pub mod resources;
pub mod time;
pub mod wolfcrypt;

/// The TRNG as a 32-bit word source. Reads block until a sample is ready and
/// cannot fail.
pub struct TrngSource(Trng<'static, TRNG>);

impl WordSource for TrngSource {
    type Word = u32;
    type Error = Infallible;

    fn next_word(&mut self) -> Result<u32, Infallible> {
        Ok(self.0.blocking_next_u32())
    }
}

/// Brings the board up: pins, clocks, peripherals, console, RTC, TRNG.
pub fn bootstrap(config: &HarnessConfig) -> Result<HarnessPlatform, Error> {
    let mut boot = Bootstrap::new();

    // The HAL hands out pin singletons from init, clock tree included
    let p = boot.step(Stage::Pins, || Ok(embassy_rp::init(Config::default())))?;

    boot.step(Stage::Clocks, || match clk_sys_freq() {
        0 => Err(Error::Hardware(Stage::Clocks)),
        hz => {
            debug!("clk_sys at {} Hz", hz);
            Ok(())
        }
    })?;

    let r = boot.step(Stage::Peripherals, move || Ok(split_resources!(p)))?;

    // defmt-rtt needs no init; the banner confirms the RTT channel is live
    boot.step(Stage::Console, || {
        info!("{=str} {=str} console up", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        Ok(())
    })?;

    let rtc = boot.step(Stage::Rtc, || {
        let mut rtc = SoftRtc::new(EmbassyUptime, config.rtc_start)?;
        rtc.start();
        Ok(rtc)
    })?;

    let entropy = boot.step(Stage::Entropy, move || Ok(start_trng(r.entropy)))?;

    boot.finish()?;
    Ok(Platform::new(rtc, entropy))
}

fn start_trng(r: EntropyResources) -> TrngSource {
    let mut source = TrngSource(Trng::new(r.trng, Irqs, trng::Config::default()));
    // First read waits for the entropy source to settle
    let first = source.0.blocking_next_u32();
    debug!("trng running, first word {=u32:#x}", first);
    source
}
