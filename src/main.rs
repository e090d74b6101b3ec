//! Crypto self-test firmware entry point
//!
//! Brings the board up, hands the platform hooks to wolfCrypt and runs its
//! self-test in the mode selected at build time.

#![no_std]
#![no_main]

use crypt_self_test::config::HarnessConfig;
use crypt_self_test::harness;
use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use crate::board::console::Console;
use crate::board::time::TimerPace;
use crate::board::wolfcrypt::WolfCrypt;

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Board bring-up and C platform hooks
mod board;

/// Firmware entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let config = unwrap!(HarnessConfig::from_build_env());

    // Hardware that fails to come up is not recoverable
    let platform = unwrap!(board::bootstrap(&config));
    board::platform::install(platform);

    info!("rtc start {}, mode {}", config.rtc_start, config.mode);

    match harness::run(&mut WolfCrypt, config.mode, &mut TimerPace, &mut Console).await {
        Ok(summary) if summary.passed() => {
            info!("self-test passed after {} run(s)", summary.invocations)
        }
        Ok(summary) => error!(
            "self-test failed with {} after {} run(s)",
            summary.return_code, summary.invocations
        ),
        Err(e) => error!("crypto library: {}", e),
    }

    // No OS to return to
    loop {
        Timer::after_secs(60).await;
    }
}
