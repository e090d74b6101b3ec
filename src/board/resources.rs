//! Hardware Resource Management
//!
//! Groups the peripherals the harness claims so each can be handed to the
//! code that owns it. Everything not listed here stays untouched.

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, TRNG};
use embassy_rp::trng::InterruptHandler as TrngInterruptHandler;
use embassy_rp::Peri;

assign_resources! {
    /// True random number generator
    entropy: EntropyResources {
        trng: TRNG,
    },
}

bind_interrupts!(pub struct Irqs {
    TRNG_IRQ => TrngInterruptHandler<TRNG>;
});
