//! Platform glue for running a cryptographic self-test on a microcontroller
//!
//! The firmware binary (`src/main.rs`) brings the board up and links the
//! external test suite. Everything that does not touch registers lives here
//! so it can be tested on the host.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules
mod fmt;

/// Build-time configuration
pub mod config;
/// Error type shared by bootstrap, clock and runner
pub mod error;
/// Bootstrap sequencing and the self-test runner
pub mod harness;
/// Time and randomness adapters handed to the external library
pub mod platform;

pub use error::Error;
