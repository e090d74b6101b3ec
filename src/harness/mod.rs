//! Bring-up sequencing and self-test orchestration
pub mod args;
pub mod bootstrap;
pub mod runner;

pub use args::TestArgs;
pub use bootstrap::{Bootstrap, Stage};
pub use runner::{run, CryptoSuite, Pace, Report, ReportSink, RunMode, Summary, DONE_MARKER};
