use crypt_self_test::harness::{Report, ReportSink};

/// Prints runner reports over RTT
pub struct Console;

impl ReportSink for Console {
    fn emit(&mut self, report: Report) {
        defmt::println!("{}", report);
    }
}
