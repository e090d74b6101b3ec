//! Runner behaviour against scripted suites, through the public API only

use crypt_self_test::harness::{run, CryptoSuite, Pace, Report, ReportSink, RunMode, TestArgs, DONE_MARKER};
use crypt_self_test::Error;
use embassy_futures::block_on;
use embassy_time::Duration;

/// Passes until `fail_at`, then returns `code`
struct FailsAt {
    fail_at: u32,
    code: i32,
    invocations: u32,
    init_result: Result<(), Error>,
    cleanup_result: Result<(), Error>,
    cleaned_up: bool,
}

impl FailsAt {
    fn new(fail_at: u32, code: i32) -> Self {
        Self {
            fail_at,
            code,
            invocations: 0,
            init_result: Ok(()),
            cleanup_result: Ok(()),
            cleaned_up: false,
        }
    }
}

impl CryptoSuite for FailsAt {
    fn init(&mut self) -> Result<(), Error> {
        self.init_result
    }

    fn run(&mut self, args: &mut TestArgs) {
        if self.invocations == self.fail_at {
            args.return_code = self.code;
        }
        self.invocations += 1;
    }

    fn cleanup(&mut self) -> Result<(), Error> {
        self.cleaned_up = true;
        self.cleanup_result
    }
}

struct NoWait;

impl Pace for NoWait {
    async fn pause(&mut self, _delay: Duration) {}
}

#[derive(Default)]
struct Lines(Vec<String>);

impl ReportSink for Lines {
    fn emit(&mut self, report: Report) {
        self.0.push(report.to_string());
    }
}

fn forever() -> RunMode {
    RunMode::Continuous {
        delay: Duration::from_millis(1000),
        max_iterations: None,
    }
}

#[test]
fn loop_runs_until_third_invocation_fails() {
    let mut suite = FailsAt::new(2, -1);
    let mut lines = Lines::default();

    let summary = block_on(run(&mut suite, forever(), &mut NoWait, &mut lines)).unwrap();

    assert_eq!(suite.invocations, 3);
    assert_eq!(summary.invocations, 3);
    assert_eq!(summary.return_code, -1);
    assert!(suite.cleaned_up);
    assert_eq!(
        lines.0,
        [
            "Crypt Test 0:",
            "Crypt Test 0: Return code 0",
            "Crypt Test 1:",
            "Crypt Test 1: Return code 0",
            "Crypt Test 2:",
            "Crypt Test 2: Return code -1",
            DONE_MARKER,
        ]
    );
}

#[test]
fn init_failure_skips_the_test() {
    let mut suite = FailsAt::new(0, -1);
    suite.init_result = Err(Error::Library(-1));
    let mut lines = Lines::default();

    let result = block_on(run(&mut suite, RunMode::SingleShot, &mut NoWait, &mut lines));

    assert_eq!(result, Err(Error::Library(-1)));
    assert_eq!(suite.invocations, 0);
    assert!(lines.0.is_empty());
}

#[test]
fn cleanup_failure_is_returned_after_the_run() {
    let mut suite = FailsAt::new(u32::MAX, 0);
    suite.cleanup_result = Err(Error::Library(-2));
    let mut lines = Lines::default();

    let result = block_on(run(&mut suite, RunMode::SingleShot, &mut NoWait, &mut lines));

    assert_eq!(result, Err(Error::Library(-2)));
    assert_eq!(suite.invocations, 1);
    assert_eq!(lines.0, ["Crypt Test: Begin...", "Crypt Test: Return code 0"]);
}

#[test]
fn zero_iteration_cap_still_prints_marker() {
    let mut suite = FailsAt::new(u32::MAX, 0);
    let mode = RunMode::Continuous {
        delay: Duration::from_millis(10),
        max_iterations: Some(0),
    };
    let mut lines = Lines::default();

    let summary = block_on(run(&mut suite, mode, &mut NoWait, &mut lines)).unwrap();

    assert_eq!(summary.invocations, 0);
    assert!(summary.passed());
    assert_eq!(lines.0, [DONE_MARKER]);
}
