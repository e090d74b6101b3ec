//! Self-test runner
//!
//! Initializes the external library, invokes its self-test once or in a
//! paced loop, reports every result and tears the library down again.
//!
//! In continuous mode each iteration waits `delay` before invoking the suite
//! so nothing printed right after boot is lost while the serial link comes
//! up. The loop ends on the first non-zero return code or once
//! `max_iterations` invocations have run, and always prints the done marker
//! that CI scrapes for.

use core::fmt;

use embassy_time::Duration;

use super::args::TestArgs;
use crate::Error;

/// Marker printed when the continuous loop exits
pub const DONE_MARKER: &str = "&&&&&&&&&&&&&& done &&&&&&&&&&&&&";

/// External cryptographic library under test
pub trait CryptoSuite {
    /// Library-wide initialization, before the first invocation
    fn init(&mut self) -> Result<(), Error>;

    /// Runs the full self-test; the verdict lands in `args.return_code`
    fn run(&mut self, args: &mut TestArgs);

    /// Library-wide teardown, after the last invocation
    fn cleanup(&mut self) -> Result<(), Error>;
}

/// Waits between loop iterations
#[allow(async_fn_in_trait)]
pub trait Pace {
    async fn pause(&mut self, delay: Duration);
}

/// Destination for the console lines the runner produces
pub trait ReportSink {
    fn emit(&mut self, report: Report);
}

/// How often the self-test is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunMode {
    /// Invoke once, report, tear down
    SingleShot,
    /// Invoke until the suite fails, or until `max_iterations` is reached
    Continuous {
        delay: Duration,
        max_iterations: Option<u32>,
    },
}

/// One console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Single-shot run starting
    Begin,
    /// Loop iteration starting
    Iteration(u32),
    /// Return code of an invocation, tagged with the loop iteration if any
    Result { iteration: Option<u32>, code: i32 },
    /// Continuous loop exited
    Done,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Report::Begin => f.write_str("Crypt Test: Begin..."),
            Report::Iteration(n) => write!(f, "Crypt Test {n}:"),
            Report::Result { iteration: None, code } => write!(f, "Crypt Test: Return code {code}"),
            Report::Result {
                iteration: Some(n),
                code,
            } => write!(f, "Crypt Test {n}: Return code {code}"),
            Report::Done => f.write_str(DONE_MARKER),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Report {
    fn format(&self, f: defmt::Formatter) {
        match *self {
            Report::Begin => defmt::write!(f, "Crypt Test: Begin..."),
            Report::Iteration(n) => defmt::write!(f, "Crypt Test {}:", n),
            Report::Result { iteration: None, code } => defmt::write!(f, "Crypt Test: Return code {}", code),
            Report::Result {
                iteration: Some(n),
                code,
            } => defmt::write!(f, "Crypt Test {}: Return code {}", n, code),
            Report::Done => defmt::write!(f, "{=str}", DONE_MARKER),
        }
    }
}

/// Outcome of a complete run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Summary {
    /// Number of times the self-test entry point was called
    pub invocations: u32,
    /// Return code of the last invocation
    pub return_code: i32,
}

impl Summary {
    pub fn passed(&self) -> bool {
        self.return_code == 0
    }
}

/// Runs the self-test according to `mode`.
///
/// Library init failure aborts before any invocation. A failing self-test is
/// not an error, it is reported in the [`Summary`].
pub async fn run<S, P, R>(suite: &mut S, mode: RunMode, pace: &mut P, sink: &mut R) -> Result<Summary, Error>
where
    S: CryptoSuite,
    P: Pace,
    R: ReportSink,
{
    suite.init()?;

    let mut args = TestArgs::new();
    let summary = match mode {
        RunMode::SingleShot => run_once(suite, &mut args, sink),
        RunMode::Continuous { delay, max_iterations } => {
            run_loop(suite, &mut args, delay, max_iterations, pace, sink).await
        }
    };

    suite.cleanup()?;
    Ok(summary)
}

fn run_once<S: CryptoSuite, R: ReportSink>(suite: &mut S, args: &mut TestArgs, sink: &mut R) -> Summary {
    sink.emit(Report::Begin);
    args.reset();
    suite.run(args);
    sink.emit(Report::Result {
        iteration: None,
        code: args.return_code,
    });

    Summary {
        invocations: 1,
        return_code: args.return_code,
    }
}

async fn run_loop<S, P, R>(
    suite: &mut S,
    args: &mut TestArgs,
    delay: Duration,
    max_iterations: Option<u32>,
    pace: &mut P,
    sink: &mut R,
) -> Summary
where
    S: CryptoSuite,
    P: Pace,
    R: ReportSink,
{
    let mut iteration = 0;

    loop {
        if max_iterations.is_some_and(|max| iteration >= max) {
            info!("iteration cap of {} reached", iteration);
            break;
        }

        pace.pause(delay).await;

        args.reset();
        sink.emit(Report::Iteration(iteration));
        suite.run(args);
        sink.emit(Report::Result {
            iteration: Some(iteration),
            code: args.return_code,
        });
        iteration += 1;

        if !args.passed() {
            warn!("self-test failed with {}", args.return_code);
            break;
        }
    }

    sink.emit(Report::Done);
    // Give the log scraper time to drain the marker
    pace.pause(delay).await;

    Summary {
        invocations: iteration,
        return_code: args.return_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    /// Returns the scripted codes in order, then keeps passing
    struct Scripted {
        codes: &'static [i32],
        calls: usize,
        stale_code_seen: bool,
    }

    impl Scripted {
        fn new(codes: &'static [i32]) -> Self {
            Self {
                codes,
                calls: 0,
                stale_code_seen: false,
            }
        }
    }

    impl CryptoSuite for Scripted {
        fn init(&mut self) -> Result<(), Error> {
            Ok(())
        }

        fn run(&mut self, args: &mut TestArgs) {
            self.stale_code_seen |= args.return_code != 0;
            args.return_code = self.codes.get(self.calls).copied().unwrap_or(0);
            self.calls += 1;
        }

        fn cleanup(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pauses(Vec<Duration>);

    impl Pace for Pauses {
        async fn pause(&mut self, delay: Duration) {
            self.0.push(delay);
        }
    }

    impl ReportSink for Vec<Report> {
        fn emit(&mut self, report: Report) {
            self.push(report);
        }
    }

    const DELAY: Duration = Duration::from_secs(1);

    #[test]
    fn single_shot_invokes_once() {
        let mut suite = Scripted::new(&[0]);
        let mut pace = Pauses::default();
        let mut out: Vec<Report> = Vec::new();

        let summary = block_on(run(&mut suite, RunMode::SingleShot, &mut pace, &mut out)).unwrap();

        assert_eq!(suite.calls, 1);
        assert_eq!(summary, Summary { invocations: 1, return_code: 0 });
        assert!(pace.0.is_empty());
        assert_eq!(out, [Report::Begin, Report::Result { iteration: None, code: 0 }]);
    }

    #[test]
    fn single_shot_failure_is_reported_not_raised() {
        let mut suite = Scripted::new(&[-42]);
        let summary = block_on(run(&mut suite, RunMode::SingleShot, &mut Pauses::default(), &mut Vec::<Report>::new())).unwrap();

        assert!(!summary.passed());
        assert_eq!(summary.return_code, -42);
    }

    #[test]
    fn loop_stops_on_first_failure() {
        let mut suite = Scripted::new(&[0, 0, -1, 0]);
        let mode = RunMode::Continuous {
            delay: DELAY,
            max_iterations: None,
        };
        let mut pace = Pauses::default();
        let mut out: Vec<Report> = Vec::new();

        let summary = block_on(run(&mut suite, mode, &mut pace, &mut out)).unwrap();

        assert_eq!(suite.calls, 3);
        assert_eq!(summary, Summary { invocations: 3, return_code: -1 });
        assert!(!suite.stale_code_seen);
        // One pause per iteration plus the trailing one after the marker
        assert_eq!(pace.0, [DELAY; 4]);
        assert_eq!(out.last(), Some(&Report::Done));
        assert_eq!(out.iter().filter(|r| **r == Report::Done).count(), 1);
    }

    #[test]
    fn loop_honors_iteration_cap() {
        let mut suite = Scripted::new(&[]);
        let mode = RunMode::Continuous {
            delay: DELAY,
            max_iterations: Some(2),
        };
        let mut out: Vec<Report> = Vec::new();

        let summary = block_on(run(&mut suite, mode, &mut Pauses::default(), &mut out)).unwrap();

        assert_eq!(suite.calls, 2);
        assert!(summary.passed());
        assert_eq!(
            out,
            [
                Report::Iteration(0),
                Report::Result { iteration: Some(0), code: 0 },
                Report::Iteration(1),
                Report::Result { iteration: Some(1), code: 0 },
                Report::Done,
            ]
        );
    }

    #[test]
    fn report_lines_match_console_format() {
        assert_eq!(Report::Begin.to_string(), "Crypt Test: Begin...");
        assert_eq!(Report::Iteration(3).to_string(), "Crypt Test 3:");
        assert_eq!(
            Report::Result { iteration: None, code: -1 }.to_string(),
            "Crypt Test: Return code -1"
        );
        assert_eq!(
            Report::Result { iteration: Some(3), code: 0 }.to_string(),
            "Crypt Test 3: Return code 0"
        );
        assert_eq!(Report::Done.to_string(), DONE_MARKER);
    }
}
