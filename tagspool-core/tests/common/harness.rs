//! Test harness for running fixture cases with stochastic variations

use crate::common::{Gen, TestCase};
use tagspool_core::{Event, MarkupWriter, WriteError};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub events: Vec<String>,
    pub expected: String,
    pub actual: String,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Short name for a writer failure, matching the fixture `error` field
fn error_kind(err: &WriteError) -> &'static str {
    match err {
        WriteError::Io(_) => "io",
        WriteError::Unbalanced => "unbalanced",
        WriteError::MismatchedEnd { .. } => "mismatched",
    }
}

/// Feed events through a writer, stopping at the first failure.
/// Flushes only when every event was accepted.
fn write_events(case: &TestCase, events: &[Event<'_>]) -> (String, Option<&'static str>) {
    let mut writer = MarkupWriter::with_config(Vec::new(), case.config());
    let result = writer.write_events(events).and_then(|()| writer.flush());
    let error = result.err().map(|e| error_kind(&e));
    let output = String::from_utf8(writer.into_inner()).expect("writer emitted invalid UTF-8");
    (output, error)
}

fn check(case: &TestCase, events: &[Event<'_>], seed: u64) -> TestResult {
    let (actual, error) = write_events(case, events);

    let mut errors = Vec::new();
    if actual != case.output {
        errors.push(format!("Output mismatch: expected {:?}, got {:?}", case.output, actual));
    }
    if error != case.error.as_deref() {
        errors.push(format!("Error mismatch: expected {:?}, got {:?}", case.error, error));
    }

    TestResult {
        passed: errors.is_empty(),
        events: events.iter().map(|e| format!("{:?}", e)).collect(),
        expected: case.output.clone(),
        actual,
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    check(case, &case.events(), 0)
}

/// Run test with stochastic variations
///
/// Every CharData event is split into a random number of adjacent
/// CharData events at random char boundaries. Text is written without
/// separators, so the output must be unchanged.
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut events = Vec::new();
    for event in case.events() {
        match event {
            Event::CharData { text } => {
                events.extend(gen.split_text(&text).into_iter().map(Event::text));
            }
            other => events.push(other),
        }
    }
    check(case, &events, gen.seed)
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set TAGSPOOL_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nEvents:");
        for (i, e) in self.events.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nExpected output:\n{:?}", self.expected);
        eprintln!("\nActual output:\n{:?}", self.actual);
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
