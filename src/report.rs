//! The aggregated diagnostic report.
//!
//! Failure lines are collected in order and joined once at the end. Each
//! failure line is newline-terminated; the reconciliation line, when present,
//! comes last with no trailing newline, so a non-empty report literally ends
//! with it. An empty rendered string means the whole run passed.

use std::cmp::Ordering;
use std::fmt;

use crate::executor::TestFailure;

/// Ordered failure lines plus an optional trailing reconciliation line.
#[derive(Debug, Clone, Default)]
pub struct Report {
    failures: Vec<String>,
    reconciliation: Option<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failed field verification, verbatim.
    pub fn record_failure(&mut self, line: impl Into<String>) {
        self.failures.push(line.into());
    }

    /// Record a test whose execution failed: the qualified name and cause on
    /// one line, then one indented line per frame.
    pub fn record_execution_failure(&mut self, name: &str, failure: &TestFailure) {
        self.failures.push(format!("{name} {}", failure.cause()));
        for frame in failure.frames() {
            self.failures.push(format!("\tat {frame}"));
        }
    }

    /// Compare the performed assertion count against the declared one and
    /// record the drift line, if any.
    pub fn reconcile(&mut self, performed: usize, expected: usize) {
        match performed.cmp(&expected) {
            Ordering::Equal => {}
            Ordering::Less => {
                let missed = expected - performed;
                let mut line = format!("{performed}/{expected}: ");
                if missed == 1 {
                    line.push_str("There is 1 assertion missed.");
                } else {
                    line.push_str(&format!("There are {missed} assertions missed."));
                }
                line.push_str(
                    " It may be caused by refactoring of a suite, test or field name. \
                     Check the registered definitions and/or update the expected \
                     assertion count passed to Harness::run if required.",
                );
                self.reconciliation = Some(line);
            }
            Ordering::Greater => {
                let added = performed - expected;
                let mut line = format!("{performed}/{expected}: ");
                if added == 1 {
                    line.push_str("It seems, there is 1 new assertion.");
                } else {
                    line.push_str(&format!("It seems, there are {added} new assertions."));
                }
                line.push_str(
                    " Please update the expected assertion count passed to \
                     Harness::run accordingly.",
                );
                self.reconciliation = Some(line);
            }
        }
    }

    /// Number of failure lines recorded so far (frames included).
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty() && self.reconciliation.is_none()
    }

    /// Join all lines into the final report string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.failures {
            out.push_str(line);
            out.push('\n');
        }
        if let Some(line) = &self.reconciliation {
            out.push_str(line);
        }
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
