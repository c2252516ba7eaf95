//! The execution boundary: running one definition to produce raw data.
//!
//! Failures split into two kinds. [`ExecuteError::TestFailed`] means the code
//! under test failed; the harness records it in the report and keeps going.
//! [`ExecuteError::Fatal`] means the harness itself is broken and aborts the
//! whole batch.

use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

use crate::definition::TestDefinition;

/// Raw data produced by running a definition.
///
/// The harness passes it through to the verifier without inspecting it.
pub type ExecutionData = Value;

/// A failure raised by the code under test.
///
/// Carries the cause message and the frames that locate it. Frames render in
/// the report one per line, in the order they were attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    cause: String,
    frames: Vec<String>,
}

impl TestFailure {
    /// Create a failure with no frames.
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
            frames: Vec::new(),
        }
    }

    /// Append one frame.
    pub fn frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    /// Build a failure from any error, using its `source()` chain as frames.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut failure = TestFailure::new(err.to_string());
        let mut source = err.source();
        while let Some(cause) = source {
            failure.frames.push(cause.to_string());
            source = cause.source();
        }
        failure
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl StdError for TestFailure {}

/// Error type for executing a definition.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// The code under test failed. Recorded in the report; the batch continues.
    #[error("{0}")]
    TestFailed(#[from] TestFailure),

    /// The harness itself misbehaved. Aborts the batch.
    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

/// Executes one definition and returns its raw execution data.
pub trait TestExecutor: Send + Sync {
    fn execute(&self, definition: &TestDefinition) -> Result<ExecutionData, ExecuteError>;
}

/// Default executor: invokes the definition's closure directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureExecutor;

impl TestExecutor for ClosureExecutor {
    fn execute(&self, definition: &TestDefinition) -> Result<ExecutionData, ExecuteError> {
        definition.execute().map_err(ExecuteError::TestFailed)
    }
}
