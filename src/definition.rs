//! Declarative test definitions.
//!
//! A [`TestDefinition`] is the statically constructed record behind one
//! logical test: the suite it belongs to, its name, the closure that runs the
//! production code, and the field expectations its result must satisfy.

use std::fmt;
use std::sync::Arc;

use crate::executor::{ExecutionData, TestFailure};
use crate::verify::VerificationParams;

/// The closure a definition runs to produce execution data.
pub type ExecutionFn = Arc<dyn Fn() -> Result<ExecutionData, TestFailure> + Send + Sync>;

/// One declared test.
///
/// A definition without verification parameters is a stub that has not been
/// wired to assertions yet. The harness skips it entirely: no execution, no
/// assertion counted, no report line.
#[derive(Clone)]
pub struct TestDefinition {
    suite: String,
    name: String,
    verification: Option<VerificationParams>,
    run: ExecutionFn,
}

impl TestDefinition {
    /// Create a definition with no verification attached.
    pub fn new(
        suite: impl Into<String>,
        name: impl Into<String>,
        run: impl Fn() -> Result<ExecutionData, TestFailure> + Send + Sync + 'static,
    ) -> Self {
        Self {
            suite: suite.into(),
            name: name.into(),
            verification: None,
            run: Arc::new(run),
        }
    }

    /// Attach the field expectations this definition's result must satisfy.
    pub fn with_verification(mut self, params: VerificationParams) -> Self {
        self.verification = Some(params);
        self
    }

    /// The suite this definition belongs to.
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// The test name within its suite.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified name, used in report lines: `suite::name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.suite, self.name)
    }

    /// The expectations attached to this definition, if any.
    pub fn verification(&self) -> Option<&VerificationParams> {
        self.verification.as_ref()
    }

    /// Run the definition's closure.
    pub fn execute(&self) -> Result<ExecutionData, TestFailure> {
        (self.run)()
    }
}

impl fmt::Debug for TestDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDefinition")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .field("verified", &self.verification.is_some())
            .finish()
    }
}
