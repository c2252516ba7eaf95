//! The orchestration loop that turns registered definitions into one report.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::executor::{ClosureExecutor, ExecuteError, TestExecutor};
use crate::registry::{DefinitionFactory, Registry};
use crate::report::Report;
use crate::verify::{ExecutionVerifier, FieldVerifier};

/// Runs registered test definitions and aggregates every outcome into a
/// single report string.
///
/// An empty string means every performed assertion passed and, when
/// reconciliation is enabled, that the assertion count matched. A failure of
/// the code under test is recorded and the batch continues; a failure of the
/// harness itself (a broken factory, an executor that cannot run at all)
/// surfaces as `Err` and aborts the batch.
pub struct Harness {
    factory: Arc<dyn DefinitionFactory>,
    executor: Arc<dyn TestExecutor>,
    verifier: Arc<dyn ExecutionVerifier>,
}

impl Harness {
    /// Create a harness over a registry, with the default executor and
    /// verifier.
    pub fn new(registry: Registry) -> Self {
        Self {
            factory: Arc::new(registry),
            executor: Arc::new(ClosureExecutor),
            verifier: Arc::new(FieldVerifier),
        }
    }

    /// Replace the definition factory.
    pub fn with_factory(mut self, factory: impl DefinitionFactory + 'static) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    /// Replace the executor.
    pub fn with_executor(mut self, executor: impl TestExecutor + 'static) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Replace the verifier.
    pub fn with_verifier(mut self, verifier: impl ExecutionVerifier + 'static) -> Self {
        self.verifier = Arc::new(verifier);
        self
    }

    /// Execute and verify every definition in the requested suites, in order.
    ///
    /// Every attempted field comparison counts as one performed assertion,
    /// pass or fail. When `expected_assertions` is `Some`, the performed
    /// count is reconciled against it and any drift is appended as the final
    /// report line; `None` disables reconciliation.
    ///
    /// All state is local to one call, so a shared `Harness` may run
    /// concurrently from independent callers as long as its collaborators are
    /// reentrant.
    pub fn run(&self, expected_assertions: Option<usize>, suites: &[&str]) -> Result<String> {
        let definitions = self
            .factory
            .build_definitions(suites)
            .context("failed to build test definitions")?;

        let mut report = Report::new();
        let mut performed: usize = 0;

        for definition in &definitions {
            let name = definition.qualified_name();
            // Definitions without verification are stubs, not failures.
            let Some(params) = definition.verification() else {
                trace!(test = %name, "skipping definition without verification");
                continue;
            };

            match self.executor.execute(definition) {
                Ok(data) => {
                    debug!(test = %name, "executed definition");
                    for result in self.verifier.verify(&name, &data, params) {
                        performed += 1;
                        if !result.is_pass() {
                            report.record_failure(result.description());
                        }
                    }
                }
                Err(ExecuteError::TestFailed(failure)) => {
                    debug!(test = %name, cause = %failure.cause(), "execution failed");
                    report.record_execution_failure(&name, &failure);
                }
                Err(ExecuteError::Fatal(err)) => {
                    return Err(err.context(format!("executor failed on {name}")));
                }
            }
        }

        if let Some(expected) = expected_assertions {
            report.reconcile(performed, expected);
        }

        debug!(
            performed,
            failure_lines = report.failure_count(),
            "verification complete"
        );
        Ok(report.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::TestDefinition;
    use crate::executor::ExecutionData;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::verify::{FieldExpectation, VerificationParams};

    struct BrokenExecutor;

    impl TestExecutor for BrokenExecutor {
        fn execute(&self, _definition: &TestDefinition) -> Result<ExecutionData, ExecuteError> {
            Err(ExecuteError::Fatal(anyhow::anyhow!("executor misconfigured")))
        }
    }

    #[test]
    fn test_stub_definition_is_not_executed() {
        let executed = Arc::new(AtomicUsize::new(0));
        let probe = Arc::clone(&executed);
        let registry = Registry::new().with(TestDefinition::new("orders", "pending", move || {
            probe.fetch_add(1, Ordering::SeqCst);
            Ok(json!({}))
        }));

        let report = Harness::new(registry).run(Some(0), &["orders"]).unwrap();

        assert_eq!(report, "");
        assert_eq!(executed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fatal_executor_error_aborts_the_batch() {
        let registry = Registry::new().with(
            TestDefinition::new("orders", "totals", || Ok(json!({"total": 1})))
                .with_verification(
                    VerificationParams::new().field(FieldExpectation::equals("total", 1)),
                ),
        );

        let err = Harness::new(registry)
            .with_executor(BrokenExecutor)
            .run(None, &["orders"])
            .unwrap_err();

        assert!(err.to_string().contains("orders::totals"));
    }

    #[test]
    fn test_factory_error_propagates() {
        let harness = Harness::new(Registry::new());
        assert!(harness.run(None, &["orders"]).is_err());
    }
}
