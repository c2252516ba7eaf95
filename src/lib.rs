//! # attest
//!
//! A declarative test harness that runs registered test definitions and
//! verifies each result object graph field-by-field against expected values.
//!
//! Instead of panicking at the first mismatch, the harness aggregates every
//! failure into one report string; an empty string is the single pass/fail
//! oracle. It also reconciles the number of performed assertions against the
//! number the caller declared, so a refactor that silently detaches a test
//! shows up as count drift rather than a green run.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attest::{FieldExpectation, Harness, Registry, TestDefinition, VerificationParams};
//! use serde_json::json;
//!
//! let registry = Registry::new().with(
//!     TestDefinition::new("checkout", "totals_are_summed", || {
//!         Ok(json!({ "total": 42, "lines": [{ "sku": "A-1" }] }))
//!     })
//!     .with_verification(
//!         VerificationParams::new()
//!             .field(FieldExpectation::equals("total", 42))
//!             .field(FieldExpectation::equals("lines[0].sku", "A-1")),
//!     ),
//! );
//!
//! let report = Harness::new(registry).run(Some(2), &["checkout"])?;
//! assert_eq!(report, "");
//! ```
//!
//! ## Swapping collaborators
//!
//! Execution, verification, and definition harvesting are trait boundaries
//! with default implementations. Replace any of them:
//!
//! ```rust,ignore
//! let harness = Harness::new(registry)
//!     .with_executor(MyExecutor)
//!     .with_verifier(MyVerifier);
//! ```

pub mod definition;
pub mod executor;
pub mod harness;
pub mod matchers;
pub mod registry;
pub mod report;
pub mod verify;

// Core types
pub use definition::TestDefinition;
pub use harness::Harness;
pub use registry::{DefinitionFactory, Registry};
pub use report::Report;

// Execution boundary
pub use executor::{ClosureExecutor, ExecuteError, ExecutionData, TestExecutor, TestFailure};

// Verification boundary
pub use matchers::value_matches;
pub use verify::{
    ExecutionVerifier, FieldExpectation, FieldVerifier, VerificationParams, VerificationResult,
};
