//! Declarative registration of test definitions.
//!
//! The registry is populated at startup and implements [`DefinitionFactory`]
//! by harvesting definitions for the requested suites, in request order.

use anyhow::{bail, Result};

use crate::definition::TestDefinition;

/// Builds the ordered collection of definitions for a set of requested suites.
///
/// Any error from a factory is a harness misconfiguration and aborts the run.
pub trait DefinitionFactory: Send + Sync {
    fn build_definitions(&self, suites: &[&str]) -> Result<Vec<TestDefinition>>;
}

/// Default factory: an explicit list of registered definitions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<TestDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Registration order is preserved within a suite.
    pub fn register(&mut self, definition: TestDefinition) {
        self.definitions.push(definition);
    }

    /// Builder form of [`Registry::register`].
    pub fn with(mut self, definition: TestDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl DefinitionFactory for Registry {
    fn build_definitions(&self, suites: &[&str]) -> Result<Vec<TestDefinition>> {
        let mut definitions = Vec::new();
        for suite in suites {
            let matched: Vec<TestDefinition> = self
                .definitions
                .iter()
                .filter(|definition| definition.suite() == *suite)
                .cloned()
                .collect();
            if matched.is_empty() {
                bail!("no test definitions registered for suite '{suite}'");
            }
            definitions.extend(matched);
        }
        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(suite: &str, name: &str) -> TestDefinition {
        TestDefinition::new(suite, name, || Ok(json!({})))
    }

    fn names(definitions: &[TestDefinition]) -> Vec<String> {
        definitions.iter().map(TestDefinition::qualified_name).collect()
    }

    #[test]
    fn test_request_order_then_registration_order() {
        let registry = Registry::new()
            .with(definition("orders", "first"))
            .with(definition("pricing", "alone"))
            .with(definition("orders", "second"));

        let definitions = registry.build_definitions(&["pricing", "orders"]).unwrap();

        assert_eq!(
            names(&definitions),
            ["pricing::alone", "orders::first", "orders::second"]
        );
    }

    #[test]
    fn test_unknown_suite_is_an_error() {
        let registry = Registry::new().with(definition("orders", "first"));
        let err = registry.build_definitions(&["invoices"]).unwrap_err();
        assert!(err.to_string().contains("invoices"));
    }

    #[test]
    fn test_harvest_is_repeatable() {
        let registry = Registry::new()
            .with(definition("orders", "first"))
            .with(definition("orders", "second"));

        let once = registry.build_definitions(&["orders"]).unwrap();
        let twice = registry.build_definitions(&["orders"]).unwrap();

        assert_eq!(names(&once), names(&twice));
    }
}
