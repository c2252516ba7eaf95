//! Field-by-field verification of execution data.
//!
//! A verifier receives the raw data a definition produced and the ordered
//! expectations declared for it, and returns one [`VerificationResult`] per
//! expectation. Order is preserved so report lines are deterministic.

use serde::Deserialize;
use serde_json::Value;

use crate::executor::ExecutionData;
use crate::matchers::value_matches;

/// One expected property of the execution data.
///
/// `Equals` compares the field against a JSON value. `Matches` renders the
/// field as a string and applies a glob/regex/literal pattern.
///
/// Paths navigate the data graph with dot segments and `[n]` indices, e.g.
/// `order.lines[0].sku`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldExpectation {
    Equals { path: String, expected: Value },
    Matches { path: String, pattern: String },
}

impl FieldExpectation {
    /// Expect the field at `path` to equal `expected`.
    pub fn equals(path: impl Into<String>, expected: impl Into<Value>) -> Self {
        FieldExpectation::Equals {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// Expect the field at `path` to match `pattern`.
    pub fn matches(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        FieldExpectation::Matches {
            path: path.into(),
            pattern: pattern.into(),
        }
    }

    /// The field path this expectation checks.
    pub fn path(&self) -> &str {
        match self {
            FieldExpectation::Equals { path, .. } => path,
            FieldExpectation::Matches { path, .. } => path,
        }
    }
}

/// The ordered field expectations attached to one test definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct VerificationParams {
    fields: Vec<FieldExpectation>,
}

impl VerificationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one expectation. Declaration order is preserved in the report.
    pub fn field(mut self, expectation: FieldExpectation) -> Self {
        self.fields.push(expectation);
        self
    }

    pub fn fields(&self) -> &[FieldExpectation] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldExpectation> for VerificationParams {
    fn from_iter<I: IntoIterator<Item = FieldExpectation>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a single field comparison.
///
/// The description is used verbatim as a report line when the comparison
/// failed, so it carries the qualified test name, the field path, and the
/// expected and actual values.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    passed: bool,
    description: String,
}

impl VerificationResult {
    /// Create a passing result.
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            passed: true,
            description: description.into(),
        }
    }

    /// Create a failing result.
    pub fn fail(description: impl Into<String>) -> Self {
        Self {
            passed: false,
            description: description.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.passed
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Compares execution data against the expectations declared for one test.
///
/// Mismatches become failed results, and anything the verifier cannot even
/// attempt (a missing field, say) is a failed result too.
pub trait ExecutionVerifier: Send + Sync {
    fn verify(
        &self,
        name: &str,
        data: &ExecutionData,
        params: &VerificationParams,
    ) -> Vec<VerificationResult>;
}

/// Default verifier: navigates the data graph by field path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldVerifier;

impl ExecutionVerifier for FieldVerifier {
    fn verify(
        &self,
        name: &str,
        data: &ExecutionData,
        params: &VerificationParams,
    ) -> Vec<VerificationResult> {
        params
            .fields()
            .iter()
            .map(|expectation| check_field(name, data, expectation))
            .collect()
    }
}

fn check_field(name: &str, data: &ExecutionData, expectation: &FieldExpectation) -> VerificationResult {
    let path = expectation.path();
    let Some(actual) = lookup_path(data, path) else {
        return VerificationResult::fail(match expectation {
            FieldExpectation::Equals { expected, .. } => {
                format!("{name}: field '{path}' expected {expected}, but the field is missing")
            }
            FieldExpectation::Matches { pattern, .. } => {
                format!("{name}: field '{path}' should match '{pattern}', but the field is missing")
            }
        });
    };

    match expectation {
        FieldExpectation::Equals { expected, .. } => {
            if actual == expected {
                VerificationResult::pass(format!("{name}: field '{path}' matches"))
            } else {
                VerificationResult::fail(format!(
                    "{name}: field '{path}' expected {expected}, got {actual}"
                ))
            }
        }
        FieldExpectation::Matches { pattern, .. } => {
            if value_matches(pattern, actual) {
                VerificationResult::pass(format!("{name}: field '{path}' matches"))
            } else {
                VerificationResult::fail(format!(
                    "{name}: field '{path}' value {actual} does not match '{pattern}'"
                ))
            }
        }
    }
}

/// Resolve a dotted path with optional `[n]` indices against a data graph.
fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in path.split('.') {
        let (member, indices) = split_indices(segment)?;
        if !member.is_empty() {
            current = current.get(member)?;
        }
        for index in indices {
            current = current.get(index)?;
        }
    }
    Some(current)
}

/// Split `lines[0][2]` into `("lines", [0, 2])`. Malformed segments resolve
/// to `None`, which reports as a missing field.
fn split_indices(segment: &str) -> Option<(&str, Vec<usize>)> {
    let Some(pos) = segment.find('[') else {
        return Some((segment, Vec::new()));
    };
    let member = &segment[..pos];
    let mut indices = Vec::new();
    let mut rest = &segment[pos..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let end = stripped.find(']')?;
        indices.push(stripped[..end].parse().ok()?);
        rest = &stripped[end + 1..];
    }
    if rest.is_empty() {
        Some((member, indices))
    } else {
        None
    }
}
