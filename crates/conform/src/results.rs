//! Result model
//!
//! A [`ValueResult`] is the outcome of one check at one path. [`Results`]
//! aggregates them by rendered path, keeping insertion order both across
//! paths and within a path.

use core::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::{Path, Value};

/// Comparable tag distinguishing the well-known outcomes from ordinary checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// Outcome of a predicate check
    Check,
    /// Outcome of comparing the whole value at the path, everything below
    /// it included
    Equality,
    /// A required key was absent from the actual value
    KeyMissing,
    /// A key that must be absent was present
    KeyNotExpected,
    /// Strict mode found a field no check looked at
    StrictFailure,
}

pub const VALID_MESSAGE: &str = "is valid";
pub const KEY_MISSING_MESSAGE: &str = "expected to see a key here";
pub const KEY_NOT_EXPECTED_MESSAGE: &str = "this key should not exist";
pub const STRICT_FAILURE_MESSAGE: &str = "unexpected field encountered during strict validation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueResult {
    pub path: Path,
    pub valid: bool,
    pub kind: ResultKind,
    pub message: String,
}

impl ValueResult {
    pub fn valid(path: Path) -> Self {
        Self::simple(path, true, VALID_MESSAGE)
    }

    pub fn invalid(path: Path, message: impl Into<String>) -> Self {
        Self::simple(path, false, message)
    }

    pub fn simple(path: Path, valid: bool, message: impl Into<String>) -> Self {
        Self {
            path,
            valid,
            kind: ResultKind::Check,
            message: message.into(),
        }
    }

    /// Result of a deep comparison; it accounts for the path's whole subtree.
    pub fn equality(path: Path, valid: bool, message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Equality,
            ..Self::simple(path, valid, message)
        }
    }

    pub fn key_missing(path: Path) -> Self {
        Self {
            path,
            valid: false,
            kind: ResultKind::KeyMissing,
            message: KEY_MISSING_MESSAGE.to_string(),
        }
    }

    pub fn key_not_expected(path: Path) -> Self {
        Self {
            path,
            valid: false,
            kind: ResultKind::KeyNotExpected,
            message: KEY_NOT_EXPECTED_MESSAGE.to_string(),
        }
    }

    pub fn strict_failure(path: Path) -> Self {
        Self {
            path,
            valid: false,
            kind: ResultKind::StrictFailure,
            message: STRICT_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_key_missing(&self) -> bool {
        self.kind == ResultKind::KeyMissing
    }

    pub fn is_strict_failure(&self) -> bool {
        self.kind == ResultKind::StrictFailure
    }

    /// Whether this result also speaks for every location below its path.
    pub fn covers_subtree(&self) -> bool {
        self.kind == ResultKind::Equality
    }

    /// Same outcome, re-addressed under `prefix`.
    fn under(self, prefix: &Path) -> Self {
        Self {
            path: prefix.concat(&self.path),
            ..self
        }
    }
}

/// One failing [`ValueResult`], as an error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("@path '{path}': {message}")]
pub struct ValueResultError {
    pub path: Path,
    pub kind: ResultKind,
    pub message: String,
}

impl From<&ValueResult> for ValueResultError {
    fn from(result: &ValueResult) -> Self {
        Self {
            path: result.path.clone(),
            kind: result.kind,
            message: result.message.clone(),
        }
    }
}

/// Path-indexed aggregate outcome of a validation run.
///
/// `is_valid` is the conjunction of every contained result and is kept up to
/// date by every mutating operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    valid: bool,
    fields: IndexMap<String, Vec<ValueResult>>,
}

impl Default for Results {
    fn default() -> Self {
        Self {
            valid: true,
            fields: IndexMap::new(),
        }
    }
}

impl From<ValueResult> for Results {
    fn from(result: ValueResult) -> Self {
        let mut results = Results::new();
        results.record(result);
        results
    }
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single passing result at `path`.
    pub fn valid_at(path: Path) -> Self {
        ValueResult::valid(path).into()
    }

    pub fn simple(path: Path, valid: bool, message: impl Into<String>) -> Self {
        ValueResult::simple(path, valid, message).into()
    }

    pub fn invalid(path: Path, message: impl Into<String>) -> Self {
        ValueResult::invalid(path, message).into()
    }

    pub fn key_missing(path: Path) -> Self {
        ValueResult::key_missing(path).into()
    }

    pub fn strict_failure(path: Path) -> Self {
        ValueResult::strict_failure(path).into()
    }

    pub fn record(&mut self, result: ValueResult) {
        self.valid &= result.valid;
        self.fields
            .entry(result.path.to_string())
            .or_default()
            .push(result);
    }

    pub fn merge(&mut self, other: Results) {
        for (_, results) in other.fields {
            for result in results {
                self.record(result);
            }
        }
    }

    /// Merge `other`, re-addressing each of its results under `prefix`.
    pub fn merge_under_prefix(&mut self, prefix: &Path, other: Results) {
        if prefix.is_root() {
            self.merge(other);
            return;
        }
        for (_, results) in other.fields {
            for result in results {
                self.record(result.under(prefix));
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn fields(&self) -> &IndexMap<String, Vec<ValueResult>> {
        &self.fields
    }

    /// Results recorded at the rendered path `path`.
    pub fn get(&self, path: &str) -> Option<&[ValueResult]> {
        self.fields.get(path).map(Vec::as_slice)
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every recorded result, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ValueResult> {
        self.fields.values().flatten()
    }

    /// One error per failing result. Each call starts a fresh iteration.
    pub fn errors(&self) -> impl Iterator<Item = ValueResultError> + '_ {
        self.iter()
            .filter(|result| !result.valid)
            .map(ValueResultError::from)
    }

    /// The same shape, keeping only failing results.
    pub fn detailed_errors(&self) -> Results {
        let mut errors = Results::new();
        for result in self.iter().filter(|result| !result.valid) {
            errors.record(result.clone());
        }
        errors
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "valid ({} fields)", self.fields.len());
        }
        let errors: Vec<_> = self.errors().collect();
        write!(f, "{} errors over {} fields", errors.len(), self.fields.len())?;
        for error in errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

/// Renders a value for messages; text is shown without quotes.
pub(crate) fn display_raw(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn path(s: &str) -> Path {
        Path::must_parse(s)
    }

    #[test]
    fn test_record_keeps_validity_current() {
        let mut results = Results::new();
        assert!(results.is_valid());
        results.record(ValueResult::valid(path("a")));
        assert!(results.is_valid());
        results.record(ValueResult::invalid(path("b"), "nope"));
        assert!(!results.is_valid());
        results.record(ValueResult::valid(path("c")));
        assert!(!results.is_valid());
    }

    #[test]
    fn test_multiple_results_at_one_path() {
        let mut results = Results::new();
        results.record(ValueResult::valid(path("a")));
        results.record(ValueResult::invalid(path("a"), "second"));
        assert_eq!(results.len(), 1);
        assert_eq!(results.get("a").map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_merge_ands_validity() {
        let mut left = Results::valid_at(path("a"));
        left.merge(Results::key_missing(path("b")));
        assert!(!left.is_valid());
        assert_eq!(left.len(), 2);
        assert!(left.get("b").unwrap()[0].is_key_missing());
    }

    #[test]
    fn test_merge_under_prefix() {
        let mut results = Results::new();
        results.merge_under_prefix(&path("p.[0]"), Results::invalid(path("foo"), "bad"));
        results.merge_under_prefix(&Path::root(), Results::valid_at(path("bar")));
        let keys: Vec<&str> = results.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["p.[0].foo", "bar"]);
        assert_eq!(results.get("p.[0].foo").unwrap()[0].path, path("p.[0].foo"));
    }

    #[test]
    fn test_errors_is_restartable() {
        let mut results = Results::invalid(path("a"), "bad a");
        results.record(ValueResult::valid(path("b")));
        results.record(ValueResult::strict_failure(path("c")));
        let first: Vec<String> = results.errors().map(|e| e.to_string()).collect();
        let second: Vec<String> = results.errors().map(|e| e.to_string()).collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "@path 'a': bad a".to_string(),
                format!("@path 'c': {STRICT_FAILURE_MESSAGE}"),
            ]
        );
    }

    #[test]
    fn test_detailed_errors_filters_valid() {
        let mut results = Results::valid_at(path("ok"));
        results.record(ValueResult::invalid(path("bad"), "x"));
        results.record(ValueResult::valid(path("bad")));
        let errors = results.detailed_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("bad").unwrap().len(), 1);
        assert!(errors.get("ok").is_none());
        assert!(!errors.is_valid());
    }

    #[test]
    fn test_serialize_report() {
        let results = Results::key_missing(path("a.[1]"));
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "valid": false,
                "fields": {
                    "a.[1]": [{
                        "path": "a.[1]",
                        "valid": false,
                        "kind": "key_missing",
                        "message": KEY_MISSING_MESSAGE,
                    }]
                }
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Results::valid_at(path("a")).to_string(), "valid (1 fields)");
        assert_eq!(
            Results::invalid(path("a"), "bad").to_string(),
            "1 errors over 1 fields\n  @path 'a': bad"
        );
    }
}
