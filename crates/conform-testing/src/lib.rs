//! Test assertions over [`conform`] validators.
//!
//! ```
//! use conform::predicates::is_string;
//! use conform::{Value, must_compile, schema};
//! use conform_testing::assert_conforms;
//!
//! let validator = must_compile(&schema!({ "name" => is_string() }));
//! let actual: Value = serde_json::json!({"name": "rex"}).into();
//! assert_conforms(&validator, &actual);
//! ```

use core::fmt;

use conform::{Results, Validator, Value, ValueResultError};
/// A value that did not match, with everything needed to explain why.
#[derive(Debug, Clone)]
pub struct ConformanceFailure {
    pub errors: Vec<ValueResultError>,
    pub results: Results,
    pub actual: Value,
}

impl fmt::Display for ConformanceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "value does not conform: {} error(s)", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "  {error}")?;
        }
        let dump = serde_json::to_string_pretty(&serde_json::Value::from(&self.actual))
            .map_err(|_| fmt::Error)?;
        write!(f, "actual value:\n{dump}")
    }
}

impl std::error::Error for ConformanceFailure {}

/// Run `validator` against `actual`, turning an invalid outcome into an error.
pub fn check(validator: &Validator, actual: &Value) -> Result<Results, ConformanceFailure> {
    let results = validator.validate(actual);
    if results.is_valid() {
        return Ok(results);
    }
    Err(ConformanceFailure {
        errors: results.errors().collect(),
        results,
        actual: actual.clone(),
    })
}

/// Assert that `actual` satisfies `validator`, returning the results.
///
/// # Panics
///
/// Panics with every failing path and a dump of `actual` when the value does
/// not conform.
#[track_caller]
pub fn assert_conforms(validator: &Validator, actual: &Value) -> Results {
    match check(validator, actual) {
        Ok(results) => results,
        Err(failure) => panic!("{failure}"),
    }
}
