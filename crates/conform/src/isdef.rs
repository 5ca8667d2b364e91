//! The predicate protocol and its combinators
//!
//! An [`IsDef`] is a named matcher. Every combinator returns a new `IsDef`
//! and leaves its inputs untouched; the single exception is
//! [`UniqScopeTracker`], whose record grows with every check it performs.

use core::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::results::{ValueResult, display_raw};
use crate::{Path, Results, Validator, Value};

/// The function an [`IsDef`] wraps.
pub type Checker = Arc<dyn Fn(&Path, &Value) -> Results + Send + Sync>;

#[derive(Clone)]
pub struct IsDef {
    name: String,
    checker: Option<Checker>,
    optional: bool,
    check_key_missing: bool,
}

impl fmt::Debug for IsDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsDef")
            .field("name", &self.name)
            .field("optional", &self.optional)
            .field("check_key_missing", &self.check_key_missing)
            .finish_non_exhaustive()
    }
}

impl IsDef {
    pub fn new(
        name: impl Into<String>,
        checker: impl Fn(&Path, &Value) -> Results + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            checker: Some(Arc::new(checker)),
            optional: false,
            check_key_missing: false,
        }
    }

    /// A definition that only looks at whether the key is there.
    pub fn presence(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checker: None,
            optional: false,
            check_key_missing: false,
        }
    }

    /// A definition that passes only when the key is absent.
    pub fn absence(name: impl Into<String>) -> Self {
        Self {
            check_key_missing: true,
            ..Self::presence(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn checks_key_missing(&self) -> bool {
        self.check_key_missing
    }

    /// Copy of this definition that also passes when the key is absent.
    pub fn optional(self) -> Self {
        Self {
            name: format!("Optional {}", self.name),
            optional: true,
            ..self
        }
    }

    /// Run the definition at `path`. `value` is `None` when the key is absent.
    pub fn check(&self, path: &Path, value: Option<&Value>) -> Results {
        if self.check_key_missing {
            return match value {
                None => Results::valid_at(path.clone()),
                Some(_) => ValueResult::key_not_expected(path.clone()).into(),
            };
        }
        let Some(value) = value else {
            if self.optional {
                return Results::valid_at(path.clone());
            }
            return Results::key_missing(path.clone());
        };
        match &self.checker {
            Some(checker) => checker(path, value),
            None => Results::valid_at(path.clone()),
        }
    }
}

/// Name a raw checker function.
pub fn is(
    name: impl Into<String>,
    checker: impl Fn(&Path, &Value) -> Results + Send + Sync + 'static,
) -> IsDef {
    IsDef::new(name, checker)
}

pub fn optional(def: IsDef) -> IsDef {
    def.optional()
}

/// Logical OR: the first passing definition wins.
pub fn is_any(defs: impl IntoIterator<Item = IsDef>) -> IsDef {
    let defs: Vec<IsDef> = defs.into_iter().collect();
    let names: Vec<String> = defs.iter().map(|def| def.name.clone()).collect();
    let name = format!("either {:?}", names);

    IsDef::new(name, move |path, value| {
        for def in &defs {
            let results = def.check(path, Some(value));
            if results.is_valid() {
                return results;
            }
        }
        Results::invalid(
            path.clone(),
            format!(
                "Value was none of {:?}, actual value was {}",
                names, value
            ),
        )
    })
}

/// Apply `validator` to every element of an array, nesting each element's
/// results under that element's index.
pub fn is_slice_of(validator: Validator) -> IsDef {
    IsDef::new("slice", move |path, value| {
        let Value::Array(items) = value else {
            return Results::invalid(path.clone(), "Expected slice at given path");
        };
        let mut results = Results::new();
        for (index, item) in items.iter().enumerate() {
            results.merge_under_prefix(&path.extend_index(index), validator.validate(item));
        }
        results
    })
}

/// Record of values seen by uniqueness checks, and the namespace each was
/// first seen in.
///
/// This is the one stateful matcher: every [`IsDef`] created by
/// [`UniqScopeTracker::is_unique_to`] shares the tracker's record and adds
/// to it on each check. Clones share the record too.
///
/// # Concurrency
///
/// A tracker is meant for a single validation session on a single thread.
/// The record sits behind a mutex only so that the definitions it hands out
/// can be shared like any other [`IsDef`]; when two threads check the same
/// value concurrently, which of them is reported as the duplicate is
/// unspecified. Create one tracker per session.
#[derive(Debug, Clone, Default)]
pub struct UniqScopeTracker {
    seen: Arc<Mutex<Vec<(Value, String)>>>,
}

impl UniqScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A definition failing for values already seen in another namespace.
    /// The empty namespace is global: any earlier sighting is a repeat.
    pub fn is_unique_to(&self, namespace: impl Into<String>) -> IsDef {
        let tracker = self.clone();
        let namespace = namespace.into();
        IsDef::new("unique", move |path, value| {
            if tracker.observe(value, &namespace) {
                Results::valid_at(path.clone())
            } else {
                Results::invalid(
                    path.clone(),
                    format!("Value '{}' is repeated", display_raw(value)),
                )
            }
        })
    }

    /// Record `value` under `namespace`. Returns `false` if it is a repeat,
    /// in which case nothing is recorded.
    pub fn observe(&self, value: &Value, namespace: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        let repeated = seen.iter().any(|(seen_value, seen_namespace)| {
            seen_value == value && (namespace.is_empty() || namespace != seen_namespace)
        });
        if repeated {
            return false;
        }
        if !seen
            .iter()
            .any(|(seen_value, seen_namespace)| seen_value == value && seen_namespace == namespace)
        {
            seen.push((value.clone(), namespace.to_string()));
        }
        true
    }

    /// Number of distinct `(value, namespace)` pairs recorded.
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn scoped_is_unique() -> UniqScopeTracker {
    UniqScopeTracker::new()
}

/// A fresh tracker in the global namespace. Repeated checks on the returned
/// definition share history; separately created ones do not.
pub fn is_unique() -> IsDef {
    scoped_is_unique().is_unique_to("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::is_equal;
    use crate::results::{KEY_NOT_EXPECTED_MESSAGE, ResultKind};

    fn p(s: &str) -> Path {
        Path::must_parse(s)
    }

    #[test]
    fn test_missing_key_is_sentinel() {
        let def = is_equal("x");
        let results = def.check(&p("a"), None);
        assert!(!results.is_valid());
        assert_eq!(results.get("a").unwrap()[0], ValueResult::key_missing(p("a")));
    }

    #[test]
    fn test_optional_missing_key_passes() {
        let def = optional(is_equal("x"));
        assert_eq!(def.name(), "Optional equals");
        assert!(def.is_optional());
        assert!(def.check(&p("a"), None).is_valid());
        assert!(!def.check(&p("a"), Some(&Value::from("y"))).is_valid());
    }

    #[test]
    fn test_optional_leaves_input_unchanged() {
        let def = is_equal("x");
        let _optional = def.clone().optional();
        assert!(!def.is_optional());
        assert_eq!(def.name(), "equals");
    }

    #[test]
    fn test_presence_and_absence() {
        let present = IsDef::presence("present");
        assert!(present.check(&p("a"), Some(&Value::Null)).is_valid());
        assert!(present.check(&p("a"), None).get("a").unwrap()[0].is_key_missing());

        let absent = IsDef::absence("absent");
        assert!(absent.check(&p("a"), None).is_valid());
        let result = absent.check(&p("a"), Some(&Value::Null)).get("a").unwrap()[0].clone();
        assert_eq!(result.kind, ResultKind::KeyNotExpected);
        assert_eq!(result.message, KEY_NOT_EXPECTED_MESSAGE);
    }

    #[test]
    fn test_is_any() {
        let def = is_any([is_equal("foo"), is_equal("bar")]);
        assert!(def.check(&p("p"), Some(&Value::from("foo"))).is_valid());
        assert!(def.check(&p("p"), Some(&Value::from("bar"))).is_valid());
        let results = def.check(&p("p"), Some(&Value::from("basta")));
        assert!(!results.is_valid());
        assert_eq!(
            results.get("p").unwrap()[0].message,
            r#"Value was none of ["equals", "equals"], actual value was "basta""#
        );
    }

    #[test]
    fn test_is_slice_of_rejects_non_arrays() {
        let def = is_slice_of(Validator::new(|_| Results::new()));
        let results = def.check(&p("p"), Some(&Value::from("nope")));
        assert_eq!(results.get("p").unwrap()[0].message, "Expected slice at given path");
    }

    #[test]
    fn test_is_slice_of_nests_under_index() {
        let foo_is_bar = Validator::new(|actual| {
            let is_bar = actual
                .as_map()
                .and_then(|m| m.get("foo"))
                .is_some_and(|v| v.as_str() == Some("bar"));
            Results::simple(Path::must_parse("foo"), is_bar, "did not match")
        });
        let def = is_slice_of(foo_is_bar);
        let good: Value = serde_json::json!([{"foo": "bar"}, {"foo": "bar"}]).into();
        let results = def.check(&p("p"), Some(&good));
        assert!(results.is_valid());
        let keys: Vec<&str> = results.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["p.[0].foo", "p.[1].foo"]);

        let bad: Value = serde_json::json!([{"foo": "bot"}]).into();
        let results = def.check(&p("p"), Some(&bad));
        assert!(!results.is_valid());
        assert_eq!(results.len(), 1);
        assert!(results.get("p.[0].foo").is_some());
    }

    #[test]
    fn test_is_unique_finds_repeats_on_same_instance() {
        let unique = is_unique();
        assert!(unique.check(&p("foo"), Some(&Value::from("a"))).is_valid());
        let results = unique.check(&p("bar"), Some(&Value::from("a")));
        assert!(!results.is_valid());
        assert_eq!(results.get("bar").unwrap()[0].message, "Value 'a' is repeated");
    }

    #[test]
    fn test_is_unique_separate_instances_are_independent() {
        assert!(is_unique().check(&p("foo"), Some(&Value::from("a"))).is_valid());
        assert!(is_unique().check(&p("foo"), Some(&Value::from("a"))).is_valid());
    }

    #[test]
    fn test_is_unique_to_namespaces() {
        let tracker = scoped_is_unique();
        assert!(tracker.is_unique_to("test").check(&p("foo"), Some(&Value::from(1))).is_valid());
        assert!(tracker.is_unique_to("test").check(&p("bar"), Some(&Value::from(1))).is_valid());
        assert!(!tracker.is_unique_to("test2").check(&p("foo"), Some(&Value::from(1))).is_valid());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_global_namespace_rejects_any_repeat() {
        let tracker = scoped_is_unique();
        assert!(tracker.observe(&Value::from(1), "a"));
        assert!(!tracker.observe(&Value::from(1), ""));
        assert!(tracker.observe(&Value::from(2), ""));
        assert!(!tracker.observe(&Value::from(2), ""));
    }
}
