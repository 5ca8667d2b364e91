use core::fmt;

use indexmap::IndexMap;

use crate::prelude_internal::*;

/// Equality override for one [`ValueKind`].
pub type EqualityFn = fn(&Value, &Value) -> bool;

/// Type-aware deep equality.
///
/// The registry is consulted with the kind of the expected value before
/// falling back to structural comparison, at every level of nesting. Values
/// of different kinds are never equal.
#[derive(Clone)]
pub struct EqualityRegistry {
    overrides: IndexMap<ValueKind, EqualityFn>,
}

impl Default for EqualityRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(ValueKind::Time, same_instant);
        registry
    }
}

impl fmt::Debug for EqualityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.overrides.keys()).finish()
    }
}

impl EqualityRegistry {
    /// A registry with no overrides: plain structural equality.
    pub fn empty() -> Self {
        Self {
            overrides: IndexMap::new(),
        }
    }

    /// Add or replace the comparison used for `kind`.
    pub fn register(&mut self, kind: ValueKind, eq: EqualityFn) -> Option<EqualityFn> {
        self.overrides.insert(kind, eq)
    }

    pub fn is_registered(&self, kind: ValueKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    pub fn equals(&self, expected: &Value, actual: &Value) -> bool {
        if expected.kind() != actual.kind() {
            return false;
        }
        if let Some(eq) = self.overrides.get(&expected.kind()) {
            return eq(expected, actual);
        }
        match (expected, actual) {
            (Value::Array(expected), Value::Array(actual)) => {
                expected.len() == actual.len()
                    && expected
                        .iter()
                        .zip(actual.iter())
                        .all(|(e, a)| self.equals(e, a))
            }
            (Value::Map(expected), Value::Map(actual)) => {
                expected.len() == actual.len()
                    && expected.iter().all(|(key, e)| {
                        actual.get(key).is_some_and(|a| self.equals(e, a))
                    })
            }
            (expected, actual) => expected == actual,
        }
    }
}

/// Two times are equal when they denote the same instant, whatever their offset.
fn same_instant(expected: &Value, actual: &Value) -> bool {
    match (expected.as_time(), actual.as_time()) {
        (Some(e), Some(a)) => {
            e.timestamp() == a.timestamp()
                && e.timestamp_subsec_nanos() == a.timestamp_subsec_nanos()
        }
        _ => false,
    }
}
