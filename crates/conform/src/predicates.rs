//! Leaf predicates
//!
//! Ready-made [`IsDef`]s for common checks. Each one is an ordinary client of
//! the predicate protocol; nothing here is special-cased by the compiler.

mod number;
mod string;
mod time;

pub use number::is_int_gt;
pub use string::{is_non_empty_string, is_string, is_string_containing, is_string_matching};
pub use time::{is_duration, is_equal_to_time};

use crate::results::{VALID_MESSAGE, ValueResult};
use crate::{EqualityRegistry, IsDef, Results, Value};

/// Deep equality using the default [`EqualityRegistry`].
pub fn is_equal(expected: impl Into<Value>) -> IsDef {
    is_equal_with(expected, &EqualityRegistry::default())
}

/// Deep equality using `registry` for kind-specific comparisons.
pub fn is_equal_with(expected: impl Into<Value>, registry: &EqualityRegistry) -> IsDef {
    let expected = expected.into();
    let registry = registry.clone();
    IsDef::new("equals", move |path, actual| {
        let valid = registry.equals(&expected, actual);
        let message = if valid {
            VALID_MESSAGE.to_string()
        } else {
            format!(
                "objects not equal: actual({}({})) != expected({}({}))",
                actual.kind(),
                actual,
                expected.kind(),
                expected
            )
        };
        ValueResult::equality(path.clone(), valid, message).into()
    })
}

pub fn is_nil() -> IsDef {
    IsDef::new("is nil", |path, value| {
        if value.is_null() {
            Results::valid_at(path.clone())
        } else {
            Results::invalid(path.clone(), format!("Value {} is not nil", value))
        }
    })
}

/// Passes whenever the key exists, whatever its value.
pub fn key_present() -> IsDef {
    IsDef::presence("check key present")
}

/// Passes only when the key does not exist.
pub fn key_missing() -> IsDef {
    IsDef::absence("check key not present")
}


#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::test_support::*;
    use super::*;

    #[test]
    fn test_is_equal() {
        let def = is_equal("foo");
        assert_valid(&def, "foo");
        let results = assert_invalid(&def, "bar");
        assert_eq!(
            results.get("p").unwrap()[0].message,
            r#"objects not equal: actual(text("bar")) != expected(text("foo"))"#
        );
        assert!(results.get("p").unwrap()[0].covers_subtree());
        assert!(!check(&is_string(), "foo").get("p").unwrap()[0].covers_subtree());
    }

    #[test]
    fn test_is_equal_type_mismatch() {
        assert_invalid(&is_equal(42), "42");
        assert_invalid(&is_equal(42), 42.0);
    }

    #[test]
    fn test_is_equal_uses_registered_time_equality() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let def = is_equal(now);
        assert_valid(&def, now);
        assert_valid(&def, now.with_timezone(&plus_two));
        assert_invalid(&def, now + chrono::Duration::nanoseconds(100));
    }

    #[test]
    fn test_is_equal_with_custom_registry() {
        fn any_text(_: &Value, _: &Value) -> bool {
            true
        }
        let mut registry = EqualityRegistry::empty();
        registry.register(crate::ValueKind::Text, any_text);
        let def = is_equal_with("foo", &registry);
        assert_valid(&def, "anything");
        assert_invalid(&def, 1);
    }

    #[test]
    fn test_is_nil() {
        assert_valid(&is_nil(), Value::Null);
        assert_invalid(&is_nil(), "foo");
    }
}
