use chrono::{DateTime, FixedOffset};

use crate::{IsDef, Results, Value};

pub fn is_duration() -> IsDef {
    IsDef::new("is a duration", |path, value| match value {
        Value::Duration(_) => Results::valid_at(path.clone()),
        other => Results::invalid(
            path.clone(),
            format!("Expected a duration, got '{}' which is a {}", other, other.kind()),
        ),
    })
}

/// Passes for times denoting the same instant as `to`, at any offset.
pub fn is_equal_to_time(to: impl Into<DateTime<FixedOffset>>) -> IsDef {
    let to = to.into();
    IsDef::new("equal to time", move |path, value| match value {
        Value::Time(actual) if *actual == to => Results::valid_at(path.clone()),
        Value::Time(actual) => Results::invalid(
            path.clone(),
            format!("actual({}) != expected({})", actual.to_rfc3339(), to.to_rfc3339()),
        ),
        other => Results::invalid(
            path.clone(),
            format!("Expected a time, got '{}' which is a {}", other, other.kind()),
        ),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;

    use super::*;
    use crate::predicates::test_support::*;

    #[test]
    fn test_is_duration() {
        assert_valid(&is_duration(), Duration::from_nanos(1));
        let results = assert_invalid(&is_duration(), "foo");
        assert_eq!(
            results.get("p").unwrap()[0].message,
            r#"Expected a duration, got '"foo"' which is a text"#
        );
    }

    #[test]
    fn test_is_equal_to_time() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let noon = utc.with_ymd_and_hms(2020, 2, 3, 12, 0, 0).unwrap();
        let def = is_equal_to_time(noon);
        assert_valid(&def, noon.with_timezone(&minus_five));
        assert_invalid(&def, noon + chrono::Duration::seconds(1));
        assert_invalid(&def, "2020-02-03T12:00:00Z");
    }
}
