use regex::Regex;

use crate::results::display_raw;
use crate::{IsDef, Path, Results, Value};

fn as_str<'v>(path: &Path, value: &'v Value) -> Result<&'v str, Results> {
    value.as_str().ok_or_else(|| {
        Results::invalid(
            path.clone(),
            format!("Unable to convert '{}' to string", display_raw(value)),
        )
    })
}

pub fn is_string() -> IsDef {
    IsDef::new("is a string", |path, value| match as_str(path, value) {
        Ok(_) => Results::valid_at(path.clone()),
        Err(results) => results,
    })
}

pub fn is_non_empty_string() -> IsDef {
    IsDef::new("is a non-empty string", |path, value| {
        match as_str(path, value) {
            Ok("") => Results::invalid(path.clone(), "String '' should not be empty"),
            Ok(_) => Results::valid_at(path.clone()),
            Err(results) => results,
        }
    })
}

pub fn is_string_matching(regex: Regex) -> IsDef {
    IsDef::new("is string matching regexp", move |path, value| {
        let s = match as_str(path, value) {
            Ok(s) => s,
            Err(results) => return results,
        };
        if regex.is_match(s) {
            Results::valid_at(path.clone())
        } else {
            Results::invalid(
                path.clone(),
                format!("String '{}' did not match regexp {}", s, regex.as_str()),
            )
        }
    })
}

pub fn is_string_containing(needle: impl Into<String>) -> IsDef {
    let needle = needle.into();
    IsDef::new("is string containing", move |path, value| {
        let s = match as_str(path, value) {
            Ok(s) => s,
            Err(results) => return results,
        };
        if s.contains(needle.as_str()) {
            Results::valid_at(path.clone())
        } else {
            Results::invalid(
                path.clone(),
                format!("String '{}' did not contain substring '{}'", s, needle),
            )
        }
    })
}
