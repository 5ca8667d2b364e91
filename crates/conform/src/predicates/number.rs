use crate::{IsDef, Results, Value};

/// Passes for integers strictly greater than `than`.
pub fn is_int_gt(than: i64) -> IsDef {
    IsDef::new("greater than", move |path, value| match value {
        Value::Integer(n) if *n > than => Results::valid_at(path.clone()),
        Value::Integer(n) => {
            Results::invalid(path.clone(), format!("{} is not greater than {}", n, than))
        }
        other => Results::invalid(
            path.clone(),
            format!("{} is a {}, not an integer", other, other.kind()),
        ),
    })
}
