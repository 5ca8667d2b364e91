/// A dynamically shaped value that schemas are matched against.
pub mod value;

/// Insertion-ordered map used by [`value::Value::Map`].
pub mod map;

/// Data structure for addressing a location inside a value.
pub mod path;

/// Type-aware equality with per-kind overrides.
pub mod equality;

/// Conversion from `serde_json` values.
pub mod json;

pub use equality::{EqualityFn, EqualityRegistry};
pub use map::Map;
pub use path::{Path, PathError, PathSegment};
pub use value::{Array, Value, ValueKind};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::map::Map;
    pub use crate::path::{Path, PathError, PathSegment};
    pub use crate::value::{Array, Value, ValueKind};
    pub use thisisplural::Plural;
}
