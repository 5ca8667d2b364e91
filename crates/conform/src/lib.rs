//! Structural matching for nested values
//!
//! A [`Schema`] mixes literal values with named predicates ([`IsDef`]).
//! Compiling it yields a [`Validator`], which checks an actual [`Value`] and
//! reports one [`ValueResult`] per checked path, grouped in [`Results`].
//!
//! ```
//! use conform::predicates::{is_int_gt, is_string};
//! use conform::{Value, compose, must_compile, schema, strict};
//! use serde_json::json;
//!
//! let pet = must_compile(&schema!({
//!     "name" => is_string(),
//!     "age" => is_int_gt(0),
//! }));
//! let dog = must_compile(&schema!({ "barks" => true }));
//! let validator = strict(compose([pet, dog]));
//!
//! let actual: Value = json!({"name": "rex", "age": 3, "barks": true}).into();
//! assert!(validator.validate(&actual).is_valid());
//!
//! let actual: Value = json!({"name": "rex", "age": 3, "barks": true, "meows": false}).into();
//! let results = validator.validate(&actual);
//! assert!(!results.is_valid());
//! assert!(results.get("meows").unwrap()[0].is_strict_failure());
//! ```

mod compile;
mod error;
mod isdef;
pub mod predicates;
pub mod results;
mod schema;
mod strict;
mod validator;
mod walk;

pub use conform_value as value;
pub use conform_value::{
    Array, EqualityFn, EqualityRegistry, Map, Path, PathError, PathSegment, Value, ValueKind,
};

pub use compile::{CompileConfig, Compiler, compile, must_compile};
pub use error::CompileError;
pub use isdef::{
    Checker, IsDef, UniqScopeTracker, is, is_any, is_slice_of, is_unique, optional,
    scoped_is_unique,
};
pub use results::{ResultKind, Results, ValueResult, ValueResultError};
pub use schema::{Schema, SchemaMap};
pub use strict::strict;
pub use validator::{Validator, compose};
