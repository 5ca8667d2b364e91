use core::fmt;
use std::sync::Arc;

use crate::{Results, Value};

/// A compiled, reusable check: actual value in, [`Results`] out.
///
/// Cloning is cheap and clones share the same underlying function.
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&Value) -> Results + Send + Sync>);

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").finish_non_exhaustive()
    }
}

impl Validator {
    pub fn new(f: impl Fn(&Value) -> Results + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn validate(&self, actual: &Value) -> Results {
        (self.0)(actual)
    }
}

/// Run every validator against the same input and merge their results.
pub fn compose(validators: impl IntoIterator<Item = Validator>) -> Validator {
    let validators: Vec<Validator> = validators.into_iter().collect();
    Validator::new(move |actual| {
        let mut results = Results::new();
        for validator in &validators {
            results.merge(validator.validate(actual));
        }
        results
    })
}
