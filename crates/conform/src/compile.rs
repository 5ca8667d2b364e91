//! Schema compilation
//!
//! Compiling flattens a [`Schema`] into a list of `(path, IsDef)` checks.
//! Literals become equality checks; empty schema maps and slices become
//! equality checks against an empty map or array. The resulting
//! [`Validator`] resolves each path against the actual value and runs its
//! check, passing `None` when the path does not resolve.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::predicates::is_equal_with;
use crate::walk::{WalkInfo, walk};
use crate::{Array, CompileError, EqualityRegistry, IsDef, Map, Path, Results, Schema, Validator, Value};

#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Parse root schema keys as paths, so `"a.b"` addresses `b` inside `a`
    pub expand_paths: bool,
    /// Comparisons used for literal schema values
    pub equality: EqualityRegistry,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            expand_paths: true,
            equality: EqualityRegistry::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompileConfig,
}

struct FlatCheck {
    path: Path,
    def: IsDef,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompileConfig) -> Self {
        Self { config }
    }

    pub fn expand_paths(mut self, expand_paths: bool) -> Self {
        self.config.expand_paths = expand_paths;
        self
    }

    pub fn equality(mut self, equality: EqualityRegistry) -> Self {
        self.config.equality = equality;
        self
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    pub fn compile(&self, schema: &Schema) -> Result<Validator, CompileError> {
        let mut checks = Vec::new();
        walk(
            schema,
            self.config.expand_paths,
            &mut |info: WalkInfo<'_, Schema>| -> Result<(), CompileError> {
                if let Some(def) = self.leaf_check(info.node) {
                    checks.push(FlatCheck {
                        path: info.path,
                        def,
                    });
                }
                Ok(())
            },
        )?;
        debug!(checks = checks.len(), "compiled schema");

        let checks = Arc::new(checks);
        Ok(Validator::new(move |actual| {
            let mut results = Results::new();
            for check in checks.iter() {
                trace!(path = %check.path, check = check.def.name(), "running check");
                let found = check.path.get_from(actual);
                results.merge(check.def.check(&check.path, found));
            }
            results
        }))
    }

    /// Compile a schema known to be well-formed.
    ///
    /// # Panics
    ///
    /// Panics if the schema does not compile.
    pub fn must_compile(&self, schema: &Schema) -> Validator {
        match self.compile(schema) {
            Ok(validator) => validator,
            Err(err) => panic!("failed to compile schema: {err}"),
        }
    }

    /// The check for a node, or `None` for a non-empty map or slice whose
    /// children carry the checks.
    fn leaf_check(&self, node: &Schema) -> Option<IsDef> {
        let expected = match node {
            Schema::Is(def) => return Some(def.clone()),
            Schema::Literal(value) => value.clone(),
            Schema::Map(map) if map.is_empty() => Value::Map(Map::default()),
            Schema::Slice(items) if items.is_empty() => Value::Array(Array::default()),
            Schema::Map(_) | Schema::Slice(_) => return None,
        };
        Some(is_equal_with(expected, &self.config.equality))
    }
}

/// Compile with the default [`CompileConfig`].
pub fn compile(schema: &Schema) -> Result<Validator, CompileError> {
    Compiler::new().compile(schema)
}

/// Compile with the default [`CompileConfig`], panicking on a malformed
/// schema. Meant for schemas written out in source.
pub fn must_compile(schema: &Schema) -> Validator {
    Compiler::new().must_compile(schema)
}
