use thiserror::Error;

use crate::PathError;

/// Problems with a schema, found before any data is seen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A root schema key did not parse as a path
    #[error(transparent)]
    InvalidPath(#[from] PathError),
}
