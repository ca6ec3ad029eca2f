//! Ada source generation for NNEF computation graphs.
//!
//! Consumes a validated, shape-annotated [`nnef_rs::Graph`] and produces
//! three coupled Ada compilation units: the package spec declaring every
//! tensor, the package body with the `Forward` procedure executing the
//! graph in operation order, and a runnable driver stub with empty host
//! integration procedures.
//!
//! Generation is a single in-memory pass; the graph is read-only
//! throughout and either all three units are produced or the whole run
//! fails with a [`GenerationError`].

use thiserror::Error;

mod codegen;

pub use codegen::{generate_ada_program, AdaProgram};

/// Failure while emitting Ada source, e.g. a value variant that is not
/// meaningful in its position. Emission stops at the first one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GenerationError {
    message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<nnef_rs::GraphError> for GenerationError {
    fn from(err: nnef_rs::GraphError) -> Self {
        GenerationError::new(err.to_string())
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
