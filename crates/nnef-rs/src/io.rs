use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::graph::{Graph, GraphError};

/// Options shared by every front end implementing the load contract.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Replacement for the built-in standard operation library. Consumed
    /// by textual NNEF front ends; the JSON loader accepts and ignores it.
    pub stdlib: Option<String>,
}

#[derive(Debug, Error)]
pub enum GraphIoError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GraphError),
}

impl GraphIoError {
    /// `true` for failures of the load/parse stage, as opposed to graphs
    /// that loaded but violate the shape-annotated contract.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, GraphIoError::Io(_) | GraphIoError::Json(_))
    }
}

impl Graph {
    pub fn from_json_str(src: &str) -> Result<Self, GraphIoError> {
        let graph: Graph = serde_json::from_str(src)?;
        graph.validate()?;
        Ok(graph)
    }
}

/// Loads and validates a graph from the JSON interchange format.
pub fn load_graph<P: AsRef<Path>>(path: P, _options: &LoadOptions) -> Result<Graph, GraphIoError> {
    let contents = fs::read_to_string(path)?;
    Graph::from_json_str(&contents)
}
