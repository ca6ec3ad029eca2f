//! In-memory representation of NNEF computation graphs.
//!
//! The graph arrives here fully parsed and shape-annotated: an upstream
//! front end is responsible for NNEF text parsing, lowering of composite
//! operations (see [`lowering`]) and shape inference. This crate defines
//! the data model those collaborators hand over, validates the invariants
//! they guarantee, and loads graphs from the JSON interchange format.

pub mod graph;
pub mod io;
pub mod lowering;

pub use graph::{Argument, Graph, GraphError, Operation, Tensor, Value};
pub use io::{load_graph, GraphIoError, LoadOptions};
