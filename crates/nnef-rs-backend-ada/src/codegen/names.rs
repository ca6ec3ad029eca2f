use std::collections::BTreeSet;

use nnef_rs::Graph;

/// Operation name that aliases a tensor name in enough published models
/// that it is always treated as taken, whether or not the graph uses it.
const RESERVED_OPERATION: &str = "local_response_normalization";

/// Emitted-identifier table. Ada call syntax uses operation names as
/// callable symbols, so a tensor named after any operation appearing in
/// the graph must be renamed. Built in one pass before emission because
/// collisions depend on the whole-graph operation vocabulary.
pub(crate) struct NameTable {
    known_operations: BTreeSet<String>,
}

impl NameTable {
    pub(crate) fn from_graph(graph: &Graph) -> Self {
        let mut known_operations: BTreeSet<String> = graph
            .operations
            .iter()
            .map(|operation| operation.name.clone())
            .collect();
        known_operations.insert(RESERVED_OPERATION.to_string());
        Self { known_operations }
    }

    /// Emitted name for a tensor: unchanged unless it collides with an
    /// operation symbol, in which case a `_0` suffix disambiguates.
    pub(crate) fn resolve(&self, tensor_name: &str) -> String {
        if self.known_operations.contains(tensor_name) {
            format!("{tensor_name}_0")
        } else {
            tensor_name.to_string()
        }
    }
}
