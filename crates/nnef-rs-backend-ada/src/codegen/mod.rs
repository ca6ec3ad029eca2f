mod assemble;
mod attrs;
mod emit;
mod names;
mod types;
mod value;

use std::collections::BTreeSet;

use nnef_rs::Graph;

use crate::GenerationResult;
use self::names::NameTable;

/// The three generated compilation units for one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaProgram {
    pub name: String,
    /// Package spec: tensor declarations and the `Forward` signature.
    pub declarations_unit: String,
    /// Package body: the `Forward` procedure statements in operation order.
    pub body_unit: String,
    /// Driver with host-integration stubs.
    pub runner_unit: String,
}

impl AdaProgram {
    /// Units paired with their conventional file names, in emission order.
    pub fn units(&self) -> [(String, &str); 3] {
        [
            (format!("{}.ads", self.name), self.declarations_unit.as_str()),
            (format!("{}.adb", self.name), self.body_unit.as_str()),
            (format!("{}_run.adb", self.name), self.runner_unit.as_str()),
        ]
    }

    /// All three units as one stream, each introduced by a `-- file`
    /// comment line.
    pub fn to_labeled_text(&self) -> String {
        let mut out = String::new();
        for (file_name, text) in self.units() {
            out.push_str("-- ");
            out.push_str(&file_name);
            out.push('\n');
            out.push_str(text);
        }
        out
    }
}

/// Accumulator state threaded through emission: the text buffers the
/// assembler stitches together and the registries that drive stub
/// generation. Registries are ordered sets so output is diff-stable.
pub(crate) struct EmitContext<'a> {
    pub(crate) graph: &'a Graph,
    pub(crate) names: NameTable,
    /// Declarations of `variable` tensors (package spec).
    pub(crate) declarations: String,
    /// Declarations of intermediate tensors that are not graph outputs
    /// (package spec), so every call target exists before first use.
    pub(crate) forward_decls: String,
    /// Load and call statements in operation order (procedure body).
    pub(crate) statements: String,
    pub(crate) external_types: BTreeSet<String>,
    pub(crate) variable_types: BTreeSet<String>,
    pub(crate) output_types: BTreeSet<String>,
}

impl<'a> EmitContext<'a> {
    fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            names: NameTable::from_graph(graph),
            declarations: String::new(),
            forward_decls: String::new(),
            statements: String::new(),
            external_types: BTreeSet::new(),
            variable_types: BTreeSet::new(),
            output_types: BTreeSet::new(),
        }
    }
}

/// Generates the three Ada units for `graph`.
///
/// The graph must already satisfy [`nnef_rs::Graph::validate`]; this pass
/// performs no further semantic validation beyond what argument
/// formatting requires.
pub fn generate_ada_program(graph: &Graph) -> GenerationResult<AdaProgram> {
    let mut ctx = EmitContext::new(graph);
    for operation in &graph.operations {
        emit::emit_operation(&mut ctx, operation)?;
    }
    assemble::assemble(ctx)
}
