use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lowering;

/// Tagged literal or identifier appearing in operation arguments and
/// attributes.
///
/// The set of variants is closed; consumers are expected to match
/// exhaustively and reject variants that are invalid in their position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    None,
    String(String),
    Identifier(String),
    Logical(bool),
    Integer(i64),
    Scalar(f64),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Human-readable variant name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::String(_) => "string",
            Value::Identifier(_) => "identifier",
            Value::Logical(_) => "logical",
            Value::Integer(_) => "integer",
            Value::Scalar(_) => "scalar",
            Value::Array(_) => "array",
            Value::Tuple(_) => "tuple",
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, Value::Identifier(_))
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Value::Identifier(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Element list of an array or tuple value.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    fn for_each_identifier<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Value::Identifier(id) => visit(id),
            Value::Array(items) | Value::Tuple(items) => {
                for item in items {
                    item.for_each_identifier(visit);
                }
            }
            _ => {}
        }
    }
}

/// Named argument of an operation: a `(parameter name, value)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Named, typed, shaped data slot in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub name: String,
    /// Element kind: `scalar`, `integer`, `logical`, or an extension dtype
    /// passed through verbatim.
    pub dtype: String,
    /// Positive extents; rank is the number of entries. Shape inference
    /// guarantees this is populated before the graph reaches a backend.
    pub shape: Vec<usize>,
    /// Raw buffer carried for the tensor-IO path; code generation never
    /// reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
}

impl Tensor {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }
}

/// A computational step: named inputs, outputs and attributes.
///
/// Attribute order is declaration order and is significant for emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Argument>,
    #[serde(default)]
    pub outputs: Vec<Argument>,
    #[serde(default)]
    pub attribs: Vec<Argument>,
}

impl Operation {
    pub fn attrib(&self, name: &str) -> Option<&Value> {
        self.attribs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }
}

/// A dataflow graph: designated inputs/outputs, tensors and operations in
/// execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    pub tensors: BTreeMap<String, Tensor>,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("operation '{operation}' references unknown tensor '{id}'")]
    MissingTensor { operation: String, id: String },
    #[error("graph {role} '{id}' is not a declared tensor")]
    UndeclaredIo { role: &'static str, id: String },
    #[error("tensor '{name}' has no inferred shape")]
    MissingShape { name: String },
    #[error("tensor '{name}' has a zero extent in its shape")]
    ZeroExtent { name: String },
    #[error("operation '{name}' must be lowered before code generation")]
    UnloweredOperation { name: String },
}

impl Graph {
    /// Looks up a tensor referenced by `operation`, reporting the reference
    /// site on failure.
    pub fn tensor(&self, operation: &str, id: &str) -> Result<&Tensor, GraphError> {
        self.tensors.get(id).ok_or_else(|| GraphError::MissingTensor {
            operation: operation.to_string(),
            id: id.to_string(),
        })
    }

    pub fn is_graph_output(&self, id: &str) -> bool {
        self.outputs.iter().any(|output| output == id)
    }

    /// Checks the invariants the upstream loader and shape inference are
    /// contracted to guarantee. Run once after load, before generation.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (role, ids) in [("input", &self.inputs), ("output", &self.outputs)] {
            for id in ids {
                if !self.tensors.contains_key(id) {
                    return Err(GraphError::UndeclaredIo {
                        role,
                        id: id.clone(),
                    });
                }
            }
        }
        for tensor in self.tensors.values() {
            if tensor.shape.is_empty() {
                return Err(GraphError::MissingShape {
                    name: tensor.name.clone(),
                });
            }
            if tensor.shape.contains(&0) {
                return Err(GraphError::ZeroExtent {
                    name: tensor.name.clone(),
                });
            }
        }
        for operation in &self.operations {
            if lowering::is_lowered(&operation.name) {
                return Err(GraphError::UnloweredOperation {
                    name: operation.name.clone(),
                });
            }
            let mut missing = None;
            let mut check = |id: &str| {
                if missing.is_none() && !self.tensors.contains_key(id) {
                    missing = Some(id.to_string());
                }
            };
            for argument in operation
                .inputs
                .iter()
                .chain(&operation.outputs)
                .chain(&operation.attribs)
            {
                argument.value.for_each_identifier(&mut check);
            }
            if let Some(id) = missing {
                return Err(GraphError::MissingTensor {
                    operation: operation.name.clone(),
                    id,
                });
            }
        }
        Ok(())
    }
}
