use nnef_rs::{Graph, Operation, Value};

use crate::{GenerationError, GenerationResult};

use super::value::{format_scalar, render_value};

/// Number of leading non-spatial axes (batch, channel) excluded when an
/// empty attribute default is sized from the first input tensor. Listed
/// per operation kind so further window-style operations can be added
/// without touching the formatter.
fn spatial_rank_adjustment(operation_name: &str) -> usize {
    match operation_name {
        "conv" => 2,
        _ => 0,
    }
}

/// Axis-valued attributes switch from the graph's 0-based convention to
/// Ada's 1-based one.
fn is_scalar_axis_attribute(name: &str) -> bool {
    name == "axis" || name == "axis_start"
}

/// Renders one attribute as a named-argument fragment `name => text`.
pub(crate) fn format_attribute(
    graph: &Graph,
    operation: &Operation,
    name: &str,
    value: &Value,
) -> GenerationResult<String> {
    let text = attribute_text(graph, operation, name, value)?;
    Ok(format!("{name} => {text}"))
}

fn attribute_text(
    graph: &Graph,
    operation: &Operation,
    name: &str,
    value: &Value,
) -> GenerationResult<String> {
    // Border modes map onto symbolic constants of the target runtime,
    // bypassing generic value rendering.
    if name == "border" {
        let mode = value.as_string().ok_or_else(|| {
            GenerationError::new(format!(
                "border attribute of operation '{}' must be a string, got {}",
                operation.name,
                value.kind_name()
            ))
        })?;
        return Ok(format!("Border_Mode_{mode}"));
    }
    match value {
        Value::Integer(number) if is_scalar_axis_attribute(name) => Ok((number + 1).to_string()),
        Value::Integer(number) => Ok(number.to_string()),
        Value::Scalar(number) => Ok(format_scalar(*number)),
        Value::Array(items) | Value::Tuple(items) => {
            sequence_attribute_text(graph, operation, name, items)
        }
        other => Ok(render_value(other)),
    }
}

fn sequence_attribute_text(
    graph: &Graph,
    operation: &Operation,
    name: &str,
    items: &[Value],
) -> GenerationResult<String> {
    match items {
        [] => default_attribute_text(graph, operation, name),
        [element] => {
            let text = if name == "axes" {
                (axis_element(operation, name, element)? + 1).to_string()
            } else {
                render_value(element)
            };
            Ok(format!("(1 => {text})"))
        }
        _ => {
            let mut rendered = Vec::with_capacity(items.len());
            for element in items {
                if name == "axes" {
                    rendered.push((axis_element(operation, name, element)? + 1).to_string());
                } else {
                    rendered.push(render_value(element));
                }
            }
            Ok(format!("({})", rendered.join(", ")))
        }
    }
}

fn axis_element(operation: &Operation, name: &str, element: &Value) -> GenerationResult<i64> {
    element.as_integer().ok_or_else(|| {
        GenerationError::new(format!(
            "'{name}' attribute of operation '{}' must hold integers, got {}",
            operation.name,
            element.kind_name()
        ))
    })
}

/// An empty array or tuple means "no explicit value supplied". Window
/// attributes map to symbolic runtime defaults; anything else becomes a
/// zero tuple sized by the spatial rank of the first input tensor.
fn default_attribute_text(
    graph: &Graph,
    operation: &Operation,
    name: &str,
) -> GenerationResult<String> {
    match name {
        "padding" => return Ok("Padding_Auto".to_string()),
        "stride" => return Ok("Default_Stride".to_string()),
        "dilation" => return Ok("Default_Dilation".to_string()),
        _ => {}
    }
    let first = operation.inputs.first().ok_or_else(|| {
        GenerationError::new(format!(
            "cannot default attribute '{name}': operation '{}' has no inputs",
            operation.name
        ))
    })?;
    let id = first.value.as_identifier().ok_or_else(|| {
        GenerationError::new(format!(
            "cannot default attribute '{name}': first input of operation '{}' is {}, not a tensor",
            operation.name,
            first.value.kind_name()
        ))
    })?;
    let tensor = graph.tensor(&operation.name, id)?;
    let adjustment = spatial_rank_adjustment(&operation.name).min(tensor.rank());
    let rank = tensor.rank() - adjustment;
    Ok(format!("({})", vec!["0"; rank].join(", ")))
}
