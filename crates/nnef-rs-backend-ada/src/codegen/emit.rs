use nnef_rs::{Argument, Operation, Value};

use crate::{GenerationError, GenerationResult};

use super::attrs::format_attribute;
use super::types::{tensor_declaration, tensor_type_name};
use super::value::render_value;
use super::EmitContext;

const DECL_INDENT: &str = "    ";
const STMT_INDENT: &str = "        ";

pub(crate) fn emit_operation(ctx: &mut EmitContext, operation: &Operation) -> GenerationResult<()> {
    match operation.name.as_str() {
        "external" => emit_external(ctx, operation),
        "variable" => emit_variable(ctx, operation),
        _ => emit_call(ctx, operation),
    }
}

fn output_tensor_id<'a>(operation: &Operation, output: &'a Argument) -> GenerationResult<&'a str> {
    output.value.as_identifier().ok_or_else(|| {
        GenerationError::new(format!(
            "output '{}' of operation '{}' must be a tensor identifier, got {}",
            output.name,
            operation.name,
            output.value.kind_name()
        ))
    })
}

/// Source tensor fed by the host. The tensor is already declared as a
/// graph input or output, so only the load statement is emitted.
fn emit_external(ctx: &mut EmitContext, operation: &Operation) -> GenerationResult<()> {
    for output in &operation.outputs {
        let id = output_tensor_id(operation, output)?;
        let tensor = ctx.graph.tensor(&operation.name, id)?;
        ctx.statements.push_str(&format!(
            "{STMT_INDENT}external (\"{}\", {});\n",
            tensor.name,
            ctx.names.resolve(&tensor.name)
        ));
        ctx.external_types.insert(tensor_type_name(tensor));
    }
    Ok(())
}

/// Parameter tensor loaded from storage under its label: declared in the
/// package spec, filled by a load statement.
fn emit_variable(ctx: &mut EmitContext, operation: &Operation) -> GenerationResult<()> {
    let label = operation
        .attrib("label")
        .ok_or_else(|| {
            GenerationError::new("variable operation is missing its 'label' attribute")
        })?
        .as_string()
        .ok_or_else(|| GenerationError::new("variable 'label' attribute must be a string"))?
        .to_string();
    for output in &operation.outputs {
        let id = output_tensor_id(operation, output)?;
        let tensor = ctx.graph.tensor(&operation.name, id)?;
        ctx.declarations.push_str(&format!(
            "{DECL_INDENT}{}\n",
            tensor_declaration(tensor, &ctx.names)
        ));
        ctx.statements.push_str(&format!(
            "{STMT_INDENT}variable (\"{label}\", {});\n",
            ctx.names.resolve(&tensor.name)
        ));
        ctx.variable_types.insert(tensor_type_name(tensor));
    }
    Ok(())
}

/// `add` and `mul` commute; the target call convention wants the tensor
/// operand first even when the source put a literal there.
fn commutes(operation: &Operation) -> bool {
    operation.name == "add" || operation.name == "mul"
}

fn emit_call(ctx: &mut EmitContext, operation: &Operation) -> GenerationResult<()> {
    let mut arguments: Vec<String> = Vec::new();

    let mut index = 0;
    while index < operation.inputs.len() {
        let input = &operation.inputs[index];
        if index == 0 && commutes(operation) && !input.value.is_identifier() {
            if let Some(Value::Identifier(id)) =
                operation.inputs.get(1).map(|argument| &argument.value)
            {
                // Swap the pair; each operand keeps its own parameter name.
                arguments.push(format!(
                    "{} => {}",
                    operation.inputs[1].name,
                    ctx.names.resolve(id)
                ));
                arguments.push(format!("{} => {}", input.name, render_value(&input.value)));
                index = 2;
                continue;
            }
        }
        match &input.value {
            Value::Identifier(id) => {
                arguments.push(format!("{} => {}", input.name, ctx.names.resolve(id)));
            }
            other => arguments.push(format!("{} => {}", input.name, render_value(other))),
        }
        index += 1;
    }

    // reshape's attributes restate shape information the declarations
    // already carry.
    if operation.name != "reshape" {
        for attribute in &operation.attribs {
            arguments.push(format_attribute(
                ctx.graph,
                operation,
                &attribute.name,
                &attribute.value,
            )?);
        }
    }

    for output in &operation.outputs {
        let id = output_tensor_id(operation, output)?;
        let tensor = ctx.graph.tensor(&operation.name, id)?;
        if ctx.graph.is_graph_output(id) {
            ctx.output_types.insert(tensor_type_name(tensor));
        } else {
            // Intermediates need a declaration before first use.
            ctx.forward_decls.push_str(&format!(
                "{STMT_INDENT}{}\n",
                tensor_declaration(tensor, &ctx.names)
            ));
        }
        arguments.push(format!("{} => {}", output.name, ctx.names.resolve(id)));
    }

    ctx.statements.push_str(&format!(
        "{STMT_INDENT}{} ({});\n",
        operation.name,
        arguments.join(", ")
    ));
    Ok(())
}
