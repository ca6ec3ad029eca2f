use crate::GenerationResult;

use super::types::tensor_declaration;
use super::{AdaProgram, EmitContext};

/// Stitches the accumulated buffers into the three compilation units.
pub(crate) fn assemble(ctx: EmitContext) -> GenerationResult<AdaProgram> {
    let name = ctx.graph.name.clone();
    Ok(AdaProgram {
        declarations_unit: declarations_unit(&ctx, &name)?,
        body_unit: body_unit(&ctx, &name),
        runner_unit: runner_unit(&ctx, &name)?,
        name,
    })
}

fn declarations_unit(ctx: &EmitContext, name: &str) -> GenerationResult<String> {
    let mut unit = String::new();
    unit.push_str("with Generic_Real_Arrays;\n");
    unit.push_str("with Generic_Real_Arrays.Operators;\n");
    unit.push_str(&format!("package {name} is\n"));
    unit.push_str("    pragma Preelaborate;\n");
    unit.push_str("    package Real_Arrays is new Generic_Real_Arrays(Real => Float);\n");
    unit.push_str("    package Operators is new Real_Arrays.Operators;\n");
    unit.push_str("    use Real_Arrays;\n");
    unit.push_str("    use Operators;\n");
    for id in ctx.graph.inputs.iter().chain(&ctx.graph.outputs) {
        let tensor = ctx.graph.tensor("graph interface", id)?;
        unit.push_str(&format!("    {}\n", tensor_declaration(tensor, &ctx.names)));
    }
    unit.push_str(&ctx.declarations);
    unit.push_str(&ctx.forward_decls);
    unit.push_str("    procedure Forward;\n");
    unit.push_str(&format!("end {name};\n"));
    Ok(unit)
}

fn body_unit(ctx: &EmitContext, name: &str) -> String {
    let mut unit = String::new();
    unit.push_str(&format!("package body {name} is\n"));
    unit.push_str("    procedure Forward is\n");
    unit.push_str("    begin\n");
    unit.push_str(&ctx.statements);
    unit.push_str("    end Forward;\n");
    unit.push_str(&format!("end {name};\n"));
    unit
}

fn runner_unit(ctx: &EmitContext, name: &str) -> GenerationResult<String> {
    let mut unit = String::new();
    unit.push_str(&format!("with {name}; use {name};\n"));
    unit.push_str(&format!("use {name}.Real_Arrays;\n"));
    unit.push_str(&format!("procedure {name}_Run is\n"));
    for type_name in &ctx.external_types {
        unit.push_str(&format!(
            "    procedure External (Var_Name: String; Tensor: out {type_name}) is\n"
        ));
        unit.push_str("    begin\n        null;\n    end External;\n");
    }
    for type_name in &ctx.variable_types {
        unit.push_str(&format!(
            "    procedure Variable (Var_Name: String; Tensor: out {type_name}) is\n"
        ));
        unit.push_str("    begin\n        null;\n    end Variable;\n");
    }
    for type_name in &ctx.output_types {
        unit.push_str(&format!(
            "    procedure Output (Tensor: {type_name}; Var_Name: String) is\n"
        ));
        unit.push_str("    begin\n        null;\n    end Output;\n");
    }
    unit.push_str("begin\n");
    unit.push_str("    Forward;\n");
    for id in &ctx.graph.outputs {
        let tensor = ctx.graph.tensor("graph interface", id)?;
        unit.push_str(&format!(
            "    Output ({}, \"{}\");\n",
            ctx.names.resolve(&tensor.name),
            tensor.name
        ));
    }
    unit.push_str(&format!("end {name}_Run;\n"));
    Ok(unit)
}
