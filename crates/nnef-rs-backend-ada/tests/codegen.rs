use std::collections::BTreeMap;

use nnef_rs::{Argument, Graph, Operation, Tensor, Value};
use nnef_rs_backend_ada::generate_ada_program;

fn id(name: &str) -> Value {
    Value::Identifier(name.to_string())
}

fn tensor(name: &str, dtype: &str, shape: &[usize]) -> (String, Tensor) {
    (
        name.to_string(),
        Tensor {
            name: name.to_string(),
            dtype: dtype.to_string(),
            shape: shape.to_vec(),
            data: None,
        },
    )
}

fn external_op(output: &str, shape: &[usize]) -> Operation {
    Operation {
        name: "external".to_string(),
        inputs: Vec::new(),
        outputs: vec![Argument::new(output, id(output))],
        attribs: vec![Argument::new(
            "shape",
            Value::Array(shape.iter().map(|&d| Value::Integer(d as i64)).collect()),
        )],
    }
}

fn graph(
    name: &str,
    inputs: &[&str],
    outputs: &[&str],
    tensors: BTreeMap<String, Tensor>,
    operations: Vec<Operation>,
) -> Graph {
    let graph = Graph {
        name: name.to_string(),
        inputs: inputs.iter().map(|s| s.to_string()).collect(),
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
        tensors,
        operations,
    };
    graph.validate().expect("test graph is well formed");
    graph
}

#[test]
fn external_add_round_trip() {
    let tensors = [
        tensor("x", "scalar", &[2, 3]),
        tensor("y", "scalar", &[2, 3]),
    ]
    .into_iter()
    .collect();
    let add = Operation {
        name: "add".to_string(),
        inputs: vec![
            Argument::new("x", id("x")),
            Argument::new("y", Value::Scalar(0.5)),
        ],
        outputs: vec![Argument::new("z", id("y"))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[2, 3]), add],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");

    assert!(program
        .declarations_unit
        .contains("x: Real_Matrix (1..2, 1..3);"));
    assert!(program
        .declarations_unit
        .contains("y: Real_Matrix (1..2, 1..3);"));
    assert!(program.declarations_unit.contains("procedure Forward;"));

    assert!(program.body_unit.contains("external (\"x\", x);"));
    assert!(program.body_unit.contains("add (x => x, y => 0.5, z => y);"));

    // One External stub and one Output stub, both for Real_Matrix.
    assert_eq!(program.runner_unit.matches("procedure External").count(), 1);
    assert_eq!(program.runner_unit.matches("procedure Output").count(), 1);
    assert!(program
        .runner_unit
        .contains("procedure External (Var_Name: String; Tensor: out Real_Matrix) is"));
    assert!(program
        .runner_unit
        .contains("procedure Output (Tensor: Real_Matrix; Var_Name: String) is"));
    assert!(!program.runner_unit.contains("procedure Variable"));
    assert!(program.runner_unit.contains("    Forward;\n"));
    assert!(program.runner_unit.contains("Output (y, \"y\");"));
}

#[test]
fn labeled_text_carries_one_header_per_unit() {
    let tensors = [tensor("x", "scalar", &[4]), tensor("y", "scalar", &[4])]
        .into_iter()
        .collect();
    let relu = Operation {
        name: "relu".to_string(),
        inputs: vec![Argument::new("x", id("x"))],
        outputs: vec![Argument::new("y", id("y"))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[4]), relu],
    );

    let text = generate_ada_program(&graph)
        .expect("generation succeeds")
        .to_labeled_text();
    let ads = text.find("-- net.ads\n").expect("spec header");
    let adb = text.find("-- net.adb\n").expect("body header");
    let run = text.find("-- net_run.adb\n").expect("runner header");
    assert!(ads < adb && adb < run);
}

#[test]
fn add_with_leading_literal_swaps_operands() {
    let tensors = [tensor("x", "scalar", &[4]), tensor("y", "scalar", &[4])]
        .into_iter()
        .collect();
    let add = Operation {
        name: "add".to_string(),
        inputs: vec![
            Argument::new("x", Value::Scalar(2.5)),
            Argument::new("y", id("x")),
        ],
        outputs: vec![Argument::new("z", id("y"))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[4]), add],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    // The identifier operand leads, each operand under its own name.
    assert!(program.body_unit.contains("add (y => x, x => 2.5, z => y);"));
}

#[test]
fn mul_with_leading_identifier_keeps_order() {
    let tensors = [tensor("x", "scalar", &[4]), tensor("y", "scalar", &[4])]
        .into_iter()
        .collect();
    let mul = Operation {
        name: "mul".to_string(),
        inputs: vec![
            Argument::new("x", id("x")),
            Argument::new("y", Value::Scalar(3.0)),
        ],
        outputs: vec![Argument::new("z", id("y"))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[4]), mul],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    assert!(program.body_unit.contains("mul (x => x, y => 3.0, z => y);"));
}

#[test]
fn variable_declares_and_loads_by_label() {
    let tensors = [
        tensor("x", "scalar", &[1, 4]),
        tensor("w", "scalar", &[4, 3]),
        tensor("y", "scalar", &[1, 3]),
    ]
    .into_iter()
    .collect();
    let variable = Operation {
        name: "variable".to_string(),
        inputs: Vec::new(),
        outputs: vec![Argument::new("output", id("w"))],
        attribs: vec![
            Argument::new("label", Value::String("w1".to_string())),
            Argument::new(
                "shape",
                Value::Array(vec![Value::Integer(4), Value::Integer(3)]),
            ),
        ],
    };
    let matmul = Operation {
        name: "matmul".to_string(),
        inputs: vec![Argument::new("A", id("x")), Argument::new("B", id("w"))],
        outputs: vec![Argument::new("C", id("y"))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[1, 4]), variable, matmul],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    assert!(program
        .declarations_unit
        .contains("w: Real_Matrix (1..4, 1..3);"));
    assert!(program.body_unit.contains("variable (\"w1\", w);"));
    assert!(program
        .runner_unit
        .contains("procedure Variable (Var_Name: String; Tensor: out Real_Matrix) is"));
}

#[test]
fn intermediate_tensors_get_forward_declarations() {
    let tensors = [
        tensor("x", "scalar", &[4]),
        tensor("t", "scalar", &[4]),
        tensor("y", "scalar", &[4]),
    ]
    .into_iter()
    .collect();
    let relu = Operation {
        name: "relu".to_string(),
        inputs: vec![Argument::new("x", id("x"))],
        outputs: vec![Argument::new("y", id("t"))],
        attribs: Vec::new(),
    };
    let sigmoid = Operation {
        name: "sigmoid".to_string(),
        inputs: vec![Argument::new("x", id("t"))],
        outputs: vec![Argument::new("y", id("y"))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[4]), relu, sigmoid],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    // The intermediate is declared in the package spec before Forward.
    let decl = program
        .declarations_unit
        .find("t: Real_Vector (1..4);")
        .expect("intermediate declared");
    let forward = program
        .declarations_unit
        .find("procedure Forward;")
        .expect("signature present");
    assert!(decl < forward);
    // Graph outputs are declared once, as interface tensors only.
    assert_eq!(
        program
            .declarations_unit
            .matches("y: Real_Vector (1..4);")
            .count(),
        1
    );
}

#[test]
fn tensors_named_after_operations_are_renamed() {
    let tensors = [tensor("x", "scalar", &[4]), tensor("add", "scalar", &[4])]
        .into_iter()
        .collect();
    let add = Operation {
        name: "add".to_string(),
        inputs: vec![
            Argument::new("x", id("x")),
            Argument::new("y", Value::Scalar(1.0)),
        ],
        outputs: vec![Argument::new("z", id("add"))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["x"],
        &["add"],
        tensors,
        vec![external_op("x", &[4]), add],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    assert!(program
        .declarations_unit
        .contains("add_0: Real_Vector (1..4);"));
    assert!(program
        .body_unit
        .contains("add (x => x, y => 1.0, z => add_0);"));
    assert!(program.runner_unit.contains("Output (add_0, \"add\");"));
}

#[test]
fn reshape_attributes_are_suppressed() {
    let tensors = [
        tensor("x", "scalar", &[2, 3]),
        tensor("y", "scalar", &[6]),
    ]
    .into_iter()
    .collect();
    let reshape = Operation {
        name: "reshape".to_string(),
        inputs: vec![Argument::new("input", id("x"))],
        outputs: vec![Argument::new("output", id("y"))],
        attribs: vec![Argument::new(
            "shape",
            Value::Array(vec![Value::Integer(6)]),
        )],
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[2, 3]), reshape],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    assert!(program
        .body_unit
        .contains("reshape (input => x, output => y);"));
    assert!(!program.body_unit.contains("shape =>"));
}

#[test]
fn runner_stubs_come_out_sorted_per_registry() {
    let tensors = [
        tensor("a", "scalar", &[4]),
        tensor("b", "integer", &[4]),
        tensor("p", "scalar", &[4]),
        tensor("q", "integer", &[4]),
    ]
    .into_iter()
    .collect();
    let copy = |input: &str, output: &str, name: &str| Operation {
        name: name.to_string(),
        inputs: vec![Argument::new("x", id(input))],
        outputs: vec![Argument::new("y", id(output))],
        attribs: Vec::new(),
    };
    let graph = graph(
        "net",
        &["a", "b"],
        &["p", "q"],
        tensors,
        vec![
            // Registration order is integer-first; emission must sort.
            external_op("b", &[4]),
            external_op("a", &[4]),
            copy("b", "q", "neg"),
            copy("a", "p", "relu"),
        ],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    let runner = &program.runner_unit;
    let int_ext = runner
        .find("Tensor: out Integer_Vector")
        .expect("integer external stub");
    let real_ext = runner
        .find("Tensor: out Real_Vector")
        .expect("real external stub");
    assert!(int_ext < real_ext);
    let int_out = runner
        .find("Tensor: Integer_Vector")
        .expect("integer output stub");
    let real_out = runner
        .find("Tensor: Real_Vector")
        .expect("real output stub");
    assert!(int_out < real_out);
}

#[test]
fn conv_with_empty_window_attributes() {
    let tensors = [
        tensor("x", "scalar", &[1, 3, 8, 8]),
        tensor("w", "scalar", &[16, 3, 3, 3]),
        tensor("y", "scalar", &[1, 16, 8, 8]),
    ]
    .into_iter()
    .collect();
    let variable = Operation {
        name: "variable".to_string(),
        inputs: Vec::new(),
        outputs: vec![Argument::new("output", id("w"))],
        attribs: vec![
            Argument::new("label", Value::String("conv1/w".to_string())),
            Argument::new("shape", Value::Array(Vec::new())),
        ],
    };
    let conv = Operation {
        name: "conv".to_string(),
        inputs: vec![
            Argument::new("input", id("x")),
            Argument::new("filter", id("w")),
        ],
        outputs: vec![Argument::new("output", id("y"))],
        attribs: vec![
            Argument::new("border", Value::String("constant".to_string())),
            Argument::new("padding", Value::Array(Vec::new())),
            Argument::new("stride", Value::Array(Vec::new())),
            Argument::new("dilation", Value::Array(Vec::new())),
        ],
    };
    let graph = graph(
        "net",
        &["x"],
        &["y"],
        tensors,
        vec![external_op("x", &[1, 3, 8, 8]), variable, conv],
    );

    let program = generate_ada_program(&graph).expect("generation succeeds");
    assert!(program.body_unit.contains(
        "conv (input => x, filter => w, border => Border_Mode_constant, \
         padding => Padding_Auto, stride => Default_Stride, \
         dilation => Default_Dilation, output => y);"
    ));
}

#[test]
fn generation_rejects_non_identifier_outputs() {
    let tensors = [tensor("x", "scalar", &[4])].into_iter().collect();
    let bad = Operation {
        name: "relu".to_string(),
        inputs: vec![Argument::new("x", id("x"))],
        outputs: vec![Argument::new("y", Value::Integer(1))],
        attribs: Vec::new(),
    };
    let graph = graph("net", &["x"], &[], tensors, vec![bad]);
    let err = generate_ada_program(&graph).expect_err("must fail fast");
    assert!(err.to_string().contains("must be a tensor identifier"));
}
