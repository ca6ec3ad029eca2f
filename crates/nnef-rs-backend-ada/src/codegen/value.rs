use nnef_rs::Value;

/// Ada literal text for a scalar. Integral values are forced into float
/// literal syntax, which Ada requires for the Real family.
pub(crate) fn format_scalar(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value}.0")
    } else {
        format!("{value}")
    }
}

/// Renders a value in a literal, attribute-agnostic context, e.g. inside
/// a nested tuple. Attribute-aware policy lives in `attrs`.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::None => "None".to_string(),
        Value::String(text) => text.clone(),
        Value::Identifier(id) => id.clone(),
        Value::Logical(true) => "true".to_string(),
        Value::Logical(false) => "false".to_string(),
        Value::Integer(number) => number.to_string(),
        Value::Scalar(number) => format_scalar(*number),
        Value::Array(items) | Value::Tuple(items) => {
            let rendered: Vec<String> = items.iter().map(render_value).collect();
            format!("({})", rendered.join(", "))
        }
    }
}
