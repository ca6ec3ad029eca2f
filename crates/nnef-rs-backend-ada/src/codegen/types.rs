use nnef_rs::Tensor;

use super::names::NameTable;

/// Ada element-type family for an NNEF dtype. Extension dtypes pass
/// through verbatim as the family prefix.
pub(crate) fn element_family(dtype: &str) -> &str {
    match dtype {
        "scalar" => "Real",
        "integer" => "Integer",
        "logical" => "Boolean",
        other => other,
    }
}

pub(crate) fn rank_suffix(rank: usize) -> &'static str {
    match rank {
        1 => "Vector",
        2 => "Matrix",
        3 => "Tensor_3D",
        4 => "Tensor_4D",
        _ => "Tensor",
    }
}

/// Total mapping from (dtype, rank) to an Ada array type name.
pub(crate) fn ada_type_name(dtype: &str, rank: usize) -> String {
    format!("{}_{}", element_family(dtype), rank_suffix(rank))
}

pub(crate) fn tensor_type_name(tensor: &Tensor) -> String {
    ada_type_name(&tensor.dtype, tensor.rank())
}

/// Index constraints for an object declaration: `1..a, 1..b, ...`.
pub(crate) fn extents(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|extent| format!("1..{extent}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn tensor_declaration(tensor: &Tensor, names: &NameTable) -> String {
    format!(
        "{}: {} ({});",
        names.resolve(&tensor.name),
        tensor_type_name(tensor),
        extents(&tensor.shape)
    )
}
