//! Composite operations the upstream loader must expand into primitives.
//!
//! Backends only understand primitive operations; the front end is handed
//! this set and lowers every occurrence before the graph crosses the
//! interchange boundary. [`crate::graph::Graph::validate`] enforces that
//! none of these names survive.

pub const LOWERED_OPERATIONS: &[&str] = &[
    "separable_conv",
    "separable_deconv",
    "rms_pool",
    "local_response_normalization",
    "local_mean_normalization",
    "local_variance_normalization",
    "local_contrast_normalization",
    "l1_normalization",
    "l2_normalization",
    "batch_normalization",
    "area_downsample",
    "nearest_downsample",
    "nearest_upsample",
    "linear_quantize",
    "logarithmic_quantize",
    "leaky_relu",
    "prelu",
    "clamp",
];

pub fn is_lowered(name: &str) -> bool {
    LOWERED_OPERATIONS.contains(&name)
}
