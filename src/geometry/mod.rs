//! Geometric Primitives and Operations
//!
//! kurbo supplies points, lines, curves and arc approximation; this module
//! wraps them into the outline vocabulary the rest of the pipeline speaks.

pub mod curves;
pub mod figure;
pub mod transform;

// Re-export commonly used items
pub use figure::{aggregate_bounding_box, Figure, Shape};
pub use transform::{apply_transforms, transform_shape, Transform};
