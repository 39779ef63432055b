//! # Transform engine
//!
//! Affine-matrix decomposition and recomposition, and the fold of typed
//! transform-function lists into a node's local transform.
//!
//! The decomposition side ([`decompose`]) recovers
//! translation/rotation/scale/skew/perspective from composed 3x3 and 4x4
//! matrices, handling the numerical singularities (zero homogeneous
//! coordinate, near-singular perspective submatrix, gimbal lock) that show up
//! on the per-frame render path. The application side ([`function`]) walks an
//! ordered transform-function list and drives a node's incremental transform
//! ops ([`node`]), exactly mirroring how declared CSS-like transforms compose.
//!
//! Everything here is pure and synchronous; the only mutation is
//! [`function::apply`] writing through `&mut` to its target node.

pub mod decompose;
pub mod function;
pub mod node;

pub use decompose::{
    decompose_mat3, decompose_mat4, euler_from_mat4, euler_from_quat, recompose_2d, to_affine_2d,
    Affine2d, DecomposedTransform, GIMBAL_LOCK_EPSILON, SINGULAR_DETERMINANT_EPSILON,
};
pub use function::{apply, TransformFunction, TransformList};
pub use node::TransformNode;
