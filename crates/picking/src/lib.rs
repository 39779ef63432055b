//! # Narrow-phase hit testing
//!
//! Pure geometric predicates answering "does this point hit this shape" for
//! pointer picking. The point is expected to be already projected into the
//! shape's local space by the caller; broad-phase spatial queries and the
//! pointer-event plumbing live elsewhere.
//!
//! None of these predicates can fail: degenerate geometry (zero width,
//! height or radius) resolves through the definitional formulas, with
//! divide-by-zero guarded by skipped renormalization rather than by raising.

mod math;
mod rect;

pub use math::{in_arc, in_box, in_line, in_rect, in_rounded_box, point_to_line};
pub use rect::{point_in_rect, RectGeometry};
