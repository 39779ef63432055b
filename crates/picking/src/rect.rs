//! Shape-level picking for (optionally rounded) rectangles.

use crate::math::{in_arc, in_box, in_line, in_rect, in_rounded_box};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Picking-relevant slice of a rectangle's resolved style.
///
/// `radius` is per corner in top-left, top-right, bottom-right, bottom-left
/// order. `hit_test_padding` widens the stroke band for easier pointer
/// acquisition without affecting the painted width. `clip_path` marks the
/// rect as a clip region, which hit-tests like fill and stroke combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: [f64; 4],
    pub line_width: f64,
    pub hit_test_padding: f64,
    pub has_fill: bool,
    pub has_stroke: bool,
    pub clip_path: bool,
}

impl Default for RectGeometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            radius: [0.0; 4],
            line_width: 0.0,
            hit_test_padding: 0.0,
            has_fill: false,
            has_stroke: false,
            clip_path: false,
        }
    }
}

/// Tests a local-space point against a rectangle's pick region.
///
/// With no corner radius: fill-and-stroke (or clip) tests the box expanded
/// outward by half the effective line width, fill-only tests exact box
/// containment, stroke-only tests the boundary band, and neither flag set is
/// always a miss. With radii: the stroke test is the union of the four edge
/// bands (shortened by the adjacent radii) and the four quarter-arc bands;
/// a miss there falls back to the precise rounded fill when fill or clip is
/// requested. Radii are clamped to half the smaller side first.
pub fn point_in_rect(geometry: &RectGeometry, x: f64, y: f64) -> bool {
    let RectGeometry {
        x: min_x,
        y: min_y,
        width,
        height,
        radius,
        line_width,
        hit_test_padding,
        has_fill,
        has_stroke,
        clip_path,
    } = *geometry;

    if !has_fill && !has_stroke && !clip_path {
        return false;
    }

    let effective_width = line_width + hit_test_padding;
    let has_radius = radius.iter().any(|&r| r != 0.0);

    if !has_radius {
        let half = effective_width / 2.0;
        if (has_fill && has_stroke) || clip_path {
            return in_box(
                min_x - half,
                min_y - half,
                width + effective_width,
                height + effective_width,
                x,
                y,
            );
        }
        if has_fill {
            return in_box(min_x, min_y, width, height, x, y);
        }
        return in_rect(min_x, min_y, width, height, effective_width, x, y);
    }

    let max_radius = (width.abs() / 2.0).min(height.abs() / 2.0);
    let radius = radius.map(|r| r.clamp(0.0, max_radius));

    let mut hit = false;
    if has_stroke || clip_path {
        hit = in_rect_with_radius(min_x, min_y, width, height, radius, effective_width, x, y);
    }
    if !hit && (has_fill || clip_path) {
        hit = in_rounded_box(min_x, min_y, width, height, radius, x, y);
    }
    hit
}

/// Stroke band of a rounded rectangle: the four edges shortened by their
/// adjacent corner radii plus the four corner quarter arcs.
fn in_rect_with_radius(
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
    radius: [f64; 4],
    line_width: f64,
    x: f64,
    y: f64,
) -> bool {
    let [tl, tr, br, bl] = radius;
    in_line(min_x + tl, min_y, min_x + width - tr, min_y, line_width, x, y)
        || in_line(
            min_x + width,
            min_y + tr,
            min_x + width,
            min_y + height - br,
            line_width,
            x,
            y,
        )
        || in_line(
            min_x + width - br,
            min_y + height,
            min_x + bl,
            min_y + height,
            line_width,
            x,
            y,
        )
        || in_line(min_x, min_y + height - bl, min_x, min_y + tl, line_width, x, y)
        || in_arc(
            min_x + width - tr,
            min_y + tr,
            tr,
            1.5 * PI,
            2.0 * PI,
            line_width,
            x,
            y,
        )
        || in_arc(
            min_x + width - br,
            min_y + height - br,
            br,
            0.0,
            0.5 * PI,
            line_width,
            x,
            y,
        )
        || in_arc(
            min_x + bl,
            min_y + height - bl,
            bl,
            0.5 * PI,
            PI,
            line_width,
            x,
            y,
        )
        || in_arc(min_x + tl, min_y + tl, tl, PI, 1.5 * PI, line_width, x, y)
}
