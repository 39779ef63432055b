//! Low-level point/region predicates shared by the shape-level tests.

use std::f64::consts::TAU;

/// Exact containment in an axis-aligned box, boundary inclusive.
pub fn in_box(min_x: f64, min_y: f64, width: f64, height: f64, x: f64, y: f64) -> bool {
    x >= min_x && x <= min_x + width && y >= min_y && y <= min_y + height
}

/// Containment in the stroke band of an axis-aligned rectangle outline:
/// inside the box expanded by half the line width but not inside the box
/// contracted by it.
pub fn in_rect(
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
    line_width: f64,
    x: f64,
    y: f64,
) -> bool {
    let half = line_width / 2.0;
    in_box(
        min_x - half,
        min_y - half,
        width + line_width,
        height + line_width,
        x,
        y,
    ) && !in_box(
        min_x + half,
        min_y + half,
        width - line_width,
        height - line_width,
        x,
        y,
    )
}

/// Perpendicular distance from a point to the infinite line through
/// `(x1, y1)` and `(x2, y2)`. A degenerate (zero-length) segment falls back
/// to the point distance.
pub fn point_to_line(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx == 0.0 && dy == 0.0 {
        return (x - x1).hypot(y - y1);
    }
    let length = dx.hypot(dy);
    let normal_x = -dy / length;
    let normal_y = dx / length;
    ((x - x1) * normal_x + (y - y1) * normal_y).abs()
}

/// Containment in the stroke band of a line segment: a bounding-box
/// prefilter padded by half the line width, then the perpendicular distance
/// test.
pub fn in_line(x1: f64, y1: f64, x2: f64, y2: f64, line_width: f64, x: f64, y: f64) -> bool {
    let half = line_width / 2.0;
    let within_extent = x >= x1.min(x2) - half
        && x <= x1.max(x2) + half
        && y >= y1.min(y2) - half
        && y <= y1.max(y2) + half;
    if !within_extent {
        return false;
    }
    point_to_line(x1, y1, x2, y2, x, y) <= half
}

/// Containment in the stroke band of a circular arc. Angles are in radians;
/// the point's polar angle is normalized into `[0, 2pi)` before the range
/// check, so arc ranges must be expressed within `[0, 2pi]`.
pub fn in_arc(
    cx: f64,
    cy: f64,
    r: f64,
    start_angle: f64,
    end_angle: f64,
    line_width: f64,
    x: f64,
    y: f64,
) -> bool {
    let angle = ((y - cy).atan2(x - cx) + TAU) % TAU;
    if angle < start_angle || angle > end_angle {
        return false;
    }
    let px = cx + r * angle.cos();
    let py = cy + r * angle.sin();
    (px - x).hypot(py - y) <= line_width / 2.0
}

/// Exact containment in a rounded rectangle's fill (precise fill rule, not an
/// approximation): inside the outer box, and inside the quarter circle
/// whenever the point falls in a corner's radius square. Radii order is
/// top-left, top-right, bottom-right, bottom-left.
pub fn in_rounded_box(
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
    radius: [f64; 4],
    x: f64,
    y: f64,
) -> bool {
    if !in_box(min_x, min_y, width, height, x, y) {
        return false;
    }
    let [tl, tr, br, bl] = radius;

    if x < min_x + tl && y < min_y + tl {
        return (x - (min_x + tl)).hypot(y - (min_y + tl)) <= tl;
    }
    if x > min_x + width - tr && y < min_y + tr {
        return (x - (min_x + width - tr)).hypot(y - (min_y + tr)) <= tr;
    }
    if x > min_x + width - br && y > min_y + height - br {
        return (x - (min_x + width - br)).hypot(y - (min_y + height - br)) <= br;
    }
    if x < min_x + bl && y > min_y + height - bl {
        return (x - (min_x + bl)).hypot(y - (min_y + height - bl)) <= bl;
    }
    true
}
