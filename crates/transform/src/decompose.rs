//! # Matrix Decomposition
//!
//! Recovers translation/rotation/scale/skew/perspective from composed
//! matrices, and rebuilds 2D matrices from those parts. The 4x4 path follows
//! the CSS Transforms unmatrix derivation (the same one Chromium's
//! transform_util uses); the 3x3 path follows the 2D matrix decomposition
//! from css-transforms-1.
//!
//! Decomposition failure is a sentinel (`None`), never a panic or error:
//! it happens on the per-frame render path and callers skip applying that
//! frame's transform instead of aborting.
//!
//! All temporaries are per-call stack locals, so decomposition is safe to
//! invoke reentrantly or from multiple threads.

use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// A perspective submatrix whose determinant magnitude falls below this
/// threshold is treated as singular and the 4x4 decomposition fails.
pub const SINGULAR_DETERMINANT_EPSILON: f64 = 1e-8;

/// Pole-singularity threshold for quaternion-to-Euler extraction: when
/// `|x*w - y*z|` exceeds this fraction of the squared norm, pitch is within
/// float noise of +-90 degrees and the closed-form pole solution is used.
pub const GIMBAL_LOCK_EPSILON: f64 = 0.499995;

/// The parts of a decomposed 4x4 affine matrix.
///
/// `rotation` is unit-length whenever decomposition succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecomposedTransform {
    pub translation: DVec3,
    pub scale: DVec3,
    /// Shear factors XY, XZ, YZ.
    pub skew: DVec3,
    pub perspective: DVec4,
    pub rotation: DQuat,
}

/// The parts of a decomposed 2D affine (3x3) matrix. Scaling is signed; a
/// negative component encodes an axis flip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine2d {
    pub translation: DVec2,
    pub scaling: DVec2,
    pub rotation: f64,
}

/// Decomposes a 4x4 matrix into translation, scale, skew, perspective and a
/// unit rotation quaternion.
///
/// Returns `None` when the matrix cannot be decomposed: a zero homogeneous
/// coordinate (`m[15] == 0`) or a near-singular perspective submatrix.
pub fn decompose_mat4(matrix: &DMat4) -> Option<DecomposedTransform> {
    // Normalize by the homogeneous coordinate; bail out if that is zero.
    let m33 = matrix.w_axis.w;
    if m33 == 0.0 {
        return None;
    }
    let normalized = *matrix * (1.0 / m33);

    // The perspective matrix doubles as the singularity test for the upper
    // 3x3 component.
    let mut perspective_matrix = normalized;
    perspective_matrix.x_axis.w = 0.0;
    perspective_matrix.y_axis.w = 0.0;
    perspective_matrix.z_axis.w = 0.0;
    perspective_matrix.w_axis.w = 1.0;

    if perspective_matrix.determinant().abs() < SINGULAR_DETERMINANT_EPSILON {
        return None;
    }

    let a03 = normalized.x_axis.w;
    let a13 = normalized.y_axis.w;
    let a23 = normalized.z_axis.w;
    let a33 = normalized.w_axis.w;

    // Isolate perspective by solving against the transposed inverse.
    let perspective = if a03 != 0.0 || a13 != 0.0 || a23 != 0.0 {
        let right_hand_side = DVec4::new(a03, a13, a23, a33);
        perspective_matrix.inverse().transpose() * right_hand_side
    } else {
        DVec4::new(0.0, 0.0, 0.0, 1.0)
    };

    let translation = normalized.w_axis.truncate();

    // Gram-Schmidt over the upper-left 3x3 rows: peel off scale, then the
    // three shear factors, leaving orthonormal rows.
    let mut row0 = normalized.x_axis.truncate();
    let mut row1 = normalized.y_axis.truncate();
    let mut row2 = normalized.z_axis.truncate();
    let mut scale = DVec3::ZERO;
    let mut skew = DVec3::ZERO;

    scale.x = row0.length();
    row0 = row0.normalize_or_zero();

    skew.x = row0.dot(row1);
    row1 -= row0 * skew.x;
    scale.y = row1.length();
    row1 = row1.normalize_or_zero();
    skew.x /= scale.y;

    skew.y = row0.dot(row2);
    row2 -= row0 * skew.y;
    skew.z = row1.dot(row2);
    row2 -= row1 * skew.z;
    scale.z = row2.length();
    row2 = row2.normalize_or_zero();
    skew.y /= scale.z;
    skew.z /= scale.z;

    // A negative triple product means a coordinate-system flip: negate the
    // scaling factors and the rows.
    if row0.dot(row1.cross(row2)) < 0.0 {
        scale = -scale;
        row0 = -row0;
        row1 = -row1;
        row2 = -row2;
    }

    // Trace-based quaternion from the orthonormal rows.
    let mut rotation = DQuat::from_xyzw(
        0.5 * (1.0 + row0.x - row1.y - row2.z).max(0.0).sqrt(),
        0.5 * (1.0 - row0.x + row1.y - row2.z).max(0.0).sqrt(),
        0.5 * (1.0 - row0.x - row1.y + row2.z).max(0.0).sqrt(),
        0.5 * (1.0 + row0.x + row1.y + row2.z).max(0.0).sqrt(),
    );
    if row2.y > row1.z {
        rotation.x = -rotation.x;
    }
    if row0.z > row2.x {
        rotation.y = -rotation.y;
    }
    if row1.x > row0.y {
        rotation.z = -rotation.z;
    }

    Some(DecomposedTransform {
        translation,
        scale,
        skew,
        perspective,
        rotation,
    })
}

/// Decomposes a 3x3 (2D affine) matrix into translation, signed scaling and
/// rotation in radians.
///
/// Never fails: a zero scaling component simply skips renormalization.
pub fn decompose_mat3(matrix: &DMat3) -> Affine2d {
    let mut row0x = matrix.x_axis.x;
    let mut row0y = matrix.x_axis.y;
    let row1x = matrix.y_axis.x;
    let row1y = matrix.y_axis.y;

    let mut scaling_x = row0x.hypot(row0y);
    let mut scaling_y = row1x.hypot(row1y);

    // If the determinant is negative, one axis was flipped. Flip the axis
    // with the smaller unit-vector dot product.
    let determinant = row0x * row1y - row0y * row1x;
    if determinant < 0.0 {
        if row0x < row1y {
            scaling_x = -scaling_x;
        } else {
            scaling_y = -scaling_y;
        }
    }

    // Renormalize to remove scale before reading the rotation; skip on zero
    // scale (guard, not an error).
    if scaling_x != 0.0 {
        row0x *= 1.0 / scaling_x;
        row0y *= 1.0 / scaling_x;
    }

    Affine2d {
        translation: DVec2::new(matrix.z_axis.x, matrix.z_axis.y),
        scaling: DVec2::new(scaling_x, scaling_y),
        rotation: row0y.atan2(row0x),
    }
}

/// Builds a 3x3 matrix from rotation (radians), translation and per-axis
/// scaling.
pub fn recompose_2d(rotation: f64, x: f64, y: f64, scale_x: f64, scale_y: f64) -> DMat3 {
    let cos = rotation.cos();
    let sin = rotation.sin();
    DMat3::from_cols(
        DVec3::new(scale_x * cos, scale_y * sin, 0.0),
        DVec3::new(-scale_x * sin, scale_y * cos, 0.0),
        DVec3::new(x, y, 1.0),
    )
}

/// Extracts Euler angles (radians) from a unit quaternion.
///
/// Within [`GIMBAL_LOCK_EPSILON`] of the poles the pitch is pinned to
/// +-pi/2, yaw collapses to `2*atan2(y, x)` and roll is zeroed; elsewhere the
/// standard `asin`/`atan2` extraction applies.
pub fn euler_from_quat(quat: DQuat) -> DVec3 {
    let (x, y, z, w) = (quat.x, quat.y, quat.z, quat.w);
    let x2 = x * x;
    let y2 = y * y;
    let z2 = z * z;
    let w2 = w * w;
    let unit = x2 + y2 + z2 + w2;
    let test = x * w - y * z;

    if test > GIMBAL_LOCK_EPSILON * unit {
        // singularity at the north pole
        DVec3::new(std::f64::consts::FRAC_PI_2, 2.0 * y.atan2(x), 0.0)
    } else if test < -GIMBAL_LOCK_EPSILON * unit {
        // singularity at the south pole
        DVec3::new(-std::f64::consts::FRAC_PI_2, 2.0 * y.atan2(x), 0.0)
    } else {
        DVec3::new(
            (2.0 * (x * z - w * y)).asin(),
            (2.0 * (x * w + y * z)).atan2(1.0 - 2.0 * (z2 + w2)),
            (2.0 * (x * y + z * w)).atan2(1.0 - 2.0 * (y2 + z2)),
        )
    }
}

/// Extracts Euler angles (radians) from a 4x4 matrix, correcting for scale.
///
/// Near +-pi/2 pitch the solution is not unique (gimbal lock); the convention
/// here fixes roll to zero.
pub fn euler_from_mat4(matrix: &DMat4) -> DVec3 {
    let half_pi = std::f64::consts::FRAC_PI_2;

    let sx = matrix.x_axis.truncate().length();
    let sy = matrix.y_axis.truncate().length();
    let sz = matrix.z_axis.truncate().length();

    let x;
    let z;
    let y = (-matrix.x_axis.z / sx).asin();

    if y < half_pi {
        if y > -half_pi {
            x = (matrix.y_axis.z / sy).atan2(matrix.z_axis.z / sz);
            z = (matrix.x_axis.y / sx).atan2(matrix.x_axis.x / sx);
        } else {
            // Not a unique solution
            z = 0.0;
            x = -(matrix.y_axis.x / sy).atan2(matrix.y_axis.y / sy);
        }
    } else {
        // Not a unique solution
        z = 0.0;
        x = (matrix.y_axis.x / sy).atan2(matrix.y_axis.y / sy);
    }

    DVec3::new(x, y, z)
}

/// Flattens a 4x4 matrix to the six coefficients `(a, b, c, d, e, f)` of a
/// standard 2D affine transform, the form every 2D drawing backend consumes.
pub fn to_affine_2d(matrix: &DMat4) -> [f64; 6] {
    [
        matrix.x_axis.x,
        matrix.x_axis.y,
        matrix.y_axis.x,
        matrix.y_axis.y,
        matrix.w_axis.x,
        matrix.w_axis.y,
    ]
}
