//! # Transform Node
//!
//! The minimal node-side transform component the transform stack mutates:
//! local position, rotation, scaling and skew, with the composed local 4x4
//! kept in sync eagerly. The scene graph proper (hierarchy, world matrices,
//! dirty propagation) lives outside this crate; this is only the per-node
//! state the incremental ops write through.

use crate::decompose::decompose_mat4;
use glam::{DMat4, DQuat, DVec2, DVec3, EulerRot};

/// Per-node local transform state.
///
/// The local matrix composes as `T * R * Skew * S`. Ops mutate the
/// components and recompose immediately, so `local_transform` is always a
/// plain read. Callers must guarantee single-writer access per node; the
/// `&mut` receivers enforce that within safe code.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNode {
    position: DVec3,
    rotation: DQuat,
    scaling: DVec3,
    skew: DVec2,
    origin: DVec2,
    local: DMat4,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformNode {
    pub fn new() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scaling: DVec3::ONE,
            skew: DVec2::ZERO,
            origin: DVec2::ZERO,
            local: DMat4::IDENTITY,
        }
    }

    /// A node whose default origin is offset from its parent's, e.g. a shape
    /// positioned by its layout before any transform applies.
    pub fn with_origin(x: f64, y: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            ..Self::new()
        }
    }

    /// The accumulated default origin offset re-applied as the base
    /// translation whenever the transform list is (re)folded.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    pub fn scaling(&self) -> DVec3 {
        self.scaling
    }

    pub fn local_skew(&self) -> DVec2 {
        self.skew
    }

    pub fn local_transform(&self) -> DMat4 {
        self.local
    }

    pub fn reset_local_transform(&mut self) {
        self.position = DVec3::ZERO;
        self.rotation = DQuat::IDENTITY;
        self.scaling = DVec3::ONE;
        self.skew = DVec2::ZERO;
        self.recompose();
    }

    pub fn set_local_position(&mut self, x: f64, y: f64, z: f64) {
        self.position = DVec3::new(x, y, z);
        self.recompose();
    }

    /// Translates in local space: the offset is carried through the current
    /// local scale and rotation, so translation after scaling moves by the
    /// scaled amount (declared transform order is non-commutative).
    pub fn translate_local(&mut self, translation: DVec3) {
        self.position += self.rotation * (self.scaling * translation);
        self.recompose();
    }

    pub fn scale_local(&mut self, scaling: DVec3) {
        self.scaling *= scaling;
        self.recompose();
    }

    /// Appends a local rotation given as XYZ Euler angles in degrees.
    pub fn rotate_local(&mut self, degrees: DVec3) {
        let appended = DQuat::from_euler(
            EulerRot::XYZ,
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        );
        self.rotation *= appended;
        self.recompose();
    }

    /// Sets the local skew angles (radians, x then y).
    pub fn set_local_skew(&mut self, skew: DVec2) {
        self.skew = skew;
        self.recompose();
    }

    /// Replaces the local matrix verbatim and re-extracts position, rotation
    /// and scaling so later incremental ops keep composing from consistent
    /// state. When the matrix does not decompose, the components are left
    /// untouched; the matrix itself is still applied.
    pub fn set_local_transform(&mut self, matrix: DMat4) {
        if let Some(decomposed) = decompose_mat4(&matrix) {
            self.position = decomposed.translation;
            self.rotation = decomposed.rotation;
            self.scaling = decomposed.scale;
        }
        self.local = matrix;
    }

    fn recompose(&mut self) {
        let mut matrix =
            DMat4::from_scale_rotation_translation(DVec3::ONE, self.rotation, self.position);
        if self.skew.x != 0.0 || self.skew.y != 0.0 {
            let mut shear = DMat4::IDENTITY;
            shear.y_axis.x = self.skew.x.tan();
            shear.x_axis.y = self.skew.y.tan();
            matrix *= shear;
        }
        self.local = matrix * DMat4::from_scale(self.scaling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < EPSILON, "{a} != {b}");
    }

    #[test]
    fn starts_at_identity() {
        let node = TransformNode::new();
        assert_eq!(node.local_transform(), DMat4::IDENTITY);
        assert_eq!(node.position(), DVec3::ZERO);
        assert_eq!(node.scaling(), DVec3::ONE);
    }

    #[test]
    fn translate_after_scale_moves_by_the_scaled_amount() {
        let mut node = TransformNode::new();
        node.scale_local(DVec3::new(2.0, 2.0, 1.0));
        node.translate_local(DVec3::new(10.0, 0.0, 0.0));
        approx(node.position().x, 20.0);
        approx(node.position().y, 0.0);

        let mut node = TransformNode::new();
        node.translate_local(DVec3::new(10.0, 0.0, 0.0));
        node.scale_local(DVec3::new(2.0, 2.0, 1.0));
        approx(node.position().x, 10.0);
    }

    #[test]
    fn translate_follows_local_rotation() {
        let mut node = TransformNode::new();
        node.rotate_local(DVec3::new(0.0, 0.0, 90.0));
        node.translate_local(DVec3::new(10.0, 0.0, 0.0));
        approx(node.position().x, 0.0);
        approx(node.position().y, 10.0);
    }

    #[test]
    fn skew_contributes_shear_to_the_local_matrix() {
        let mut node = TransformNode::new();
        node.set_local_skew(DVec2::new(FRAC_PI_4, 0.0));
        let m = node.local_transform();
        approx(m.y_axis.x, 1.0); // tan(pi/4)
        approx(m.x_axis.y, 0.0);
        assert_eq!(node.local_skew(), DVec2::new(FRAC_PI_4, 0.0));
    }

    #[test]
    fn set_local_transform_applies_verbatim_and_extracts_components() {
        let mut node = TransformNode::new();
        let m = DMat4::from_translation(DVec3::new(3.0, 4.0, 0.0))
            * DMat4::from_scale(DVec3::new(2.0, 2.0, 1.0));
        node.set_local_transform(m);
        assert_eq!(node.local_transform(), m);
        approx(node.position().x, 3.0);
        approx(node.position().y, 4.0);
        approx(node.scaling().x, 2.0);

        // further incremental edits compose from the extracted state
        node.translate_local(DVec3::new(1.0, 0.0, 0.0));
        approx(node.position().x, 5.0);
    }

    #[test]
    fn undecomposable_matrix_is_still_applied() {
        let mut node = TransformNode::new();
        node.set_local_position(1.0, 2.0, 0.0);
        let mut degenerate = DMat4::IDENTITY;
        degenerate.w_axis.w = 0.0;
        node.set_local_transform(degenerate);
        assert_eq!(node.local_transform(), degenerate);
        // components kept from before the failed extraction
        approx(node.position().x, 1.0);
    }

    #[test]
    fn reset_restores_identity_but_keeps_origin() {
        let mut node = TransformNode::with_origin(7.0, 9.0);
        node.translate_local(DVec3::new(5.0, 5.0, 5.0));
        node.rotate_local(DVec3::new(0.0, 0.0, 45.0));
        node.reset_local_transform();
        assert_eq!(node.local_transform(), DMat4::IDENTITY);
        assert_eq!(node.origin(), DVec2::new(7.0, 9.0));
    }
}
