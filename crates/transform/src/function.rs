//! # Transform Functions
//!
//! The closed set of typed transform functions and the fold that applies an
//! ordered list of them to a node's local transform. Operand counts and unit
//! categories are fixed per kind: lengths for translate, angles for rotate
//! and skew, unitless numbers for scale and matrix entries. Optional trailing
//! operands default to identity values at application time.

use crate::node::TransformNode;
use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use units::UnitValue;

/// An owned transform-function list, as stored in a node's parsed-style
/// record and replaced atomically on each style write.
pub type TransformList = SmallVec<[TransformFunction; 4]>;

/// One typed transform function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformFunction {
    Translate { x: UnitValue, y: Option<UnitValue> },
    TranslateX(UnitValue),
    TranslateY(UnitValue),
    TranslateZ(UnitValue),
    Translate3d { x: UnitValue, y: UnitValue, z: UnitValue },
    Scale { x: UnitValue, y: Option<UnitValue> },
    ScaleX(UnitValue),
    ScaleY(UnitValue),
    ScaleZ(UnitValue),
    Scale3d { x: UnitValue, y: UnitValue, z: UnitValue },
    Rotate(UnitValue),
    RotateX(UnitValue),
    RotateY(UnitValue),
    RotateZ(UnitValue),
    /// Rotation about an arbitrary axis is not supported; applying it is an
    /// explicit no-op (see [`apply`]).
    Rotate3d {
        x: UnitValue,
        y: UnitValue,
        z: UnitValue,
        angle: UnitValue,
    },
    Skew { x: UnitValue, y: Option<UnitValue> },
    SkewX(UnitValue),
    SkewY(UnitValue),
    /// Raw 2D affine coefficients `(a, b, c, d, tx, ty)`.
    Matrix([f64; 6]),
    /// Raw column-major 4x4 entries.
    Matrix3d([f64; 16]),
}

/// Folds a transform-function list into the node's local transform.
///
/// The node is reset to identity, its default origin offset is re-applied as
/// the base translation, and the functions are applied in declared order
/// (transform composition is non-commutative). `matrix`/`matrix3d` bypass the
/// incremental ops and set the local transform directly, with their
/// translation offset by the node's origin so raw matrices compose correctly
/// with implicit origin shifts.
pub fn apply(functions: &[TransformFunction], node: &mut TransformNode) {
    node.reset_local_transform();
    let origin = node.origin();
    node.set_local_position(origin.x, origin.y, 0.0);

    for function in functions {
        match function {
            TransformFunction::Translate { x, y } => {
                let y = y.map_or(0.0, |v| v.value());
                node.translate_local(DVec3::new(x.value(), y, 0.0));
            }
            TransformFunction::TranslateX(x) => {
                node.translate_local(DVec3::new(x.value(), 0.0, 0.0));
            }
            TransformFunction::TranslateY(y) => {
                node.translate_local(DVec3::new(0.0, y.value(), 0.0));
            }
            TransformFunction::TranslateZ(z) => {
                node.translate_local(DVec3::new(0.0, 0.0, z.value()));
            }
            TransformFunction::Translate3d { x, y, z } => {
                node.translate_local(DVec3::new(x.value(), y.value(), z.value()));
            }
            TransformFunction::Scale { x, y } => {
                let y = y.map_or_else(|| x.value(), |v| v.value());
                node.scale_local(DVec3::new(x.value(), y, 1.0));
            }
            TransformFunction::ScaleX(x) => {
                node.scale_local(DVec3::new(x.value(), 1.0, 1.0));
            }
            TransformFunction::ScaleY(y) => {
                node.scale_local(DVec3::new(1.0, y.value(), 1.0));
            }
            TransformFunction::ScaleZ(z) => {
                node.scale_local(DVec3::new(1.0, 1.0, z.value()));
            }
            TransformFunction::Scale3d { x, y, z } => {
                node.scale_local(DVec3::new(x.value(), y.value(), z.value()));
            }
            TransformFunction::Rotate(angle) | TransformFunction::RotateZ(angle) => {
                node.rotate_local(DVec3::new(0.0, 0.0, angle.angle_in_degrees()));
            }
            TransformFunction::RotateX(angle) => {
                node.rotate_local(DVec3::new(angle.angle_in_degrees(), 0.0, 0.0));
            }
            TransformFunction::RotateY(angle) => {
                node.rotate_local(DVec3::new(0.0, angle.angle_in_degrees(), 0.0));
            }
            TransformFunction::Rotate3d { .. } => {
                // Known incompleteness: axis-angle rotation is not applied.
                tracing::debug!("rotate3d is not supported; ignoring");
            }
            TransformFunction::Skew { x, y } => {
                let y = y.map_or(0.0, |v| v.angle_in_degrees());
                node.set_local_skew(DVec2::new(
                    x.angle_in_degrees().to_radians(),
                    y.to_radians(),
                ));
            }
            TransformFunction::SkewX(x) => {
                let current = node.local_skew();
                node.set_local_skew(DVec2::new(
                    x.angle_in_degrees().to_radians(),
                    current.y,
                ));
            }
            TransformFunction::SkewY(y) => {
                let current = node.local_skew();
                node.set_local_skew(DVec2::new(
                    current.x,
                    y.angle_in_degrees().to_radians(),
                ));
            }
            TransformFunction::Matrix([a, b, c, d, tx, ty]) => {
                node.set_local_transform(DMat4::from_cols_array(&[
                    *a,
                    *b,
                    0.0,
                    0.0,
                    *c,
                    *d,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    1.0,
                    0.0,
                    tx + origin.x,
                    ty + origin.y,
                    0.0,
                    1.0,
                ]));
            }
            TransformFunction::Matrix3d(entries) => {
                let mut matrix = DMat4::from_cols_array(entries);
                matrix.w_axis.x += origin.x;
                matrix.w_axis.y += origin.y;
                node.set_local_transform(matrix);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DQuat;
    use smallvec::smallvec;
    use units::{UnitType, UnitValue};

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < EPSILON, "{a} != {b}");
    }

    fn px(value: f64) -> UnitValue {
        UnitValue::px(value)
    }

    #[test]
    fn translate_moves_an_identity_origin_node() {
        let list: TransformList = smallvec![TransformFunction::Translate {
            x: px(10.0),
            y: Some(px(20.0)),
        }];
        let mut node = TransformNode::new();
        apply(&list, &mut node);
        approx(node.position().x, 10.0);
        approx(node.position().y, 20.0);
        approx(node.position().z, 0.0);
    }

    #[test]
    fn missing_operands_fill_with_identity_values() {
        let mut node = TransformNode::new();
        apply(
            &[
                TransformFunction::Translate { x: px(10.0), y: None },
                TransformFunction::Scale {
                    x: UnitValue::number(2.0),
                    y: None,
                },
            ],
            &mut node,
        );
        approx(node.position().y, 0.0);
        approx(node.scaling().x, 2.0);
        approx(node.scaling().y, 2.0);
        approx(node.scaling().z, 1.0);
    }

    #[test]
    fn declared_order_is_not_commutative() {
        let scale_then_translate = [
            TransformFunction::Scale {
                x: UnitValue::number(2.0),
                y: Some(UnitValue::number(2.0)),
            },
            TransformFunction::Translate { x: px(10.0), y: Some(px(0.0)) },
        ];
        let translate_then_scale = [
            TransformFunction::Translate { x: px(10.0), y: Some(px(0.0)) },
            TransformFunction::Scale {
                x: UnitValue::number(2.0),
                y: Some(UnitValue::number(2.0)),
            },
        ];

        let mut node = TransformNode::new();
        apply(&scale_then_translate, &mut node);
        approx(node.position().x, 20.0);

        let mut node = TransformNode::new();
        apply(&translate_then_scale, &mut node);
        approx(node.position().x, 10.0);
    }

    #[test]
    fn rotate_accepts_any_angle_unit() {
        let mut by_degrees = TransformNode::new();
        apply(&[TransformFunction::Rotate(UnitValue::deg(90.0))], &mut by_degrees);

        let mut by_turns = TransformNode::new();
        apply(
            &[TransformFunction::Rotate(UnitValue::new(0.25, UnitType::Turns))],
            &mut by_turns,
        );

        let a = by_degrees.rotation();
        let b = by_turns.rotation();
        approx(a.x, b.x);
        approx(a.y, b.y);
        approx(a.z, b.z);
        approx(a.w, b.w);
    }

    #[test]
    fn rotate3d_is_an_explicit_no_op() {
        let mut node = TransformNode::new();
        apply(
            &[TransformFunction::Rotate3d {
                x: UnitValue::number(1.0),
                y: UnitValue::number(0.0),
                z: UnitValue::number(0.0),
                angle: UnitValue::deg(45.0),
            }],
            &mut node,
        );
        assert_eq!(node.rotation(), DQuat::IDENTITY);
        assert_eq!(node.local_transform(), DMat4::IDENTITY);
    }

    #[test]
    fn skew_x_preserves_the_other_axis() {
        let mut node = TransformNode::new();
        apply(
            &[
                TransformFunction::SkewY(UnitValue::deg(30.0)),
                TransformFunction::SkewX(UnitValue::deg(45.0)),
            ],
            &mut node,
        );
        let skew = node.local_skew();
        approx(skew.x, 45.0_f64.to_radians());
        approx(skew.y, 30.0_f64.to_radians());
    }

    #[test]
    fn matrix_offsets_translation_by_the_node_origin() {
        let mut node = TransformNode::with_origin(100.0, 50.0);
        apply(
            &[TransformFunction::Matrix([1.0, 0.0, 0.0, 1.0, 10.0, 20.0])],
            &mut node,
        );
        let m = node.local_transform();
        approx(m.w_axis.x, 110.0);
        approx(m.w_axis.y, 70.0);
    }

    #[test]
    fn matrix3d_sets_all_sixteen_entries() {
        let mut entries = DMat4::IDENTITY.to_cols_array();
        entries[0] = 2.0;
        entries[5] = 3.0;
        entries[12] = 4.0;
        entries[13] = 5.0;

        let mut node = TransformNode::new();
        apply(&[TransformFunction::Matrix3d(entries)], &mut node);
        let m = node.local_transform();
        approx(m.x_axis.x, 2.0);
        approx(m.y_axis.y, 3.0);
        approx(m.w_axis.x, 4.0);
        approx(m.w_axis.y, 5.0);
    }

    #[test]
    fn reapplying_a_list_resets_previous_state() {
        let mut node = TransformNode::with_origin(5.0, 5.0);
        apply(
            &[TransformFunction::Translate { x: px(50.0), y: Some(px(50.0)) }],
            &mut node,
        );
        apply(
            &[TransformFunction::Translate { x: px(1.0), y: Some(px(2.0)) }],
            &mut node,
        );
        approx(node.position().x, 6.0);
        approx(node.position().y, 7.0);
    }

    #[test]
    fn serde_round_trips_a_transform_list() {
        let list: TransformList = smallvec![
            TransformFunction::Rotate(UnitValue::deg(45.0)),
            TransformFunction::Matrix([1.0, 0.0, 0.0, 1.0, 3.0, 4.0]),
        ];
        let json = serde_json::to_string(&list.to_vec()).unwrap();
        let back: Vec<TransformFunction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_slice(), list.as_slice());
    }
}
