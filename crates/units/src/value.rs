//! # Unit Value Types
//!
//! The core typed-value model: a numeric magnitude tagged with a unit drawn
//! from a closed set. Equality is exact on both value and unit; there is no
//! implicit cross-unit equivalence even when two values are numerically
//! convertible (`360deg != 6.28...rad`).

use crate::error::IncompatibleUnitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumString;

/// The closed set of units a [`UnitValue`] can carry.
///
/// String aliases follow the CSS token forms (`px`, `%`, `deg`, ...). A bare
/// numeral carries [`UnitType::Number`], which has no token of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
pub enum UnitType {
    #[strum(disabled)]
    Number,
    #[strum(serialize = "px")]
    Pixels,
    #[strum(serialize = "%")]
    Percentage,
    #[strum(serialize = "deg")]
    Degrees,
    #[strum(serialize = "rad")]
    Radians,
    #[strum(serialize = "grad")]
    Gradians,
    #[strum(serialize = "turn")]
    Turns,
    #[strum(serialize = "em")]
    Ems,
    #[strum(serialize = "rem")]
    Rems,
}

/// Broad unit families governing which conversions are closed-form and which
/// need external context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    Number,
    Length,
    Percentage,
    Angle,
}

impl UnitType {
    pub fn category(self) -> UnitCategory {
        match self {
            UnitType::Number => UnitCategory::Number,
            UnitType::Pixels | UnitType::Ems | UnitType::Rems => UnitCategory::Length,
            UnitType::Percentage => UnitCategory::Percentage,
            UnitType::Degrees | UnitType::Radians | UnitType::Gradians | UnitType::Turns => {
                UnitCategory::Angle
            }
        }
    }

    /// The fixed suffix appended when formatting a value of this unit.
    pub fn suffix(self) -> &'static str {
        match self {
            UnitType::Number => "",
            UnitType::Pixels => "px",
            UnitType::Percentage => "%",
            UnitType::Degrees => "deg",
            UnitType::Radians => "rad",
            UnitType::Gradians => "grad",
            UnitType::Turns => "turn",
            UnitType::Ems => "em",
            UnitType::Rems => "rem",
        }
    }
}

/// External context for conversions that are not closed-form: percentage
/// resolution and font-relative lengths. Supplied by the style layer; this
/// crate never guesses these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMetrics {
    /// Length a percentage resolves against, in pixels.
    pub basis: f64,
    /// Current font size in pixels (`em` resolution).
    pub font_size: f64,
    /// Root font size in pixels (`rem` resolution).
    pub root_font_size: f64,
}

/// An immutable typed numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitValue {
    value: f64,
    unit: UnitType,
}

impl UnitValue {
    /// Invariant: `value` must be finite.
    pub fn new(value: f64, unit: UnitType) -> Self {
        debug_assert!(value.is_finite(), "unit value must be finite: {value}");
        Self { value, unit }
    }

    /// A bare, unitless number.
    pub fn number(value: f64) -> Self {
        Self::new(value, UnitType::Number)
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, UnitType::Pixels)
    }

    pub fn percent(value: f64) -> Self {
        Self::new(value, UnitType::Percentage)
    }

    pub fn deg(value: f64) -> Self {
        Self::new(value, UnitType::Degrees)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> UnitType {
        self.unit
    }

    /// Exact equality: both the magnitude and the unit must match.
    pub fn equals(&self, other: &UnitValue) -> bool {
        self == other
    }

    /// Converts to another unit.
    ///
    /// Angle units convert through closed-form math. Length and percentage
    /// conversions need [`ReferenceMetrics`]; when none are supplied the
    /// conversion fails with [`IncompatibleUnitError`] rather than assuming a
    /// default basis. `Number` converts only to itself.
    pub fn convert_to(
        &self,
        unit: UnitType,
        metrics: Option<&ReferenceMetrics>,
    ) -> Result<UnitValue, IncompatibleUnitError> {
        if self.unit == unit {
            return Ok(*self);
        }
        let incompatible = IncompatibleUnitError {
            from: self.unit,
            to: unit,
        };

        use UnitCategory::*;
        match (self.unit.category(), unit.category()) {
            (Angle, Angle) => {
                let degrees = angle_to_degrees(self.value, self.unit);
                Ok(UnitValue::new(degrees_to_angle(degrees, unit), unit))
            }
            (Length | Percentage, Length | Percentage) => {
                let metrics = metrics.ok_or(incompatible)?;
                let px = length_to_px(self.value, self.unit, metrics);
                Ok(UnitValue::new(px_to_length(px, unit, metrics), unit))
            }
            _ => Err(incompatible),
        }
    }

    /// The value expressed in degrees. Only meaningful for angle units; a
    /// plain `Number` is treated as degrees, matching how unitless angle
    /// operands behave in transform lists.
    pub fn angle_in_degrees(&self) -> f64 {
        match self.unit {
            UnitType::Number => self.value,
            _ => angle_to_degrees(self.value, self.unit),
        }
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

fn angle_to_degrees(value: f64, unit: UnitType) -> f64 {
    match unit {
        UnitType::Degrees => value,
        UnitType::Radians => rad2deg(value),
        UnitType::Gradians => grad2deg(value),
        UnitType::Turns => turn2deg(value),
        _ => value,
    }
}

fn degrees_to_angle(degrees: f64, unit: UnitType) -> f64 {
    match unit {
        UnitType::Degrees => degrees,
        UnitType::Radians => deg2rad(degrees),
        UnitType::Gradians => deg2grad(degrees),
        UnitType::Turns => deg2turn(degrees),
        _ => degrees,
    }
}

fn length_to_px(value: f64, unit: UnitType, metrics: &ReferenceMetrics) -> f64 {
    match unit {
        UnitType::Pixels => value,
        UnitType::Ems => value * metrics.font_size,
        UnitType::Rems => value * metrics.root_font_size,
        UnitType::Percentage => value / 100.0 * metrics.basis,
        _ => value,
    }
}

fn px_to_length(px: f64, unit: UnitType, metrics: &ReferenceMetrics) -> f64 {
    match unit {
        UnitType::Pixels => px,
        UnitType::Ems => px / metrics.font_size,
        UnitType::Rems => px / metrics.root_font_size,
        UnitType::Percentage => px / metrics.basis * 100.0,
        _ => px,
    }
}

pub fn deg2rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad2deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Gradians reduce modulo 400 into `[0, 400)` before converting, so the
/// result is always in `[0, 360)`.
pub fn grad2deg(grads: f64) -> f64 {
    let mut grads = grads % 400.0;
    if grads < 0.0 {
        grads += 400.0;
    }
    (grads / 400.0) * 360.0
}

pub fn deg2grad(deg: f64) -> f64 {
    (deg / 360.0) * 400.0
}

pub fn deg2turn(deg: f64) -> f64 {
    deg / 360.0
}

pub fn turn2deg(turn: f64) -> f64 {
    360.0 * turn
}
