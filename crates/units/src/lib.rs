//! # Typed CSS-like unit values
//!
//! This crate implements the typed numeric value model shared by the style,
//! transform and animation layers:
//!
//! - **UnitValue**: an immutable `f64` magnitude tagged with a unit from a
//!   closed set (number, pixels, percentage, angle units, font-relative
//!   lengths)
//! - **Conversions**: pure closed-form angle conversions, plus
//!   length/percentage conversions driven by externally supplied
//!   [`ReferenceMetrics`]
//! - **Resolver**: property-grammar aware parsing of raw style input and
//!   interpolation between two values of the same unit
//!
//! Values are created on every style parse or animation tick and replaced
//! wholesale; nothing in this crate mutates in place.

mod error;
mod resolver;
mod value;

pub use error::{IncompatibleUnitError, ParseError, UnmergeableValuesError};
pub use resolver::{merge, parse, PropertyGrammar};
pub use value::{
    deg2grad, deg2rad, deg2turn, grad2deg, rad2deg, turn2deg, ReferenceMetrics, UnitCategory,
    UnitType, UnitValue,
};
