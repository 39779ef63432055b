//! Error taxonomy for value parsing, conversion and interpolation.
//!
//! All three failures surface synchronously to the style layer, which either
//! falls back to a property default or rejects the assignment. None of them
//! occur on the per-frame render path.

use crate::resolver::PropertyGrammar;
use crate::value::UnitType;
use thiserror::Error;

/// A raw style literal could not be parsed under the property grammar, either
/// because the numeral is malformed or the unit is outside the accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {raw:?} as a {grammar:?} value")]
pub struct ParseError {
    pub raw: String,
    pub grammar: PropertyGrammar,
}

/// A conversion crossed unit categories, or needed reference metrics that the
/// caller did not supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot convert {from:?} to {to:?}")]
pub struct IncompatibleUnitError {
    pub from: UnitType,
    pub to: UnitType,
}

/// Interpolation was requested between values whose units do not match; no
/// implicit cross-unit interpolation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot interpolate between {a:?} and {b:?} values")]
pub struct UnmergeableValuesError {
    pub a: UnitType,
    pub b: UnitType,
}
