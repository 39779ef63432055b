//! # Style Value Resolver
//!
//! Parses raw style input into [`UnitValue`]s under a per-property grammar,
//! and builds interpolation functions between two parsed values. This is the
//! only place raw strings enter the typed value model; everything downstream
//! works with [`UnitValue`] exclusively.

use crate::error::{ParseError, UnmergeableValuesError};
use crate::value::{UnitCategory, UnitType, UnitValue};

/// The accepted unit set for a style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyGrammar {
    /// Bare numbers only (opacity, scale factors, matrix entries).
    NumberOnly,
    /// Lengths and percentages; a bare numeral is taken as pixels.
    LengthPercentage,
    /// Angles; a bare numeral is taken as degrees.
    Angle,
}

impl PropertyGrammar {
    fn default_unit(self) -> UnitType {
        match self {
            PropertyGrammar::NumberOnly => UnitType::Number,
            PropertyGrammar::LengthPercentage => UnitType::Pixels,
            PropertyGrammar::Angle => UnitType::Degrees,
        }
    }

    fn accepts(self, unit: UnitType) -> bool {
        match self {
            PropertyGrammar::NumberOnly => unit == UnitType::Number,
            PropertyGrammar::LengthPercentage => matches!(
                unit.category(),
                UnitCategory::Length | UnitCategory::Percentage
            ),
            PropertyGrammar::Angle => unit.category() == UnitCategory::Angle,
        }
    }
}

/// Unit suffixes ordered so that longer tokens win over their tails
/// (`grad` before `rad`, `rem` before `em`).
const UNIT_SUFFIXES: &[&str] = &["grad", "turn", "rem", "deg", "rad", "px", "em", "%"];

/// Parses a raw literal (`"96"`, `"10px"`, `"50%"`, `"0.5turn"`) into a
/// [`UnitValue`] under the given grammar.
pub fn parse(raw: &str, grammar: PropertyGrammar) -> Result<UnitValue, ParseError> {
    let reject = || ParseError {
        raw: raw.to_string(),
        grammar,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(reject());
    }

    let (numeral, token) = split_unit_suffix(trimmed);
    let value: f64 = numeral.parse().map_err(|_| reject())?;
    if !value.is_finite() {
        return Err(reject());
    }

    let unit = match token {
        Some(token) => token.parse::<UnitType>().map_err(|_| reject())?,
        None => grammar.default_unit(),
    };
    if !grammar.accepts(unit) {
        return Err(reject());
    }

    Ok(UnitValue::new(value, unit))
}

fn split_unit_suffix(input: &str) -> (&str, Option<&str>) {
    for suffix in UNIT_SUFFIXES {
        if let Some(numeral) = input.strip_suffix(suffix) {
            if !numeral.is_empty() {
                return (numeral, Some(suffix));
            }
        }
    }
    (input, None)
}

/// Builds a linear interpolation function between two values.
///
/// Valid only when the units match exactly; the returned closure maps
/// `progress` in `[0, 1]` to an interpolated value with the unit held
/// constant. The animation scheduler owns timing and easing; this only
/// supplies the per-keyframe value ramp.
pub fn merge(
    a: UnitValue,
    b: UnitValue,
) -> Result<impl Fn(f64) -> UnitValue, UnmergeableValuesError> {
    if a.unit() != b.unit() {
        return Err(UnmergeableValuesError {
            a: a.unit(),
            b: b.unit(),
        });
    }
    let unit = a.unit();
    let (from, to) = (a.value(), b.value());
    Ok(move |progress: f64| UnitValue::new(from + (to - from) * progress, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_numerals_with_grammar_defaults() {
        assert_eq!(
            parse("96", PropertyGrammar::NumberOnly).unwrap(),
            UnitValue::number(96.0)
        );
        assert_eq!(
            parse("30", PropertyGrammar::LengthPercentage).unwrap(),
            UnitValue::px(30.0)
        );
        assert_eq!(
            parse("45", PropertyGrammar::Angle).unwrap(),
            UnitValue::deg(45.0)
        );
        assert_eq!(
            parse("0", PropertyGrammar::LengthPercentage).unwrap(),
            UnitValue::px(0.0)
        );
    }

    #[test]
    fn parses_suffixed_literals() {
        assert_eq!(
            parse("0.2px", PropertyGrammar::LengthPercentage).unwrap(),
            UnitValue::px(0.2)
        );
        assert_eq!(
            parse("50%", PropertyGrammar::LengthPercentage).unwrap(),
            UnitValue::percent(50.0)
        );
        assert_eq!(
            parse("1em", PropertyGrammar::LengthPercentage).unwrap(),
            UnitValue::new(1.0, UnitType::Ems)
        );
        assert_eq!(
            parse("2rem", PropertyGrammar::LengthPercentage).unwrap(),
            UnitValue::new(2.0, UnitType::Rems)
        );
        assert_eq!(
            parse("-90deg", PropertyGrammar::Angle).unwrap(),
            UnitValue::deg(-90.0)
        );
        assert_eq!(
            parse("1.5rad", PropertyGrammar::Angle).unwrap(),
            UnitValue::new(1.5, UnitType::Radians)
        );
        // longest suffix wins: this is 100 gradians, not "100g" radians
        assert_eq!(
            parse("100grad", PropertyGrammar::Angle).unwrap(),
            UnitValue::new(100.0, UnitType::Gradians)
        );
        assert_eq!(
            parse("0.25turn", PropertyGrammar::Angle).unwrap(),
            UnitValue::new(0.25, UnitType::Turns)
        );
        assert_eq!(
            parse("  12px  ", PropertyGrammar::LengthPercentage).unwrap(),
            UnitValue::px(12.0)
        );
    }

    #[test]
    fn rejects_units_outside_the_grammar() {
        assert!(parse("10px", PropertyGrammar::NumberOnly).is_err());
        assert!(parse("10deg", PropertyGrammar::LengthPercentage).is_err());
        assert!(parse("10px", PropertyGrammar::Angle).is_err());
        assert!(parse("50%", PropertyGrammar::Angle).is_err());
    }

    #[test]
    fn rejects_malformed_numerals() {
        for raw in ["", "px", "abc", "10pxx", "1.2.3", "--4", "10 px"] {
            let err = parse(raw, PropertyGrammar::LengthPercentage).unwrap_err();
            assert_eq!(err.raw, raw);
        }
        assert!(parse("inf", PropertyGrammar::NumberOnly).is_err());
        assert!(parse("NaN", PropertyGrammar::NumberOnly).is_err());
    }

    #[test]
    fn merges_values_of_identical_unit() {
        let lerp = merge(UnitValue::px(0.0), UnitValue::px(20.0)).unwrap();
        assert_eq!(lerp(0.0), UnitValue::px(0.0));
        assert_eq!(lerp(0.5), UnitValue::px(10.0));
        assert_eq!(lerp(1.0), UnitValue::px(20.0));

        let lerp = merge(UnitValue::number(1.0), UnitValue::number(3.0)).unwrap();
        assert_eq!(lerp(0.25), UnitValue::number(1.5));
    }

    #[test]
    fn refuses_cross_unit_interpolation() {
        // the Ok side is an opaque closure, so only the Err side is inspected
        let err = merge(UnitValue::px(0.0), UnitValue::percent(100.0))
            .err()
            .unwrap();
        assert_eq!(err.a, UnitType::Pixels);
        assert_eq!(err.b, UnitType::Percentage);

        assert!(merge(UnitValue::deg(0.0), UnitValue::new(1.0, UnitType::Radians)).is_err());
        assert!(merge(UnitValue::number(0.0), UnitValue::px(1.0)).is_err());
    }
}
