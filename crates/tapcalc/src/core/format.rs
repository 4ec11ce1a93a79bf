//! Display formatting for evaluation results.
//!
//! Large and tiny magnitudes render in scientific notation; everything else
//! renders as the shortest plain decimal, falling back to scientific when
//! the plain rendering would not fit a calculator display.

use crate::core::{CalcError, CalcResult};

/// Magnitude at or above which scientific notation is used.
const SCI_UPPER_BOUND: f64 = 1e12;
/// Positive magnitude below which scientific notation is used.
const SCI_LOWER_BOUND: f64 = 1e-6;
/// Longest plain decimal rendering before falling back to scientific.
const MAX_PLAIN_LEN: usize = 15;

/// Formats a finite value for the result display.
///
/// Rules, in order:
/// 1. `|value| >= 1e12` or `0 < |value| < 1e-6`: scientific notation with a
///    10-digit fractional mantissa, trailing mantissa zeros stripped and no
///    `+` sign in the exponent (`1.5e15`, `1e-7`).
/// 2. Otherwise the shortest plain decimal; if that exceeds 15 characters
///    and contains a decimal point, rule 1 applies instead.
/// 3. Plain decimals drop trailing fractional zeros and a bare point.
///
/// Non-finite input is a fault; the engine reports it as `"Error"`.
pub fn format_value(value: f64) -> CalcResult<String> {
    if value.is_nan() {
        return Err(CalcError::NotANumber);
    }
    if value.is_infinite() {
        return Err(CalcError::Unrepresentable);
    }

    let magnitude = value.abs();
    if magnitude >= SCI_UPPER_BOUND || (magnitude > 0.0 && magnitude < SCI_LOWER_BOUND) {
        return Ok(format_scientific(value));
    }

    let plain = value.to_string();
    if plain.len() > MAX_PLAIN_LEN && plain.contains('.') {
        return Ok(format_scientific(value));
    }
    Ok(strip_trailing_zeros(&plain))
}

/// Renders `1.5000000000e15` as `1.5e15`.
fn format_scientific(value: f64) -> String {
    let rendered = format!("{value:.10e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{mantissa}e{exponent}")
        }
        None => rendered,
    }
}

/// Strips trailing fractional zeros and a trailing bare point.
fn strip_trailing_zeros(plain: &str) -> String {
    if plain.contains('.') {
        plain.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        plain.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluator::evaluate_str;
    use proptest::prelude::*;

    // ===== Plain decimal tests =====

    #[test]
    fn test_format_integer() {
        assert_eq!(format_value(12.0).unwrap(), "12");
        assert_eq!(format_value(0.0).unwrap(), "0");
        assert_eq!(format_value(-5.0).unwrap(), "-5");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_value(3.5).unwrap(), "3.5");
        assert_eq!(format_value(0.125).unwrap(), "0.125");
    }

    #[test]
    fn test_format_just_below_upper_bound() {
        assert_eq!(format_value(999_999_999_999.0).unwrap(), "999999999999");
    }

    #[test]
    fn test_format_small_but_plain() {
        // 1e-6 sits on the lower bound and stays plain.
        assert_eq!(format_value(1e-6).unwrap(), "0.000001");
    }

    // ===== Scientific notation tests =====

    #[test]
    fn test_format_large_magnitude() {
        assert_eq!(format_value(1.5e15).unwrap(), "1.5e15");
        assert_eq!(format_value(-1.5e15).unwrap(), "-1.5e15");
        assert_eq!(format_value(1e12).unwrap(), "1e12");
    }

    #[test]
    fn test_format_tiny_magnitude() {
        assert_eq!(format_value(1e-7).unwrap(), "1e-7");
        assert_eq!(format_value(-2.5e-9).unwrap(), "-2.5e-9");
    }

    #[test]
    fn test_format_long_plain_falls_back() {
        // 0.1+0.2 renders as 0.30000000000000004 (19 chars), which does not
        // fit; the scientific rendering rounds the noise away.
        assert_eq!(format_value(0.1 + 0.2).unwrap(), "3e-1");
    }

    #[test]
    fn test_format_repeating_fraction() {
        assert_eq!(format_value(1.0 / 3.0).unwrap(), "3.3333333333e-1");
    }

    #[test]
    fn test_format_mantissa_keeps_significant_digits() {
        assert_eq!(format_value(1.5000000001e15).unwrap(), "1.5000000001e15");
    }

    // ===== Fault tests =====

    #[test]
    fn test_format_nan_faults() {
        assert_eq!(format_value(f64::NAN), Err(CalcError::NotANumber));
    }

    #[test]
    fn test_format_infinity_faults() {
        assert_eq!(format_value(f64::INFINITY), Err(CalcError::Unrepresentable));
        assert_eq!(
            format_value(f64::NEG_INFINITY),
            Err(CalcError::Unrepresentable)
        );
    }

    // ===== Property-based tests =====

    proptest! {
        /// Formatted output re-parses to (nearly) the original value.
        #[test]
        fn prop_format_reparses(value in -1e18f64..1e18f64) {
            let text = format_value(value).unwrap();
            let reparsed = evaluate_str(&text).unwrap();
            let tolerance = value.abs() * 1e-9 + 1e-12;
            prop_assert!((reparsed - value).abs() <= tolerance);
        }

        /// Plain decimals never end in a dangling point or fractional zero.
        #[test]
        fn prop_no_trailing_fraction_noise(value in -1e11f64..1e11f64) {
            let text = format_value(value).unwrap();
            prop_assert!(!text.ends_with('.'));
            if text.contains('.') && !text.contains('e') {
                prop_assert!(!text.ends_with('0'));
            }
        }

        /// Formatting never produces an empty string.
        #[test]
        fn prop_never_empty(value in proptest::num::f64::NORMAL) {
            let text = format_value(value).unwrap();
            prop_assert!(!text.is_empty());
        }
    }
}
