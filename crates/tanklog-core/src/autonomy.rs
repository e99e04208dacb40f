//! Autonomy derivation: km per liter at fixed two-decimal precision.

use crate::error::ValidationError;

/// Compute km/liter rounded to two decimals.
///
/// Non-finite and non-positive inputs are rejected instead of letting a
/// NaN or a division by zero reach the store.
pub fn compute(km: f64, liters: f64) -> Result<f64, ValidationError> {
    if !km.is_finite() || km <= 0.0 {
        return Err(ValidationError::NotPositive { field: "km" });
    }
    if !liters.is_finite() || liters <= 0.0 {
        return Err(ValidationError::NotPositive { field: "liters" });
    }
    Ok(round2(km / liters))
}

/// Fixed two-decimal rendering used on the wire and in list output.
pub fn format_autonomy(autonomy: f64) -> String {
    format!("{autonomy:.2}")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn divides_km_by_liters() {
        assert_eq!(compute(100.0, 10.0).expect("autonomy"), 10.0);
        assert_eq!(compute(215.0, 18.0).expect("autonomy"), 11.94);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(compute(100.0, 3.0).expect("autonomy"), 33.33);
        assert_eq!(compute(185.0, 16.0).expect("autonomy"), 11.56);
    }

    #[test]
    fn zero_liters_is_rejected() {
        let error = compute(100.0, 0.0).expect_err("must fail");
        assert_eq!(error, ValidationError::NotPositive { field: "liters" });
    }

    #[test]
    fn negative_and_non_finite_inputs_are_rejected() {
        assert!(compute(-10.0, 5.0).is_err());
        assert!(compute(100.0, -5.0).is_err());
        assert!(compute(f64::NAN, 5.0).is_err());
        assert!(compute(100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_autonomy(10.0), "10.00");
        assert_eq!(format_autonomy(11.56), "11.56");
    }
}
