//! Currency unit conversion.
//!
//! Tazapay exchanges every amount as an integer count of minor units (cents);
//! tool callers speak in major units (`12.34`). Rounding is half away from
//! zero, which is what `f64::round` does.

/// Minor units per major unit for the two-decimal currencies handled here.
const MINOR_PER_MAJOR: f64 = 100.0;

/// Round to 2 decimal places.
pub fn round_2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 3 decimal places.
pub fn round_3(x: f64) -> f64 {
    (x * 1_000.0).round() / 1_000.0
}

/// Round to 6 decimal places. Used for exchange rates.
pub fn round_6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}

/// Convert minor units to a major-unit decimal for display, e.g. `1234 -> 12.34`.
pub fn minor_to_major(minor: i64) -> f64 {
    round_2(minor as f64 / MINOR_PER_MAJOR)
}

/// Convert a major-unit decimal to minor units for the API, e.g. `12.34 -> 1234`.
pub fn major_to_minor(major: f64) -> i64 {
    (major * MINOR_PER_MAJOR).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_to_major() {
        assert_eq!(minor_to_major(100), 1.0);
        assert_eq!(minor_to_major(123), 1.23);
        assert_eq!(minor_to_major(0), 0.0);
        assert_eq!(minor_to_major(1_000_000), 10_000.0);
        assert_eq!(minor_to_major(-123), -1.23);
    }

    #[test]
    fn test_major_to_minor() {
        assert_eq!(major_to_minor(1.0), 100);
        assert_eq!(major_to_minor(1.23), 123);
        assert_eq!(major_to_minor(0.0), 0);
        assert_eq!(major_to_minor(10_000.0), 1_000_000);
        assert_eq!(major_to_minor(-1.23), -123);
    }

    #[test]
    fn test_major_to_minor_rounds_half_away_from_zero() {
        assert_eq!(major_to_minor(1.235), 124);
        assert_eq!(major_to_minor(1.234), 123);
        assert_eq!(major_to_minor(12.34), 1234);
    }

    #[test]
    fn test_minor_major_round_trip() {
        for minor in [1234_i64, 1, 99, 4567, 8901, 9999, -250] {
            assert_eq!(major_to_minor(minor_to_major(minor)), minor);
        }
        for major in [1.23, 45.67, 89.01, 99.99, 0.01] {
            assert_eq!(minor_to_major(major_to_minor(major)), round_2(major));
        }
    }

    #[test]
    fn test_fixed_precision_rounding() {
        assert_eq!(round_2(1.005_1), 1.01);
        assert_eq!(round_3(83.123_49), 83.123);
        assert_eq!(round_3(83.123_5), 83.124);
        assert_eq!(round_6(0.012_345_678), 0.012_346);
    }
}
