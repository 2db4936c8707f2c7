/// Discriminant of the short Weierstrass cubic y² = x³ + ax + b
///
/// Δ = -16(4a³ + 27b²). Zero exactly when the cubic has a repeated root.
/// Defined for every f64; overflow and NaN follow IEEE-754.
pub fn compute_discriminant(a: f64, b: f64) -> f64 {
    -16.0 * (4.0 * a.powi(3) + 27.0 * b.powi(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(a: f64, b: f64) -> f64 {
        -16.0 * (4.0 * a * a * a + 27.0 * b * b)
    }

    #[test]
    fn test_matches_closed_form() {
        let mut a = -5.0;
        while a <= 5.0 {
            let mut b = -5.0;
            while b <= 5.0 {
                let delta = compute_discriminant(a, b);
                assert!((delta - reference(a, b)).abs() < 1e-9, "a={} b={}", a, b);
                b += 0.7;
            }
            a += 0.3;
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(compute_discriminant(-3.0, 2.0), 0.0);
        assert_eq!(compute_discriminant(0.0, 0.0), 0.0);
        assert_eq!(compute_discriminant(-1.0, 4.0), -6848.0);
    }

    #[test]
    fn test_non_finite_inputs_do_not_panic() {
        assert!(compute_discriminant(1e200, 0.0).is_infinite());
        assert!(compute_discriminant(f64::NAN, 1.0).is_nan());
        assert_eq!(compute_discriminant(0.0, f64::INFINITY), f64::NEG_INFINITY);
    }
}
