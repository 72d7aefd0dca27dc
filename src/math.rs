//! Rounding primitive shared by every probability computation.

/// Round `value` to `decimals` places using round-half-to-even
/// tie-breaking.
///
/// This is the single rounding rule behind the two-decimal probability
/// contract, the six-decimal unnormalized scores, and the `count * 0.7`
/// split index. Exact halves go to the even neighbor (`2.5 -> 2`,
/// `3.5 -> 4`); everything else rounds to nearest.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let floor = scaled.floor();
    let rounded = if scaled - floor == 0.5 {
        if (floor as i64) % 2 == 0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    rounded / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_when_not_a_tie() {
        assert_eq!(round_to(1.4, 0), 1.0);
        assert_eq!(round_to(6.3, 0), 6.0);
        assert_eq!(round_to(6.7, 0), 7.0);
        assert_eq!(round_to(1.0 / 3.0, 2), 0.33);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
    }

    #[test]
    fn breaks_ties_toward_even() {
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn zero_decimals_on_exact_integers() {
        assert_eq!(round_to(7.0, 0), 7.0);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
