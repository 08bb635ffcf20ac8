//! Pass planning: best integer segmentation of a span for a target pitch.

/// Number of passes that best tiles `total_span` at `ideal_spacing`.
///
/// Chooses between `floor(span / spacing)` and one more pass, whichever
/// lands the actual pitch closer to the ideal. On an exact tie the larger
/// count wins. Non-positive inputs yield a single pass.
///
/// Used both for layer counts over a shape's height and for parallel infill
/// line counts over a cross-section.
pub fn pass_count(total_span: f64, ideal_spacing: f64) -> usize {
    if total_span <= 0.0 || ideal_spacing <= 0.0 {
        return 1;
    }
    let ideal_count = total_span / ideal_spacing;
    let f = ideal_count.floor();
    if f < 1.0 {
        return 1;
    }
    let err_down = total_span / f - ideal_spacing;
    let err_up = ideal_spacing - total_span / (f + 1.0);
    if err_down < err_up {
        f as usize
    } else {
        f as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_division() {
        assert_eq!(pass_count(10.0, 0.2), 50);
        assert_eq!(pass_count(3.0, 0.2), 15);
    }

    #[test]
    fn test_rounds_to_nearest_pitch() {
        // 10 / 0.3 = 33.33: 33 passes -> pitch 0.303, 34 -> 0.294.
        // Error 0.00303 vs 0.00588, so 33 wins.
        assert_eq!(pass_count(10.0, 0.3), 33);
        // 1.0 / 0.45 = 2.22: 2 passes -> 0.5, 3 -> 0.333.
        // Error 0.05 vs 0.1167, so 2 wins.
        assert_eq!(pass_count(1.0, 0.45), 2);
    }

    #[test]
    fn test_span_smaller_than_spacing() {
        assert_eq!(pass_count(0.1, 0.2), 1);
    }

    #[test]
    fn test_non_positive_inputs() {
        assert_eq!(pass_count(0.0, 0.2), 1);
        assert_eq!(pass_count(-5.0, 0.2), 1);
        assert_eq!(pass_count(10.0, 0.0), 1);
        assert_eq!(pass_count(10.0, -0.2), 1);
    }

    #[test]
    fn test_always_at_least_one() {
        for span in [0.001, 0.1, 1.0, 17.3, 250.0] {
            for spacing in [0.05, 0.2, 0.4, 3.0] {
                assert!(pass_count(span, spacing) >= 1);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(pass_count(7.3, 0.4), pass_count(7.3, 0.4));
    }

    #[test]
    fn test_tie_prefers_larger_count() {
        // span 3, spacing 1.25: 2 passes -> 1.5 (err 0.25),
        // 3 passes -> 1.0 (err 0.25). Tie goes to 3.
        assert_eq!(pass_count(3.0, 1.25), 3);
    }
}
