//! Build-volume validation.

use fabber_gcode::PrintSettings;

/// Check whether a footprint centered at `(x, y)` with the given half-extent
/// and total height fits on the build plate.
///
/// Pure predicate: fails on negative extents, footprints that cross the
/// plate edge or zero on either axis, and heights above the build volume.
pub fn fits_build_volume(
    settings: &PrintSettings,
    x: f64,
    y: f64,
    half_extent: f64,
    height: f64,
) -> bool {
    if half_extent < 0.0 || height < 0.0 {
        return false;
    }
    if x - half_extent < 0.0 || y - half_extent < 0.0 {
        return false;
    }
    if x + half_extent > settings.build_width || y + half_extent > settings.build_depth {
        return false;
    }
    if height > settings.build_height {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_inside() {
        let settings = PrintSettings::default();
        assert!(fits_build_volume(&settings, 110.0, 110.0, 10.0, 50.0));
    }

    #[test]
    fn test_rejects_negative_extent() {
        let settings = PrintSettings::default();
        assert!(!fits_build_volume(&settings, 110.0, 110.0, -1.0, 50.0));
    }

    #[test]
    fn test_rejects_footprint_below_zero() {
        let settings = PrintSettings::default();
        assert!(!fits_build_volume(&settings, 5.0, 110.0, 10.0, 50.0));
        assert!(!fits_build_volume(&settings, 110.0, 5.0, 10.0, 50.0));
    }

    #[test]
    fn test_rejects_footprint_past_plate() {
        let settings = PrintSettings::default();
        assert!(!fits_build_volume(&settings, 215.0, 110.0, 10.0, 50.0));
        assert!(!fits_build_volume(&settings, 110.0, 215.0, 10.0, 50.0));
    }

    #[test]
    fn test_rejects_too_tall() {
        let settings = PrintSettings::default();
        assert!(!fits_build_volume(&settings, 110.0, 110.0, 10.0, 251.0));
    }

    #[test]
    fn test_exact_fit_accepted() {
        let settings = PrintSettings::default();
        assert!(fits_build_volume(&settings, 110.0, 110.0, 110.0, 250.0));
    }
}
