//! Process-wide print settings.

use serde::{Deserialize, Serialize};

use crate::error::{GcodeError, Result};

/// Printer and material parameters, fixed for the whole generation run.
///
/// Supplied once before any shape is registered; no partial updates
/// mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintSettings {
    /// Nozzle diameter (mm).
    pub nozzle_diameter: f64,
    /// Filament diameter (mm).
    pub filament_diameter: f64,
    /// Layer height (mm).
    pub layer_height: f64,
    /// Printing feed rate (mm/min).
    pub print_speed: u32,
    /// Travel feed rate (mm/min).
    pub travel_speed: u32,
    /// Bead width ratio relative to nominal line width.
    pub print_width_ratio: f64,
    /// Fraction of travel distance fed as anti-oozing extrusion.
    pub oozing_ratio: f64,
    /// Vertical security margin during anti-oozing travel (mm).
    pub oozing_z_security: f64,
    /// Nozzle temperature (°C).
    pub temp_nozzle: u32,
    /// Bed temperature (°C).
    pub temp_bed: u32,
    /// Build plate size along X (mm).
    pub build_width: f64,
    /// Build plate size along Y (mm).
    pub build_depth: f64,
    /// Maximum printable height (mm).
    pub build_height: f64,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            nozzle_diameter: 0.4,
            filament_diameter: 1.75,
            layer_height: 0.2,
            print_speed: 1500,
            travel_speed: 6000,
            print_width_ratio: 1.1,
            oozing_ratio: 0.3,
            oozing_z_security: 4.0,
            temp_nozzle: 217,
            temp_bed: 60,
            build_width: 220.0,
            build_depth: 220.0,
            build_height: 250.0,
        }
    }
}

impl PrintSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.nozzle_diameter <= 0.0 {
            return Err(GcodeError::InvalidSettings(
                "nozzle_diameter must be positive".into(),
            ));
        }
        if self.filament_diameter <= 0.0 {
            return Err(GcodeError::InvalidSettings(
                "filament_diameter must be positive".into(),
            ));
        }
        if self.layer_height <= 0.0 || self.layer_height > 1.0 {
            return Err(GcodeError::InvalidSettings(
                "layer_height must be between 0 and 1mm".into(),
            ));
        }
        if self.print_speed == 0 || self.travel_speed == 0 {
            return Err(GcodeError::InvalidSettings(
                "feed rates must be positive".into(),
            ));
        }
        if self.print_width_ratio <= 0.0 {
            return Err(GcodeError::InvalidSettings(
                "print_width_ratio must be positive".into(),
            ));
        }
        if self.oozing_ratio < 0.0 {
            return Err(GcodeError::InvalidSettings(
                "oozing_ratio must not be negative".into(),
            ));
        }
        if self.build_width <= 0.0 || self.build_depth <= 0.0 || self.build_height <= 0.0 {
            return Err(GcodeError::InvalidSettings(
                "build volume dimensions must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Cross-section area of the filament feedstock (mm²).
    pub fn filament_area(&self) -> f64 {
        let r = self.filament_diameter / 2.0;
        std::f64::consts::PI * r * r
    }

    /// Nominal bead cross-section for a line of the given width (mm²).
    pub fn bead_area(&self, width: f64) -> f64 {
        width * self.layer_height * self.print_width_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        assert!(PrintSettings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_layer_height() {
        let settings = PrintSettings {
            layer_height: -0.1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_build_volume() {
        let settings = PrintSettings {
            build_height: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = PrintSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: PrintSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.temp_nozzle, settings.temp_nozzle);
        assert_eq!(back.build_width, settings.build_width);
    }

    #[test]
    fn test_filament_area() {
        let settings = PrintSettings::default();
        let expected = std::f64::consts::PI * 0.875 * 0.875;
        assert!((settings.filament_area() - expected).abs() < 1e-12);
    }
}
