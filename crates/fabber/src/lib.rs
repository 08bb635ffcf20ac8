#![warn(missing_docs)]

//! Toolpath generation for solid-body primitives.
//!
//! fabber converts axis-aligned cubes and vertical cylinders placed on a
//! build plate into a G-code instruction stream for material-extrusion
//! printers. Shapes are registered against a fixed
//! [`PrintSettings`](fabber_gcode::PrintSettings) record; generation
//! interleaves all shapes' layers in shuffled round-robin order and writes
//! the stream to a caller-provided sink.
//!
//! # Example
//!
//! ```
//! use fabber::Printer;
//! use fabber_gcode::PrintSettings;
//!
//! let mut printer = Printer::new(PrintSettings::default()).unwrap();
//! printer.add_cube(50.0, 50.0, 10.0).unwrap();
//! printer.add_cylinder(100.0, 100.0, 5.0, 3.0).unwrap();
//!
//! let mut gcode = Vec::new();
//! printer.generate(&mut gcode).unwrap();
//! ```

pub mod bounds;
pub mod error;
pub mod passes;
pub mod registry;
pub mod scheduler;
pub mod shapes;

pub use error::{FabberError, Result};
pub use registry::{Shape, ShapeKey, ShapeKind, ShapeRegistry};
pub use scheduler::Scheduler;
pub use shapes::InfillPattern;

use std::io::Write;

use fabber_gcode::PrintSettings;

/// A configured printer: settings plus the shapes registered for one
/// generation run.
#[derive(Debug)]
pub struct Printer {
    settings: PrintSettings,
    registry: ShapeRegistry,
}

impl Printer {
    /// Create a printer after validating the settings.
    pub fn new(settings: PrintSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            registry: ShapeRegistry::new(),
        })
    }

    /// Settings this printer was configured with.
    pub fn settings(&self) -> &PrintSettings {
        &self.settings
    }

    /// Register a cube with the default infill pattern.
    pub fn add_cube(&mut self, x: f64, y: f64, size: f64) -> Result<ShapeKey> {
        self.registry.add_cube(&self.settings, x, y, size)
    }

    /// Register a cube with an explicit infill pattern.
    pub fn add_cube_with_infill(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        infill: InfillPattern,
    ) -> Result<ShapeKey> {
        self.registry
            .add_cube_with_infill(&self.settings, x, y, size, infill)
    }

    /// Register a vertical cylinder.
    pub fn add_cylinder(&mut self, x: f64, y: f64, radius: f64, height: f64) -> Result<ShapeKey> {
        self.registry.add_cylinder(&self.settings, x, y, radius, height)
    }

    /// Number of registered shapes.
    pub fn shape_count(&self) -> usize {
        self.registry.len()
    }

    /// Look up a registered shape.
    pub fn shape(&self, key: ShapeKey) -> Option<&Shape> {
        self.registry.get(key)
    }

    /// Write the full instruction stream (startup, all layers, shutdown)
    /// to `sink`, interleaving shapes in entropy-seeded random order.
    pub fn generate<W: Write>(&mut self, sink: W) -> Result<()> {
        Scheduler::new().run(&mut self.registry, &self.settings, sink)
    }

    /// Like [`generate`](Printer::generate) but with a fixed interleaving
    /// seed, for reproducible streams.
    pub fn generate_seeded<W: Write>(&mut self, sink: W, seed: u64) -> Result<()> {
        Scheduler::with_seed(seed).run(&mut self.registry, &self.settings, sink)
    }

    /// Release all registered shapes. Safe to call with none registered.
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = PrintSettings {
            layer_height: 0.0,
            ..Default::default()
        };
        assert!(Printer::new(settings).is_err());
    }

    #[test]
    fn test_single_cube_end_to_end() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        let key = printer.add_cube(50.0, 50.0, 10.0).unwrap();
        assert_eq!(printer.shape(key).unwrap().total_layers, 50);

        let mut out = Vec::new();
        printer.generate_seeded(&mut out, 11).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("; START G-code").count(), 1);
        assert_eq!(text.matches("; END G-code").count(), 1);
        assert_eq!(text.matches("cube perimeter layer").count(), 50);
        // One anti-oozing approach per perimeter.
        assert_eq!(text.matches("add_line_oozing").count(), 50);
        assert_eq!(printer.shape(key).unwrap().cur_layer, 50);
    }

    #[test]
    fn test_single_cylinder_end_to_end() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        let key = printer.add_cylinder(100.0, 100.0, 5.0, 3.0).unwrap();
        assert_eq!(printer.shape(key).unwrap().total_layers, 15);

        let mut out = Vec::new();
        printer.generate_seeded(&mut out, 11).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("cyl layer").count(), 15);
        // 80 segments per layer, each a bare G1 with a five-decimal E.
        let segments = text
            .lines()
            .filter(|l| l.starts_with("G1 X") && l.contains(" E") && !l.contains(';'))
            .count();
        assert_eq!(segments, 15 * 80);
        // One counter reset per layer (plus none elsewhere for cylinders).
        assert_eq!(text.matches("G92 E0\n").count(), 15);
    }

    #[test]
    fn test_out_of_bounds_cube_not_registered() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        let result = printer.add_cube(215.0, 50.0, 20.0);
        assert!(matches!(result, Err(FabberError::OutOfBounds)));
        assert_eq!(printer.shape_count(), 0);
    }

    #[test]
    fn test_mixed_shapes_complete_independently() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        let cube = printer.add_cube(50.0, 50.0, 4.0).unwrap();
        let cyl = printer.add_cylinder(150.0, 150.0, 5.0, 10.0).unwrap();

        let mut out = Vec::new();
        printer.generate_seeded(&mut out, 5).unwrap();

        assert_eq!(printer.shape(cube).unwrap().cur_layer, 20);
        assert_eq!(printer.shape(cyl).unwrap().cur_layer, 50);
    }

    #[test]
    fn test_selectable_infill_patterns() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        printer
            .add_cube_with_infill(50.0, 50.0, 6.0, InfillPattern::Boustrophedon)
            .unwrap();
        printer
            .add_cube_with_infill(100.0, 100.0, 6.0, InfillPattern::OutwardSpiral)
            .unwrap();

        let mut out = Vec::new();
        printer.generate_seeded(&mut out, 9).unwrap();
        let text = String::from_utf8(out).unwrap();
        // Both cubes print all their layers regardless of pattern.
        assert_eq!(text.matches("cube perimeter layer").count(), 60);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        printer.add_cube(50.0, 50.0, 10.0).unwrap();
        printer.clear();
        assert_eq!(printer.shape_count(), 0);

        // A fresh run after teardown generates only the bracket blocks.
        let mut out = Vec::new();
        printer.generate_seeded(&mut out, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("; START G-code"));
        assert!(text.contains("; END G-code"));
        assert_eq!(text.matches("cube perimeter layer").count(), 0);
    }
}
