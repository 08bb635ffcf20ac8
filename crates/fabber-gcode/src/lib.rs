#![warn(missing_docs)]

//! G-code emission for the fabber toolpath generator.
//!
//! This crate owns the machine-facing half of the system: the print
//! settings record, the machine cursor (position plus cumulative extruded
//! filament length), and the [`GcodeEmitter`] that turns travel and
//! extrusion primitives into a Marlin-dialect instruction stream.
//!
//! # Example
//!
//! ```
//! use fabber_gcode::{GcodeEmitter, PrintSettings};
//!
//! let settings = PrintSettings::default();
//! let mut out = Vec::new();
//! let mut emitter = GcodeEmitter::new(&settings, &mut out);
//!
//! emitter.start_sequence().unwrap();
//! emitter.travel(50.0, 50.0, 0.2).unwrap();
//! emitter.extrude_line(60.0, 50.0, 0.2, settings.nozzle_diameter).unwrap();
//! emitter.end_sequence().unwrap();
//! ```

pub mod cursor;
pub mod emitter;
pub mod error;
pub mod settings;

pub use cursor::MachineCursor;
pub use emitter::GcodeEmitter;
pub use error::{GcodeError, Result};
pub use settings::PrintSettings;
