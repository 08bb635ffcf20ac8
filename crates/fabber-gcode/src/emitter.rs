//! Motion and extrusion instruction emitter.
//!
//! The emitter owns the single machine cursor and the output instruction
//! stream. All moves go through it so that position and the extrusion
//! counter stay consistent across heterogeneous path generators.

use std::io::Write;

use nalgebra::Point3;

use crate::cursor::MachineCursor;
use crate::error::Result;
use crate::settings::PrintSettings;

/// Z comparisons closer than this are treated as "no height change".
const Z_EPSILON: f64 = 5e-4;

/// Emits G-code instructions while tracking machine state.
///
/// Travel moves rise clear before moving and descend after arriving, so the
/// nozzle never drags across a printed part. Extruding lines accumulate onto
/// the extrusion counter; anti-oozing travels reset it (see
/// [`travel_oozing`](GcodeEmitter::travel_oozing)).
#[derive(Debug)]
pub struct GcodeEmitter<'a, W: Write> {
    settings: &'a PrintSettings,
    cursor: MachineCursor,
    out: W,
}

impl<'a, W: Write> GcodeEmitter<'a, W> {
    /// Create an emitter writing to `out`, with the cursor at the origin.
    pub fn new(settings: &'a PrintSettings, out: W) -> Self {
        Self {
            settings,
            cursor: MachineCursor::origin(),
            out,
        }
    }

    /// Current machine cursor.
    pub fn cursor(&self) -> &MachineCursor {
        &self.cursor
    }

    /// Settings this emitter was built with.
    pub fn settings(&self) -> &PrintSettings {
        self.settings
    }

    /// Consume the emitter, returning the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Filament length needed to deposit `bead_area` mm² over `length` mm.
    pub fn extrusion_length(&self, bead_area: f64, length: f64) -> f64 {
        bead_area * length / self.settings.filament_area()
    }

    /// Emit a free-form comment line.
    pub fn comment(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "; {text}")?;
        Ok(())
    }

    /// Reset the extrusion counter to zero (`G92 E0`).
    pub fn reset_extrusion(&mut self) -> Result<()> {
        writeln!(self.out, "G92 E0")?;
        writeln!(self.out)?;
        self.cursor.extruded = 0.0;
        Ok(())
    }

    /// Non-printing travel to `(x, y, z)`.
    ///
    /// Rises clear before the XY move when the destination is above the
    /// current Z, and descends after it when below.
    pub fn travel(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let feed = self.settings.travel_speed;
        if z > self.cursor.position.z + Z_EPSILON {
            writeln!(self.out, "G1 Z{z:.2} F{feed} ; Move head up")?;
            writeln!(self.out, "G1 X{x:.2} Y{y:.2} F{feed} ; Move head in XY plane")?;
        } else if z < self.cursor.position.z - Z_EPSILON {
            writeln!(self.out, "G1 X{x:.2} Y{y:.2} F{feed} ; Move head in XY plane")?;
            writeln!(self.out, "G1 Z{z:.2} F{feed} ; Move head down")?;
        } else {
            writeln!(self.out, "G1 X{x:.2} Y{y:.2} F{feed} ; Move head in XY plane")?;
        }
        self.cursor.position = Point3::new(x, y, z);
        Ok(())
    }

    /// Combined single-instruction travel, with a trailing annotation.
    ///
    /// Used when a generator wants one `G1 X.. Y.. Z..` rather than the
    /// split Z-safe form, e.g. at the start of a closed loop.
    pub fn travel_combined(&mut self, x: f64, y: f64, z: f64, note: &str) -> Result<()> {
        let feed = self.settings.travel_speed;
        writeln!(self.out, "G1 X{x:.2} Y{y:.2} Z{z:.2} F{feed} ; {note}")?;
        self.cursor.position = Point3::new(x, y, z);
        Ok(())
    }

    /// Anti-oozing travel to `(x, y, z)`.
    ///
    /// Suppresses stringing between printed features: resets the extrusion
    /// counter, lifts by the configured Z security margin while feeding the
    /// vertical share of a small synthetic extrusion, carries the rest to the
    /// midpoint of the move, finishes the XY move dry, then descends back to
    /// the target Z.
    ///
    /// The cursor's extrusion value is *replaced* by the computed oozing
    /// amount, matching the counter reset that precedes the move. This is
    /// intentionally not cumulative, unlike
    /// [`extrude_line`](GcodeEmitter::extrude_line).
    pub fn travel_oozing(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        writeln!(self.out, "; add_line_oozing")?;

        let area = self.settings.bead_area(self.settings.nozzle_diameter);
        let dx = (x - self.cursor.position.x).abs();
        let dy = (y - self.cursor.position.y).abs();
        let dz = (z - self.cursor.position.z).abs();
        let dist = (dx * dx + dy * dy + dz * dz).sqrt();
        let e = self.extrusion_length(area, dist * self.settings.oozing_ratio);

        let sec = self.settings.oozing_z_security;
        let feed = self.settings.travel_speed;
        let e_up = e * (dz + sec) / (dx + dy + dz + sec);
        let mid_x = (self.cursor.position.x + x) / 2.0;
        let mid_y = (self.cursor.position.y + y) / 2.0;

        writeln!(self.out, "G92 E0 ; Reset extrusion head")?;
        writeln!(self.out, "G1 Z{:.2} E{e_up:.2} F{feed} ; Add oozing up", z + sec)?;
        writeln!(self.out, "G1 X{mid_x:.2} Y{mid_y:.2} E{e:.2} F{feed} ; Add oozing in XY plane")?;
        writeln!(self.out, "G1 X{x:.2} Y{y:.2} F{feed} ; Add oozing in XY plane")?;
        writeln!(self.out)?;
        writeln!(self.out, "G1 Z{z:.2} F{feed} ; Remove oozing security")?;

        self.cursor.position = Point3::new(x, y, z);
        self.cursor.extruded = e;
        Ok(())
    }

    /// Extruding line to `(x, y, z)` depositing a bead of the given width.
    ///
    /// The filament feed is derived by volume equivalence from the bead
    /// cross-section and the 3D travel distance, and accumulates onto the
    /// cursor's running extrusion counter.
    pub fn extrude_line(&mut self, x: f64, y: f64, z: f64, width: f64) -> Result<()> {
        let area = self.settings.bead_area(width);
        let dist = self.cursor.distance_to(x, y, z);
        let e = self.cursor.extruded + self.extrusion_length(area, dist);

        let feed = self.settings.print_speed;
        writeln!(self.out, "G1 X{x:.2} Y{y:.2} Z{z:.2} E{e:.2} F{feed} ; Add line")?;

        self.cursor.position = Point3::new(x, y, z);
        self.cursor.extruded = e;
        Ok(())
    }

    /// Short extruding segment at the current Z, with a five-decimal feed
    /// amount.
    ///
    /// Used for polygonal approximations of curves, where each segment's
    /// extrusion is a small increment that two decimal places would round
    /// away. The feed amount is per-segment, not cumulative; callers bracket
    /// a run of segments with [`reset_extrusion`](GcodeEmitter::reset_extrusion).
    pub fn extrude_segment(&mut self, x: f64, y: f64, width: f64) -> Result<()> {
        let area = width * self.settings.layer_height;
        let dx = x - self.cursor.position.x;
        let dy = y - self.cursor.position.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let e = self.extrusion_length(area, dist);

        let feed = self.settings.print_speed;
        writeln!(self.out, "G1 X{x:.2} Y{y:.2} E{e:.5} F{feed}")?;

        self.cursor.position.x = x;
        self.cursor.position.y = y;
        Ok(())
    }

    /// Emit the startup block: absolute coordinates, heat and wait, home,
    /// zero all axes, then prime the nozzle with two short lines near the
    /// origin.
    pub fn start_sequence(&mut self) -> Result<()> {
        let s = self.settings;
        writeln!(self.out, "; START G-code")?;
        writeln!(self.out, "G90 ; use absolute coordinates")?;
        writeln!(self.out, "M140 S{} ; Bed temp", s.temp_bed)?;
        writeln!(self.out, "M104 S{} ; Nozzle temp", s.temp_nozzle)?;
        writeln!(self.out, "M190 S{} ; Wait bed", s.temp_bed)?;
        writeln!(self.out, "M109 S{} ; Wait nozzle", s.temp_nozzle)?;
        writeln!(self.out, "G28 ; Home axes")?;
        writeln!(self.out, "G92 X0 Y0 Z0 E0 ; Reset coordinates")?;
        writeln!(self.out)?;

        let layer_height = self.settings.layer_height;
        let nozzle = self.settings.nozzle_diameter;
        self.travel(0.0, 0.0, layer_height)?;
        self.extrude_line(100.0, 0.0, layer_height, nozzle)?;
        self.extrude_line(0.0, 0.0, layer_height, nozzle)?;
        Ok(())
    }

    /// Emit the shutdown block: heaters off, park the head, disable motors.
    pub fn end_sequence(&mut self) -> Result<()> {
        writeln!(self.out, "; END G-code")?;
        writeln!(self.out, "M104 S0 ; Nozzle off")?;
        writeln!(self.out, "M140 S0 ; Bed off")?;
        writeln!(self.out, "G1 X0 Y200 F6000 ; Park head")?;
        writeln!(self.out, "M84 ; Disable motors")?;
        Ok(())
    }
}
