//! Cube perimeter and infill generators.
//!
//! All paths are expressed relative to the cursor the emitter tracks, so a
//! generator picks up wherever the previous feature left the head.

use std::io::Write;

use fabber_gcode::GcodeEmitter;

use crate::error::Result;
use crate::passes::pass_count;
use crate::registry::Shape;

use super::{corner_ring, nearest_corner, Z_ADHESION_OFFSET};

fn layer_z(shape: &Shape) -> f64 {
    shape.layer_z() - Z_ADHESION_OFFSET
}

/// Side span, pass count, and line width of the infill square.
fn infill_plan(emitter: &GcodeEmitter<impl Write>, side: f64) -> (f64, usize, f64) {
    let nozzle = emitter.settings().nozzle_diameter;
    let span = side - 2.0 * nozzle;
    let passes = pass_count(span, nozzle);
    (span, passes, span / passes as f64)
}

/// Trace the four walls of the cube at the current layer.
///
/// The square is inset by half the nozzle diameter so the deposited bead's
/// outer edge lands flush with the nominal side. Approach is an anti-oozing
/// travel to the corner nearest the head.
pub fn perimeter<W: Write>(emitter: &mut GcodeEmitter<W>, shape: &Shape, side: f64) -> Result<()> {
    let z = layer_z(shape);
    let nozzle = emitter.settings().nozzle_diameter;
    let s = side / 2.0 - nozzle / 2.0;
    let corners = corner_ring(shape.x, shape.y, s);
    let start = nearest_corner(emitter.cursor(), &corners);

    emitter.travel_oozing(corners[start][0], corners[start][1], z)?;
    emitter.comment(&format!("cube perimeter layer {}", shape.cur_layer))?;

    for i in 1..=4 {
        let c = corners[(start + i) % 4];
        emitter.extrude_line(c[0], c[1], z, nozzle)?;
    }
    Ok(())
}

/// Spiral infill starting at the outer infill ring and closing on the
/// center: one long edge, then shrinking alternating X/Y pairs.
pub fn infill_spiral_inward<W: Write>(
    emitter: &mut GcodeEmitter<W>,
    shape: &Shape,
    side: f64,
) -> Result<()> {
    let z = layer_z(shape);
    let (span, passes, width) = infill_plan(emitter, side);
    let s = (span - width) / 2.0;
    let corners = corner_ring(shape.x, shape.y, s);
    let start = nearest_corner(emitter.cursor(), &corners);
    emitter.travel(corners[start][0], corners[start][1], z)?;

    // Per-corner direction of the opening edge and of each shrinking pair.
    // k flips sign after every pair so the path winds inward.
    let long = width * (passes - 1) as f64;
    let mut k = 1.0_f64;
    match start {
        0 => {
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x, p.y + long * k, z, width)?;
            for i in (1..passes).rev() {
                let d = width * i as f64;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x + d * k, p.y, z, width)?;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x, p.y - d * k, z, width)?;
                k = -k;
            }
        }
        1 => {
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x + long * k, p.y, z, width)?;
            for i in (1..passes).rev() {
                let d = width * i as f64;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x, p.y - d * k, z, width)?;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x - d * k, p.y, z, width)?;
                k = -k;
            }
        }
        2 => {
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x, p.y - long * k, z, width)?;
            for i in (1..passes).rev() {
                let d = width * i as f64;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x - d * k, p.y, z, width)?;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x, p.y + d * k, z, width)?;
                k = -k;
            }
        }
        _ => {
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x - long * k, p.y, z, width)?;
            for i in (1..passes).rev() {
                let d = width * i as f64;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x, p.y + d * k, z, width)?;
                let p = emitter.cursor().position;
                emitter.extrude_line(p.x + d * k, p.y, z, width)?;
                k = -k;
            }
        }
    }
    Ok(())
}

/// Spiral infill growing outward from the center of the infill square.
///
/// With an odd pass count the spiral starts from wherever the perimeter
/// left the head, with the opening direction alternating by layer parity;
/// with an even count it starts from the nearest corner of the innermost
/// half-width ring.
pub fn infill_spiral_outward<W: Write>(
    emitter: &mut GcodeEmitter<W>,
    shape: &Shape,
    side: f64,
) -> Result<()> {
    let z = layer_z(shape);
    let (_span, passes, width) = infill_plan(emitter, side);

    if passes % 2 == 1 {
        let mut k = if shape.cur_layer % 2 == 1 { 1.0 } else { -1.0 };
        for i in 1..passes {
            let d = width * i as f64;
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x + d * k, p.y, z, width)?;
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x, p.y + d * k, z, width)?;
            k = -k;
        }
        let d = width * (passes - 1) as f64;
        let p = emitter.cursor().position;
        emitter.extrude_line(p.x + d * k, p.y, z, width)?;
    } else {
        let corners = corner_ring(shape.x, shape.y, width / 2.0);
        let start = nearest_corner(emitter.cursor(), &corners);
        emitter.travel(corners[start][0], corners[start][1], z)?;

        // Step signs away from the start corner.
        let (sy, sx) = match start {
            0 => (1.0, 1.0),
            1 => (-1.0, 1.0),
            2 => (-1.0, -1.0),
            _ => (1.0, -1.0),
        };
        let mut k = 1.0_f64;
        for i in 1..passes {
            let d = width * i as f64;
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x, p.y + sy * d * k, z, width)?;
            let p = emitter.cursor().position;
            emitter.extrude_line(p.x + sx * d * k, p.y, z, width)?;
            k = -k;
        }
        let d = width * (passes - 1) as f64;
        let p = emitter.cursor().position;
        emitter.extrude_line(p.x, p.y + sy * d * k, z, width)?;
    }
    Ok(())
}

/// Back-and-forth parallel sweep across the infill square, stepping one
/// line width sideways between passes. Sweep direction follows the start
/// corner so the head walks toward the far edge.
pub fn infill_sweep<W: Write>(
    emitter: &mut GcodeEmitter<W>,
    shape: &Shape,
    side: f64,
) -> Result<()> {
    let z = layer_z(shape);
    let (span, passes, width) = infill_plan(emitter, side);
    let s = (span - width) / 2.0;
    let corners = corner_ring(shape.x, shape.y, s);
    let start = nearest_corner(emitter.cursor(), &corners);
    emitter.travel(corners[start][0], corners[start][1], z)?;

    let (first_y, step_x) = match start {
        0 => (shape.y + s, width),
        1 => (shape.y - s, width),
        2 => (shape.y - s, -width),
        _ => (shape.y + s, -width),
    };
    for i in 0..passes {
        let target_y = if i % 2 == 0 { first_y } else { 2.0 * shape.y - first_y };
        let p = emitter.cursor().position;
        emitter.extrude_line(p.x, target_y, z, width)?;
        let p = emitter.cursor().position;
        emitter.travel(p.x + step_x, p.y, z)?;
    }
    Ok(())
}
