//! Cylinder perimeter generator.

use std::io::Write;

use fabber_gcode::GcodeEmitter;

use crate::error::Result;
use crate::registry::Shape;

use super::Z_ADHESION_OFFSET;

/// Segments in the polygonal approximation of the circular outline.
const SEGMENTS: usize = 80;

/// Trace the circular outline of the cylinder at the current layer.
///
/// One combined travel to the first boundary point, then one short
/// extruding segment per polygon edge around the full circle. The
/// extrusion counter is reset afterwards so each cylinder layer's
/// accounting starts from zero.
pub fn perimeter<W: Write>(
    emitter: &mut GcodeEmitter<W>,
    shape: &Shape,
    radius: f64,
) -> Result<()> {
    let z = shape.layer_z() - Z_ADHESION_OFFSET;
    let nozzle = emitter.settings().nozzle_diameter;
    let step = std::f64::consts::TAU / SEGMENTS as f64;

    emitter.travel_combined(
        shape.x + radius,
        shape.y,
        z,
        &format!("cyl layer {}", shape.cur_layer),
    )?;

    for i in 1..=SEGMENTS {
        let ang = i as f64 * step;
        emitter.extrude_segment(
            shape.x + radius * ang.cos(),
            shape.y + radius * ang.sin(),
            nozzle,
        )?;
    }
    emitter.reset_extrusion()?;
    Ok(())
}
