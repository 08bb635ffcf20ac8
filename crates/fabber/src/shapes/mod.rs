//! Per-shape path generators.
//!
//! Each generator operates on one shape for one already-advanced layer and
//! is purely a sequence of emitter calls; scheduler bookkeeping is never
//! touched from here.

pub mod cube;
pub mod cylinder;

use std::io::Write;

use fabber_gcode::{GcodeEmitter, MachineCursor};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{Shape, ShapeKind};

/// How far below the layer's nominal top lines are laid down, pressing the
/// bead onto the previous layer for adhesion (mm).
pub(crate) const Z_ADHESION_OFFSET: f64 = 0.1;

/// Infill pattern for cube interiors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InfillPattern {
    /// Spiral from the outer infill ring toward the center.
    #[default]
    InwardSpiral,
    /// Spiral from the center toward the outer infill ring.
    OutwardSpiral,
    /// Back-and-forth parallel sweep.
    Boustrophedon,
}

/// Generate the current layer of `shape`: perimeter plus infill for cubes,
/// perimeter only for cylinders.
pub fn print_layer<W: Write>(emitter: &mut GcodeEmitter<W>, shape: &Shape) -> Result<()> {
    match shape.kind {
        ShapeKind::Cube { side, infill } => {
            cube::perimeter(emitter, shape, side)?;
            match infill {
                InfillPattern::InwardSpiral => cube::infill_spiral_inward(emitter, shape, side)?,
                InfillPattern::OutwardSpiral => cube::infill_spiral_outward(emitter, shape, side)?,
                InfillPattern::Boustrophedon => cube::infill_sweep(emitter, shape, side)?,
            }
        }
        ShapeKind::Cylinder { radius, .. } => cylinder::perimeter(emitter, shape, radius)?,
    }
    Ok(())
}

/// Index of the corner nearest the cursor, by squared planar distance.
pub(crate) fn nearest_corner(cursor: &MachineCursor, corners: &[[f64; 2]; 4]) -> usize {
    let mut min_idx = 0;
    let mut min_dist = cursor.planar_distance_sq(corners[0][0], corners[0][1]);
    for (i, c) in corners.iter().enumerate().skip(1) {
        let d = cursor.planar_distance_sq(c[0], c[1]);
        if d < min_dist {
            min_idx = i;
            min_dist = d;
        }
    }
    min_idx
}

/// Corners of a square of half-extent `s` centered at `(x, y)`, in the
/// fixed rotational order (-,-) (-,+) (+,+) (+,-).
pub(crate) fn corner_ring(x: f64, y: f64, s: f64) -> [[f64; 2]; 4] {
    [[x - s, y - s], [x - s, y + s], [x + s, y + s], [x + s, y - s]]
}
