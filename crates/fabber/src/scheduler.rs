//! Layer scheduling: round-robin, shuffled interleaving of all registered
//! shapes' layers.

use std::io::Write;

use fabber_gcode::{GcodeEmitter, PrintSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{FabberError, Result};
use crate::registry::{ShapeKey, ShapeRegistry};
use crate::shapes;

/// Drives per-layer generation across all registered shapes.
///
/// Each round covers one layer index: the active shapes are visited in a
/// fresh uniform-random order (one Fisher–Yates pass over the active
/// subset), interleaving objects' layers instead of finishing one object
/// before starting the next. This spreads oozing risk across objects and
/// keeps the head from idling over a single part.
#[derive(Debug)]
pub struct Scheduler {
    rng: StdRng,
}

impl Scheduler {
    /// Scheduler with an entropy-seeded order.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Scheduler with a fixed seed, for reproducible streams.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate the full instruction stream: startup, every shape's every
    /// layer in shuffled round-robin order, shutdown.
    ///
    /// A sink write failure aborts immediately without emitting the
    /// shutdown block, since machine state would be ambiguous.
    pub fn run<W: Write>(
        &mut self,
        registry: &mut ShapeRegistry,
        settings: &PrintSettings,
        sink: W,
    ) -> Result<()> {
        let mut emitter = GcodeEmitter::new(settings, sink);
        emitter.start_sequence()?;

        let max_layers = registry.max_layers();
        let mut active: Vec<ShapeKey> = registry.keys().collect();

        for _layer in 1..=max_layers {
            let mut i = active.len();
            while i > 0 {
                i -= 1;
                // One Fisher–Yates step over the not-yet-visited slots.
                let pick = self.rng.gen_range(0..=i);
                active.swap(i, pick);
                let key = active[i];

                let shape = registry
                    .get_mut(key)
                    .ok_or(FabberError::UnknownShape(key))?;
                if shape.is_done() {
                    // Finished last round; drop from the active set.
                    active.swap_remove(i);
                    continue;
                }
                shape.cur_layer += 1;
                let snapshot = *shape;
                shapes::print_layer(&mut emitter, &snapshot)?;
            }
        }

        emitter.end_sequence()?;
        Ok(())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
