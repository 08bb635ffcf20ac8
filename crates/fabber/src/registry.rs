//! Shape registry: append-only storage of shape descriptors with
//! per-shape slicing cursors.

use fabber_gcode::PrintSettings;

use crate::bounds::fits_build_volume;
use crate::error::{FabberError, Result};
use crate::passes::pass_count;
use crate::shapes::InfillPattern;

/// Stable identity of a registered shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeKey(usize);

impl ShapeKey {
    /// Index behind the key.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Kind-specific geometry of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned cube resting on the plate.
    Cube {
        /// Side length (mm).
        side: f64,
        /// Infill policy for this cube.
        infill: InfillPattern,
    },
    /// Vertical cylinder resting on the plate.
    Cylinder {
        /// Radius (mm).
        radius: f64,
        /// Height (mm).
        height: f64,
    },
}

/// One registered shape with its slicing cursor.
///
/// `total_layers` and `layer_height` are fixed at registration time;
/// `cur_layer` is advanced only by the scheduler, one step per visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    /// Identity key, stable for the shape's lifetime.
    pub key: ShapeKey,
    /// Center X on the plate (mm).
    pub x: f64,
    /// Center Y on the plate (mm).
    pub y: f64,
    /// Geometry.
    pub kind: ShapeKind,
    /// Layers emitted so far (0 before the first scheduling visit).
    pub cur_layer: usize,
    /// Total layers this shape needs. Always at least 1.
    pub total_layers: usize,
    /// Height of each of this shape's layers (mm).
    pub layer_height: f64,
}

impl Shape {
    /// Has this shape emitted all of its layers?
    pub fn is_done(&self) -> bool {
        self.cur_layer >= self.total_layers
    }

    /// Z of the current layer's nominal top (mm).
    pub fn layer_z(&self) -> f64 {
        self.cur_layer as f64 * self.layer_height
    }
}

/// Append-only collection of shapes.
///
/// Storage starts at a capacity of 8 and doubles on demand through fallible
/// reservation, so a failed grow surfaces as [`FabberError::Allocation`]
/// for the one registration instead of aborting the process.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

const INITIAL_CAPACITY: usize = 8;

impl ShapeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Register a cube with the default infill pattern.
    pub fn add_cube(
        &mut self,
        settings: &PrintSettings,
        x: f64,
        y: f64,
        size: f64,
    ) -> Result<ShapeKey> {
        self.add_cube_with_infill(settings, x, y, size, InfillPattern::default())
    }

    /// Register a cube with an explicit infill pattern.
    pub fn add_cube_with_infill(
        &mut self,
        settings: &PrintSettings,
        x: f64,
        y: f64,
        size: f64,
        infill: InfillPattern,
    ) -> Result<ShapeKey> {
        if !fits_build_volume(settings, x, y, size / 2.0, size) {
            return Err(FabberError::OutOfBounds);
        }
        self.push(settings, x, y, size, ShapeKind::Cube { side: size, infill })
    }

    /// Register a vertical cylinder.
    pub fn add_cylinder(
        &mut self,
        settings: &PrintSettings,
        x: f64,
        y: f64,
        radius: f64,
        height: f64,
    ) -> Result<ShapeKey> {
        if !fits_build_volume(settings, x, y, radius, height) {
            return Err(FabberError::OutOfBounds);
        }
        self.push(settings, x, y, height, ShapeKind::Cylinder { radius, height })
    }

    fn push(
        &mut self,
        settings: &PrintSettings,
        x: f64,
        y: f64,
        extent: f64,
        kind: ShapeKind,
    ) -> Result<ShapeKey> {
        self.reserve_for_push()?;

        let total_layers = pass_count(extent, settings.layer_height);
        let key = ShapeKey(self.shapes.len());
        self.shapes.push(Shape {
            key,
            x,
            y,
            kind,
            cur_layer: 0,
            total_layers,
            layer_height: extent / total_layers as f64,
        });
        Ok(key)
    }

    /// Amortized-doubling growth with a fallible reservation.
    fn reserve_for_push(&mut self) -> Result<()> {
        if self.shapes.len() < self.shapes.capacity() {
            return Ok(());
        }
        let additional = if self.shapes.capacity() == 0 {
            INITIAL_CAPACITY
        } else {
            self.shapes.capacity()
        };
        self.shapes
            .try_reserve_exact(additional)
            .map_err(|_| FabberError::Allocation)
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Look up a shape by key.
    pub fn get(&self, key: ShapeKey) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.key == key)
    }

    /// Look up a shape by key, mutably.
    pub fn get_mut(&mut self, key: ShapeKey) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.key == key)
    }

    /// Iterate over registered shapes.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Keys of all registered shapes.
    pub fn keys(&self) -> impl Iterator<Item = ShapeKey> + '_ {
        self.shapes.iter().map(|s| s.key)
    }

    /// Largest total layer count across all registered shapes.
    pub fn max_layers(&self) -> usize {
        self.shapes.iter().map(|s| s.total_layers).max().unwrap_or(0)
    }

    /// Release all shapes. Safe to call on an empty registry.
    pub fn clear(&mut self) {
        self.shapes = Vec::new();
    }
}
