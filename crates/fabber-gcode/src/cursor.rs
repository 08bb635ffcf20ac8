//! Machine cursor state.

use nalgebra::Point3;

/// Current head position and cumulative extruded filament length.
///
/// One cursor exists per emitter; it is mutated only by emitter moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineCursor {
    /// Head position (mm).
    pub position: Point3<f64>,
    /// Extruded filament length since the last counter reset (mm).
    pub extruded: f64,
}

impl MachineCursor {
    /// Cursor at the machine origin with a zeroed extrusion counter.
    pub fn origin() -> Self {
        Self {
            position: Point3::origin(),
            extruded: 0.0,
        }
    }

    /// Cursor at `(x, y, z)` with a zeroed extrusion counter.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            extruded: 0.0,
        }
    }

    /// Euclidean 3D distance from the cursor to `(x, y, z)`.
    pub fn distance_to(&self, x: f64, y: f64, z: f64) -> f64 {
        (Point3::new(x, y, z) - self.position).norm()
    }

    /// Squared planar (XY) distance from the cursor to `(x, y)`.
    pub fn planar_distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.position.x;
        let dy = y - self.position.y;
        dx * dx + dy * dy
    }
}

impl Default for MachineCursor {
    fn default() -> Self {
        Self::origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin() {
        let cursor = MachineCursor::origin();
        assert_eq!(cursor.position, Point3::origin());
        assert_eq!(cursor.extruded, 0.0);
    }

    #[test]
    fn test_distance() {
        let cursor = MachineCursor {
            position: Point3::new(1.0, 2.0, 3.0),
            extruded: 0.0,
        };
        assert_relative_eq!(cursor.distance_to(1.0, 2.0, 3.0), 0.0);
        assert_relative_eq!(cursor.distance_to(4.0, 6.0, 3.0), 5.0);
    }

    #[test]
    fn test_planar_distance_ignores_z() {
        let cursor = MachineCursor {
            position: Point3::new(0.0, 0.0, 10.0),
            extruded: 0.0,
        };
        assert_relative_eq!(cursor.planar_distance_sq(3.0, 4.0), 25.0);
    }
}
