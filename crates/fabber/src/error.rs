//! Error types for toolpath generation.

use thiserror::Error;

use crate::registry::ShapeKey;

/// Errors that can occur during registration or generation.
#[derive(Error, Debug)]
pub enum FabberError {
    /// Shape footprint or height violates the configured build volume.
    /// The registration request fails; the registry is unchanged.
    #[error("shape does not fit within the build volume")]
    OutOfBounds,

    /// Backing storage for the registry could not grow. The registration
    /// request fails; the registry is unchanged.
    #[error("could not grow shape storage")]
    Allocation,

    /// A shape key did not resolve to a stored shape. Unreachable through
    /// the public API; indicates a scheduler bookkeeping bug.
    #[error("no shape registered under {0:?}")]
    UnknownShape(ShapeKey),

    /// G-code emission failed (sink write error or rejected settings).
    #[error(transparent)]
    Gcode(#[from] fabber_gcode::GcodeError),
}

/// Result type for fabber operations.
pub type Result<T> = std::result::Result<T, FabberError>;
