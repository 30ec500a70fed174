//! Error and warning types for boolean operations.

use crate::clip::BooleanOp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a boolean operation.
///
/// Any of these is raised before the shape table is touched, so a failed
/// operation never consumes its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BooleanError {
    #[error("{operation} expects {expected} shape(s), got {actual}")]
    InputCount {
        operation: BooleanOp,
        expected: &'static str,
        actual: usize,
    },
    #[error("Shape not found: {0}")]
    ShapeNotFound(String),
    #[error("Shape '{shape}' has no ring with 3 or more points and non-zero area ({points} point(s) sampled)")]
    InsufficientPoints { shape: String, points: usize },
}

/// Result type for boolean operations.
pub type BooleanResult<T> = Result<T, BooleanError>;

/// Non-fatal conditions observed while computing a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineWarning {
    /// The sampler did not know the shape's kind and used the default rectangle.
    UnsupportedShapeKind { shape: String },
    /// A non-first fold operand had no usable ring and was left out.
    SkippedShape { shape: String, points: usize },
    /// Boundary tracing hit its iteration cap or a dead end.
    TraceIncomplete { operation: BooleanOp },
}

impl std::fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineWarning::UnsupportedShapeKind { shape } => {
                write!(f, "shape '{shape}' has an unsupported kind, using default rectangle")
            }
            EngineWarning::SkippedShape { shape, points } => {
                write!(f, "shape '{shape}' skipped, no usable ring in {points} point(s)")
            }
            EngineWarning::TraceIncomplete { operation } => {
                write!(f, "{operation} boundary trace did not close cleanly")
            }
        }
    }
}
