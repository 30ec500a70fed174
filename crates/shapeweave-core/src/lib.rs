//! Shapeweave Core Library
//!
//! Headless polygon boolean engine for parametric 2D shapes: sampling shapes
//! into rings, clipping ring sets with union/difference/intersection/xor, and
//! assembling the result into a reusable path shape.

pub mod assemble;
pub mod clip;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod path;
pub mod sampler;
pub mod shapes;
pub mod table;

pub use assemble::{BooleanOpResult, NamingState};
pub use clip::{BooleanOp, ClipOutput};
pub use config::EngineConfig;
pub use engine::BooleanEngine;
pub use error::{BooleanError, BooleanResult, EngineWarning};
pub use geometry::Ring;
pub use path::MultiRingPath;
pub use sampler::{Sampled, sample};
pub use shapes::{Color, ShapeDescriptor, ShapeKind, ShapeStyle, Transform};
pub use table::{ShapeId, ShapeTable};
