//! Scene files: shapes plus a list of boolean statements.
//!
//! ```json
//! {
//!   "config": { "curve_segments": 72 },
//!   "shapes": [
//!     { "name": "a", "type": "rectangle", "width": 10, "height": 10 },
//!     { "name": "b", "type": "circle", "radius": 4, "transform": { "position": { "x": 5, "y": 0 } } }
//!   ],
//!   "statements": [ { "op": "difference", "shapes": ["a", "b"] } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use shapeweave_core::{
    BooleanEngine, BooleanError, BooleanOp, BooleanOpResult, EngineConfig, ShapeDescriptor,
    ShapeTable,
};
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Usage: shapeweave <scene.json | -> [config.json]")]
    Usage,
    #[error("IO error: {0}")]
    Io(String),
    #[error("Failed to parse scene: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Statement {index} ({op} of {shapes:?}) failed: {source}")]
    Statement {
        index: usize,
        op: BooleanOp,
        shapes: Vec<String>,
        #[source]
        source: BooleanError,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// One boolean operation applied to named shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub op: BooleanOp,
    pub shapes: Vec<String>,
}

/// A scene to evaluate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub config: EngineConfig,
    pub shapes: Vec<ShapeDescriptor>,
    pub statements: Vec<Statement>,
}

impl Scene {
    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a file, or from stdin when `path` is `-`.
    pub fn load(path: &str) -> CliResult<Self> {
        let json = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::Io(format!("Failed to read stdin: {}", e)))?;
            buf
        } else {
            let path = Path::new(path);
            fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("Failed to read {}: {}", path.display(), e)))?
        };
        Self::from_json(&json)
    }

    /// Replace the scene's config with one read from a JSON file.
    ///
    /// Missing fields take their defaults and the result is validated.
    pub fn load_config(&mut self, path: &str) -> CliResult<()> {
        let path = Path::new(path);
        let json = fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        self.config = EngineConfig::from_json_str(&json)?;
        log::debug!("Using config from {}: {:?}", path.display(), self.config);
        Ok(())
    }

    /// Register every shape, then run the statements in order.
    ///
    /// A failing statement is recorded and evaluation moves on to the next.
    pub fn evaluate(&self) -> Evaluation {
        let mut engine = BooleanEngine::new(self.config.clone());
        let mut table = ShapeTable::new();
        for shape in &self.shapes {
            table.insert(shape.clone());
        }
        log::info!(
            "Evaluating {} statement(s) over {} shape(s)",
            self.statements.len(),
            self.shapes.len()
        );

        let mut results = Vec::new();
        let mut failures = Vec::new();
        for (index, statement) in self.statements.iter().enumerate() {
            match engine.perform(statement.op, &mut table, &statement.shapes) {
                Ok(result) => {
                    log::info!(
                        "{} of {:?} -> '{}' ({} ring(s))",
                        statement.op,
                        statement.shapes,
                        result.name(),
                        result.path().rings.len()
                    );
                    for warning in &result.warnings {
                        log::warn!("{}: {}", result.name(), warning);
                    }
                    results.push(result);
                }
                Err(source) => {
                    let err = CliError::Statement {
                        index,
                        op: statement.op,
                        shapes: statement.shapes.clone(),
                        source,
                    };
                    log::error!("{}", err);
                    failures.push(err);
                }
            }
        }

        Evaluation {
            table,
            results,
            failures,
        }
    }
}

/// Outcome of evaluating a scene.
#[derive(Debug)]
pub struct Evaluation {
    pub table: ShapeTable,
    pub results: Vec<BooleanOpResult>,
    pub failures: Vec<CliError>,
}

impl Evaluation {
    /// Check whether every statement succeeded.
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of the shapes used up as boolean inputs, in registration order.
    pub fn consumed_names(&self) -> Vec<&str> {
        self.table
            .iter()
            .filter(|(_, entry)| entry.consumed)
            .map(|(_, entry)| entry.shape.name.as_str())
            .collect()
    }

    /// Visible shapes as pretty-printed JSON.
    pub fn visible_json(&self) -> CliResult<String> {
        let visible: Vec<&ShapeDescriptor> = self.table.visible().collect();
        Ok(serde_json::to_string_pretty(&visible)?)
    }
}
