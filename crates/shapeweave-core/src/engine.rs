//! Boolean operation entry points.

use crate::assemble::{BooleanOpResult, NamingState, assemble};
use crate::clip::{BooleanOp, ClipOutput, Operand, clip};
use crate::config::EngineConfig;
use crate::error::BooleanResult;
use crate::sampler::sample;
use crate::shapes::ShapeDescriptor;
use crate::table::ShapeTable;

/// Engine context: configuration plus result-name counters.
///
/// One engine is kept per program run. Call [`reset_naming`](Self::reset_naming)
/// before re-evaluating the whole program so names start over at 1.
#[derive(Debug, Clone, Default)]
pub struct BooleanEngine {
    config: EngineConfig,
    naming: NamingState,
}

impl BooleanEngine {
    /// Create an engine. The config is validated first.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: config.validate(),
            naming: NamingState::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn naming(&self) -> &NamingState {
        &self.naming
    }

    /// Union of one or more shapes.
    pub fn perform_union<S: AsRef<str>>(
        &mut self,
        table: &mut ShapeTable,
        names: &[S],
    ) -> BooleanResult<BooleanOpResult> {
        self.perform(BooleanOp::Union, table, names)
    }

    /// The first shape minus every following shape.
    pub fn perform_difference<S: AsRef<str>>(
        &mut self,
        table: &mut ShapeTable,
        names: &[S],
    ) -> BooleanResult<BooleanOpResult> {
        self.perform(BooleanOp::Difference, table, names)
    }

    /// Region common to two or more shapes.
    pub fn perform_intersection<S: AsRef<str>>(
        &mut self,
        table: &mut ShapeTable,
        names: &[S],
    ) -> BooleanResult<BooleanOpResult> {
        self.perform(BooleanOp::Intersection, table, names)
    }

    /// Region covered by exactly one of two shapes.
    pub fn perform_xor<S: AsRef<str>>(
        &mut self,
        table: &mut ShapeTable,
        names: &[S],
    ) -> BooleanResult<BooleanOpResult> {
        self.perform(BooleanOp::Xor, table, names)
    }

    /// Run `op` on the named shapes and register the result in `table`.
    ///
    /// Every error is raised before the table changes: on failure no input is
    /// consumed and nothing is added.
    pub fn perform<S: AsRef<str>>(
        &mut self,
        op: BooleanOp,
        table: &mut ShapeTable,
        names: &[S],
    ) -> BooleanResult<BooleanOpResult> {
        op.check_input_count(names.len())?;

        let mut ids = Vec::with_capacity(names.len());
        let mut shapes = Vec::with_capacity(names.len());
        for name in names {
            let (id, shape) = table.lookup(name.as_ref())?;
            ids.push(id);
            shapes.push(shape);
        }
        log::debug!(
            "{} of {:?}",
            op,
            names.iter().map(|n| n.as_ref()).collect::<Vec<&str>>()
        );

        let output = self.compute(op, &shapes)?;
        Ok(assemble(op, output, &ids, &mut self.naming, table))
    }

    /// Clip shapes without touching any table or name counter.
    ///
    /// Sampler warnings come first in the output, followed by clip warnings.
    pub fn compute(&self, op: BooleanOp, shapes: &[&ShapeDescriptor]) -> BooleanResult<ClipOutput> {
        op.check_input_count(shapes.len())?;

        let mut warnings = Vec::new();
        let operands: Vec<Operand> = shapes
            .iter()
            .map(|shape| {
                let sampled = sample(shape, &self.config);
                warnings.extend(sampled.warnings);
                Operand::new(shape.name.clone(), sampled.rings)
            })
            .collect();

        let mut output = clip(op, operands, &self.config)?;
        warnings.append(&mut output.warnings);
        output.warnings = warnings;
        Ok(output)
    }

    /// Restart every result-name counter at 1.
    pub fn reset_naming(&mut self) {
        self.naming.reset();
    }
}
