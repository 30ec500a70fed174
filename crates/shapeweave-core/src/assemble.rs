//! Turning clipped rings into a registered path shape.

use crate::clip::{BooleanOp, ClipOutput};
use crate::error::EngineWarning;
use crate::path::MultiRingPath;
use crate::shapes::{Color, PathShape, ShapeDescriptor, ShapeKind, ShapeStyle, Transform};
use crate::table::{ShapeId, ShapeTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stroke width given to results whose first input sets none.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Per-operation counters for generated result names.
///
/// Counters start at 1 and only move forward until [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingState {
    counters: HashMap<BooleanOp, u32>,
}

impl NamingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter for `op` and return the new value.
    pub fn next(&mut self, op: BooleanOp) -> u32 {
        let counter = self.counters.entry(op).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Last value handed out for `op`, 0 if none.
    pub fn current(&self, op: BooleanOp) -> u32 {
        self.counters.get(&op).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.counters.clear();
    }
}

/// Everything produced by one boolean operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanOpResult {
    /// ID the result was registered under.
    pub id: ShapeId,
    pub shape: ShapeDescriptor,
    /// Names of the input shapes, now marked consumed.
    pub consumed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EngineWarning>,
}

impl BooleanOpResult {
    pub fn name(&self) -> &str {
        &self.shape.name
    }

    /// Decode the result's rings.
    pub fn path(&self) -> MultiRingPath {
        self.shape
            .kind
            .as_path()
            .map(|p| MultiRingPath::decode(&p.points))
            .unwrap_or_default()
    }

    pub fn has_holes(&self) -> bool {
        self.shape.kind.as_path().is_some_and(|p| p.has_holes)
    }
}

/// Strip generated `_<U|D|I|X><n>` suffixes, so `a_U3` becomes `a`.
pub fn base_name(name: &str) -> &str {
    let mut base = name;
    while let Some((head, tail)) = base.rsplit_once('_') {
        let mut chars = tail.chars();
        let tagged = chars.next().and_then(BooleanOp::from_symbol).is_some();
        let digits = chars.as_str();
        if head.is_empty() || !tagged || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            break;
        }
        base = head;
    }
    base
}

/// Default (fill, stroke) colors for each operation.
fn palette(op: BooleanOp) -> (Color, Color) {
    match op {
        BooleanOp::Union => (Color::rgb(0xa8, 0xd5, 0xff), Color::rgb(0x1e, 0x6f, 0xd9)),
        BooleanOp::Difference => (Color::rgb(0xff, 0xc9, 0xa8), Color::rgb(0xd9, 0x53, 0x1e)),
        BooleanOp::Intersection => (Color::rgb(0xb8, 0xf0, 0xc2), Color::rgb(0x1e, 0x9e, 0x3a)),
        BooleanOp::Xor => (Color::rgb(0xe0, 0xc8, 0xff), Color::rgb(0x7a, 0x3e, 0xd9)),
    }
}

/// Result style: operation defaults overridden by the first input's explicit fields.
///
/// `fill_color` and `stroke_color` win over the generic `color`. Every field
/// of the returned style is set.
pub fn derive_style(op: BooleanOp, first: &ShapeStyle) -> ShapeStyle {
    let (fill, stroke) = palette(op);
    let stroke_color = first.stroke_color.or(first.color).unwrap_or(stroke);
    ShapeStyle {
        fill: Some(first.fill.unwrap_or(true)),
        fill_color: Some(first.fill_color.or(first.color).unwrap_or(fill)),
        color: Some(first.color.unwrap_or(stroke_color)),
        stroke_color: Some(stroke_color),
        stroke_width: Some(first.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)),
        opacity: Some(first.opacity.unwrap_or(1.0)),
    }
}

/// Register the clip output as a new path shape and consume the inputs.
///
/// `inputs` are the IDs of the operation's input shapes, first one first.
pub fn assemble(
    op: BooleanOp,
    output: ClipOutput,
    inputs: &[ShapeId],
    naming: &mut NamingState,
    table: &mut ShapeTable,
) -> BooleanOpResult {
    let first = inputs.first().and_then(|&id| table.get(id));
    let base = first.map_or("shape", |s| base_name(&s.name)).to_string();
    let style = derive_style(op, first.map(|s| &s.style).unwrap_or(&ShapeStyle::default()));

    let name = loop {
        let candidate = format!("{}_{}{}", base, op.symbol(), naming.next(op));
        if !table.contains_name(&candidate) {
            break candidate;
        }
        log::debug!("Result name '{}' already taken, trying the next one", candidate);
    };

    let path = MultiRingPath::new(output.rings);
    let has_holes = path.rings.len() > 1;
    let shape = ShapeDescriptor {
        name,
        kind: ShapeKind::Path(PathShape {
            points: path.encode(),
            turtle: Vec::new(),
            operation: Some(op),
            has_holes,
        }),
        transform: Transform::default(),
        style,
    };

    let mut consumed = Vec::with_capacity(inputs.len());
    for &id in inputs {
        if let Some(input) = table.get(id) {
            consumed.push(input.name.clone());
        }
        table.mark_consumed(id);
    }

    let id = table.insert(shape.clone());
    log::debug!(
        "Registered {} result '{}' with {} ring(s), consumed {:?}",
        op,
        shape.name,
        path.rings.len(),
        consumed
    );

    BooleanOpResult {
        id,
        shape,
        consumed,
        warnings: output.warnings,
    }
}
