//! Shape registry and consumed-shape lifecycle.

use crate::error::{BooleanError, BooleanResult};
use crate::shapes::ShapeDescriptor;
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a registered shape.
pub type ShapeId = Uuid;

/// A registered shape and its lifecycle flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntry {
    pub shape: ShapeDescriptor,
    /// Set once the shape has been used as a boolean input.
    pub consumed: bool,
}

/// All shapes known to one program run, keyed by ID.
///
/// Names are unique handles: registering a shape under an existing name
/// rebinds the name to the new entry. Entries are never deleted by boolean
/// operations, only marked consumed.
#[derive(Debug, Clone, Default)]
pub struct ShapeTable {
    entries: HashMap<ShapeId, ShapeEntry>,
    /// Registration order.
    order: Vec<ShapeId>,
    names: HashMap<String, ShapeId>,
}

impl ShapeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape and return its new ID.
    pub fn insert(&mut self, shape: ShapeDescriptor) -> ShapeId {
        let id = Uuid::new_v4();
        if let Some(previous) = self.names.insert(shape.name.clone(), id) {
            log::debug!("Rebinding shape name '{}' (was {})", shape.name, previous);
        }
        self.order.push(id);
        self.entries.insert(
            id,
            ShapeEntry {
                shape,
                consumed: false,
            },
        );
        id
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&ShapeDescriptor> {
        self.entries.get(&id).map(|e| &e.shape)
    }

    /// Get the entry bound to a name.
    pub fn get_by_name(&self, name: &str) -> Option<(ShapeId, &ShapeDescriptor)> {
        let id = *self.names.get(name)?;
        self.get(id).map(|shape| (id, shape))
    }

    /// Like [`get_by_name`](Self::get_by_name), failing with `ShapeNotFound`.
    pub fn lookup(&self, name: &str) -> BooleanResult<(ShapeId, &ShapeDescriptor)> {
        self.get_by_name(name)
            .ok_or_else(|| BooleanError::ShapeNotFound(name.to_string()))
    }

    /// Check whether a name is currently bound.
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Flag a shape as consumed. Returns false if the ID is unknown.
    pub fn mark_consumed(&mut self, id: ShapeId) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.consumed = true;
                true
            }
            None => false,
        }
    }

    pub fn is_consumed(&self, id: ShapeId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.consumed)
    }

    /// Shapes still visible to the renderer, in registration order.
    pub fn visible(&self) -> impl Iterator<Item = &ShapeDescriptor> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter(|e| !e.consumed)
            .map(|e| &e.shape)
    }

    /// All shapes in registration order, consumed ones included.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &ShapeEntry)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|e| (*id, e)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every shape. Called before a full program re-evaluation.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.names.clear();
    }

    /// Clear every consumed flag.
    pub fn restore_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.consumed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{CircleParams, RectangleParams, ShapeKind};

    fn rect(name: &str) -> ShapeDescriptor {
        ShapeDescriptor::new(name, ShapeKind::Rectangle(RectangleParams::new(10.0, 10.0)))
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = ShapeTable::new();
        let id = table.insert(rect("a"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(id).map(|s| s.name.as_str()), Some("a"));
        assert_eq!(table.lookup("a").unwrap().0, id);
        assert_eq!(
            table.lookup("missing").unwrap_err(),
            BooleanError::ShapeNotFound("missing".to_string())
        );
    }

    #[test]
    fn test_rebinding_a_name() {
        let mut table = ShapeTable::new();
        let first = table.insert(rect("a"));
        let second = table.insert(ShapeDescriptor::new(
            "a",
            ShapeKind::Circle(CircleParams::new(5.0)),
        ));
        assert_ne!(first, second);
        assert_eq!(table.lookup("a").unwrap().0, second);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_consumed_shapes_are_hidden_not_deleted() {
        let mut table = ShapeTable::new();
        let a = table.insert(rect("a"));
        table.insert(rect("b"));
        assert!(table.mark_consumed(a));
        assert!(table.is_consumed(a));
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table.visible().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["b"]);

        table.restore_all();
        assert!(!table.is_consumed(a));
        assert_eq!(table.visible().count(), 2);
    }

    #[test]
    fn test_mark_unknown_id() {
        let mut table = ShapeTable::new();
        assert!(!table.mark_consumed(Uuid::new_v4()));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut table = ShapeTable::new();
        table.insert(rect("a"));
        table.reset();
        assert!(table.is_empty());
        assert!(!table.contains_name("a"));
    }

    #[test]
    fn test_iter_includes_consumed_in_order() {
        let mut table = ShapeTable::new();
        let a = table.insert(rect("a"));
        let b = table.insert(rect("b"));
        table.mark_consumed(a);
        let entries: Vec<_> = table
            .iter()
            .map(|(id, e)| (id, e.shape.name.as_str(), e.consumed))
            .collect();
        assert_eq!(entries, vec![(a, "a", true), (b, "b", false)]);
    }
}
