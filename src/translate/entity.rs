//! Per-connection entity tracking

use std::collections::HashMap;

use super::ScaleState;

/// Numeric entity-type identifier in the newer protocol revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityType(u32);

impl EntityType {
    /// Create an entity type from its raw id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Dynamically-typed value carried by an entity field-change event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// Boolean field
    Bool(bool),
    /// Var-int field
    VarInt(i32),
    /// Float field
    Float(f32),
    /// String field
    Text(String),
}

impl FieldValue {
    /// Boolean payload, if this is a boolean field.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// Transient state about one entity known to a connection.
#[derive(Debug)]
pub struct TrackedEntity {
    entity_type: EntityType,
    scale: Option<ScaleState>,
}

impl TrackedEntity {
    /// Track a freshly spawned entity.
    #[must_use]
    pub const fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            scale: None,
        }
    }

    /// Type of the entity as sent by the origin server.
    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Scale state, if any has been recorded.
    #[must_use]
    pub const fn scale_state(&self) -> Option<&ScaleState> {
        self.scale.as_ref()
    }

    /// Scale state, created on first access.
    pub fn scale_state_or_default(&mut self) -> &mut ScaleState {
        self.scale.get_or_insert_with(ScaleState::new)
    }

    /// Effective scale multiplier (1.0 when no state has been recorded).
    #[must_use]
    pub fn current_scale(&self) -> f32 {
        self.scale.as_ref().map_or(1.0, ScaleState::scale)
    }
}

/// Per-connection store of tracked entities, keyed by entity id.
///
/// A tracker is exclusive to one connection and must never be shared across
/// connections. Entries live until [`EntityTracker::remove_entity`] or
/// [`EntityTracker::clear`]; eviction policy is the embedder's concern.
#[derive(Debug, Default)]
pub struct EntityTracker {
    entities: HashMap<i32, TrackedEntity>,
}

impl EntityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an entity. Replaces any previous entry for the id.
    pub fn add_entity(&mut self, entity_id: i32, entity_type: EntityType) {
        self.entities
            .insert(entity_id, TrackedEntity::new(entity_type));
    }

    /// Stop tracking an entity.
    pub fn remove_entity(&mut self, entity_id: i32) -> Option<TrackedEntity> {
        self.entities.remove(&entity_id)
    }

    /// Drop all tracked entities (connection teardown or world switch).
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Look up a tracked entity.
    #[must_use]
    pub fn get(&self, entity_id: i32) -> Option<&TrackedEntity> {
        self.entities.get(&entity_id)
    }

    /// Look up a tracked entity for mutation.
    pub fn get_mut(&mut self, entity_id: i32) -> Option<&mut TrackedEntity> {
        self.entities.get_mut(&entity_id)
    }

    /// Number of tracked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check whether no entities are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_and_remove() {
        let mut tracker = EntityTracker::new();
        tracker.add_entity(7, EntityType::new(42));

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get(7).unwrap().entity_type(), EntityType::new(42));

        let removed = tracker.remove_entity(7).unwrap();
        assert_eq!(removed.entity_type(), EntityType::new(42));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_current_scale_defaults_to_identity() {
        let entity = TrackedEntity::new(EntityType::new(1));
        assert!(entity.scale_state().is_none());
        assert_eq!(entity.current_scale(), 1.0);
    }

    #[test]
    fn test_scale_state_created_lazily() {
        let mut entity = TrackedEntity::new(EntityType::new(1));
        entity.scale_state_or_default().set(true, 0.5);

        assert_eq!(entity.current_scale(), 0.5);
        assert!(entity.scale_state().unwrap().juvenile());
    }

    #[test]
    fn test_field_value_type_probe() {
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::VarInt(1).as_bool(), None);
        assert_eq!(FieldValue::Text("1".into()).as_bool(), None);
    }
}
