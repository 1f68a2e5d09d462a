//! Juvenile-flag tracking and synthetic attribute updates

use std::sync::Arc;

use tracing::{debug, trace};

use crate::wire::PacketWriter;

use super::{
    AttributeMappings, EntityTracker, FieldValue, OutboundMessage, OutboundSink, ScaleRegistry,
};

/// Field index of the juvenile flag in the shared entity field table.
pub const JUVENILE_FLAG_INDEX: u8 = 16;

/// Tracks juvenile-flag changes and keeps clients' rendered scale current.
///
/// The origin server never resends the scale attribute on its own, so when a
/// tracked entity's juvenile flag flips, the tracker schedules a one-entry
/// attribute update carrying the new scale. The update is scheduled while the
/// triggering event is being handled, so it lands on the wire immediately
/// after the message that carried the flag.
#[derive(Debug)]
pub struct ScaleTracker {
    registry: Arc<ScaleRegistry>,
    mappings: Arc<AttributeMappings>,
}

impl ScaleTracker {
    /// Create a tracker over the translation's scale configuration and
    /// attribute-id table.
    #[must_use]
    pub fn new(registry: Arc<ScaleRegistry>, mappings: Arc<AttributeMappings>) -> Self {
        Self { registry, mappings }
    }

    /// React to one entity field-change event.
    ///
    /// Everything that can go wrong here is a local no-op by design: a field
    /// other than the juvenile flag, a non-boolean value, an untracked
    /// entity, or a type with no registered factor all leave the connection's
    /// state and outbound channel untouched. When the derived scale does
    /// change, the record is updated first; the synthetic update is then
    /// skipped only if the scale attribute has no id in the older revision.
    pub fn handle_field_change(
        &self,
        entities: &mut EntityTracker,
        outbound: &mut impl OutboundSink,
        entity_id: i32,
        field_index: u8,
        value: &FieldValue,
    ) {
        if field_index != JUVENILE_FLAG_INDEX {
            return;
        }
        let Some(juvenile) = value.as_bool() else {
            return;
        };
        let Some(entity) = entities.get_mut(entity_id) else {
            return;
        };
        let Some(factor) = self.registry.factor(entity.entity_type()) else {
            // This translation layer is not configured to scale this type
            return;
        };

        let scale = if juvenile { factor } else { 1.0 };
        let state = entity.scale_state_or_default();
        if state.matches(juvenile, scale) {
            return;
        }
        state.set(juvenile, scale);
        trace!(entity_id, juvenile, scale, "entity scale state changed");

        let Some(mapped_id) = self.mapped_scale_id() else {
            debug!(
                attribute = self.registry.scale_attribute(),
                "scale attribute has no mapped id, skipping synthetic update"
            );
            return;
        };

        let mut writer = PacketWriter::with_capacity(16);
        writer.write_var_int(entity_id);
        writer.write_var_int(1);
        #[allow(clippy::cast_possible_wrap)]
        writer.write_var_int(mapped_id as i32);
        writer.write_f64(f64::from(scale));
        writer.write_var_int(0);

        outbound.schedule_send(OutboundMessage::new(
            self.registry.update_attributes(),
            writer.freeze(),
        ));
    }

    /// Client-side id of the configured scale attribute.
    fn mapped_scale_id(&self) -> Option<u32> {
        let server_id = self.mappings.id_of(self.registry.scale_attribute())?;
        self.mappings.mapped_id(server_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{EntityType, PacketId, ScaleState, SendQueue};
    use crate::wire::PacketReader;

    const UPDATE_ATTRIBUTES: PacketId = PacketId::new(0x75);
    const COW: EntityType = EntityType::new(21);

    fn mappings() -> Arc<AttributeMappings> {
        Arc::new(AttributeMappings::new(
            &["game:armor", "game:scale", "game:speed"],
            &["game:speed", "game:scale"],
        ))
    }

    fn tracker_with_factor(factor: f32) -> ScaleTracker {
        let registry = ScaleRegistry::builder("game:scale", UPDATE_ATTRIBUTES)
            .juvenile_factor(COW, factor)
            .build();
        ScaleTracker::new(Arc::new(registry), mappings())
    }

    fn tracked_cow() -> EntityTracker {
        let mut entities = EntityTracker::new();
        entities.add_entity(12, COW);
        entities
    }

    #[test]
    fn test_transition_updates_state_and_sends_once() {
        let tracker = tracker_with_factor(0.65);
        let mut entities = tracked_cow();
        let mut outbound = SendQueue::new();

        tracker.handle_field_change(
            &mut entities,
            &mut outbound,
            12,
            JUVENILE_FLAG_INDEX,
            &FieldValue::Bool(true),
        );

        let state = entities.get(12).unwrap().scale_state().unwrap();
        assert!(state.juvenile());
        assert_eq!(state.scale(), 0.65);

        assert_eq!(outbound.len(), 1);
        let message = outbound.pop().unwrap();
        assert_eq!(message.packet_id(), UPDATE_ATTRIBUTES);

        let mut reader = PacketReader::new(message.payload());
        assert_eq!(reader.read_var_int().unwrap(), 12); // entity id
        assert_eq!(reader.read_var_int().unwrap(), 1); // one attribute
        assert_eq!(reader.read_var_int().unwrap(), 1); // mapped scale id
        assert_eq!(reader.read_f64().unwrap(), f64::from(0.65f32));
        assert_eq!(reader.read_var_int().unwrap(), 0); // no modifiers
        assert!(reader.is_empty());
    }

    #[test]
    fn test_redundant_event_is_a_noop() {
        let tracker = tracker_with_factor(0.65);
        let mut entities = tracked_cow();
        let mut outbound = SendQueue::new();

        for _ in 0..3 {
            tracker.handle_field_change(
                &mut entities,
                &mut outbound,
                12,
                JUVENILE_FLAG_INDEX,
                &FieldValue::Bool(true),
            );
        }

        assert_eq!(outbound.len(), 1);
    }

    #[test]
    fn test_flag_cleared_restores_identity_scale() {
        let tracker = tracker_with_factor(0.65);
        let mut entities = tracked_cow();
        let mut outbound = SendQueue::new();

        tracker.handle_field_change(
            &mut entities,
            &mut outbound,
            12,
            JUVENILE_FLAG_INDEX,
            &FieldValue::Bool(true),
        );
        tracker.handle_field_change(
            &mut entities,
            &mut outbound,
            12,
            JUVENILE_FLAG_INDEX,
            &FieldValue::Bool(false),
        );

        let state = entities.get(12).unwrap().scale_state().unwrap();
        assert_eq!(*state, ScaleState::new());

        assert_eq!(outbound.len(), 2);
        outbound.pop();
        let message = outbound.pop().unwrap();
        let mut reader = PacketReader::new(message.payload());
        reader.read_var_int().unwrap();
        reader.read_var_int().unwrap();
        reader.read_var_int().unwrap();
        assert_eq!(reader.read_f64().unwrap(), 1.0);
    }

    #[test]
    fn test_other_field_index_ignored() {
        let tracker = tracker_with_factor(0.65);
        let mut entities = tracked_cow();
        let mut outbound = SendQueue::new();

        tracker.handle_field_change(&mut entities, &mut outbound, 12, 5, &FieldValue::Bool(true));

        assert!(entities.get(12).unwrap().scale_state().is_none());
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_non_boolean_value_ignored() {
        let tracker = tracker_with_factor(0.65);
        let mut entities = tracked_cow();
        let mut outbound = SendQueue::new();

        tracker.handle_field_change(
            &mut entities,
            &mut outbound,
            12,
            JUVENILE_FLAG_INDEX,
            &FieldValue::VarInt(1),
        );

        assert!(entities.get(12).unwrap().scale_state().is_none());
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_untracked_entity_ignored() {
        let tracker = tracker_with_factor(0.65);
        let mut entities = EntityTracker::new();
        let mut outbound = SendQueue::new();

        tracker.handle_field_change(
            &mut entities,
            &mut outbound,
            99,
            JUVENILE_FLAG_INDEX,
            &FieldValue::Bool(true),
        );

        assert!(outbound.is_empty());
    }

    #[test]
    fn test_unregistered_type_ignored() {
        let registry = ScaleRegistry::builder("game:scale", UPDATE_ATTRIBUTES).build();
        let tracker = ScaleTracker::new(Arc::new(registry), mappings());
        let mut entities = tracked_cow();
        let mut outbound = SendQueue::new();

        tracker.handle_field_change(
            &mut entities,
            &mut outbound,
            12,
            JUVENILE_FLAG_INDEX,
            &FieldValue::Bool(true),
        );

        assert!(entities.get(12).unwrap().scale_state().is_none());
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_unmapped_scale_attribute_commits_state_without_sending() {
        // Scale attribute exists server-side but the older revision lacks it
        let mappings = Arc::new(AttributeMappings::new(
            &["game:scale", "game:speed"],
            &["game:speed"],
        ));
        let registry = ScaleRegistry::builder("game:scale", UPDATE_ATTRIBUTES)
            .juvenile_factor(COW, 0.65)
            .build();
        let tracker = ScaleTracker::new(Arc::new(registry), mappings);
        let mut entities = tracked_cow();
        let mut outbound = SendQueue::new();

        tracker.handle_field_change(
            &mut entities,
            &mut outbound,
            12,
            JUVENILE_FLAG_INDEX,
            &FieldValue::Bool(true),
        );

        let state = entities.get(12).unwrap().scale_state().unwrap();
        assert!(state.juvenile());
        assert_eq!(state.scale(), 0.65);
        assert!(outbound.is_empty());
    }
}
