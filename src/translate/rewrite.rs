//! Outbound attribute-update rewriting

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::wire::{PacketReader, PacketWriter, Result};

use super::{AttributeMappings, EntityTracker, ScaleRegistry, TrackedEntity};

/// Rewrites every outbound attribute-update payload for the older revision.
///
/// Three things happen in a single pass over the wire format: attribute ids
/// are remapped, entries with no id in the older revision are dropped (the
/// count prefix is patched afterwards), and the scale attribute's base value
/// is multiplied by the entity's tracked scale. The multiplier is read fresh
/// from the entity's state on every call, so rewriting the same server
/// payload twice without an intervening flag change yields identical output.
///
/// The guard on the multiply is deliberately narrow: it fires only for the
/// configured scale attribute and only while a non-identity scale is active,
/// so a server's unrelated attribute update for the same entity passes
/// through untouched apart from id remapping.
#[derive(Debug)]
pub struct AttributeRewriteFilter {
    registry: Arc<ScaleRegistry>,
    mappings: Arc<AttributeMappings>,
}

impl AttributeRewriteFilter {
    /// Create a filter over the translation's scale configuration and
    /// attribute-id table.
    #[must_use]
    pub fn new(registry: Arc<ScaleRegistry>, mappings: Arc<AttributeMappings>) -> Self {
        Self { registry, mappings }
    }

    /// Rewrite one attribute-update payload.
    ///
    /// Returns `Err` only when the payload itself is truncated or malformed;
    /// the embedding pipeline must isolate such a failure to this one
    /// message. Missing entity state or unmapped attributes are not errors.
    #[allow(clippy::float_cmp)]
    pub fn rewrite(&self, entities: &EntityTracker, payload: &[u8]) -> Result<Bytes> {
        let mut reader = PacketReader::new(payload);
        let mut writer = PacketWriter::with_capacity(payload.len());

        let entity_id = reader.read_var_int()?;
        writer.write_var_int(entity_id);

        let scale = entities
            .get(entity_id)
            .map_or(1.0, TrackedEntity::current_scale);
        // Resolved once for the whole message
        let scale_id = self.mappings.id_of(self.registry.scale_attribute());

        let count = reader.read_var_int()?;
        let count_slot = writer.mark_var_int(count);
        let mut kept = count;

        for _ in 0..count {
            let attr_id = reader.read_var_int()?;
            let server_id = u32::try_from(attr_id).ok();
            let Some(mapped_id) = server_id.and_then(|id| self.mappings.mapped_id(id)) else {
                kept -= 1;
                Self::skip_entry(&mut reader)?;
                continue;
            };

            #[allow(clippy::cast_possible_wrap)]
            writer.write_var_int(mapped_id as i32);

            let mut base = reader.read_f64()?;
            if scale != 1.0 && scale_id.is_some() && server_id == scale_id {
                base *= f64::from(scale);
                trace!(entity_id, scale, base, "applied tracked scale to base value");
            }
            writer.write_f64(base);

            let modifier_count = reader.read_var_int()?;
            writer.write_var_int(modifier_count);
            for _ in 0..modifier_count {
                let modifier_id = reader.read_string()?;
                writer.write_string(&modifier_id);
                writer.write_f64(reader.read_f64()?);
                writer.write_u8(reader.read_u8()?);
            }
        }

        if kept < count {
            debug!(
                entity_id,
                dropped = count - kept,
                "dropped attribute entries with no mapped id"
            );
            writer.patch_var_int(count_slot, kept);
        }

        Ok(writer.freeze())
    }

    /// Consume a dropped entry so the reader stays byte-aligned.
    fn skip_entry(reader: &mut PacketReader<'_>) -> Result<()> {
        reader.read_f64()?;
        let modifier_count = reader.read_var_int()?;
        for _ in 0..modifier_count {
            reader.read_string()?;
            reader.read_f64()?;
            reader.read_u8()?;
        }
        Ok(())
    }
}
