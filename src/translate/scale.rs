//! Scale state and per-translation scale configuration

use std::collections::HashMap;

use super::{EntityType, PacketId};

/// Per-entity scaling state.
///
/// Invariant: `scale` is 1.0 whenever `juvenile` is false; when `juvenile` is
/// true it equals the factor registered for the entity's type. The state
/// exists so scale updates are only synthesized when the derived scale
/// actually changes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleState {
    juvenile: bool,
    scale: f32,
}

impl ScaleState {
    /// Create the default state: adult, identity scale.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            juvenile: false,
            scale: 1.0,
        }
    }

    /// Whether the entity currently shows its juvenile form.
    #[must_use]
    pub const fn juvenile(&self) -> bool {
        self.juvenile
    }

    /// Current scale multiplier.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Check whether the state already equals the given pair.
    #[allow(clippy::float_cmp)]
    pub(crate) fn matches(&self, juvenile: bool, scale: f32) -> bool {
        self.juvenile == juvenile && self.scale == scale
    }

    pub(crate) const fn set(&mut self, juvenile: bool, scale: f32) {
        self.juvenile = juvenile;
        self.scale = scale;
    }
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable scale configuration for one protocol translation.
///
/// Holds the juvenile factor per substituted entity type, the identifier of
/// the scale attribute in the newer revision, and the packet id used when
/// synthesizing attribute updates.
///
/// A factor composes with whatever baseline scale the type substitution
/// itself applies: substituting a type rendered at 2.0x and registering a
/// juvenile factor of 0.65 yields 1.3x on the wire. That composition is the
/// registry populator's responsibility and is not validated here.
#[derive(Debug)]
pub struct ScaleRegistry {
    factors: HashMap<EntityType, f32>,
    scale_attribute: String,
    update_attributes: PacketId,
}

impl ScaleRegistry {
    /// Start building a registry for the given scale attribute and the
    /// packet id of the older revision's attribute-update message.
    #[must_use]
    pub fn builder(
        scale_attribute: impl Into<String>,
        update_attributes: PacketId,
    ) -> ScaleRegistryBuilder {
        ScaleRegistryBuilder {
            factors: HashMap::new(),
            scale_attribute: scale_attribute.into(),
            update_attributes,
        }
    }

    /// Juvenile scale factor for an entity type, if one is registered.
    #[must_use]
    pub fn factor(&self, entity_type: EntityType) -> Option<f32> {
        self.factors.get(&entity_type).copied()
    }

    /// Identifier of the scale attribute in the newer revision.
    #[must_use]
    pub fn scale_attribute(&self) -> &str {
        &self.scale_attribute
    }

    /// Packet id used for synthesized attribute updates.
    #[must_use]
    pub const fn update_attributes(&self) -> PacketId {
        self.update_attributes
    }
}

/// Builder for [`ScaleRegistry`].
#[derive(Debug)]
pub struct ScaleRegistryBuilder {
    factors: HashMap<EntityType, f32>,
    scale_attribute: String,
    update_attributes: PacketId,
}

impl ScaleRegistryBuilder {
    /// Register the scale factor applied while an entity of this type is
    /// juvenile.
    #[must_use]
    pub fn juvenile_factor(mut self, entity_type: EntityType, factor: f32) -> Self {
        assert!(factor > 0.0, "juvenile factor must be positive");
        self.factors.insert(entity_type, factor);
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> ScaleRegistry {
        ScaleRegistry {
            factors: self.factors,
            scale_attribute: self.scale_attribute,
            update_attributes: self.update_attributes,
        }
    }
}
