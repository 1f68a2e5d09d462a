//! Entity-scale translation between protocol revisions
//!
//! This module tracks the juvenile flag per entity, synthesizes attribute
//! updates when the derived scale changes, and rewrites outbound
//! attribute-update payloads for the older revision.

mod channel;
mod entity;
mod mapping;
mod rewrite;
mod scale;
mod tracker;

pub use channel::{OutboundMessage, OutboundSink, PacketId, SendQueue};
pub use entity::{EntityTracker, EntityType, FieldValue, TrackedEntity};
pub use mapping::AttributeMappings;
pub use rewrite::AttributeRewriteFilter;
pub use scale::{ScaleRegistry, ScaleRegistryBuilder, ScaleState};
pub use tracker::{JUVENILE_FLAG_INDEX, ScaleTracker};
