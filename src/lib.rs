//! retrowire - Backward-compatibility entity-scale translation for tiered game protocols
//!
//! Newer protocol revisions introduce entity variants (a juvenile form) that
//! older clients cannot represent natively. When the translation layer
//! substitutes an available older entity type, this crate emulates the
//! missing juvenile/size distinction through the scale attribute the older
//! revision does understand: it tracks the juvenile flag per entity,
//! synthesizes an attribute update whenever the derived scale changes, and
//! rewrites every outbound attribute-update payload (remapping ids, dropping
//! unmapped entries, and multiplying the scale attribute's base value).
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use retrowire::{
//!     AttributeMappings, AttributeRewriteFilter, EntityTracker, EntityType, FieldValue,
//!     JUVENILE_FLAG_INDEX, PacketId, PacketWriter, ScaleRegistry, ScaleTracker, SendQueue,
//! };
//!
//! // Shared, immutable per-translation configuration
//! let mappings = Arc::new(AttributeMappings::new(
//!     &["game:scale", "game:speed"],
//!     &["game:speed", "game:scale"],
//! ));
//! let registry = Arc::new(
//!     ScaleRegistry::builder("game:scale", PacketId::new(0x75))
//!         .juvenile_factor(EntityType::new(21), 0.65)
//!         .build(),
//! );
//! let tracker = ScaleTracker::new(Arc::clone(&registry), Arc::clone(&mappings));
//! let filter = AttributeRewriteFilter::new(registry, mappings);
//!
//! // Per-connection state
//! let mut entities = EntityTracker::new();
//! let mut outbound = SendQueue::new();
//! entities.add_entity(12, EntityType::new(21));
//!
//! // The juvenile flag flips: one attribute update is synthesized
//! tracker.handle_field_change(
//!     &mut entities, &mut outbound, 12, JUVENILE_FLAG_INDEX, &FieldValue::Bool(true),
//! );
//! let synthetic = outbound.pop().expect("state change schedules an update");
//! assert_eq!(synthetic.packet_id(), PacketId::new(0x75));
//!
//! // Server-originated attribute updates pass through the filter, which
//! // remaps ids and applies the tracked scale to the base value
//! let mut update = PacketWriter::new();
//! update.write_var_int(12); // entity id
//! update.write_var_int(1); // one attribute
//! update.write_var_int(0); // server-side id of game:scale
//! update.write_f64(1.0);
//! update.write_var_int(0); // no modifiers
//!
//! let rewritten = filter.rewrite(&entities, &update.freeze())?;
//! assert!(!rewritten.is_empty());
//! # Ok::<(), retrowire::wire::Error>(())
//! ```
//!
//! # Design
//!
//! - **Connection-scoped state** - [`EntityTracker`] and [`SendQueue`] belong
//!   to exactly one connection and are driven sequentially
//! - **Silent degradation** - untracked entities, unregistered types, and
//!   unmapped attributes degrade to "no scale effect", never to an error
//! - **Fresh reads, no accumulation** - the filter reads the tracked scale on
//!   every call, so re-filtering the same payload cannot multiply twice

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod translate;
pub mod wire;

pub use translate::{
    AttributeMappings, AttributeRewriteFilter, EntityTracker, EntityType, FieldValue,
    JUVENILE_FLAG_INDEX, OutboundMessage, OutboundSink, PacketId, ScaleRegistry,
    ScaleRegistryBuilder, ScaleState, ScaleTracker, SendQueue, TrackedEntity,
};
pub use wire::{PacketReader, PacketWriter};
