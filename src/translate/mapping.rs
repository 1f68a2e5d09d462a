//! Attribute identifier translation between revisions

use std::collections::HashMap;

/// Bidirectional attribute-id table for one protocol translation.
///
/// Server-side ids are indices into the newer revision's attribute registry;
/// client-side ids index the older one. Attributes absent from the older
/// revision have no mapped id and their updates must be dropped.
#[derive(Debug)]
pub struct AttributeMappings {
    ids: HashMap<String, u32>,
    mapped: Vec<Option<u32>>,
}

impl AttributeMappings {
    /// Build the table from the two revisions' ordered identifier lists.
    ///
    /// Identifiers are matched by name: a server-side attribute maps to the
    /// index of the identical identifier in `client`, if present.
    #[must_use]
    pub fn new(server: &[&str], client: &[&str]) -> Self {
        let client_ids: HashMap<&str, u32> = client
            .iter()
            .enumerate()
            .map(|(id, ident)| (*ident, id as u32))
            .collect();

        let ids = server
            .iter()
            .enumerate()
            .map(|(id, ident)| ((*ident).to_owned(), id as u32))
            .collect();
        let mapped = server
            .iter()
            .map(|ident| client_ids.get(ident).copied())
            .collect();

        Self { ids, mapped }
    }

    /// Server-side id of an attribute identifier.
    #[must_use]
    pub fn id_of(&self, identifier: &str) -> Option<u32> {
        self.ids.get(identifier).copied()
    }

    /// Client-side id a server-side id translates to.
    #[must_use]
    pub fn mapped_id(&self, id: u32) -> Option<u32> {
        self.mapped.get(id as usize).copied().flatten()
    }

    /// Number of server-side attributes known to the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapped.len()
    }

    /// Check whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty()
    }
}
