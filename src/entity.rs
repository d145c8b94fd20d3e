//! Entity — a named node carrying ontological-class tags.

use crate::naming::NameGenerator;
use std::sync::atomic::{AtomicU32, Ordering};

/// Opaque identifier for an [`Entity`], stable across clones.
///
/// Per the REDESIGN FLAG on "cyclic network built on a general directed-graph
/// library" (spec §9), networks key their adjacency storage by this id rather
/// than by node identity or name. The id is assigned once, at [`Entity::new`],
/// and survives `Clone` — this is what lets [`crate::network::Network::union`]
/// match nodes "by identity, not by name" across two networks that both hold a
/// clone of the same logical entity, and what makes `mostly_copy` unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u32);

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(0);

/// A named node carrying one or more ontological-class tags (e.g. `Point`,
/// `ProperInterval`, `Region`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    name: String,
    classes: Vec<String>,
}

impl Entity {
    /// Create a new entity with a freshly allocated identity. Duplicate class
    /// tags are removed; the remaining order is preserved for printing.
    pub fn new(name: impl Into<String>, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut seen = Vec::new();
        for c in classes {
            let c = c.into();
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        Entity {
            id: EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            classes: seen,
        }
    }

    /// Create a new entity with a name drawn from `gen` (spec §9, "process-wide
    /// randomness for default names" re-architected as an injected, seedable
    /// generator rather than ambient global state).
    pub fn new_unnamed(
        classes: impl IntoIterator<Item = impl Into<String>>,
        gen: &mut NameGenerator,
        prefix: &str,
    ) -> Self {
        Entity::new(gen.generate(prefix), classes)
    }

    /// This entity's stable identity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entity's ontological-class tags, in declaration order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Replace the class-tag list, e.g. after propagation narrows it
    /// (spec §3: "During propagation the tag list may be narrowed").
    pub(crate) fn set_classes(&mut self, classes: Vec<String>) {
        self.classes = classes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_classes_preserving_order() {
        let e = Entity::new("X", ["ProperInterval", "Point", "ProperInterval"]);
        assert_eq!(e.classes(), &["ProperInterval", "Point"]);
    }

    #[test]
    fn clone_preserves_identity() {
        let e = Entity::new("X", ["Point"]);
        let c = e.clone();
        assert_eq!(e.id(), c.id());
    }

    #[test]
    fn distinct_entities_get_distinct_ids() {
        let a = Entity::new("X", ["Point"]);
        let b = Entity::new("X", ["Point"]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn unnamed_entity_gets_a_prefixed_generated_name() {
        let mut gen = NameGenerator::seeded(3);
        let e = Entity::new_unnamed(["Point"], &mut gen, "TE:");
        assert!(e.name().starts_with("TE:"));
    }
}
