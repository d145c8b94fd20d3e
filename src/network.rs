//! Network — a directed, labeled multigraph of disjunctive relation constraints.

use crate::algebra::Algebra;
use crate::entity::{Entity, EntityId};
use crate::error::{QrError, QrResult};
use crate::naming::NameGenerator;
use crate::relation_set::RelationSet;
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::HashMap;

/// A directed graph `G = (V, E, c)` over entities, where every edge carries a
/// disjunctive [`RelationSet`] (spec §3).
///
/// Invariants maintained after every public mutation:
/// - converse symmetry: `(u,v)` present implies `(v,u)` present with the converse label;
/// - self-equality: every node has a self-edge drawn from its classes' equality relations.
///
/// Totality (every ordered pair has an edge) and consistency (no edge is empty)
/// are established only by a successful [`Network::propagate`].
pub struct Network {
    algebra: Algebra,
    name: String,
    entities: IndexMap<EntityId, Entity>,
    name_index: HashMap<String, EntityId>,
    edges: HashMap<(EntityId, EntityId), RelationSet>,
}

impl Network {
    /// Create an empty network over `algebra`.
    pub fn new(algebra: Algebra, name: impl Into<String>) -> Self {
        Network {
            algebra,
            name: name.into(),
            entities: IndexMap::new(),
            name_index: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    /// Create an empty network whose name is drawn from `gen` (spec §9,
    /// "process-wide randomness for default names").
    pub fn new_unnamed(algebra: Algebra, gen: &mut NameGenerator) -> Self {
        Network::new(algebra, gen.generate("Network:"))
    }

    /// The network's algebra.
    pub fn algebra(&self) -> &Algebra {
        &self.algebra
    }

    /// The network's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an already-constructed entity (or a clone of one already living in
    /// another network — see [`Entity`]'s identity note), establishing its
    /// self-equality edge. Returns the entity's id.
    pub fn add_entity(&mut self, entity: Entity) -> QrResult<EntityId> {
        let id = entity.id();
        let eq = self.equality_constraint_for(entity.classes())?;
        self.name_index
            .entry(entity.name().to_string())
            .or_insert(id);
        self.entities.insert(id, entity);
        self.edges.entry((id, id)).or_insert(eq);
        Ok(id)
    }

    /// Convenience wrapper: build and add a new entity in one call.
    pub fn new_entity(
        &mut self,
        name: impl Into<String>,
        classes: impl IntoIterator<Item = impl Into<String>>,
    ) -> QrResult<EntityId> {
        self.add_entity(Entity::new(name, classes))
    }

    /// Convenience wrapper: build and add a new entity whose name is drawn
    /// from `gen` rather than given explicitly.
    pub fn new_entity_unnamed(
        &mut self,
        classes: impl IntoIterator<Item = impl Into<String>>,
        gen: &mut NameGenerator,
        prefix: &str,
    ) -> QrResult<EntityId> {
        self.add_entity(Entity::new_unnamed(classes, gen, prefix))
    }

    fn equality_constraint_for(&self, classes: &[String]) -> QrResult<RelationSet> {
        let mut eq = self.algebra.no_elements();
        for class in classes {
            eq = eq.union(&self.algebra.equality_for(class)?)?;
        }
        Ok(eq)
    }

    /// Entities in insertion order (spec §5: "iteration order over entities
    /// ... is insertion order and is part of the public contract").
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Look up an entity by name. If more than one entity shares a name, the
    /// first one added is returned (spec §4.3).
    pub fn get_entity_by_name(&self, name: &str) -> QrResult<EntityId> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| QrError::NoSuchEntity {
                name: name.to_string(),
            })
    }

    /// The constraint currently labeling `(u, v)`, if any edge exists.
    pub fn constraint(&self, u: EntityId, v: EntityId) -> Option<&RelationSet> {
        self.edges.get(&(u, v))
    }

    /// Remove the edge between `u` and `v` in both directions.
    pub fn remove_constraint(&mut self, u: EntityId, v: EntityId) {
        self.edges.remove(&(u, v));
        self.edges.remove(&(v, u));
    }

    /// Set `c(u,v) := parse(label)` and `c(v,u) := converse(label)`, ensuring
    /// self-equality edges for both endpoints first. `label` of `None` means
    /// the supremum (fully unconstrained). Overrides any prior constraint on
    /// `(u,v)` (spec §4.4).
    pub fn add_constraint(
        &mut self,
        u: EntityId,
        v: EntityId,
        label: Option<&str>,
    ) -> QrResult<()> {
        self.reassert_self_equality(u)?;
        self.reassert_self_equality(v)?;
        let rs = match label {
            Some(s) => self.algebra.parse_relset(s)?,
            None => self.algebra.all_elements(),
        };
        self.remove_constraint(u, v);
        self.set_constraint(u, v, rs)
    }

    fn reassert_self_equality(&mut self, id: EntityId) -> QrResult<()> {
        if !self.edges.contains_key(&(id, id)) {
            if let Some(entity) = self.entities.get(&id) {
                let eq = self.equality_constraint_for(entity.classes())?;
                self.edges.insert((id, id), eq);
            }
        }
        Ok(())
    }

    /// Replace the edge between `u` and `v` (and its converse) in place.
    /// Assumes the pair is already tracked as entities of this network.
    pub fn set_constraint(&mut self, u: EntityId, v: EntityId, rs: RelationSet) -> QrResult<()> {
        let converse = self.algebra.converse(&rs)?;
        self.edges.insert((u, v), rs);
        self.edges.insert((v, u), converse);
        Ok(())
    }

    /// For every ordered pair `(u,v)` with `u != v` and no existing edge, add
    /// the supremum constraint (and its converse). Called automatically by
    /// [`Network::propagate`].
    pub fn ensure_total(&mut self) -> QrResult<()> {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for &u in &ids {
            for &v in &ids {
                if u != v && !self.edges.contains_key(&(u, v)) {
                    self.add_constraint(u, v, None)?;
                }
            }
        }
        Ok(())
    }

    /// True iff every edge's RelationSet names exactly one relation.
    pub fn has_only_singleton_constraints(&self) -> bool {
        self.edges.values().all(|rs| rs.is_singleton())
    }

    /// Deep-copy nodes and edges; reuse the [`Algebra`] by shared reference
    /// (spec §5: "mostly-deep copy"). Entity identities are preserved by the
    /// clone, so a `mostly_copy` can still be matched by [`Network::union`].
    pub fn mostly_copy(&self) -> Network {
        Network {
            algebra: self.algebra.clone(),
            name: self.name.clone(),
            entities: self.entities.clone(),
            name_index: self.name_index.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Path-consistency fixed-point propagation (spec §4.4).
    ///
    /// Returns `Ok(true)` if the network converges to a consistent,
    /// path-consistent state; `Ok(false)` if an empty composition is
    /// produced anywhere, in which case the network's edges are left exactly
    /// as they were before this call. `Err` is reserved for genuine misuse
    /// (e.g. mixing RelationSets from a different algebra), which should not
    /// occur through this type's own API.
    pub fn propagate(&mut self) -> QrResult<bool> {
        let snapshot = self.edges.clone();
        match self.propagate_to_fixed_point() {
            Ok(()) => Ok(true),
            Err(QrError::Inconsistent) => {
                self.edges = snapshot;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs the path-consistency fixed point, returning `Err(QrError::Inconsistent)`
    /// as soon as an empty composition is found. [`Network::propagate`] is the
    /// public entry point and is the only place this error variant is caught.
    fn propagate_to_fixed_point(&mut self) -> QrResult<()> {
        self.ensure_total()?;

        let order: Vec<EntityId> = self.entities.keys().copied().collect();
        let mut loop_count = 0usize;
        loop {
            loop_count += 1;
            let mut changed = false;
            for &u in &order {
                for &v in &order {
                    let mut p = self.algebra.all_elements();
                    for &w in &order {
                        let c_uw = self.edges.get(&(u, w)).expect("totality established above");
                        let c_wv = self.edges.get(&(w, v)).expect("totality established above");
                        let comp = self.algebra.compose(c_uw, c_wv)?;
                        p = p.intersection(&comp)?;
                    }
                    if p.is_empty() {
                        trace!("propagation found empty composition at ({:?},{:?})", u, v);
                        return Err(QrError::Inconsistent);
                    }
                    let prior = self.edges.get(&(u, v)).expect("totality established above");
                    if &p != prior {
                        changed = true;
                    }
                    self.edges.insert((u, v), p);
                }
            }
            if !changed {
                break;
            }
        }
        debug!(
            "network '{}' path-consistent after {} iterations",
            self.name, loop_count
        );

        for &v in &order {
            let self_edge = self.edges.get(&(v, v)).expect("self edge always present");
            let classes = domain_classes(&self.algebra, self_edge);
            if let Some(entity) = self.entities.get_mut(&v) {
                entity.set_classes(classes);
            }
        }
        Ok(())
    }

    /// Union of two networks: the node set is the union of both inputs'
    /// nodes (matched by [`EntityId`] identity, not name), and the edge set
    /// is the union of both inputs' edges. When both networks constrain the
    /// same pair, `self`'s (the receiver/first operand's) edge wins — spec
    /// §9 open question (b), pinned this way rather than the source's literal
    /// last-applied-wins reading; see DESIGN.md.
    pub fn union(&self, other: &Network, name: impl Into<String>) -> QrResult<Network> {
        if !self.algebra.ptr_eq(&other.algebra) {
            return Err(QrError::AlgebraMismatch);
        }
        let mut entities = other.entities.clone();
        for (id, entity) in &self.entities {
            entities.insert(*id, entity.clone());
        }
        let mut name_index = HashMap::new();
        for (id, entity) in &entities {
            name_index.entry(entity.name().to_string()).or_insert(*id);
        }
        let mut edges = other.edges.clone();
        for (pair, rs) in &self.edges {
            edges.insert(*pair, rs.clone());
        }
        Ok(Network {
            algebra: self.algebra.clone(),
            name: name.into(),
            entities,
            name_index,
            edges,
        })
    }

    /// Pick the first pair (in insertion order over entities, `u` before `v`)
    /// whose constraint has more than one relation, and return one
    /// mostly-deep copy per relation in that set, each with the pair fixed to
    /// that singleton. If the network is already fully singleton, returns a
    /// single copy of `self` unchanged.
    pub fn expand(&self) -> QrResult<Vec<Network>> {
        let order: Vec<EntityId> = self.entities.keys().copied().collect();
        for i in 0..order.len() {
            for j in (i + 1)..order.len() {
                let (u, v) = (order[i], order[j]);
                if let Some(rs) = self.edges.get(&(u, v)) {
                    if rs.len() > 1 {
                        let mut out = Vec::with_capacity(rs.len());
                        for sym in rs.members() {
                            let mut copy = self.mostly_copy();
                            let singleton = self.algebra.relset([sym])?;
                            copy.set_constraint(u, v, singleton)?;
                            out.push(copy);
                        }
                        return Ok(out);
                    }
                }
            }
        }
        Ok(vec![self.mostly_copy()])
    }

    /// Iterated expansion until every produced network is fully singleton.
    /// Implemented as a work-list (bounded by the product of the edges'
    /// set sizes), not recursion, per spec §4.4.
    pub fn expand_all(&self) -> QrResult<Vec<Network>> {
        let mut worklist = vec![self.mostly_copy()];
        let mut done = Vec::new();
        while let Some(net) = worklist.pop() {
            if net.has_only_singleton_constraints() {
                done.push(net);
            } else {
                worklist.extend(net.expand()?);
            }
        }
        Ok(done)
    }

    /// `expand_all()` filtered by a successful `propagate()`: every surviving
    /// network is a consistent singleton labelling of the original.
    pub fn all_realizations(&self) -> QrResult<Vec<Network>> {
        let mut out = Vec::new();
        for mut net in self.expand_all()? {
            if net.propagate()? {
                out.push(net);
            }
        }
        Ok(out)
    }
}

/// Union of the domain classes of every relation in `rs` (used to narrow an
/// entity's class tags from its self-edge after propagation, spec §4.4).
fn domain_classes(algebra: &Algebra, rs: &RelationSet) -> Vec<String> {
    let mut classes = Vec::new();
    for sym in rs.members() {
        if let Ok(info) = algebra.relation_info(sym) {
            for c in &info.domain {
                if !classes.contains(c) {
                    classes.push(c.clone());
                }
            }
        }
    }
    classes
}
