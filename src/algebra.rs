//! Algebra — the relation vocabulary, converse map, and composition table.

use crate::error::{QrError, QrResult};
use crate::relation_set::RelationSet;
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::HashSet;
use std::sync::Arc;

fn same_class_set(a: &[String], b: &[String]) -> bool {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

/// Per-relation metadata, fixed once the algebra is built.
#[derive(Debug, Clone)]
pub struct RelationInfo {
    /// Short symbol, unique within the algebra (e.g. `"B"`, `"NTPP"`).
    pub symbol: String,
    /// Human-readable name (e.g. `"before"`).
    pub name: String,
    /// Index of this relation's converse within the same algebra.
    pub converse: usize,
    /// Ontological classes this relation's first argument may belong to.
    pub domain: Vec<String>,
    /// Ontological classes this relation's second argument may belong to.
    pub range: Vec<String>,
    /// Whether `x r x` holds for every entity the relation applies to.
    pub reflexive: bool,
    /// Whether `x r y` implies `y r x`.
    pub symmetric: bool,
    /// Whether `x r y` and `y r z` imply `x r z`.
    pub transitive: bool,
}

impl RelationInfo {
    /// True iff this relation is reflexive, symmetric, and transitive —
    /// the definition of an equality relation (spec §3/GLOSSARY).
    pub fn is_equality(&self) -> bool {
        self.reflexive && self.symmetric && self.transitive
    }
}

/// The immutable data shared by an [`Algebra`] and every [`RelationSet`] it produces.
pub struct AlgebraData {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) relations: Vec<RelationInfo>,
    symbol_index: IndexMap<String, usize>,
    /// `composition[r][s]` is the bitset of `T[r][s]` from spec §3.
    composition: Vec<Vec<u32>>,
    /// Per-ontological-class bitset of that class's equality relation(s).
    equality_by_class: IndexMap<String, u32>,
}

impl AlgebraData {
    pub(crate) fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbol_index.get(symbol).copied()
    }

    fn supremum_bits(&self) -> u32 {
        if self.relations.len() == 32 {
            u32::MAX
        } else {
            (1u32 << self.relations.len()) - 1
        }
    }
}

/// A finite, ordered relation vocabulary with a converse map and composition table.
///
/// Cheap to clone: internally an `Arc<AlgebraData>`, so it may be shared by value
/// or by shared reference across multiple [`crate::network::Network`]s (spec §5).
#[derive(Clone)]
pub struct Algebra(Arc<AlgebraData>);

/// Builder input for [`Algebra::build`]: one relation's metadata plus its row of
/// the composition table, expressed in terms of relation symbols (not yet resolved
/// to indices). Used by both the §6 loader and the §4.5 derivation machinery.
pub struct RelationSpec {
    pub symbol: String,
    pub name: String,
    pub converse: String,
    pub domain: Vec<String>,
    pub range: Vec<String>,
    pub reflexive: bool,
    pub symmetric: bool,
    pub transitive: bool,
}

impl Algebra {
    /// Build an algebra from relation specs and a composition table keyed by symbol pairs.
    ///
    /// This is the single construction path used by the built-in algebras
    /// (`algebras::point`, `algebras::rcc8`), by the §4.5 derivation machinery, and
    /// by `loader::Algebra::from_description`. It performs the structural checks of
    /// spec §4.2 ("Failure semantics").
    pub fn build(
        name: impl Into<String>,
        description: impl Into<String>,
        specs: Vec<RelationSpec>,
        trans_table: impl Fn(&str, &str) -> Vec<String>,
    ) -> QrResult<Algebra> {
        let name = name.into();
        let description = description.into();
        if specs.is_empty() {
            return Err(QrError::MalformedAlgebra {
                reason: "algebra must declare at least one relation".to_string(),
            });
        }

        let mut symbol_index = IndexMap::new();
        for (i, s) in specs.iter().enumerate() {
            if symbol_index.insert(s.symbol.clone(), i).is_some() {
                return Err(QrError::MalformedAlgebra {
                    reason: format!("duplicate relation symbol: {}", s.symbol),
                });
            }
        }

        let mut relations = Vec::with_capacity(specs.len());
        for s in &specs {
            if s.domain.is_empty() || s.range.is_empty() {
                return Err(QrError::MalformedAlgebra {
                    reason: format!("relation {} has an empty domain or range", s.symbol),
                });
            }
            let converse = *symbol_index.get(&s.converse).ok_or_else(|| {
                QrError::MalformedAlgebra {
                    reason: format!(
                        "relation {} has converse {} which is not a relation symbol",
                        s.symbol, s.converse
                    ),
                }
            })?;
            relations.push(RelationInfo {
                symbol: s.symbol.clone(),
                name: s.name.clone(),
                converse,
                domain: s.domain.clone(),
                range: s.range.clone(),
                reflexive: s.reflexive,
                symmetric: s.symmetric,
                transitive: s.transitive,
            });
        }

        // Converse involution + domain/range transpose check.
        for (i, r) in relations.iter().enumerate() {
            let c = &relations[r.converse];
            if c.converse != i {
                return Err(QrError::MalformedAlgebra {
                    reason: format!(
                        "converse is not involutive for relation {}",
                        r.symbol
                    ),
                });
            }
            if !same_class_set(&c.domain, &r.range) || !same_class_set(&c.range, &r.domain) {
                return Err(QrError::MalformedAlgebra {
                    reason: format!(
                        "converse of {} does not transpose domain/range",
                        r.symbol
                    ),
                });
            }
        }

        let n = relations.len();
        let mut composition = vec![vec![0u32; n]; n];
        for (i, ri) in relations.iter().enumerate() {
            for (j, rj) in relations.iter().enumerate() {
                let entries = trans_table(&ri.symbol, &rj.symbol);
                let mut bits = 0u32;
                for sym in entries {
                    let idx = *symbol_index.get(&sym).ok_or_else(|| QrError::MalformedAlgebra {
                        reason: format!(
                            "TransTable[{}][{}] references unknown relation {}",
                            ri.symbol, rj.symbol, sym
                        ),
                    })?;
                    bits |= 1 << idx;
                }
                composition[i][j] = bits;
            }
        }

        let mut equality_by_class: IndexMap<String, u32> = IndexMap::new();
        for (i, r) in relations.iter().enumerate() {
            if r.reflexive && r.symmetric && r.transitive && r.domain.len() == 1 {
                let class = r.domain[0].clone();
                *equality_by_class.entry(class).or_insert(0) |= 1 << i;
            }
        }

        debug!("built algebra '{}' with {} relations", name, n);

        Ok(Algebra(Arc::new(AlgebraData {
            name,
            description,
            relations,
            symbol_index,
            composition,
            equality_by_class,
        })))
    }

    /// True iff `self` and `other` are the same algebra instance (used to
    /// gate operations that require a shared relation vocabulary, e.g.
    /// [`crate::network::Network::union`]).
    pub fn ptr_eq(&self, other: &Algebra) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The algebra's name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The algebra's free-text description.
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// Ordered list of relation symbols.
    pub fn relations(&self) -> Vec<&str> {
        self.0.relations.iter().map(|r| r.symbol.as_str()).collect()
    }

    /// Metadata for a single relation, by symbol.
    pub fn relation_info(&self, symbol: &str) -> QrResult<&RelationInfo> {
        let idx = self.0.index_of(symbol).ok_or_else(|| QrError::UnknownRelation {
            symbol: symbol.to_string(),
        })?;
        Ok(&self.0.relations[idx])
    }

    /// The supremum RelationSet: "unknown/unconstrained", all relations.
    pub fn all_elements(&self) -> RelationSet {
        RelationSet::from_bits(self.0.supremum_bits(), self.0.clone())
    }

    /// The infimum RelationSet: the empty set, "contradiction".
    pub fn no_elements(&self) -> RelationSet {
        RelationSet::from_bits(0, self.0.clone())
    }

    /// Build a RelationSet from relation symbols.
    pub fn relset<I, S>(&self, relations: I) -> QrResult<RelationSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bits = 0u32;
        for sym in relations {
            let sym = sym.as_ref();
            let idx = self.0.index_of(sym).ok_or_else(|| QrError::UnknownRelation {
                symbol: sym.to_string(),
            })?;
            bits |= 1 << idx;
        }
        Ok(RelationSet::from_bits(bits, self.0.clone()))
    }

    /// Parse a `|`-delimited relation-set string, e.g. `"B|M|O"`. The empty string
    /// parses to the empty set (spec §4.1, grounded in the original's
    /// `string_to_relset`/`relset('')` special case).
    pub fn parse_relset(&self, s: &str) -> QrResult<RelationSet> {
        if s.is_empty() {
            return self.relset(Vec::<&str>::new());
        }
        self.relset(s.split('|'))
    }

    /// Converse of a single relation, by symbol.
    pub fn converse_of(&self, symbol: &str) -> QrResult<&str> {
        let info = self.relation_info(symbol)?;
        Ok(self.0.relations[info.converse].symbol.as_str())
    }

    /// Converse of a RelationSet: bit-mapped through the converse permutation.
    pub fn converse(&self, set: &RelationSet) -> QrResult<RelationSet> {
        if !Arc::ptr_eq(&self.0, &set.algebra) {
            return Err(QrError::AlgebraMismatch);
        }
        let mut bits = 0u32;
        for (i, r) in self.0.relations.iter().enumerate() {
            if set.bits() & (1 << i) != 0 {
                bits |= 1 << r.converse;
            }
        }
        Ok(RelationSet::from_bits(bits, self.0.clone()))
    }

    /// Composition `A ; B` = the union, over all `r in A, s in B`, of `T[r][s]`.
    pub fn compose(&self, a: &RelationSet, b: &RelationSet) -> QrResult<RelationSet> {
        if !Arc::ptr_eq(&self.0, &a.algebra) || !Arc::ptr_eq(&self.0, &b.algebra) {
            return Err(QrError::AlgebraMismatch);
        }
        let n = self.0.relations.len();
        let mut bits = 0u32;
        for i in 0..n {
            if a.bits() & (1 << i) == 0 {
                continue;
            }
            for j in 0..n {
                if b.bits() & (1 << j) == 0 {
                    continue;
                }
                bits |= self.0.composition[i][j];
            }
        }
        trace!("compose({}, {}) -> bits {:#x}", a, b, bits);
        Ok(RelationSet::from_bits(bits, self.0.clone()))
    }

    /// The RelationSet of equality relations whose domain is exactly `{class}`.
    pub fn equality_for(&self, class: &str) -> QrResult<RelationSet> {
        let bits = *self.0.equality_by_class.get(class).ok_or_else(|| QrError::UnknownClass {
            tag: class.to_string(),
        })?;
        Ok(RelationSet::from_bits(bits, self.0.clone()))
    }

    /// All of the algebra's equality relations, unioned.
    pub fn all_equality_relations(&self) -> RelationSet {
        let bits = self
            .0
            .equality_by_class
            .values()
            .fold(0u32, |acc, b| acc | b);
        RelationSet::from_bits(bits, self.0.clone())
    }

    /// Verdict of [`Algebra::check_composition_identity`] / [`Algebra::check_associativity`].
    pub fn check_composition_identity(&self) -> AlgebraCheck {
        let mut counter_examples = Vec::new();
        for r in self.relations() {
            for s in self.relations() {
                // Unwraps below are safe: r, s come from self.relations().
                let r_rs = self.relset([r]).unwrap();
                let s_rs = self.relset([s]).unwrap();
                let lhs = self.compose(&r_rs, &s_rs).unwrap();
                let rhs = self
                    .converse(
                        &self
                            .compose(&self.converse(&s_rs).unwrap(), &self.converse(&r_rs).unwrap())
                            .unwrap(),
                    )
                    .unwrap();
                if lhs != rhs {
                    counter_examples.push(format!(
                        "compose({r},{s}) = {lhs} but converse(compose(converse({s}),converse({r}))) = {rhs}"
                    ));
                }
            }
        }
        AlgebraCheck { counter_examples }
    }

    /// Checks associativity over every singleton triple whose domain/range chain.
    pub fn check_associativity(&self) -> AlgebraCheck {
        let mut counter_examples = Vec::new();
        for a in &self.0.relations {
            for b in &self.0.relations {
                if a.range.iter().all(|c| !b.domain.contains(c)) {
                    continue;
                }
                for c in &self.0.relations {
                    if b.range.iter().all(|d| !c.domain.contains(d)) {
                        continue;
                    }
                    let a_rs = self.relset([a.symbol.as_str()]).unwrap();
                    let b_rs = self.relset([b.symbol.as_str()]).unwrap();
                    let c_rs = self.relset([c.symbol.as_str()]).unwrap();
                    let ab = self.compose(&a_rs, &b_rs).unwrap();
                    let ab_c = self.compose(&ab, &c_rs).unwrap();
                    let bc = self.compose(&b_rs, &c_rs).unwrap();
                    let a_bc = self.compose(&a_rs, &bc).unwrap();
                    if ab_c != a_bc {
                        counter_examples.push(format!(
                            "(({}*{})*{}) = {} but ({}*({}*{})) = {}",
                            a.symbol, b.symbol, c.symbol, ab_c, a.symbol, b.symbol, c.symbol, a_bc
                        ));
                    }
                }
            }
        }
        AlgebraCheck { counter_examples }
    }
}

/// Result of an algebraic self-check: a list of counter-examples (empty = pass).
#[derive(Debug, Default)]
pub struct AlgebraCheck {
    pub counter_examples: Vec<String>,
}

impl AlgebraCheck {
    /// True iff no counter-examples were found.
    pub fn passed(&self) -> bool {
        self.counter_examples.is_empty()
    }
}
