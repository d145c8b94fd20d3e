//! RelationSet — an immutable, compact subset of an algebra's relation vocabulary.
//!
//! A RelationSet is interpreted disjunctively: `{B, M}` means "before OR meets".
//! Every shipped algebra has at most 32 relations, so a single `u32` is the bitset
//! representation (see spec §3: "n <= ~32 for all shipped algebras, so a single
//! machine word suffices as a bitset").

use crate::algebra::AlgebraData;
use crate::error::{QrError, QrResult};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Inline storage for a relation set's members: every shipped algebra has at
/// most 30 relations and most constraints name only a handful, so this
/// avoids a heap allocation for the common case (spec §3, "n <= ~32").
pub type Members<'a> = SmallVec<[&'a str; 8]>;

/// A subset of an algebra's relations.
///
/// Two RelationSets only interoperate if they share the same owning algebra,
/// which is enforced by comparing the `Arc` pointer of the owning [`AlgebraData`]
/// (see spec §4.1: "operations between sets from different algebras are rejected").
#[derive(Clone)]
pub struct RelationSet {
    bits: u32,
    pub(crate) algebra: Arc<AlgebraData>,
}

impl RelationSet {
    pub(crate) fn from_bits(bits: u32, algebra: Arc<AlgebraData>) -> Self {
        RelationSet { bits, algebra }
    }

    pub(crate) fn bits(&self) -> u32 {
        self.bits
    }

    fn same_algebra(&self, other: &RelationSet) -> bool {
        Arc::ptr_eq(&self.algebra, &other.algebra)
    }

    /// The empty RelationSet over the same algebra as `self` (contradiction).
    pub fn empty_like(&self) -> RelationSet {
        RelationSet::from_bits(0, self.algebra.clone())
    }

    /// True iff this set contains no relations.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True iff this set is nonempty ("any" in spec terms).
    pub fn any(&self) -> bool {
        self.bits != 0
    }

    /// Number of relations in this set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// True iff this set names exactly one relation.
    pub fn is_singleton(&self) -> bool {
        self.bits != 0 && (self.bits & (self.bits - 1)) == 0
    }

    /// True iff `symbol` is a member of this set.
    pub fn contains(&self, symbol: &str) -> bool {
        match self.algebra.index_of(symbol) {
            Some(idx) => self.bits & (1 << idx) != 0,
            None => false,
        }
    }

    /// Symbols of the relations in this set, in the algebra's definition order.
    pub fn members(&self) -> Members<'_> {
        self.algebra
            .relations
            .iter()
            .enumerate()
            .filter(|(i, _)| self.bits & (1 << i) != 0)
            .map(|(_, r)| r.symbol.as_str())
            .collect()
    }

    /// Union of two RelationSets (logical "or").
    pub fn union(&self, other: &RelationSet) -> QrResult<RelationSet> {
        if !self.same_algebra(other) {
            return Err(QrError::AlgebraMismatch);
        }
        Ok(RelationSet::from_bits(
            self.bits | other.bits,
            self.algebra.clone(),
        ))
    }

    /// Intersection of two RelationSets — the "+" of spec §3/§4.4's constraint algebra.
    pub fn intersection(&self, other: &RelationSet) -> QrResult<RelationSet> {
        if !self.same_algebra(other) {
            return Err(QrError::AlgebraMismatch);
        }
        Ok(RelationSet::from_bits(
            self.bits & other.bits,
            self.algebra.clone(),
        ))
    }

    /// True iff `self` is a subset of `other` (used by the path-consistency property check).
    pub fn is_subset_of(&self, other: &RelationSet) -> QrResult<bool> {
        if !self.same_algebra(other) {
            return Err(QrError::AlgebraMismatch);
        }
        Ok(self.bits & !other.bits == 0)
    }
}

impl PartialEq for RelationSet {
    fn eq(&self, other: &Self) -> bool {
        self.same_algebra(other) && self.bits == other.bits
    }
}

impl Eq for RelationSet {}

impl fmt::Display for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.members().join("|"))
    }
}

impl fmt::Debug for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelationSet({})", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::algebras::point::linear_point;

    #[test]
    fn union_and_intersection() {
        let alg = linear_point();
        let lt = alg.relset(["<"]).unwrap();
        let eq = alg.relset(["="]).unwrap();
        let le = lt.union(&eq).unwrap();
        assert_eq!(le.len(), 2);
        assert!(le.contains("<"));
        assert!(le.contains("="));
        let back = le.intersection(&lt).unwrap();
        assert_eq!(back, lt);
    }

    #[test]
    fn parse_and_format_roundtrip() {
        let alg = linear_point();
        let rs = alg.parse_relset("<|=").unwrap();
        // Members come back in definition order, not input order.
        assert_eq!(rs.to_string(), "<|=");
    }

    #[test]
    fn empty_string_parses_to_empty_set() {
        let alg = linear_point();
        let rs = alg.parse_relset("").unwrap();
        assert!(rs.is_empty());
        assert_eq!(rs.to_string(), "");
    }

    #[test]
    fn unknown_relation_fails() {
        let alg = linear_point();
        assert!(alg.relset(["Z"]).is_err());
    }

    #[test]
    fn mismatched_algebra_rejected() {
        let a = linear_point();
        let b = linear_point();
        let rs_a = a.relset(["<"]).unwrap();
        let rs_b = b.relset(["<"]).unwrap();
        assert!(rs_a.union(&rs_b).is_err());
    }
}
