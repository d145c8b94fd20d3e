//! Shipped algebras: the point algebras built by hand, the four interval
//! algebras derived from them, and the hand-supplied RCC-8 region calculus
//! (spec §6, "Shipped algebras").

pub mod point;
pub mod rcc8;

use crate::algebra::Algebra;
use crate::derive::derive_algebra;
use crate::error::QrResult;

/// Allen's interval algebra: 13 relations, derived from [`point::linear_point`]
/// with `<` as the properness relation (spec §8, "derivation round-trip").
pub fn linear_interval() -> QrResult<Algebra> {
    derive_algebra(
        &point::linear_point(),
        "<",
        "LinearIntervalAlgebra",
        "Allen's interval algebra over proper intervals",
    )
}

/// The 18-relation extension of Allen's algebra that also admits points
/// (intervals whose start equals their end), derived from
/// [`point::linear_point`] with `<|=` as the properness relation.
pub fn extended_linear_interval() -> QrResult<Algebra> {
    derive_algebra(
        &point::linear_point(),
        "<|=",
        "ExtendedLinearIntervalAlgebra",
        "Allen's interval algebra extended to include points",
    )
}

/// The 24-relation right-branching interval algebra, derived from
/// [`point::right_branching_point`].
pub fn right_branching_interval() -> QrResult<Algebra> {
    derive_algebra(
        &point::right_branching_point(),
        "<|=",
        "RightBranchingIntervalAlgebra",
        "Interval algebra over a linear past and branching future",
    )
}

/// The 24-relation left-branching interval algebra, derived from
/// [`point::left_branching_point`].
pub fn left_branching_interval() -> QrResult<Algebra> {
    derive_algebra(
        &point::left_branching_point(),
        "<|=",
        "LeftBranchingIntervalAlgebra",
        "Interval algebra over a branching past and linear future",
    )
}

/// The RCC-8 region-connection calculus (spec §6).
pub fn rcc8() -> QrResult<Algebra> {
    rcc8::rcc8_algebra()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_branching_interval_has_twenty_four_relations() {
        let alg = right_branching_interval().unwrap();
        assert_eq!(alg.relations().len(), 24);
    }

    #[test]
    fn right_branching_interval_satisfies_composition_identity() {
        let alg = right_branching_interval().unwrap();
        assert!(alg.check_composition_identity().passed());
    }

    #[test]
    fn left_branching_interval_has_twenty_four_relations() {
        let alg = left_branching_interval().unwrap();
        assert_eq!(alg.relations().len(), 24);
    }

    #[test]
    fn left_branching_interval_satisfies_composition_identity() {
        let alg = left_branching_interval().unwrap();
        assert!(alg.check_composition_identity().passed());
    }
}
