//! Point algebras: the base algebras the §4.5 derivation machinery builds
//! interval algebras from (spec §4.5, GLOSSARY "point algebra").
//!
//! Three flavors are shipped, matching the branching-time variants named in
//! spec §6: a fully linear point algebra (`<`, `=`, `>`), and two
//! tree-shaped variants that add a single incomparability relation —
//! `r~` for a linear past with a branching future, `l~` for a branching
//! past with a linear future. The composition tables below are derived
//! directly from that tree semantics (ancestors of a node form a chain;
//! descendants may branch), not transcribed from a source table, since none
//! was present in the retrieved corpus — see DESIGN.md.

use crate::algebra::{Algebra, RelationSpec};
use crate::error::QrResult;

fn point_spec(symbol: &str, name: &str, converse: &str) -> RelationSpec {
    RelationSpec {
        symbol: symbol.to_string(),
        name: name.to_string(),
        converse: converse.to_string(),
        domain: vec!["Point".to_string()],
        range: vec!["Point".to_string()],
        reflexive: symbol == "=",
        symmetric: symbol == "=" || symbol == "r~" || symbol == "l~",
        transitive: symbol == "<" || symbol == "=" || symbol == ">",
    }
}

/// The fully linear point algebra: `<`, `=`, `>`. The basis for Allen's
/// 13-relation interval algebra (spec §8, "derivation round-trip").
pub fn linear_point() -> Algebra {
    let specs = vec![
        point_spec("<", "before", ">"),
        point_spec("=", "equals", "="),
        point_spec(">", "after", "<"),
    ];
    Algebra::build("LinearPointAlgebra", "Points on a single linear timeline", specs, |r, s| {
        linear_trans_table(r, s).into_iter().map(str::to_string).collect()
    })
    .expect("built-in linear point algebra must be well-formed")
}

fn linear_trans_table(r: &str, s: &str) -> Vec<&'static str> {
    match (r, s) {
        ("<", "<") => vec!["<"],
        ("<", "=") => vec!["<"],
        ("<", ">") => vec!["<", "=", ">"],
        ("=", "<") => vec!["<"],
        ("=", "=") => vec!["="],
        ("=", ">") => vec![">"],
        (">", "<") => vec!["<", "=", ">"],
        (">", "=") => vec![">"],
        (">", ">") => vec![">"],
        _ => unreachable!("linear point algebra has only <, =, >"),
    }
}

/// The right-branching point algebra: a linear past, a branching future.
/// `r~` relates two points that share a common ancestor but lie on
/// different branches (spec §6, "Right-Branching Point").
pub fn right_branching_point() -> Algebra {
    let specs = vec![
        point_spec("<", "before", ">"),
        point_spec("=", "equals", "="),
        point_spec(">", "after", "<"),
        point_spec("r~", "right-incomparable", "r~"),
    ];
    Algebra::build(
        "RightBranchingPointAlgebra",
        "Points with a linear past and a branching future",
        specs,
        |r, s| right_branching_trans_table(r, s).into_iter().map(str::to_string).collect(),
    )
    .expect("built-in right-branching point algebra must be well-formed")
}

fn right_branching_trans_table(r: &str, s: &str) -> Vec<&'static str> {
    match (r, s) {
        ("<", "<") => vec!["<"],
        ("<", "=") => vec!["<"],
        ("<", ">") => vec!["<", "=", ">"],
        ("<", "r~") => vec!["<", "=", "r~"],
        ("=", "<") => vec!["<"],
        ("=", "=") => vec!["="],
        ("=", ">") => vec![">"],
        ("=", "r~") => vec!["r~"],
        (">", "<") => vec!["<", "=", ">", "r~"],
        (">", "=") => vec![">"],
        (">", ">") => vec![">"],
        (">", "r~") => vec!["r~"],
        ("r~", "<") => vec!["r~"],
        ("r~", "=") => vec!["r~"],
        ("r~", ">") => vec![">", "=", "r~"],
        ("r~", "r~") => vec!["<", "=", ">", "r~"],
        _ => unreachable!("right-branching point algebra has only <, =, >, r~"),
    }
}

/// The left-branching point algebra: a branching past, a linear future.
/// The mirror image of [`right_branching_point`]: `l~` plays the role `r~`
/// plays there, with `<`/`>` swapped throughout (spec §6, "Left-Branching
/// Point").
pub fn left_branching_point() -> Algebra {
    let specs = vec![
        point_spec("<", "before", ">"),
        point_spec("=", "equals", "="),
        point_spec(">", "after", "<"),
        point_spec("l~", "left-incomparable", "l~"),
    ];
    Algebra::build(
        "LeftBranchingPointAlgebra",
        "Points with a branching past and a linear future",
        specs,
        |r, s| left_branching_trans_table(r, s).into_iter().map(str::to_string).collect(),
    )
    .expect("built-in left-branching point algebra must be well-formed")
}

fn left_branching_trans_table(r: &str, s: &str) -> Vec<&'static str> {
    match (r, s) {
        ("<", "<") => vec!["<"],
        ("<", "=") => vec!["<"],
        ("<", ">") => vec!["<", "=", ">", "l~"],
        ("<", "l~") => vec!["l~"],
        ("=", "<") => vec!["<"],
        ("=", "=") => vec!["="],
        ("=", ">") => vec![">"],
        ("=", "l~") => vec!["l~"],
        (">", "<") => vec!["<", "=", ">"],
        (">", "=") => vec![">"],
        (">", ">") => vec![">"],
        (">", "l~") => vec![">", "=", "l~"],
        ("l~", "<") => vec!["<", "=", "l~"],
        ("l~", "=") => vec!["l~"],
        ("l~", ">") => vec!["l~"],
        ("l~", "l~") => vec!["<", "=", ">", "l~"],
        _ => unreachable!("left-branching point algebra has only <, =, >, l~"),
    }
}

/// Build all three point algebras, erroring out only if a structural
/// invariant is violated (this should never happen for these hand-authored
/// tables — a failure here indicates a bug in this module, not bad input).
pub fn all_point_algebras() -> QrResult<Vec<Algebra>> {
    Ok(vec![linear_point(), right_branching_point(), left_branching_point()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_point_composition_identity_holds() {
        let alg = linear_point();
        assert!(alg.check_composition_identity().passed());
    }

    #[test]
    fn linear_point_associativity_holds() {
        let alg = linear_point();
        assert!(alg.check_associativity().passed());
    }

    #[test]
    fn right_branching_composition_identity_holds() {
        let alg = right_branching_point();
        assert!(alg.check_composition_identity().passed());
    }

    #[test]
    fn left_branching_composition_identity_holds() {
        let alg = left_branching_point();
        assert!(alg.check_composition_identity().passed());
    }

    #[test]
    fn right_and_left_branching_are_mirror_images() {
        let right = right_branching_point();
        let left = left_branching_point();
        // < and > swap roles, r~ and l~ play the same structural role.
        let rb = right.relset(["<", ">"]).unwrap();
        let lb = left.relset([">", "<"]).unwrap();
        assert_eq!(rb.len(), lb.len());
    }

    #[test]
    fn equality_relation_is_reflexive_symmetric_transitive() {
        let alg = linear_point();
        let info = alg.relation_info("=").unwrap();
        assert!(info.is_equality());
    }
}
