//! Algebra derivation: constructs an interval algebra from an underlying
//! point algebra via the 4-point/6-point network method (spec §4.5).
//!
//! Grounded on `original_source/Source/qualreas.py`'s `FourPointNet`,
//! `signature_name_mapping`, and `generate_consistent_networks`; the
//! `SixPointNet`/composition-derivation half is new code (the original only
//! demonstrates signature generation), implemented the same way: build a
//! small point network, read off the singleton realizations, and map each
//! one back through the same signature table.

use crate::algebra::{Algebra, RelationSpec};
use crate::entity::EntityId;
use crate::error::{QrError, QrResult};
use crate::network::Network;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maps a 4-point network signature `"c13,c14,c23,c24"` to the interval
/// relation symbol it witnesses. Verbatim from the original's
/// `signature_name_mapping` (spec §4.5).
static SIGNATURE_NAME_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("<,<,<,<", "B"), (">,>,>,>", "BI"),
        (">,<,>,<", "D"), ("<,<,>,>", "DI"),
        ("=,<,>,=", "E"), ("=,=,=,=", "PE"),
        (">,<,>,=", "F"), ("<,<,>,=", "FI"),
        ("<,<,=,<", "M"), (">,=,>,>", "MI"),
        ("<,<,>,<", "O"), (">,<,>,>", "OI"),
        ("=,<,>,<", "S"), ("=,<,>,>", "SI"),
        (">,=,>,=", "PF"), ("<,<,=,=", "PFI"),
        ("=,<,=,<", "PS"), ("=,=,>,>", "PSI"),
        ("<,<,>,r~", "RO"), ("<,<,r~,r~", "RB"),
        ("=,<,>,r~", "RS"), (">,<,>,r~", "ROI"),
        (">,r~,>,r~", "RBI"), ("r~,r~,r~,r~", "R~"),
        ("l~,<,>,<", "LO"), ("l~,<,>,=", "LF"),
        ("l~,<,>,>", "LOI"), ("l~,l~,>,>", "LBI"),
        ("l~,<,l~,<", "LB"), ("l~,l~,l~,l~", "L~"),
    ])
});

/// Human-readable names for the derived interval relations. Exotic
/// branching-time symbols get a literal, descriptive gloss rather than a
/// traditional name (none is established in the literature).
fn human_name(symbol: &str) -> &'static str {
    match symbol {
        "B" => "before", "BI" => "after",
        "D" => "during", "DI" => "contains",
        "E" => "equals", "PE" => "point-equals",
        "F" => "finishes", "FI" => "finished-by",
        "M" => "meets", "MI" => "met-by",
        "O" => "overlaps", "OI" => "overlapped-by",
        "S" => "starts", "SI" => "started-by",
        "PF" => "point-finishes", "PFI" => "point-finished-by",
        "PS" => "point-starts", "PSI" => "point-started-by",
        "RO" => "right-overlaps", "RB" => "right-before",
        "RS" => "right-starts", "ROI" => "right-overlapped-by",
        "RBI" => "right-after", "R~" => "right-incomparable",
        "LO" => "left-overlaps", "LF" => "left-finishes",
        "LOI" => "left-overlapped-by", "LBI" => "left-after",
        "LB" => "left-before", "L~" => "left-incomparable",
        _ => "derived",
    }
}

/// One named interval relation's witnessing 4-point signature, plus the
/// ontological classes its two intervals may belong to.
#[derive(Debug, Clone)]
struct IntervalSignature {
    c13: String,
    c14: String,
    c23: String,
    c24: String,
    domain: Vec<String>,
    range: Vec<String>,
}

fn signature_key(c13: &str, c14: &str, c23: &str, c24: &str) -> String {
    format!("{c13},{c14},{c23},{c24}")
}

fn classes_from_point_edge(rs: &crate::relation_set::RelationSet) -> Vec<String> {
    let mut classes = Vec::new();
    if rs.contains("=") {
        classes.push("Point".to_string());
    }
    if rs.contains("<") {
        classes.push("ProperInterval".to_string());
    }
    classes
}

/// Build a 4-point network with points `s1 LT e1` and `s2 LT e2`, return
/// their entity ids in `(s1, e1, s2, e2)` order.
fn four_points(point_algebra: &Algebra, lt: &str) -> QrResult<(Network, EntityId, EntityId, EntityId, EntityId)> {
    let mut net = Network::new(point_algebra.clone(), "four-point");
    let s1 = net.new_entity("s1", ["Point"])?;
    let e1 = net.new_entity("e1", ["Point"])?;
    let s2 = net.new_entity("s2", ["Point"])?;
    let e2 = net.new_entity("e2", ["Point"])?;
    net.add_constraint(s1, e1, Some(lt))?;
    net.add_constraint(s2, e2, Some(lt))?;
    Ok((net, s1, e1, s2, e2))
}

/// Enumerate every consistent singleton assignment of the 4-point network's
/// off-diagonal constraints, keeping only those with a name in
/// [`SIGNATURE_NAME_MAPPING`]. This implements `generate_consistent_networks`
/// (spec §4.5).
fn four_point_signatures(point_algebra: &Algebra, lt: &str) -> QrResult<IndexMap<String, IntervalSignature>> {
    let mut out = IndexMap::new();
    let elements: Vec<&str> = point_algebra.relations();
    for &c13 in &elements {
        for &c23 in &elements {
            for &c14 in &elements {
                for &c24 in &elements {
                    let key = signature_key(c13, c14, c23, c24);
                    let Some(&name) = SIGNATURE_NAME_MAPPING.get(key.as_str()) else {
                        continue;
                    };
                    let (mut net, s1, e1, s2, e2) = four_points(point_algebra, lt)?;
                    net.add_constraint(s1, s2, Some(c13))?;
                    net.add_constraint(e1, s2, Some(c23))?;
                    net.add_constraint(s1, e2, Some(c14))?;
                    net.add_constraint(e1, e2, Some(c24))?;
                    if !net.propagate()? {
                        continue;
                    }
                    let domain = classes_from_point_edge(net.constraint(s1, e1).expect("edge set above"));
                    let range = classes_from_point_edge(net.constraint(s2, e2).expect("edge set above"));
                    out.entry(name.to_string()).or_insert(IntervalSignature {
                        c13: c13.to_string(),
                        c14: c14.to_string(),
                        c23: c23.to_string(),
                        c24: c24.to_string(),
                        domain,
                        range,
                    });
                }
            }
        }
    }
    Ok(out)
}

/// `R1 ; R2` via a 6-point network: fix the `(1,2)` cross constraints to
/// `R1`'s signature and the `(2,3)` cross constraints to `R2`'s, leave
/// `(1,3)` unconstrained, enumerate every consistent singleton realization,
/// and read off the `(1,3)` signature's relation name in each one (spec
/// §4.5, "SixPointNet").
fn derive_composition(
    point_algebra: &Algebra,
    lt: &str,
    key_to_name: &HashMap<String, String>,
    r1: &IntervalSignature,
    r2: &IntervalSignature,
) -> QrResult<Vec<String>> {
    let mut net = Network::new(point_algebra.clone(), "six-point");
    let s1 = net.new_entity("s1", ["Point"])?;
    let e1 = net.new_entity("e1", ["Point"])?;
    let s2 = net.new_entity("s2", ["Point"])?;
    let e2 = net.new_entity("e2", ["Point"])?;
    let s3 = net.new_entity("s3", ["Point"])?;
    let e3 = net.new_entity("e3", ["Point"])?;
    net.add_constraint(s1, e1, Some(lt))?;
    net.add_constraint(s2, e2, Some(lt))?;
    net.add_constraint(s3, e3, Some(lt))?;

    net.add_constraint(s1, s2, Some(r1.c13.as_str()))?;
    net.add_constraint(e1, s2, Some(r1.c23.as_str()))?;
    net.add_constraint(s1, e2, Some(r1.c14.as_str()))?;
    net.add_constraint(e1, e2, Some(r1.c24.as_str()))?;

    net.add_constraint(s2, s3, Some(r2.c13.as_str()))?;
    net.add_constraint(e2, s3, Some(r2.c23.as_str()))?;
    net.add_constraint(s2, e3, Some(r2.c14.as_str()))?;
    net.add_constraint(e2, e3, Some(r2.c24.as_str()))?;
    // (s1,s3), (s1,e3), (e1,s3), (e1,e3) are left fully unconstrained.

    let mut names: Vec<String> = Vec::new();
    for realization in net.all_realizations()? {
        let c13 = realization.constraint(s1, s3).expect("total after propagate").members()[0].to_string();
        let c14 = realization.constraint(s1, e3).expect("total after propagate").members()[0].to_string();
        let c23 = realization.constraint(e1, s3).expect("total after propagate").members()[0].to_string();
        let c24 = realization.constraint(e1, e3).expect("total after propagate").members()[0].to_string();
        let key = signature_key(&c13, &c14, &c23, &c24);
        if let Some(name) = key_to_name.get(&key) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Derive an interval algebra from `point_algebra`, using `lt` (e.g. `"<"`
/// or `"<|="`) as the properness relation for both endpoints of every
/// interval (spec §4.5, §8 "Derivation round-trip").
pub fn derive_algebra(
    point_algebra: &Algebra,
    lt: &str,
    name: impl Into<String>,
    description: impl Into<String>,
) -> QrResult<Algebra> {
    let sigs = four_point_signatures(point_algebra, lt)?;
    if sigs.is_empty() {
        return Err(QrError::MalformedAlgebra {
            reason: "derivation produced no consistent interval relations".to_string(),
        });
    }
    let key_to_name: HashMap<String, String> = sigs
        .iter()
        .map(|(n, s)| (signature_key(&s.c13, &s.c14, &s.c23, &s.c24), n.clone()))
        .collect();

    let mut table: HashMap<(String, String), Vec<String>> = HashMap::new();
    for (r1_name, r1) in &sigs {
        for (r2_name, r2) in &sigs {
            let entry = derive_composition(point_algebra, lt, &key_to_name, r1, r2)?;
            table.insert((r1_name.clone(), r2_name.clone()), entry);
        }
    }

    let mut specs = Vec::with_capacity(sigs.len());
    for (sym, sig) in &sigs {
        let converse_key = signature_key(
            point_algebra.converse_of(sig.c13.as_str())?,
            point_algebra.converse_of(sig.c23.as_str())?,
            point_algebra.converse_of(sig.c14.as_str())?,
            point_algebra.converse_of(sig.c24.as_str())?,
        );
        let converse = key_to_name
            .get(&converse_key)
            .ok_or_else(|| QrError::MalformedAlgebra {
                reason: format!("no derived relation witnesses the converse of {sym}"),
            })?
            .clone();
        let symmetric = &converse == sym;
        let self_compose = table
            .get(&(sym.clone(), sym.clone()))
            .expect("composition table covers every pair of derived relations");
        let transitive = self_compose.len() == 1 && self_compose[0] == *sym;
        specs.push(RelationSpec {
            symbol: sym.clone(),
            name: human_name(sym).to_string(),
            converse,
            domain: sig.domain.clone(),
            range: sig.range.clone(),
            reflexive: symmetric && transitive,
            symmetric,
            transitive,
        });
    }

    Algebra::build(name, description, specs, move |r, s| {
        table.get(&(r.to_string(), s.to_string())).cloned().unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebras::point::linear_point;

    #[test]
    fn linear_interval_has_thirteen_relations() {
        let alg = derive_algebra(&linear_point(), "<", "Test", "").unwrap();
        assert_eq!(alg.relations().len(), 13);
    }

    #[test]
    fn derived_linear_interval_satisfies_composition_identity() {
        let alg = derive_algebra(&linear_point(), "<", "Test", "").unwrap();
        assert!(alg.check_composition_identity().passed());
    }

    #[test]
    fn before_and_after_are_mutual_converses() {
        let alg = derive_algebra(&linear_point(), "<", "Test", "").unwrap();
        assert_eq!(alg.converse_of("B").unwrap(), "BI");
        assert_eq!(alg.converse_of("BI").unwrap(), "B");
    }

    #[test]
    fn extended_linear_interval_has_eighteen_relations() {
        let alg = derive_algebra(&linear_point(), "<|=", "Test", "").unwrap();
        assert_eq!(alg.relations().len(), 18);
    }
}
