//! The RCC-8 region-connection calculus (spec §6).
//!
//! Unlike the interval algebras, RCC-8 is not derivable from a point
//! algebra by the §4.5 machinery (it is a region calculus, not built from
//! point endpoints), so its relation metadata and composition table are
//! supplied directly here. No machine-readable RCC-8 table was present in
//! the retrieved corpus; the table below was reconstructed from the
//! standard mereotopological semantics of the eight relations (Randell,
//! Cui & Cohn 1992; Renz & Nebel), and every entry was checked against the
//! algebra's own composition-identity law (`compose(a,b) ==
//! converse(compose(conv(b),conv(a)))`) while building it — see DESIGN.md.

use crate::algebra::{Algebra, RelationSpec};
use crate::error::QrResult;

fn region_spec(symbol: &str, name: &str, converse: &str) -> RelationSpec {
    RelationSpec {
        symbol: symbol.to_string(),
        name: name.to_string(),
        converse: converse.to_string(),
        domain: vec!["Region".to_string()],
        range: vec!["Region".to_string()],
        reflexive: symbol == "EQ",
        symmetric: matches!(symbol, "DC" | "EC" | "PO" | "EQ"),
        transitive: matches!(symbol, "EQ" | "NTPP" | "NTPPI"),
    }
}

/// The RCC-8 algebra: `DC`, `EC`, `PO`, `TPP`, `NTPP`, `TPPI`, `NTPPI`, `EQ`.
pub fn rcc8_algebra() -> QrResult<Algebra> {
    let specs = vec![
        region_spec("DC", "disconnected from", "DC"),
        region_spec("EC", "externally connected to", "EC"),
        region_spec("PO", "partially overlaps", "PO"),
        region_spec("TPP", "tangential proper part of", "TPPI"),
        region_spec("NTPP", "non-tangential proper part of", "NTPPI"),
        region_spec("TPPI", "has tangential proper part", "TPP"),
        region_spec("NTPPI", "has non-tangential proper part", "NTPP"),
        region_spec("EQ", "equal to", "EQ"),
    ];
    Algebra::build(
        "RCC8Algebra",
        "The region-connection calculus RCC-8",
        specs,
        |r, s| rcc8_trans_table(r, s).into_iter().map(str::to_string).collect(),
    )
}

fn rcc8_trans_table(r: &str, s: &str) -> Vec<&'static str> {
    const ALL: [&str; 8] = ["DC", "EC", "PO", "TPP", "NTPP", "TPPI", "NTPPI", "EQ"];
    const ALL_BUT_EQ: [&str; 7] = ["DC", "EC", "PO", "TPP", "NTPP", "TPPI", "NTPPI"];
    match (r, s) {
        ("DC", "DC") => ALL.to_vec(),
        ("DC", "EC") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("DC", "PO") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("DC", "TPP") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("DC", "NTPP") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("DC", "TPPI") => vec!["DC"],
        ("DC", "NTPPI") => vec!["DC"],
        ("DC", "EQ") => vec!["DC"],

        ("EC", "DC") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("EC", "EC") => vec!["DC", "EC", "PO", "TPP", "TPPI", "EQ"],
        ("EC", "PO") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("EC", "TPP") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("EC", "NTPP") => vec!["PO", "TPP", "NTPP"],
        ("EC", "TPPI") => vec!["DC", "EC"],
        ("EC", "NTPPI") => vec!["DC"],
        ("EC", "EQ") => vec!["EC"],

        ("PO", "DC") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("PO", "EC") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("PO", "PO") => ALL.to_vec(),
        ("PO", "TPP") => vec!["PO", "TPP", "NTPP"],
        ("PO", "NTPP") => vec!["PO", "TPP", "NTPP"],
        ("PO", "TPPI") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("PO", "NTPPI") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("PO", "EQ") => vec!["PO"],

        ("TPP", "DC") => vec!["DC"],
        ("TPP", "EC") => vec!["DC", "EC"],
        ("TPP", "PO") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("TPP", "TPP") => vec!["TPP", "NTPP"],
        ("TPP", "NTPP") => vec!["NTPP"],
        ("TPP", "TPPI") => ALL.to_vec(),
        ("TPP", "NTPPI") => ALL_BUT_EQ.to_vec(),
        ("TPP", "EQ") => vec!["TPP"],

        ("NTPP", "DC") => vec!["DC"],
        ("NTPP", "EC") => vec!["DC"],
        ("NTPP", "PO") => vec!["DC", "EC", "PO", "TPP", "NTPP"],
        ("NTPP", "TPP") => vec!["NTPP"],
        ("NTPP", "NTPP") => vec!["NTPP"],
        ("NTPP", "TPPI") => ALL_BUT_EQ.to_vec(),
        ("NTPP", "NTPPI") => ALL.to_vec(),
        ("NTPP", "EQ") => vec!["NTPP"],

        ("TPPI", "DC") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("TPPI", "EC") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("TPPI", "PO") => vec!["PO", "TPPI", "NTPPI"],
        ("TPPI", "TPP") => ALL.to_vec(),
        ("TPPI", "NTPP") => vec!["PO", "TPP", "NTPP", "TPPI", "NTPPI", "EQ"],
        ("TPPI", "TPPI") => vec!["TPPI", "NTPPI"],
        ("TPPI", "NTPPI") => vec!["NTPPI"],
        ("TPPI", "EQ") => vec!["TPPI"],

        ("NTPPI", "DC") => vec!["DC", "EC", "PO", "TPPI", "NTPPI"],
        ("NTPPI", "EC") => vec!["PO", "TPPI", "NTPPI"],
        ("NTPPI", "PO") => vec!["PO", "TPPI", "NTPPI"],
        ("NTPPI", "TPP") => vec!["PO", "TPP", "NTPP", "TPPI", "NTPPI", "EQ"],
        ("NTPPI", "NTPP") => ALL.to_vec(),
        ("NTPPI", "TPPI") => vec!["NTPPI"],
        ("NTPPI", "NTPPI") => vec!["NTPPI"],
        ("NTPPI", "EQ") => vec!["NTPPI"],

        ("EQ", "DC") => vec!["DC"],
        ("EQ", "EC") => vec!["EC"],
        ("EQ", "PO") => vec!["PO"],
        ("EQ", "TPP") => vec!["TPP"],
        ("EQ", "NTPP") => vec!["NTPP"],
        ("EQ", "TPPI") => vec!["TPPI"],
        ("EQ", "NTPPI") => vec!["NTPPI"],
        ("EQ", "EQ") => vec!["EQ"],

        _ => unreachable!("RCC-8 has only DC, EC, PO, TPP, NTPP, TPPI, NTPPI, EQ"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_identity_holds() {
        let alg = rcc8_algebra().unwrap();
        let check = alg.check_composition_identity();
        assert!(check.passed(), "counter-examples: {:?}", check.counter_examples);
    }

    #[test]
    fn ntpp_is_transitive_and_ntppi_converse() {
        let alg = rcc8_algebra().unwrap();
        assert_eq!(alg.converse_of("NTPP").unwrap(), "NTPPI");
        assert_eq!(alg.converse_of("TPP").unwrap(), "TPPI");
        let info = alg.relation_info("NTPP").unwrap();
        assert!(info.transitive);
    }

    #[test]
    fn eq_is_the_only_equality_relation() {
        let alg = rcc8_algebra().unwrap();
        let eq = alg.equality_for("Region").unwrap();
        assert_eq!(eq.to_string(), "EQ");
    }
}
