//! Property-based tests over the shipped algebras: composition identity,
//! associativity, and path-consistency after propagation, fuzzed over
//! random relation choices rather than enumerated exhaustively.

use once_cell::sync::Lazy;
use proptest::prelude::*;
use qualreas::algebras::{linear_interval, rcc8};
use qualreas::{Algebra, Network};

static LINEAR_INTERVAL: Lazy<Algebra> = Lazy::new(|| linear_interval().unwrap());
static RCC8: Lazy<Algebra> = Lazy::new(|| rcc8().unwrap());

fn symbol_at(alg: &Algebra, idx: usize) -> &str {
    let symbols = alg.relations();
    symbols[idx % symbols.len()]
}

proptest! {
    #[test]
    fn linear_interval_composition_identity_holds(i in 0usize..64, j in 0usize..64) {
        let alg = &*LINEAR_INTERVAL;
        let r = alg.relset([symbol_at(alg, i)]).unwrap();
        let s = alg.relset([symbol_at(alg, j)]).unwrap();
        let lhs = alg.compose(&r, &s).unwrap();
        let rhs = alg
            .converse(&alg.compose(&alg.converse(&s).unwrap(), &alg.converse(&r).unwrap()).unwrap())
            .unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn rcc8_composition_identity_holds(i in 0usize..64, j in 0usize..64) {
        let alg = &*RCC8;
        let r = alg.relset([symbol_at(alg, i)]).unwrap();
        let s = alg.relset([symbol_at(alg, j)]).unwrap();
        let lhs = alg.compose(&r, &s).unwrap();
        let rhs = alg
            .converse(&alg.compose(&alg.converse(&s).unwrap(), &alg.converse(&r).unwrap()).unwrap())
            .unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn linear_interval_composition_is_associative(i in 0usize..64, j in 0usize..64, k in 0usize..64) {
        let alg = &*LINEAR_INTERVAL;
        let a = alg.relset([symbol_at(alg, i)]).unwrap();
        let b = alg.relset([symbol_at(alg, j)]).unwrap();
        let c = alg.relset([symbol_at(alg, k)]).unwrap();
        let ab_c = alg.compose(&alg.compose(&a, &b).unwrap(), &c).unwrap();
        let a_bc = alg.compose(&a, &alg.compose(&b, &c).unwrap()).unwrap();
        prop_assert_eq!(ab_c, a_bc);
    }

    #[test]
    fn propagation_enforces_path_consistency(i in 0usize..64, j in 0usize..64) {
        let alg = (*LINEAR_INTERVAL).clone();
        let mut net = Network::new(alg.clone(), "fuzz");
        let x = net.new_entity("X", ["ProperInterval"]).unwrap();
        let y = net.new_entity("Y", ["ProperInterval"]).unwrap();
        let z = net.new_entity("Z", ["ProperInterval"]).unwrap();
        net.add_constraint(x, y, Some(symbol_at(&alg, i))).unwrap();
        net.add_constraint(y, z, Some(symbol_at(&alg, j))).unwrap();

        if net.propagate().unwrap() {
            let triples = [
                (x, y, z), (x, z, y), (y, x, z), (y, z, x), (z, x, y), (z, y, x),
            ];
            for (u, v, w) in triples {
                let c_uv = net.constraint(u, v).unwrap();
                let c_uw = net.constraint(u, w).unwrap();
                let c_wv = net.constraint(w, v).unwrap();
                let comp = alg.compose(c_uw, c_wv).unwrap();
                prop_assert!(c_uv.is_subset_of(&comp).unwrap());
            }
        }
    }
}
