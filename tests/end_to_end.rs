//! End-to-end scenarios over the shipped algebras.

use qualreas::algebras::{linear_interval, rcc8};
use qualreas::Network;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn allen_transitivity() {
    init_logging();
    let alg = linear_interval().unwrap();
    let mut net = Network::new(alg, "Allen transitivity");
    let x = net.new_entity("X", ["ProperInterval"]).unwrap();
    let y = net.new_entity("Y", ["ProperInterval"]).unwrap();
    let z = net.new_entity("Z", ["ProperInterval"]).unwrap();
    net.add_constraint(x, y, Some("B")).unwrap();
    net.add_constraint(y, z, Some("D")).unwrap();

    assert!(net.propagate().unwrap());

    let mut xz: Vec<&str> = net.constraint(x, z).unwrap().members().into_iter().collect();
    xz.sort();
    assert_eq!(xz, vec!["B", "D", "M", "O", "S"]);

    let mut zx: Vec<&str> = net.constraint(z, x).unwrap().members().into_iter().collect();
    zx.sort();
    assert_eq!(zx, vec!["BI", "DI", "MI", "OI", "SI"]);

    for (_, e) in net.entities() {
        assert_eq!(e.classes(), &["ProperInterval".to_string()]);
    }
}

#[test]
fn rcc8_transitive_containment() {
    let alg = rcc8().unwrap();
    let mut net = Network::new(alg, "RCC-8 transitive containment");
    let x = net.new_entity("X", ["Region"]).unwrap();
    let y = net.new_entity("Y", ["Region"]).unwrap();
    let z = net.new_entity("Z", ["Region"]).unwrap();
    net.add_constraint(x, y, Some("NTPP")).unwrap();
    net.add_constraint(y, z, Some("NTPP")).unwrap();

    assert!(net.propagate().unwrap());
    assert_eq!(net.constraint(x, z).unwrap().to_string(), "NTPP");
}

#[test]
fn book_example() {
    let alg = linear_interval().unwrap();
    let mut net = Network::new(alg, "Book Example");
    let i = net.new_entity("I", ["ProperInterval"]).unwrap();
    let j = net.new_entity("J", ["ProperInterval"]).unwrap();
    let k = net.new_entity("K", ["ProperInterval"]).unwrap();
    let l = net.new_entity("L", ["ProperInterval"]).unwrap();

    net.add_constraint(i, j, Some("F|FI")).unwrap();
    net.add_constraint(i, l, Some("S|M")).unwrap();
    net.add_constraint(l, j, Some("S|M")).unwrap();
    net.add_constraint(k, i, Some("D|DI")).unwrap();
    net.add_constraint(k, j, Some("D|DI")).unwrap();
    net.add_constraint(l, k, Some("O")).unwrap();

    assert!(net.propagate().unwrap());

    assert_eq!(net.constraint(i, j).unwrap().to_string(), "F");
    assert_eq!(net.constraint(i, l).unwrap().to_string(), "S");
    assert_eq!(net.constraint(l, j).unwrap().to_string(), "M");
    assert_eq!(net.constraint(k, i).unwrap().to_string(), "DI");
    assert_eq!(net.constraint(k, j).unwrap().to_string(), "DI");
}

#[test]
fn rcc8_wikipedia_example() {
    let alg = rcc8().unwrap();
    let mut net = Network::new(alg, "Wikipedia RCC8 Example");
    let house1 = net.new_entity("house1", ["Region"]).unwrap();
    let house2 = net.new_entity("house2", ["Region"]).unwrap();
    let property1 = net.new_entity("property1", ["Region"]).unwrap();
    let property2 = net.new_entity("property2", ["Region"]).unwrap();
    let road = net.new_entity("road", ["Region"]).unwrap();

    net.add_constraint(house1, house2, Some("DC")).unwrap();
    net.add_constraint(house1, property1, Some("TPP|NTPP")).unwrap();
    net.add_constraint(house1, property2, Some("DC|EC")).unwrap();
    net.add_constraint(house1, road, Some("EC")).unwrap();
    net.add_constraint(house2, property1, Some("DC|EC")).unwrap();
    net.add_constraint(house2, property2, Some("NTPP")).unwrap();
    net.add_constraint(house2, road, Some("EC")).unwrap();
    net.add_constraint(property1, property2, Some("DC|EC")).unwrap();

    assert!(net.propagate().unwrap());

    let mut road_property1: Vec<&str> = net
        .constraint(road, property1)
        .unwrap()
        .members()
        .into_iter()
        .collect();
    road_property1.sort();
    assert_eq!(road_property1, vec!["EC", "PO"]);

    let mut road_property2: Vec<&str> = net
        .constraint(road, property2)
        .unwrap()
        .members()
        .into_iter()
        .collect();
    road_property2.sort();
    assert_eq!(road_property2, vec!["PO", "TPP"]);
}

#[test]
fn inconsistency_is_reported_without_corrupting_the_network() {
    // The "inconsistent labeling" network from Figure 5 of Allen's 1983 paper.
    let alg = linear_interval().unwrap();
    let mut net = Network::new(alg, "Inconsistent");
    let a = net.new_entity("A", ["ProperInterval"]).unwrap();
    let b = net.new_entity("B", ["ProperInterval"]).unwrap();
    let c = net.new_entity("C", ["ProperInterval"]).unwrap();
    let d = net.new_entity("D", ["ProperInterval"]).unwrap();

    net.add_constraint(a, b, Some("D|DI")).unwrap();
    net.add_constraint(d, a, Some("M|S")).unwrap();
    net.add_constraint(d, b, Some("O")).unwrap();
    net.add_constraint(d, c, Some("M|S")).unwrap();
    net.add_constraint(b, c, Some("D|DI")).unwrap();
    net.add_constraint(a, c, Some("F|FI")).unwrap();

    let before = net.constraint(a, c).unwrap().clone();
    assert!(!net.propagate().unwrap());
    assert_eq!(net.constraint(a, c).unwrap(), &before);
}

#[test]
fn realizations_enumerate_every_consistent_singleton_labelling() {
    let alg = linear_interval().unwrap();
    let mut net = Network::new(alg, "Realizations");
    let x = net.new_entity("X", ["ProperInterval"]).unwrap();
    let y = net.new_entity("Y", ["ProperInterval"]).unwrap();
    net.add_constraint(x, y, Some("B|M")).unwrap();

    let realizations = net.all_realizations().unwrap();
    assert_eq!(realizations.len(), 2);
    let mut labels: Vec<String> = realizations
        .iter()
        .map(|r| {
            let rx = r.get_entity_by_name("X").unwrap();
            let ry = r.get_entity_by_name("Y").unwrap();
            r.constraint(rx, ry).unwrap().to_string()
        })
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["B".to_string(), "M".to_string()]);
}
