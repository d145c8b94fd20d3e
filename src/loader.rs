//! Algebra and network descriptions: the external textual format of spec §6.
//!
//! These are plain serde structures kept deliberately close to the wire
//! shape the spec fixes (`Relations`/`TransTable` for algebras, `nodes`/
//! `edges`/`abbreviations` for networks) rather than derived straight from
//! the internal `Algebra`/`Network` types, so that the on-disk layout is
//! stable independent of internal refactors. `Algebra::from_description` /
//! `to_description` and `Network::from_description` / `to_description`
//! (defined here as inherent impls) are the load/save entry points.

use crate::algebra::{Algebra, RelationSpec};
use crate::entity::EntityId;
use crate::error::{QrError, QrResult};
use crate::network::Network;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A composition-table entry: either an explicit list of symbols or a
/// `|`-separated string (spec §6: "Both must be accepted on input").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransEntry {
    List(Vec<String>),
    Bar(String),
}

impl TransEntry {
    fn into_symbols(self) -> Vec<String> {
        match self {
            TransEntry::List(symbols) => symbols,
            TransEntry::Bar(s) if s.is_empty() => Vec::new(),
            TransEntry::Bar(s) => s.split('|').map(str::to_string).collect(),
        }
    }

    /// The compact `|`-string form, emitted on output (spec §6).
    fn from_symbols(symbols: &[String]) -> TransEntry {
        TransEntry::Bar(symbols.join("|"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationDescription {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Converse")]
    pub converse: String,
    #[serde(rename = "Domain")]
    pub domain: Vec<String>,
    #[serde(rename = "Range")]
    pub range: Vec<String>,
    #[serde(rename = "Reflexive")]
    pub reflexive: bool,
    #[serde(rename = "Symmetric")]
    pub symmetric: bool,
    #[serde(rename = "Transitive")]
    pub transitive: bool,
}

/// The external description of an [`Algebra`] (spec §6, "Algebra description").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgebraDescription {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Relations")]
    pub relations: IndexMap<String, RelationDescription>,
    #[serde(rename = "TransTable")]
    pub trans_table: IndexMap<String, IndexMap<String, TransEntry>>,
}

impl Algebra {
    /// Build an [`Algebra`] from its external description (spec §6).
    pub fn from_description(desc: &AlgebraDescription) -> QrResult<Algebra> {
        let specs: Vec<RelationSpec> = desc
            .relations
            .iter()
            .map(|(symbol, rd)| RelationSpec {
                symbol: symbol.clone(),
                name: rd.name.clone(),
                converse: rd.converse.clone(),
                domain: rd.domain.clone(),
                range: rd.range.clone(),
                reflexive: rd.reflexive,
                symmetric: rd.symmetric,
                transitive: rd.transitive,
            })
            .collect();
        let trans_table = desc.trans_table.clone();
        Algebra::build(desc.name.clone(), desc.description.clone(), specs, move |r, s| {
            trans_table
                .get(r)
                .and_then(|row| row.get(s))
                .cloned()
                .map(TransEntry::into_symbols)
                .unwrap_or_default()
        })
    }

    /// Emit this algebra's external description (spec §8, "Round-trip").
    pub fn to_description(&self) -> AlgebraDescription {
        let symbols = self.relations();
        let mut relations = IndexMap::new();
        let mut trans_table = IndexMap::new();
        for &r in &symbols {
            let info = self.relation_info(r).expect("r comes from self.relations()");
            let converse = self
                .converse_of(r)
                .expect("r comes from self.relations()")
                .to_string();
            relations.insert(
                r.to_string(),
                RelationDescription {
                    name: info.name.clone(),
                    converse,
                    domain: info.domain.clone(),
                    range: info.range.clone(),
                    reflexive: info.reflexive,
                    symmetric: info.symmetric,
                    transitive: info.transitive,
                },
            );

            let r_rs = self.relset([r]).expect("r comes from self.relations()");
            let mut row = IndexMap::new();
            for &s in &symbols {
                let s_rs = self.relset([s]).expect("s comes from self.relations()");
                let composed = self.compose(&r_rs, &s_rs).expect("same algebra");
                let members: Vec<String> = composed.members().into_iter().map(str::to_string).collect();
                row.insert(s.to_string(), TransEntry::from_symbols(&members));
            }
            trans_table.insert(r.to_string(), row);
        }
        AlgebraDescription {
            name: self.name().to_string(),
            description: self.description().to_string(),
            relations,
            trans_table,
        }
    }
}

/// One node: a name plus its ontological-class tags (spec §6, "nodes").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription(pub String, pub Vec<String>);

/// One edge, with an optional constraint (spec §6, "edges"): unconstrained
/// when the third element is absent, otherwise a `|`-string or an
/// abbreviation key resolved through `abbreviations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeDescription {
    Unconstrained(String, String),
    Constrained(String, String, String),
}

/// The external description of a [`Network`] (spec §6, "Network description").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDescription {
    pub name: String,
    pub algebra: String,
    #[serde(default)]
    pub description: String,
    pub nodes: Vec<NodeDescription>,
    pub edges: Vec<EdgeDescription>,
    #[serde(default)]
    pub abbreviations: IndexMap<String, String>,
}

impl Network {
    /// Build a [`Network`] from its external description over an
    /// already-loaded `algebra` (the description's own `algebra` field
    /// names it but does not carry it — spec §6: `"algebra (algebra name or
    /// file stem)"`).
    pub fn from_description(desc: &NetworkDescription, algebra: Algebra) -> QrResult<Network> {
        let mut net = Network::new(algebra, desc.name.clone());
        let mut ids: HashMap<String, EntityId> = HashMap::new();
        for NodeDescription(name, classes) in &desc.nodes {
            let id = net.new_entity(name.clone(), classes.clone())?;
            ids.insert(name.clone(), id);
        }
        let resolve = |name: &str, ids: &HashMap<String, EntityId>| -> QrResult<EntityId> {
            ids.get(name).copied().ok_or_else(|| QrError::NoSuchEntity {
                name: name.to_string(),
            })
        };
        for edge in &desc.edges {
            match edge {
                EdgeDescription::Unconstrained(source, target) => {
                    let u = resolve(source, &ids)?;
                    let v = resolve(target, &ids)?;
                    net.add_constraint(u, v, None)?;
                }
                EdgeDescription::Constrained(source, target, constraint) => {
                    let u = resolve(source, &ids)?;
                    let v = resolve(target, &ids)?;
                    let resolved = desc
                        .abbreviations
                        .get(constraint)
                        .map(String::as_str)
                        .unwrap_or(constraint.as_str());
                    net.add_constraint(u, v, Some(resolved))?;
                }
            }
        }
        Ok(net)
    }

    /// Emit this network's external description. Each undirected pair is
    /// emitted once (self-edges omitted, reverse edges tracked to suppress
    /// duplicates), and class tags reflect the entity's *current* (possibly
    /// propagation-narrowed) state — spec §4.4 "Serialization", and spec §9
    /// open question (c): callers who need the originally declared tags must
    /// capture them before calling `propagate()`.
    pub fn to_description(&self) -> NetworkDescription {
        let nodes = self
            .entities()
            .map(|(_, e)| NodeDescription(e.name().to_string(), e.classes().to_vec()))
            .collect();

        let mut seen = std::collections::HashSet::new();
        let mut edges = Vec::new();
        for (u, eu) in self.entities() {
            for (v, ev) in self.entities() {
                if u == v || seen.contains(&(v, u)) {
                    continue;
                }
                if let Some(rs) = self.constraint(u, v) {
                    seen.insert((u, v));
                    let constraint = rs.to_string();
                    edges.push(EdgeDescription::Constrained(
                        eu.name().to_string(),
                        ev.name().to_string(),
                        constraint,
                    ));
                }
            }
        }

        NetworkDescription {
            name: self.name().to_string(),
            algebra: self.algebra().name().to_string(),
            description: String::new(),
            nodes,
            edges,
            abbreviations: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebras::point::linear_point;

    #[test]
    fn algebra_round_trips_through_description() {
        let original = linear_point();
        let desc = original.to_description();
        let reloaded = Algebra::from_description(&desc).unwrap();
        assert_eq!(reloaded.relations(), original.relations());
        for r in original.relations() {
            for s in original.relations() {
                let a = original.relset([r]).unwrap();
                let b = original.relset([s]).unwrap();
                let c = reloaded.relset([r]).unwrap();
                let d = reloaded.relset([s]).unwrap();
                assert_eq!(
                    original.compose(&a, &b).unwrap().to_string(),
                    reloaded.compose(&c, &d).unwrap().to_string()
                );
            }
        }
    }

    #[test]
    fn trans_entry_accepts_both_list_and_bar_forms() {
        let list: TransEntry = serde_json::from_str(r#"["B","M"]"#).unwrap();
        let bar: TransEntry = serde_json::from_str(r#""B|M""#).unwrap();
        assert_eq!(list.into_symbols(), vec!["B".to_string(), "M".to_string()]);
        assert_eq!(bar.into_symbols(), vec!["B".to_string(), "M".to_string()]);
    }

    #[test]
    fn network_round_trips_through_description() {
        let alg = linear_point();
        let mut net = Network::new(alg.clone(), "t");
        let x = net.new_entity("X", ["Point"]).unwrap();
        let y = net.new_entity("Y", ["Point"]).unwrap();
        net.add_constraint(x, y, Some("<")).unwrap();
        let desc = net.to_description();
        let reloaded = Network::from_description(&desc, alg).unwrap();
        let rx = reloaded.get_entity_by_name("X").unwrap();
        let ry = reloaded.get_entity_by_name("Y").unwrap();
        assert_eq!(reloaded.constraint(rx, ry).unwrap().to_string(), "<");
    }
}
