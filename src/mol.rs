use petgraph::algo::connected_components;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::bond::{BondOrigin, BondSymbol};
use crate::smiles::parse_tree::{AtomId, AtomSymbol, BracketProps};

/// Node weight of a [`MolGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphAtom {
    pub id: AtomId,
    pub symbol: AtomSymbol,
    pub bracket: Option<BracketProps>,
}

/// Edge weight of a [`MolGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBond {
    pub symbol: BondSymbol,
    pub origin: BondOrigin,
}

/// Undirected molecular graph derived from a parse tree.
///
/// Node indices equal the [`AtomId`]s of the tree they were built from, so
/// the two views can be used side by side. Chain, branch and ring-closure
/// links are all plain edges here; `.` separators produce none.
#[derive(Clone, Default)]
pub struct MolGraph {
    graph: UnGraph<GraphAtom, GraphBond>,
}

impl MolGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<GraphAtom, GraphBond> {
        &self.graph
    }

    pub fn node(&self, id: AtomId) -> NodeIndex {
        NodeIndex::new(id.index())
    }

    pub fn atom(&self, idx: NodeIndex) -> &GraphAtom {
        &self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &GraphBond {
        &self.graph[idx]
    }

    pub(crate) fn add_atom(&mut self, atom: GraphAtom) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub(crate) fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: GraphBond) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Number of disconnected fragments.
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Cyclomatic number: independent rings in the graph.
    pub fn ring_count(&self) -> usize {
        (self.bond_count() + self.component_count()).saturating_sub(self.atom_count())
    }
}

impl std::fmt::Debug for MolGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MolGraph")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::smiles::parse_smiles;

    #[test]
    fn empty_graph() {
        let mol = MolGraph::new();
        assert_eq!(mol.atom_count(), 0);
        assert_eq!(mol.component_count(), 0);
        assert_eq!(mol.ring_count(), 0);
    }

    #[test]
    fn bonds_of_an_atom() {
        let mol = parse_smiles("CC(O)N").unwrap().to_graph();
        let center = mol.node(AtomId::new(1));
        assert_eq!(mol.bonds_of(center).count(), 3);
        for e in mol.bonds_of(center) {
            let (a, b) = mol.bond_endpoints(e).unwrap();
            assert!(a == center || b == center);
        }
        assert_eq!(
            mol.atom(mol.node(AtomId::new(2))).symbol,
            AtomSymbol::Aliphatic(Element::O)
        );
    }

    #[test]
    fn ring_count_per_component() {
        let mol = parse_smiles("C1CC1.C1CCC2CCCCC2C1").unwrap().to_graph();
        assert_eq!(mol.component_count(), 2);
        assert_eq!(mol.ring_count(), 3);
    }

    #[test]
    fn debug_shows_counts() {
        let mol = parse_smiles("CCO").unwrap().to_graph();
        assert_eq!(
            format!("{:?}", mol),
            "MolGraph { atom_count: 3, bond_count: 2 }"
        );
    }
}
