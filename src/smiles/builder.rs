use crate::bond::BondOrigin;
use crate::mol::{GraphAtom, GraphBond, MolGraph};
use crate::smiles::parse_tree::ParseTree;

pub fn build_graph(tree: &ParseTree) -> MolGraph {
    let mut mol = MolGraph::new();

    for (id, atom) in tree.atoms() {
        mol.add_atom(GraphAtom {
            id,
            symbol: atom.symbol,
            bracket: atom.bracket,
        });
    }

    for (id, atom) in tree.atoms() {
        let from = mol.node(id);

        for &branch in &atom.branches {
            let symbol = tree[branch].chain_bond;
            if symbol.is_bond() {
                let to = mol.node(branch);
                mol.add_bond(
                    from,
                    to,
                    GraphBond {
                        symbol,
                        origin: BondOrigin::Branch,
                    },
                );
            }
        }

        if let Some(next) = atom.next {
            let symbol = tree[next].chain_bond;
            if symbol.is_bond() {
                let to = mol.node(next);
                mol.add_bond(
                    from,
                    to,
                    GraphBond {
                        symbol,
                        origin: BondOrigin::Chain,
                    },
                );
            }
        }
    }

    for ring in tree.ring_bonds() {
        let (a, b) = (mol.node(ring.first), mol.node(ring.second));
        mol.add_bond(
            a,
            b,
            GraphBond {
                symbol: ring.bond,
                origin: BondOrigin::Ring(ring.label),
            },
        );
    }

    mol
}
