use std::fmt;
use std::ops::Index;

use serde::Serialize;

use crate::bond::BondSymbol;
use crate::chirality::Chirality;
use crate::element::Element;

/// Stable index of an atom in a [`ParseTree`], in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AtomId(usize);

impl AtomId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// The symbol an atom was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AtomSymbol {
    /// `*`
    Wildcard,
    /// Capitalized element symbol, e.g. `C`, `Cl`, `Fe`.
    Aliphatic(Element),
    /// Lowercase aromatic form, e.g. `c`, `se`.
    Aromatic(Element),
}

impl AtomSymbol {
    pub fn element(self) -> Option<Element> {
        match self {
            AtomSymbol::Wildcard => None,
            AtomSymbol::Aliphatic(e) | AtomSymbol::Aromatic(e) => Some(e),
        }
    }

    pub fn is_aromatic(self) -> bool {
        matches!(self, AtomSymbol::Aromatic(_))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AtomSymbol::Wildcard => "*",
            AtomSymbol::Aliphatic(e) => e.symbol(),
            // Aromatic is only ever built from an element with a spelling.
            AtomSymbol::Aromatic(e) => e.aromatic_symbol().unwrap_or("*"),
        }
    }
}

impl fmt::Display for AtomSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional properties written inside `[...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BracketProps {
    pub isotope: Option<u16>,
    pub chirality: Option<Chirality>,
    /// `H` alone counts as one.
    pub hcount: Option<u8>,
    pub charge: Option<i8>,
    pub class: Option<u32>,
}

/// A ring-closure digit as written on one atom, with the atom it resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RingClosure {
    pub bond: BondSymbol,
    pub label: u16,
    pub partner: AtomId,
}

/// The graph edge created by a matched pair of ring-closure digits.
///
/// `bond` is the resolved symbol: whichever occurrence was explicit, or
/// `Implicit` if neither was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RingBond {
    pub label: u16,
    pub bond: BondSymbol,
    /// The atom that opened the ring.
    pub first: AtomId,
    /// The atom that closed it.
    pub second: AtomId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomNode {
    pub symbol: AtomSymbol,
    pub is_bracketed: bool,
    pub bracket: Option<BracketProps>,
    /// Bond to the previous atom of the chain, or to the parent atom for the
    /// first atom of a branch.
    pub chain_bond: BondSymbol,
    /// First atom of each branch, in source order.
    pub branches: Vec<AtomId>,
    pub ring_closures: Vec<RingClosure>,
    pub next: Option<AtomId>,
    /// Byte offset of the atom's first token (`[` for bracket atoms).
    pub position: usize,
}

impl AtomNode {
    pub(crate) fn new(symbol: AtomSymbol, bracket: Option<BracketProps>, position: usize) -> Self {
        Self {
            symbol,
            is_bracketed: bracket.is_some(),
            bracket,
            chain_bond: BondSymbol::Implicit,
            branches: Vec::new(),
            ring_closures: Vec::new(),
            next: None,
            position,
        }
    }
}

/// A parsed SMILES string.
///
/// Atoms are stored in source order; ownership follows the written structure
/// (`next` and `branches`), which is always a tree rooted at the first atom.
/// Ring closures are extra edges kept as id pairs in [`ring_bonds`](Self::ring_bonds)
/// and never participate in that tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseTree {
    atoms: Vec<AtomNode>,
    ring_bonds: Vec<RingBond>,
}

impl ParseTree {
    pub(crate) fn new(atoms: Vec<AtomNode>, ring_bonds: Vec<RingBond>) -> Self {
        debug_assert!(!atoms.is_empty());
        Self { atoms, ring_bonds }
    }

    pub fn root(&self) -> AtomId {
        AtomId(0)
    }

    pub fn atom(&self, id: AtomId) -> &AtomNode {
        &self.atoms[id.0]
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> impl Iterator<Item = (AtomId, &AtomNode)> + '_ {
        self.atoms.iter().enumerate().map(|(i, a)| (AtomId(i), a))
    }

    /// Ring bonds in the order they were closed.
    pub fn ring_bonds(&self) -> &[RingBond] {
        &self.ring_bonds
    }

    /// Walks the tree (not the ring edges) depth-first in source order:
    /// an atom, then its branches, then its `next`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// The atoms of the chain starting at `start`, following `next`.
    pub fn chain(&self, start: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        std::iter::successors(Some(start), move |id| self.atom(*id).next)
    }
}

impl Index<AtomId> for ParseTree {
    type Output = AtomNode;

    fn index(&self, id: AtomId) -> &AtomNode {
        self.atom(id)
    }
}

/// Iterator returned by [`ParseTree::walk`].
pub struct Walk<'t> {
    tree: &'t ParseTree,
    stack: Vec<AtomId>,
}

impl Iterator for Walk<'_> {
    type Item = AtomId;

    fn next(&mut self) -> Option<AtomId> {
        let id = self.stack.pop()?;
        let atom = self.tree.atom(id);
        self.stack.extend(atom.next);
        self.stack.extend(atom.branches.iter().rev());
        Some(id)
    }
}
