//! SMILES tokenizer and parser.
//!
//! [`tokenize`] turns a SMILES string into [`Token`]s, [`parse`] turns those
//! into a [`ParseTree`] with every ring closure resolved, and
//! [`ParseTree::to_graph`] gives the petgraph-backed [`MolGraph`] view.
//!
//! ```
//! use crabsmiles::{parse, tokenize};
//!
//! let tokens = tokenize("C1CC(=O)C1").unwrap();
//! let tree = parse(&tokens).unwrap();
//! assert_eq!(tree.atom_count(), 5);
//! assert_eq!(tree.ring_bonds().len(), 1);
//! assert_eq!(tree.to_graph().ring_count(), 1);
//! ```

pub mod bond;
pub mod chirality;
pub mod element;
pub mod mol;
pub mod smiles;

pub use bond::{BondOrigin, BondSymbol};
pub use chirality::Chirality;
pub use element::Element;
pub use mol::{GraphAtom, GraphBond, MolGraph};
pub use smiles::{
    parse, parse_smiles, to_smiles, tokenize, AtomId, AtomNode, AtomSymbol, BracketProps,
    LexError, ParseError, ParseTree, RingBond, RingClosure, SmilesError, Token, TokenKind,
};

#[cfg(test)]
mod tests;
