mod builder;
pub mod error;
pub mod parse_tree;
mod parser;
pub mod token;
mod tokenizer;
mod writer;

use crate::mol::MolGraph;
pub use builder::build_graph;
pub use error::{LexError, LexErrorKind, ParseError, ParseErrorKind, SmilesError};
pub use parse_tree::{AtomId, AtomNode, AtomSymbol, BracketProps, ParseTree, RingBond, RingClosure};
pub use parser::{parse, MAX_BRANCH_DEPTH};
pub use token::{Token, TokenKind};
pub use tokenizer::tokenize;
pub use writer::to_smiles;

/// Tokenizes and parses `s` in one step.
pub fn parse_smiles(s: &str) -> Result<ParseTree, SmilesError> {
    let tokens = tokenize(s)?;
    Ok(parse(&tokens)?)
}

impl ParseTree {
    /// Builds the undirected graph view, ring closures included.
    pub fn to_graph(&self) -> MolGraph {
        build_graph(self)
    }
}
