use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Element symbol, aromatic symbol, or `*`.
    Symbol,
    /// One of `- = # $ : / \` outside a bracket atom.
    Bond,
    BranchStart,
    BranchEnd,
    BracketStart,
    BracketEnd,
    /// `0`–`9`, or `%` followed by two digits.
    RingNumber,
    Isotope,
    Chirality,
    HCount,
    Charge,
    Class,
    Dot,
    Eof,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Symbol => "atom symbol",
            TokenKind::Bond => "bond",
            TokenKind::BranchStart => "'('",
            TokenKind::BranchEnd => "')'",
            TokenKind::BracketStart => "'['",
            TokenKind::BracketEnd => "']'",
            TokenKind::RingNumber => "ring number",
            TokenKind::Isotope => "isotope",
            TokenKind::Chirality => "chirality",
            TokenKind::HCount => "hydrogen count",
            TokenKind::Charge => "charge",
            TokenKind::Class => "atom class",
            TokenKind::Dot => "'.'",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One lexical unit: its kind, the exact source slice, and the byte offset
/// of its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }
}
