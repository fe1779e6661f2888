use thiserror::Error;

use crate::bond::BondSymbol;
use crate::smiles::token::{Token, TokenKind};

/// Why the tokenizer stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    /// Input ended before the `]` of a bracket atom opened at `start`.
    #[error("unterminated bracket atom starting at position {start}")]
    UnterminatedBracket { start: usize },
    #[error("two-digit ring number expected after '%'")]
    MalformedRingNumber,
    #[error("invalid chirality symbol '{0}'")]
    InvalidChirality(String),
    #[error("digit expected after '{0}'")]
    DigitExpected(char),
    #[error("invalid {context} atom symbol '{text}'")]
    InvalidElement { text: String, context: &'static str },
}

/// A tokenizer failure and the byte offset it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct LexError {
    pub position: usize,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(position: usize, kind: LexErrorKind) -> Self {
        Self { position, kind }
    }
}

/// A field inside a bracket atom, in the order SMILES requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BracketField {
    Isotope,
    Symbol,
    Chirality,
    HCount,
    Charge,
    Class,
}

impl BracketField {
    pub fn name(self) -> &'static str {
        match self {
            BracketField::Isotope => "isotope",
            BracketField::Symbol => "element symbol",
            BracketField::Chirality => "chirality",
            BracketField::HCount => "hydrogen count",
            BracketField::Charge => "charge",
            BracketField::Class => "atom class",
        }
    }
}

impl std::fmt::Display for BracketField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why the parser stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}")]
    Expected { expected: &'static str },
    #[error("no atoms in input")]
    EmptyInput,
    #[error("branch opened at position {start} is never closed")]
    UnterminatedBranch { start: usize },
    #[error("empty branch")]
    EmptyBranch,
    #[error("branches nested more than {limit} deep")]
    BranchTooDeep { limit: usize },
    #[error("ring closure {label} opened at position {opened_at} is never closed")]
    UnclosedRing { label: u16, opened_at: usize },
    #[error("conflicting bonds '{first}' and '{second}' on ring closure {label}")]
    RingBondConflict {
        label: u16,
        first: BondSymbol,
        second: BondSymbol,
    },
    #[error("ring closure {label} follows a branch on the same atom")]
    RingBondAfterBranch { label: u16 },
    #[error("ring closure {label} bonds an atom to itself")]
    SelfBond { label: u16 },
    #[error("'{symbol}' is not a valid {context} atom symbol")]
    InvalidElement {
        symbol: String,
        context: &'static str,
    },
    #[error("duplicate {0} in bracket atom")]
    DuplicateField(BracketField),
    #[error("{0} out of order in bracket atom")]
    FieldOutOfOrder(BracketField),
    #[error("invalid {field} '{text}'")]
    InvalidField { field: &'static str, text: String },
    #[error("token stream does not end with an EOF token")]
    MissingEof,
}

/// A parser failure, carrying the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position} (found {found})")]
pub struct ParseError {
    pub position: usize,
    pub found: TokenKind,
    pub text: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn at(token: &Token<'_>, kind: ParseErrorKind) -> Self {
        Self {
            position: token.position,
            found: token.kind,
            text: token.text.to_owned(),
            kind,
        }
    }
}

/// Either stage of [`parse_smiles`](crate::smiles::parse_smiles) failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SmilesError {
    pub fn position(&self) -> usize {
        match self {
            SmilesError::Lex(e) => e.position,
            SmilesError::Parse(e) => e.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_message_names_position() {
        let e = LexError::new(3, LexErrorKind::UnexpectedChar('!'));
        assert_eq!(e.to_string(), "unexpected character '!' at position 3");
    }

    #[test]
    fn parse_error_message_names_found_token() {
        let tok = Token::eof(7);
        let e = ParseError::at(&tok, ParseErrorKind::UnclosedRing { label: 1, opened_at: 1 });
        assert_eq!(
            e.to_string(),
            "ring closure 1 opened at position 1 is never closed at position 7 (found end of input)"
        );
        assert_eq!(e.found, TokenKind::Eof);
        assert!(e.text.is_empty());
    }

    #[test]
    fn smiles_error_is_transparent() {
        let e: SmilesError = LexError::new(0, LexErrorKind::MalformedRingNumber).into();
        assert_eq!(e.position(), 0);
        assert_eq!(
            e.to_string(),
            "two-digit ring number expected after '%' at position 0"
        );
    }
}
