use std::collections::BTreeMap;

use crate::bond::BondSymbol;
use crate::chirality::Chirality;
use crate::element::Element;
use crate::smiles::error::{BracketField, ParseError, ParseErrorKind};
use crate::smiles::parse_tree::{
    AtomId, AtomNode, AtomSymbol, BracketProps, ParseTree, RingBond, RingClosure,
};
use crate::smiles::token::{Token, TokenKind};

/// Largest charge magnitude SMILES can express.
const MAX_CHARGE: i8 = 15;

/// Deepest `(` nesting accepted. Parsing recurses once per level.
pub const MAX_BRANCH_DEPTH: usize = 256;

/// Builds a [`ParseTree`] from a token sequence ending in `Eof`.
///
/// ```text
/// smiles       := chain EOF
/// chain        := branchedAtom ((Bond | Dot)? branchedAtom)*
/// branchedAtom := atom ringBond* branch*
/// atom         := bracketAtom | SYMBOL
/// bracketAtom  := '[' Isotope? SYMBOL Chirality? HCount? Charge? Class? ']'
/// ringBond     := Bond? RingNumber
/// branch       := '(' (Bond | Dot)? chain ')'
/// ```
///
/// Ring-closure labels are matched as they are seen; every label must be
/// closed by the end of input. The first error ends the parse.
pub fn parse(tokens: &[Token<'_>]) -> Result<ParseTree, ParseError> {
    Parser::new(tokens)?.run()
}

struct PendingRing {
    atom: AtomId,
    bond: BondSymbol,
    position: usize,
    // index into the opening atom's ring_closures, patched on close
    slot: usize,
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    current: usize,
    atoms: Vec<AtomNode>,
    ring_bonds: Vec<RingBond>,
    open_rings: BTreeMap<u16, PendingRing>,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => {}
            Some(last) => return Err(ParseError::at(last, ParseErrorKind::MissingEof)),
            None => return Err(ParseError::at(&Token::eof(0), ParseErrorKind::MissingEof)),
        }
        Ok(Self {
            tokens,
            current: 0,
            atoms: Vec::new(),
            ring_bonds: Vec::new(),
            open_rings: BTreeMap::new(),
            depth: 0,
        })
    }

    fn run(mut self) -> Result<ParseTree, ParseError> {
        if self.check(TokenKind::Eof) {
            return Err(self.error(ParseErrorKind::EmptyInput));
        }

        self.chain()?;

        if !self.check(TokenKind::Eof) {
            return Err(self.error(ParseErrorKind::Expected {
                expected: "end of input",
            }));
        }

        if let Some((&label, pending)) = self.open_rings.iter().min_by_key(|(_, p)| p.position) {
            return Err(self.error(ParseErrorKind::UnclosedRing {
                label,
                opened_at: pending.position,
            }));
        }

        Ok(ParseTree::new(self.atoms, self.ring_bonds))
    }

    /// Parses a chain and returns its first atom.
    fn chain(&mut self) -> Result<AtomId, ParseError> {
        let first = self.branched_atom()?;
        let mut prev = first;

        loop {
            let bond = match self.peek().kind {
                TokenKind::Bond => {
                    let tok = self.advance();
                    bond_symbol(&tok)?
                }
                TokenKind::Dot => {
                    self.advance();
                    BondSymbol::Disconnected
                }
                TokenKind::Symbol | TokenKind::BracketStart => BondSymbol::Implicit,
                _ => break,
            };

            let atom = self.branched_atom()?;
            self.atoms[atom.index()].chain_bond = bond;
            self.atoms[prev.index()].next = Some(atom);
            prev = atom;
        }

        Ok(first)
    }

    fn branched_atom(&mut self) -> Result<AtomId, ParseError> {
        let id = self.atom()?;

        while self.at_ring_bond() {
            self.ring_bond(id)?;
        }

        while self.check(TokenKind::BranchStart) {
            self.branch(id)?;
        }

        if self.at_ring_bond() {
            let tok = if self.check(TokenKind::RingNumber) {
                *self.peek()
            } else {
                *self.peek_next()
            };
            let label = ring_label(&tok)?;
            return Err(ParseError::at(
                &tok,
                ParseErrorKind::RingBondAfterBranch { label },
            ));
        }

        Ok(id)
    }

    fn atom(&mut self) -> Result<AtomId, ParseError> {
        let tok = *self.peek();
        match tok.kind {
            TokenKind::Symbol => {
                self.advance();
                let symbol = organic_symbol(&tok)?;
                Ok(self.push_atom(AtomNode::new(symbol, None, tok.position)))
            }
            TokenKind::BracketStart => self.bracket_atom(),
            _ => Err(ParseError::at(
                &tok,
                ParseErrorKind::Expected { expected: "atom" },
            )),
        }
    }

    fn bracket_atom(&mut self) -> Result<AtomId, ParseError> {
        let open = self.advance();
        let mut props = BracketProps::default();
        let mut symbol = None;
        let mut seen: Vec<BracketField> = Vec::with_capacity(6);

        loop {
            let tok = *self.peek();
            let field = match tok.kind {
                TokenKind::BracketEnd => break,
                TokenKind::Isotope => BracketField::Isotope,
                TokenKind::Symbol => BracketField::Symbol,
                TokenKind::Chirality => BracketField::Chirality,
                TokenKind::HCount => BracketField::HCount,
                TokenKind::Charge => BracketField::Charge,
                TokenKind::Class => BracketField::Class,
                _ => {
                    return Err(ParseError::at(
                        &tok,
                        ParseErrorKind::Expected { expected: "']'" },
                    ))
                }
            };

            if seen.contains(&field) {
                return Err(ParseError::at(&tok, ParseErrorKind::DuplicateField(field)));
            }
            if seen.last().is_some_and(|last| field < *last) {
                return Err(ParseError::at(&tok, ParseErrorKind::FieldOutOfOrder(field)));
            }
            seen.push(field);
            self.advance();

            match field {
                BracketField::Isotope => props.isotope = Some(number(&tok, "isotope")?),
                BracketField::Symbol => symbol = Some(bracket_symbol(&tok)?),
                BracketField::Chirality => {
                    let chirality = Chirality::parse(tok.text)
                        .ok_or_else(|| invalid_field(&tok, "chirality"))?;
                    props.chirality = Some(chirality);
                }
                BracketField::HCount => props.hcount = Some(hcount(&tok)?),
                BracketField::Charge => props.charge = Some(charge(&tok)?),
                BracketField::Class => {
                    let digits = tok.text.strip_prefix(':').unwrap_or(tok.text);
                    props.class = Some(
                        digits
                            .parse()
                            .map_err(|_| invalid_field(&tok, "atom class"))?,
                    );
                }
            }
        }

        let symbol = symbol.ok_or_else(|| {
            self.error(ParseErrorKind::Expected {
                expected: "element symbol",
            })
        })?;
        self.advance();

        Ok(self.push_atom(AtomNode::new(symbol, Some(props), open.position)))
    }

    fn at_ring_bond(&self) -> bool {
        match self.peek().kind {
            TokenKind::RingNumber => true,
            TokenKind::Bond => self.peek_next().kind == TokenKind::RingNumber,
            _ => false,
        }
    }

    fn ring_bond(&mut self, atom: AtomId) -> Result<(), ParseError> {
        let bond = if self.check(TokenKind::Bond) {
            let tok = self.advance();
            bond_symbol(&tok)?
        } else {
            BondSymbol::Implicit
        };
        let tok = self.advance();
        let label = ring_label(&tok)?;

        let Some(open) = self.open_rings.remove(&label) else {
            let closures = &mut self.atoms[atom.index()].ring_closures;
            let slot = closures.len();
            // partner is patched when the label closes
            closures.push(RingClosure {
                bond,
                label,
                partner: atom,
            });
            self.open_rings.insert(
                label,
                PendingRing {
                    atom,
                    bond,
                    position: tok.position,
                    slot,
                },
            );
            return Ok(());
        };

        if open.atom == atom {
            return Err(ParseError::at(&tok, ParseErrorKind::SelfBond { label }));
        }

        let resolved = match (open.bond.is_explicit(), bond.is_explicit()) {
            (true, true) if open.bond != bond => {
                return Err(ParseError::at(
                    &tok,
                    ParseErrorKind::RingBondConflict {
                        label,
                        first: open.bond,
                        second: bond,
                    },
                ))
            }
            (true, _) => open.bond,
            (false, _) => bond,
        };

        self.atoms[open.atom.index()].ring_closures[open.slot].partner = atom;
        self.atoms[atom.index()].ring_closures.push(RingClosure {
            bond,
            label,
            partner: open.atom,
        });
        self.ring_bonds.push(RingBond {
            label,
            bond: resolved,
            first: open.atom,
            second: atom,
        });
        Ok(())
    }

    fn branch(&mut self, parent: AtomId) -> Result<(), ParseError> {
        if self.depth >= MAX_BRANCH_DEPTH {
            return Err(self.error(ParseErrorKind::BranchTooDeep {
                limit: MAX_BRANCH_DEPTH,
            }));
        }
        let open = self.advance();

        let bond = match self.peek().kind {
            TokenKind::Bond => {
                let tok = self.advance();
                bond_symbol(&tok)?
            }
            TokenKind::Dot => {
                self.advance();
                BondSymbol::Disconnected
            }
            TokenKind::BranchEnd => return Err(self.error(ParseErrorKind::EmptyBranch)),
            _ => BondSymbol::Implicit,
        };

        if self.check(TokenKind::Eof) {
            return Err(self.error(ParseErrorKind::UnterminatedBranch {
                start: open.position,
            }));
        }

        self.depth += 1;
        let first = self.chain()?;
        self.depth -= 1;
        self.atoms[first.index()].chain_bond = bond;
        self.atoms[parent.index()].branches.push(first);

        match self.peek().kind {
            TokenKind::BranchEnd => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Err(self.error(ParseErrorKind::UnterminatedBranch {
                start: open.position,
            })),
            _ => Err(self.error(ParseErrorKind::Expected { expected: "')'" })),
        }
    }

    fn push_atom(&mut self, atom: AtomNode) -> AtomId {
        self.atoms.push(atom);
        AtomId::new(self.atoms.len() - 1)
    }

    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.current]
    }

    fn peek_next(&self) -> &Token<'a> {
        let i = (self.current + 1).min(self.tokens.len() - 1);
        &self.tokens[i]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token. Never moves past `Eof`.
    fn advance(&mut self) -> Token<'a> {
        let tok = *self.peek();
        if tok.kind != TokenKind::Eof {
            self.current += 1;
        }
        tok
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::at(self.peek(), kind)
    }
}

fn invalid_field(tok: &Token<'_>, field: &'static str) -> ParseError {
    ParseError::at(
        tok,
        ParseErrorKind::InvalidField {
            field,
            text: tok.text.to_owned(),
        },
    )
}

fn bond_symbol(tok: &Token<'_>) -> Result<BondSymbol, ParseError> {
    BondSymbol::from_token_text(tok.text).ok_or_else(|| invalid_field(tok, "bond"))
}

fn organic_symbol(tok: &Token<'_>) -> Result<AtomSymbol, ParseError> {
    if tok.text == "*" {
        return Ok(AtomSymbol::Wildcard);
    }
    if let Some(e) = Element::from_organic_symbol(tok.text) {
        return Ok(AtomSymbol::Aliphatic(e));
    }
    if let Some(e) = Element::from_aromatic_symbol(tok.text, false) {
        return Ok(AtomSymbol::Aromatic(e));
    }
    Err(ParseError::at(
        tok,
        ParseErrorKind::InvalidElement {
            symbol: tok.text.to_owned(),
            context: "organic subset",
        },
    ))
}

fn bracket_symbol(tok: &Token<'_>) -> Result<AtomSymbol, ParseError> {
    if tok.text == "*" {
        return Ok(AtomSymbol::Wildcard);
    }
    if let Some(e) = Element::from_symbol(tok.text) {
        return Ok(AtomSymbol::Aliphatic(e));
    }
    if let Some(e) = Element::from_aromatic_symbol(tok.text, true) {
        return Ok(AtomSymbol::Aromatic(e));
    }
    Err(ParseError::at(
        tok,
        ParseErrorKind::InvalidElement {
            symbol: tok.text.to_owned(),
            context: "bracket",
        },
    ))
}

/// `0`–`9`, or `%` followed by exactly two digits.
fn ring_label(tok: &Token<'_>) -> Result<u16, ParseError> {
    let digits = tok.text.strip_prefix('%').unwrap_or(tok.text);
    let expected_len = if digits.len() == tok.text.len() { 1 } else { 2 };
    if digits.len() != expected_len || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_field(tok, "ring number"));
    }
    digits.parse().map_err(|_| invalid_field(tok, "ring number"))
}

fn number<T: std::str::FromStr>(tok: &Token<'_>, field: &'static str) -> Result<T, ParseError> {
    if tok.text.is_empty() || !tok.text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_field(tok, field));
    }
    tok.text.parse().map_err(|_| invalid_field(tok, field))
}

fn hcount(tok: &Token<'_>) -> Result<u8, ParseError> {
    let digits = tok
        .text
        .strip_prefix('H')
        .ok_or_else(|| invalid_field(tok, "hydrogen count"))?;
    if digits.is_empty() {
        return Ok(1);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_field(tok, "hydrogen count"));
    }
    digits
        .parse()
        .map_err(|_| invalid_field(tok, "hydrogen count"))
}

/// `+`, `++`, `+3`, `-`, `--`, `-2`.
fn charge(tok: &Token<'_>) -> Result<i8, ParseError> {
    let mut chars = tok.text.chars();
    let (sign, sign_char) = match chars.next() {
        Some('+') => (1, '+'),
        Some('-') => (-1, '-'),
        _ => return Err(invalid_field(tok, "charge")),
    };
    let rest = chars.as_str();

    let magnitude: i8 = if rest.is_empty() {
        1
    } else if rest.bytes().all(|b| b.is_ascii_digit()) {
        rest.parse().map_err(|_| invalid_field(tok, "charge"))?
    } else if rest.chars().all(|c| c == sign_char) {
        i8::try_from(rest.len() + 1).map_err(|_| invalid_field(tok, "charge"))?
    } else {
        return Err(invalid_field(tok, "charge"));
    };

    if magnitude > MAX_CHARGE {
        return Err(invalid_field(tok, "charge"));
    }
    Ok(sign * magnitude)
}
