use std::io::{self, Write};

use anyhow::Error;
use serde::Serialize;

use crabsmiles::smiles::{LexErrorKind, ParseErrorKind};
use crabsmiles::{
    BondOrigin, BondSymbol, LexError, MolGraph, ParseError, ParseTree, SmilesError, Token,
};

pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr, "error: {}", err);
    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "  caused by: {}", cause);
    }
    if let Some(hint) = hint(err) {
        let _ = writeln!(stderr, "  hint: {}", hint);
    }
}

pub fn print_line_error(line: usize, err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "line {}: {:#}", line, err);
}

fn hint(err: &Error) -> Option<&'static str> {
    if let Some(e) = err.downcast_ref::<LexError>() {
        return Some(lex_hint(&e.kind));
    }
    if let Some(e) = err.downcast_ref::<ParseError>() {
        return parse_hint(&e.kind);
    }
    match err.downcast_ref::<SmilesError>()? {
        SmilesError::Lex(e) => Some(lex_hint(&e.kind)),
        SmilesError::Parse(e) => parse_hint(&e.kind),
    }
}

fn lex_hint(kind: &LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnexpectedChar(_) => {
            "SMILES only uses atom symbols, bond characters, digits, '%', '.', '()' and '[]'"
        }
        LexErrorKind::UnterminatedBracket { .. } => "close the bracket atom with ']'",
        LexErrorKind::MalformedRingNumber => "'%' takes exactly two digits, as in C%10CC%10",
        LexErrorKind::InvalidChirality(_) => {
            "chirality is @, @@, @TH1-2, @AL1-2, @SP1-3, @TB1-20 or @OH1-30"
        }
        LexErrorKind::DigitExpected(_) => "an atom class is ':' and digits, as in [CH3:1]",
        LexErrorKind::InvalidElement { .. } => {
            "outside brackets only B C N O P S F Cl Br I, b c n o p s and * are allowed; write others as [Fe]"
        }
    }
}

fn parse_hint(kind: &ParseErrorKind) -> Option<&'static str> {
    let hint = match kind {
        ParseErrorKind::UnclosedRing { .. } | ParseErrorKind::UnterminatedBranch { .. } => {
            "input ended early, look for a missing ')' or ring-closure digit"
        }
        ParseErrorKind::EmptyBranch => "remove the empty '()'",
        ParseErrorKind::BranchTooDeep { .. } => "flatten the branches or split the input",
        ParseErrorKind::RingBondConflict { .. } => {
            "write the ring bond on one end only, or make both ends match"
        }
        ParseErrorKind::RingBondAfterBranch { .. } => {
            "ring-closure digits go right after the atom, before its branches"
        }
        ParseErrorKind::SelfBond { .. } => "a ring closure joins two different atoms",
        ParseErrorKind::DuplicateField(_) | ParseErrorKind::FieldOutOfOrder(_) => {
            "bracket fields go in order: isotope, symbol, chirality, H count, charge, class"
        }
        ParseErrorKind::InvalidField { .. } => {
            "charges run from -15 to +15 and ring labels from 0 to 99"
        }
        ParseErrorKind::InvalidElement { .. } => "check the capitalization of the symbol",
        ParseErrorKind::EmptyInput => "the input has no atoms",
        ParseErrorKind::Expected { .. } | ParseErrorKind::MissingEof => return None,
    };
    Some(hint)
}

pub fn tokens(out: &mut impl Write, tokens: &[Token<'_>]) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{:>4}  {:<8} {:?}", token.position, token.text, token.kind)?;
    }
    Ok(())
}

/// One line per atom in source order, branches indented under their parent.
pub fn tree(out: &mut impl Write, tree: &ParseTree) -> io::Result<()> {
    let mut stack = vec![(tree.root(), 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let atom = &tree[id];
        write!(
            out,
            "{:indent$}{:>3}  {}{}",
            "",
            id.index(),
            atom.chain_bond.as_str(),
            atom,
            indent = depth * 4
        )?;
        for closure in &atom.ring_closures {
            write!(
                out,
                "  ({}{} -> {})",
                closure.bond.as_str(),
                closure.label,
                closure.partner.index()
            )?;
        }
        writeln!(out)?;

        stack.extend(atom.next.map(|next| (next, depth)));
        stack.extend(atom.branches.iter().rev().map(|&b| (b, depth + 1)));
    }

    for ring in tree.ring_bonds() {
        writeln!(
            out,
            "ring {}: {} {} {}",
            ring.label,
            ring.first.index(),
            ring.bond,
            ring.second.index()
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
pub struct GraphBondEntry {
    pub first: usize,
    pub second: usize,
    pub symbol: BondSymbol,
    pub origin: BondOrigin,
}

#[derive(Serialize)]
pub struct GraphSummary {
    pub atoms: usize,
    pub components: usize,
    pub rings: usize,
    pub bonds: Vec<GraphBondEntry>,
}

impl GraphSummary {
    pub fn new(mol: &MolGraph) -> Self {
        let bonds = mol
            .bonds()
            .filter_map(|e| {
                let (a, b) = mol.bond_endpoints(e)?;
                let bond = mol.bond(e);
                Some(GraphBondEntry {
                    first: a.index(),
                    second: b.index(),
                    symbol: bond.symbol,
                    origin: bond.origin,
                })
            })
            .collect();

        Self {
            atoms: mol.atom_count(),
            components: mol.component_count(),
            rings: mol.ring_count(),
            bonds,
        }
    }
}

pub fn graph(out: &mut impl Write, summary: &GraphSummary) -> io::Result<()> {
    writeln!(out, "atoms:      {}", summary.atoms)?;
    writeln!(out, "bonds:      {}", summary.bonds.len())?;
    writeln!(out, "components: {}", summary.components)?;
    writeln!(out, "rings:      {}", summary.rings)?;
    for bond in &summary.bonds {
        writeln!(
            out,
            "{:>4} {} {:<4} {:?}",
            bond.first, bond.symbol, bond.second, bond.origin
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crabsmiles::{parse_smiles, tokenize};

    fn render(smiles: &str) -> String {
        let mut out = Vec::new();
        tree(&mut out, &parse_smiles(smiles).unwrap()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn tree_indents_branches() {
        assert_eq!(
            render("CC(=O)O"),
            "  0  C\n  1  C\n      2  =O\n  3  O\n"
        );
    }

    #[test]
    fn tree_lists_ring_closures() {
        let text = render("C1CC1");
        assert!(text.starts_with("  0  C  (1 -> 2)\n"));
        assert!(text.ends_with("ring 1: 0 - 2\n"));
    }

    #[test]
    fn deep_tree_renders() {
        let depth = crabsmiles::smiles::MAX_BRANCH_DEPTH;
        let text = render(&format!("{}C{}", "C(".repeat(depth), ")".repeat(depth)));
        assert_eq!(text.lines().count(), depth + 1);
    }

    #[test]
    fn bare_lex_errors_get_hints() {
        let err = Error::new(tokenize("C%1").unwrap_err());
        assert_eq!(hint(&err), Some(lex_hint(&LexErrorKind::MalformedRingNumber)));

        let err = Error::new(tokenize("C%1").unwrap_err()).context("cannot tokenize");
        assert!(hint(&err).is_some());
    }

    #[test]
    fn parse_hints_follow_the_error_kind() {
        let err = Error::new(parse_smiles("C()").unwrap_err()).context("cannot parse");
        assert_eq!(hint(&err), Some("remove the empty '()'"));

        let err = Error::new(parse_smiles("[C+H]").unwrap_err());
        assert_eq!(
            hint(&err),
            parse_hint(&ParseErrorKind::FieldOutOfOrder(
                crabsmiles::smiles::error::BracketField::HCount
            ))
        );

        let err = Error::new(parse_smiles("C1CC").unwrap_err());
        assert_eq!(
            hint(&err),
            Some("input ended early, look for a missing ')' or ring-closure digit")
        );
    }

    #[test]
    fn unrelated_errors_have_no_hint() {
        assert_eq!(hint(&anyhow::anyhow!("input too long")), None);
    }
}
