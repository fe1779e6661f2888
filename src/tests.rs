use crate::smiles::{LexErrorKind, ParseErrorKind};
use crate::*;

const EXAMPLES: &[&str] = &[
    "CC-C",
    "C-C[NH3-]",
    "[Fe+2]-[OH-]",
    "C(:N)C",
    "[13CH3-]",
    "[C@H](O)CC",
    "[NH4+]",
    "[Fe+2:1]",
    "[2H]",
    "[C@@](C)(N)(O)CC",
    "[NH3+:2]",
    "[13C@H](O)CC",
    "CCl",
    "*CC*",
    "c1ccccc1",
    "[Se]",
    "N1CC[O]CC1",
    "[13CH4]",
    "C[2H]",
    "[Ru](Cl)Cl",
    "CC(=O)O",
    "C1=CC=C[*]C=C1",
    "[Na+].[Cl-]",
    "C%10CC%10",
];

#[test]
fn token_texts_reconstruct_the_input() {
    for input in EXAMPLES.iter().copied().chain(["Br2", " C C\t(O)\n"]) {
        let tokens = tokenize(input).unwrap();
        let joined: String = tokens.iter().map(|t| t.text).collect();
        let expected: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(joined, expected, "{}", input);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}

#[test]
fn every_example_parses() {
    for input in EXAMPLES {
        let tree = parse_smiles(input).unwrap_or_else(|e| panic!("{}: {}", input, e));
        assert_eq!(tree.walk().count(), tree.atom_count(), "{}", input);
    }
}

#[test]
fn ring_labels_come_in_pairs() {
    for input in ["C1CCCCC1", "C12CC1CC2", "c1ccc2ccccc2c1", "C1CC1C1CC1", "C%10CC%10"] {
        let tree = parse_smiles(input).unwrap();
        let mut closures = 0;
        for (id, atom) in tree.atoms() {
            for closure in &atom.ring_closures {
                closures += 1;
                assert_ne!(closure.partner, id);
                let partner = &tree[closure.partner];
                assert!(partner
                    .ring_closures
                    .iter()
                    .any(|c| c.label == closure.label && c.partner == id));
            }
        }
        assert_eq!(closures, 2 * tree.ring_bonds().len(), "{}", input);
    }

    for input in ["C1CC", "C1CC1C1", "C12CC1"] {
        let err = parse_smiles(input).unwrap_err();
        assert!(
            matches!(
                err,
                SmilesError::Parse(ParseError {
                    kind: ParseErrorKind::UnclosedRing { .. },
                    ..
                })
            ),
            "{}: {:?}",
            input,
            err
        );
    }
}

#[test]
fn bracket_field_order() {
    let tree = parse_smiles("[13C@H](O)CC").unwrap();
    let root = &tree[tree.root()];
    let props = root.bracket.unwrap();
    assert_eq!(props.isotope, Some(13));
    assert_eq!(root.symbol.as_str(), "C");
    assert_eq!(props.chirality, Some(Chirality::Anticlockwise));
    assert_eq!(props.hcount, Some(1));
    assert_eq!(props.charge, None);
    assert_eq!(props.class, None);
    assert_eq!(tree.chain(tree.root()).count(), 3);

    for reordered in ["[C13@H]", "[13@CH]", "[13CH@]", "[NH3:2+]", "[N+H3]"] {
        assert!(
            matches!(parse_smiles(reordered), Err(SmilesError::Parse(_))),
            "{}",
            reordered
        );
    }
}

#[test]
fn hyphen_depends_on_context() {
    let tokens = tokenize("[NH3-]").unwrap();
    let charge = tokens.iter().find(|t| t.text == "-").unwrap();
    assert_eq!(charge.kind, TokenKind::Charge);
    let tree = parse(&tokens).unwrap();
    assert_eq!(tree[tree.root()].bracket.unwrap().charge, Some(-1));

    let tokens = tokenize("C-C").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Bond);
    let tree = parse(&tokens).unwrap();
    assert_eq!(tree[AtomId::new(1)].chain_bond, BondSymbol::Single);
}

#[test]
fn two_letter_symbols_are_greedy() {
    let tokens = tokenize("CCl").unwrap();
    let symbols: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Symbol)
        .map(|t| t.text)
        .collect();
    assert_eq!(symbols, vec!["C", "Cl"]);

    let tokens = tokenize("Br2").unwrap();
    assert_eq!(tokens[0].text, "Br");
    assert_eq!(tokens[1].kind, TokenKind::RingNumber);
    assert_eq!(tokens[1].text, "2");
}

#[test]
fn failures_do_not_depend_on_earlier_calls() {
    for input in ["C(", "C1CC", "C%1", "[C", "C=1CC#1"] {
        let first = parse_smiles(input).unwrap_err();
        parse_smiles("c1ccccc1").unwrap();
        let second = parse_smiles(input).unwrap_err();
        assert_eq!(first, second, "{}", input);
    }
}

#[test]
fn lexing_and_parsing_fail_at_the_first_problem() {
    let err = parse_smiles("C!C(").unwrap_err();
    assert_eq!(
        err,
        SmilesError::Lex(LexError::new(1, LexErrorKind::UnexpectedChar('!')))
    );
}

#[test]
fn independent_parses_on_threads() {
    let handles: Vec<_> = EXAMPLES
        .iter()
        .map(|s| std::thread::spawn(move || to_smiles(&parse_smiles(s).unwrap())))
        .collect();
    for (handle, input) in handles.into_iter().zip(EXAMPLES) {
        let written = handle.join().unwrap();
        assert_eq!(written, to_smiles(&parse_smiles(input).unwrap()));
    }
}

#[test]
fn ring_count_matches_ring_bonds_for_connected_input() {
    for input in ["C1CCCCC1", "c1ccc2ccccc2c1", "C12C3C4C1C5C2C3C45", "CC(C)C"] {
        let tree = parse_smiles(input).unwrap();
        let mol = tree.to_graph();
        assert_eq!(mol.component_count(), 1);
        assert_eq!(mol.ring_count(), tree.ring_bonds().len(), "{}", input);
    }
}
