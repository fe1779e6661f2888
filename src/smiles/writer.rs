use std::fmt;

use crate::smiles::parse_tree::{AtomId, AtomNode, BracketProps, ParseTree};

/// Writes a parse tree back out as SMILES.
///
/// Atoms, branches and ring-closure digits come out in source order, so the
/// result reparses to an equivalent tree. Spellings are normalized: no
/// whitespace, `H`/`Hn` counts, `+`/`-`/`+n`/`-n` charges, and `%nn` only for
/// labels above 9.
pub fn to_smiles(tree: &ParseTree) -> String {
    let mut out = String::new();
    let mut stack = vec![Step::Atom(tree.root())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Atom(id) => {
                let atom = &tree[id];
                out.push_str(atom.chain_bond.as_str());
                write_atom(atom, &mut out);

                for closure in &atom.ring_closures {
                    out.push_str(closure.bond.as_str());
                    write_label(closure.label, &mut out);
                }

                stack.extend(atom.next.map(Step::Atom));
                for &branch in atom.branches.iter().rev() {
                    stack.push(Step::Close);
                    stack.push(Step::Open(branch));
                }
            }
            Step::Open(id) => {
                out.push('(');
                stack.push(Step::Atom(id));
            }
            Step::Close => out.push(')'),
        }
    }
    out
}

// pending output, popped in reverse push order
enum Step {
    Atom(AtomId),
    Open(AtomId),
    Close,
}

fn write_atom(atom: &AtomNode, out: &mut String) {
    match &atom.bracket {
        None => out.push_str(atom.symbol.as_str()),
        Some(props) => {
            out.push('[');
            write_bracket(atom, props, out);
            out.push(']');
        }
    }
}

impl fmt::Display for AtomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_atom(self, &mut out);
        f.write_str(&out)
    }
}

fn write_bracket(atom: &AtomNode, props: &BracketProps, out: &mut String) {
    if let Some(isotope) = props.isotope {
        out.push_str(&isotope.to_string());
    }
    out.push_str(atom.symbol.as_str());
    if let Some(chirality) = props.chirality {
        out.push_str(&chirality.to_string());
    }
    match props.hcount {
        Some(1) => out.push('H'),
        Some(n) => {
            out.push('H');
            out.push_str(&n.to_string());
        }
        None => {}
    }
    match props.charge {
        Some(1) => out.push('+'),
        Some(-1) => out.push('-'),
        Some(c) if c < 0 => out.push_str(&c.to_string()),
        Some(c) => {
            out.push('+');
            out.push_str(&c.to_string());
        }
        None => {}
    }
    if let Some(class) = props.class {
        out.push(':');
        out.push_str(&class.to_string());
    }
}

fn write_label(label: u16, out: &mut String) {
    if label >= 10 {
        out.push('%');
    }
    out.push_str(&label.to_string());
}
