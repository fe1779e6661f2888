use std::fmt;

use serde::Serialize;

/// A chirality annotation inside a bracket atom.
///
/// `@` and `@@` are the common tetrahedral shorthands. The tagged forms name
/// a geometry class and a permutation number; each class only admits the
/// numbers listed in OpenSMILES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Chirality {
    /// `@`
    Anticlockwise,
    /// `@@`
    Clockwise,
    /// `@TH1`, `@TH2`
    Tetrahedral(u8),
    /// `@AL1`, `@AL2`
    Allenal(u8),
    /// `@SP1` to `@SP3`
    SquarePlanar(u8),
    /// `@TB1` to `@TB20`
    TrigonalBipyramidal(u8),
    /// `@OH1` to `@OH30`
    Octahedral(u8),
}

/// Letters that may follow the first `@` to start a tagged class.
pub(crate) const CLASS_PREFIXES: [char; 4] = ['T', 'A', 'S', 'O'];

impl Chirality {
    /// Parses a complete chirality spelling, `@` included.
    pub fn parse(text: &str) -> Option<Chirality> {
        match text {
            "@" => return Some(Chirality::Anticlockwise),
            "@@" => return Some(Chirality::Clockwise),
            _ => {}
        }

        let tagged = text.strip_prefix('@')?;
        if tagged.len() < 3 || !tagged.is_char_boundary(2) {
            return None;
        }
        let (class, number) = tagged.split_at(2);
        if !number.bytes().all(|b| b.is_ascii_digit()) || number.starts_with('0') {
            return None;
        }
        let n: u8 = number.parse().ok()?;

        let (chirality, max) = match class {
            "TH" => (Chirality::Tetrahedral(n), 2),
            "AL" => (Chirality::Allenal(n), 2),
            "SP" => (Chirality::SquarePlanar(n), 3),
            "TB" => (Chirality::TrigonalBipyramidal(n), 20),
            "OH" => (Chirality::Octahedral(n), 30),
            _ => return None,
        };
        (1..=max).contains(&n).then_some(chirality)
    }
}

impl fmt::Display for Chirality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chirality::Anticlockwise => f.write_str("@"),
            Chirality::Clockwise => f.write_str("@@"),
            Chirality::Tetrahedral(n) => write!(f, "@TH{}", n),
            Chirality::Allenal(n) => write!(f, "@AL{}", n),
            Chirality::SquarePlanar(n) => write!(f, "@SP{}", n),
            Chirality::TrigonalBipyramidal(n) => write!(f, "@TB{}", n),
            Chirality::Octahedral(n) => write!(f, "@OH{}", n),
        }
    }
}
