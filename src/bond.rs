use serde::Serialize;

/// A bond as written in SMILES.
///
/// `Implicit` is the default for atoms written next to each other with no
/// bond character: a single bond, or an aromatic one between two aromatic
/// atoms. `Disconnected` records a `.` separator and produces no edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BondSymbol {
    #[default]
    Implicit,
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
    Up,
    Down,
    Disconnected,
}

impl BondSymbol {
    /// Maps a bond character (`- = # $ : / \`) to its symbol.
    pub fn from_char(c: char) -> Option<BondSymbol> {
        let bond = match c {
            '-' => BondSymbol::Single,
            '=' => BondSymbol::Double,
            '#' => BondSymbol::Triple,
            '$' => BondSymbol::Quadruple,
            ':' => BondSymbol::Aromatic,
            '/' => BondSymbol::Up,
            '\\' => BondSymbol::Down,
            _ => return None,
        };
        Some(bond)
    }

    /// Parses the text of a bond token. Exactly one bond character.
    pub fn from_token_text(text: &str) -> Option<BondSymbol> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => BondSymbol::from_char(c),
            _ => None,
        }
    }

    /// The character written for this bond. Implicit bonds write nothing.
    pub fn as_str(self) -> &'static str {
        match self {
            BondSymbol::Implicit => "",
            BondSymbol::Single => "-",
            BondSymbol::Double => "=",
            BondSymbol::Triple => "#",
            BondSymbol::Quadruple => "$",
            BondSymbol::Aromatic => ":",
            BondSymbol::Up => "/",
            BondSymbol::Down => "\\",
            BondSymbol::Disconnected => ".",
        }
    }

    pub fn is_explicit(self) -> bool {
        !matches!(self, BondSymbol::Implicit)
    }

    /// Whether this link produces a graph edge.
    pub fn is_bond(self) -> bool {
        !matches!(self, BondSymbol::Disconnected)
    }
}

impl std::fmt::Display for BondSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BondSymbol::Implicit => f.write_str("-"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Where a graph edge came from in the SMILES text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BondOrigin {
    /// Between consecutive atoms of one chain.
    Chain,
    /// Between an atom and the first atom of one of its branches.
    Branch,
    /// A resolved ring closure with its label.
    Ring(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_characters() {
        for (c, bond) in [
            ('-', BondSymbol::Single),
            ('=', BondSymbol::Double),
            ('#', BondSymbol::Triple),
            ('$', BondSymbol::Quadruple),
            (':', BondSymbol::Aromatic),
            ('/', BondSymbol::Up),
            ('\\', BondSymbol::Down),
        ] {
            assert_eq!(BondSymbol::from_char(c), Some(bond));
            assert_eq!(bond.as_str(), c.to_string());
        }
        assert_eq!(BondSymbol::from_char('.'), None);
        assert_eq!(BondSymbol::from_char('~'), None);
    }

    #[test]
    fn token_text_must_be_one_character() {
        assert_eq!(BondSymbol::from_token_text("="), Some(BondSymbol::Double));
        assert_eq!(BondSymbol::from_token_text("=="), None);
        assert_eq!(BondSymbol::from_token_text(""), None);
    }

    #[test]
    fn implicit_displays_as_single() {
        assert_eq!(BondSymbol::default(), BondSymbol::Implicit);
        assert_eq!(BondSymbol::Implicit.to_string(), "-");
        assert_eq!(BondSymbol::Implicit.as_str(), "");
        assert!(!BondSymbol::Implicit.is_explicit());
        assert!(!BondSymbol::Disconnected.is_bond());
    }
}
