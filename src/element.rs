//! Periodic table symbols and the SMILES spelling rules built on them.
//!
//! Outside brackets SMILES only admits the organic subset and six aromatic
//! lowercase forms; inside brackets every element 1–118 is legal, plus a
//! slightly larger set of aromatic spellings.

use serde::Serialize;

/// Chemical elements 1–118, discriminant equal to the atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He = 2,
    Li = 3,
    Be = 4,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Ne = 10,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Ar = 18,
    K = 19,
    Ca = 20,
    Sc = 21,
    Ti = 22,
    V = 23,
    Cr = 24,
    Mn = 25,
    Fe = 26,
    Co = 27,
    Ni = 28,
    Cu = 29,
    Zn = 30,
    Ga = 31,
    Ge = 32,
    As = 33,
    Se = 34,
    Br = 35,
    Kr = 36,
    Rb = 37,
    Sr = 38,
    Y = 39,
    Zr = 40,
    Nb = 41,
    Mo = 42,
    Tc = 43,
    Ru = 44,
    Rh = 45,
    Pd = 46,
    Ag = 47,
    Cd = 48,
    In = 49,
    Sn = 50,
    Sb = 51,
    Te = 52,
    I = 53,
    Xe = 54,
    Cs = 55,
    Ba = 56,
    La = 57,
    Ce = 58,
    Pr = 59,
    Nd = 60,
    Pm = 61,
    Sm = 62,
    Eu = 63,
    Gd = 64,
    Tb = 65,
    Dy = 66,
    Ho = 67,
    Er = 68,
    Tm = 69,
    Yb = 70,
    Lu = 71,
    Hf = 72,
    Ta = 73,
    W = 74,
    Re = 75,
    Os = 76,
    Ir = 77,
    Pt = 78,
    Au = 79,
    Hg = 80,
    Tl = 81,
    Pb = 82,
    Bi = 83,
    Po = 84,
    At = 85,
    Rn = 86,
    Fr = 87,
    Ra = 88,
    Ac = 89,
    Th = 90,
    Pa = 91,
    U = 92,
    Np = 93,
    Pu = 94,
    Am = 95,
    Cm = 96,
    Bk = 97,
    Cf = 98,
    Es = 99,
    Fm = 100,
    Md = 101,
    No = 102,
    Lr = 103,
    Rf = 104,
    Db = 105,
    Sg = 106,
    Bh = 107,
    Hs = 108,
    Mt = 109,
    Ds = 110,
    Rg = 111,
    Cn = 112,
    Nh = 113,
    Fl = 114,
    Mc = 115,
    Lv = 116,
    Ts = 117,
    Og = 118,
}

impl Element {
    pub fn from_atomic_num(n: u8) -> Option<Element> {
        if (1..=118).contains(&n) {
            // SAFETY: Element is repr(u8) with variants 1..=118, and we checked bounds.
            Some(unsafe { std::mem::transmute::<u8, Element>(n) })
        } else {
            None
        }
    }

    /// Looks up an element by its capitalized symbol (`"Fe"`, `"C"`).
    pub fn from_symbol(s: &str) -> Option<Element> {
        SYMBOLS
            .iter()
            .position(|sym| *sym == s)
            .and_then(|i| Element::from_atomic_num(i as u8 + 1))
    }

    /// Looks up an organic-subset element (`B C N O P S F Cl Br I`).
    pub fn from_organic_symbol(s: &str) -> Option<Element> {
        Element::from_symbol(s).filter(|e| e.is_organic_subset())
    }

    /// Looks up a lowercase aromatic spelling.
    ///
    /// Outside brackets only `b c n o p s` are legal; inside brackets `se`,
    /// `as` and `te` are accepted as well.
    pub fn from_aromatic_symbol(s: &str, bracketed: bool) -> Option<Element> {
        let element = match s {
            "b" => Element::B,
            "c" => Element::C,
            "n" => Element::N,
            "o" => Element::O,
            "p" => Element::P,
            "s" => Element::S,
            "se" if bracketed => Element::Se,
            "as" if bracketed => Element::As,
            "te" if bracketed => Element::Te,
            _ => return None,
        };
        Some(element)
    }

    pub fn atomic_num(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self as usize - 1]
    }

    /// The lowercase aromatic spelling of this element, if SMILES has one.
    pub fn aromatic_symbol(self) -> Option<&'static str> {
        match self {
            Element::B => Some("b"),
            Element::C => Some("c"),
            Element::N => Some("n"),
            Element::O => Some("o"),
            Element::P => Some("p"),
            Element::S => Some("s"),
            Element::Se => Some("se"),
            Element::As => Some("as"),
            Element::Te => Some("te"),
            _ => None,
        }
    }

    pub fn is_organic_subset(self) -> bool {
        matches!(
            self,
            Element::B
                | Element::C
                | Element::N
                | Element::O
                | Element::P
                | Element::S
                | Element::F
                | Element::Cl
                | Element::Br
                | Element::I
        )
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

static SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_through_atomic_number() {
        for n in 1u8..=118 {
            let e = Element::from_atomic_num(n).unwrap();
            assert_eq!(e.atomic_num(), n);
            assert_eq!(Element::from_symbol(e.symbol()), Some(e));
        }
    }

    #[test]
    fn out_of_range_atomic_numbers() {
        assert_eq!(Element::from_atomic_num(0), None);
        assert_eq!(Element::from_atomic_num(119), None);
    }

    #[test]
    fn symbol_lookup_is_case_sensitive() {
        assert_eq!(Element::from_symbol("Co"), Some(Element::Co));
        assert_eq!(Element::from_symbol("CO"), None);
        assert_eq!(Element::from_symbol("co"), None);
        assert_eq!(Element::from_symbol("Xx"), None);
    }

    #[test]
    fn organic_subset_has_ten_members() {
        let organic: Vec<_> = (1u8..=118)
            .filter_map(Element::from_atomic_num)
            .filter(|e| e.is_organic_subset())
            .map(|e| e.symbol())
            .collect();
        assert_eq!(
            organic,
            vec!["B", "C", "N", "O", "F", "P", "S", "Cl", "Br", "I"]
        );
        assert_eq!(Element::from_organic_symbol("Cl"), Some(Element::Cl));
        assert_eq!(Element::from_organic_symbol("Fe"), None);
    }

    #[test]
    fn aromatic_spellings_depend_on_context() {
        assert_eq!(Element::from_aromatic_symbol("c", false), Some(Element::C));
        assert_eq!(Element::from_aromatic_symbol("se", false), None);
        assert_eq!(Element::from_aromatic_symbol("se", true), Some(Element::Se));
        assert_eq!(Element::from_aromatic_symbol("f", true), None);
        assert_eq!(Element::Se.aromatic_symbol(), Some("se"));
        assert_eq!(Element::Fe.aromatic_symbol(), None);
    }
}
