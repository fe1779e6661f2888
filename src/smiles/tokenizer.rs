use crate::chirality::{Chirality, CLASS_PREFIXES};
use crate::element::Element;
use crate::smiles::error::{LexError, LexErrorKind};
use crate::smiles::token::{Token, TokenKind};

/// Splits a SMILES string into tokens.
///
/// The whole input is consumed; the returned sequence always ends with an
/// [`TokenKind::Eof`] token positioned at `source.len()`. Whitespace is
/// skipped. Several characters change meaning inside `[...]`: `-` and `+`
/// are charges there, `:` introduces the atom class, and digits are isotope
/// or count values rather than ring numbers.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    start: usize,
    current: usize,
    in_bracket: bool,
    bracket_start: usize,
    bracket_has_symbol: bool,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            in_bracket: false,
            bracket_start: 0,
            bracket_has_symbol: false,
        }
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, LexError> {
        while !self.is_at_end() {
            self.start = self.current;
            if self.in_bracket {
                self.scan_bracket_token()?;
            } else {
                self.scan_token()?;
            }
        }

        if self.in_bracket {
            return Err(LexError::new(
                self.source.len(),
                LexErrorKind::UnterminatedBracket {
                    start: self.bracket_start,
                },
            ));
        }

        self.tokens.push(Token::eof(self.source.len()));
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        match self.advance() {
            ' ' | '\t' | '\r' | '\n' => {}
            '[' => {
                self.in_bracket = true;
                self.bracket_start = self.start;
                self.bracket_has_symbol = false;
                self.add(TokenKind::BracketStart);
            }
            '(' => self.add(TokenKind::BranchStart),
            ')' => self.add(TokenKind::BranchEnd),
            '.' => self.add(TokenKind::Dot),
            '-' | '=' | '#' | '$' | ':' | '/' | '\\' => self.add(TokenKind::Bond),
            '+' => self.charge('+'),
            '%' => self.percent_ring_number()?,
            '0'..='9' => self.add(TokenKind::RingNumber),
            '*' => self.add(TokenKind::Symbol),
            c if c.is_ascii_alphabetic() => self.organic_symbol(c)?,
            c => return Err(self.error_at_start(LexErrorKind::UnexpectedChar(c))),
        }
        Ok(())
    }

    fn scan_bracket_token(&mut self) -> Result<(), LexError> {
        match self.advance() {
            ' ' | '\t' | '\r' | '\n' => {}
            ']' => {
                self.in_bracket = false;
                self.add(TokenKind::BracketEnd);
            }
            '0'..='9' => {
                self.digits();
                self.add(TokenKind::Isotope);
            }
            '@' => self.chirality()?,
            sign @ ('+' | '-') => self.charge(sign),
            ':' => {
                if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(LexError::new(
                        self.current,
                        LexErrorKind::DigitExpected(':'),
                    ));
                }
                self.digits();
                self.add(TokenKind::Class);
            }
            '*' => {
                self.bracket_has_symbol = true;
                self.add(TokenKind::Symbol);
            }
            'H' if self.bracket_has_symbol => {
                self.digits();
                self.add(TokenKind::HCount);
            }
            c if c.is_ascii_alphabetic() => {
                self.bracket_symbol(c)?;
                self.bracket_has_symbol = true;
            }
            c => return Err(self.error_at_start(LexErrorKind::UnexpectedChar(c))),
        }
        Ok(())
    }

    /// Organic-subset or aromatic symbol outside brackets. Two-letter
    /// symbols win when they are in the subset (`Cl`, `Br`).
    fn organic_symbol(&mut self, first: char) -> Result<(), LexError> {
        if first.is_ascii_uppercase() {
            if let Some(second) = self.peek().filter(|c| c.is_ascii_lowercase()) {
                let pair = &self.source[self.start..self.current + second.len_utf8()];
                if Element::from_organic_symbol(pair).is_some() {
                    self.advance();
                    self.add(TokenKind::Symbol);
                    return Ok(());
                }
            }
            if Element::from_organic_symbol(self.lexeme()).is_some() {
                self.add(TokenKind::Symbol);
                return Ok(());
            }
            return Err(self.invalid_symbol("organic subset"));
        }

        if Element::from_aromatic_symbol(self.lexeme(), false).is_some() {
            self.add(TokenKind::Symbol);
            Ok(())
        } else {
            Err(self.invalid_symbol("aromatic"))
        }
    }

    /// Any element symbol, or a bracket-only aromatic form such as `se`.
    fn bracket_symbol(&mut self, first: char) -> Result<(), LexError> {
        if let Some(second) = self.peek().filter(|c| c.is_ascii_lowercase()) {
            let pair = &self.source[self.start..self.current + second.len_utf8()];
            let known = if first.is_ascii_uppercase() {
                Element::from_symbol(pair).is_some()
            } else {
                Element::from_aromatic_symbol(pair, true).is_some()
            };
            if known {
                self.advance();
                self.add(TokenKind::Symbol);
                return Ok(());
            }
        }

        let single = self.lexeme();
        let known = if first.is_ascii_uppercase() {
            Element::from_symbol(single).is_some()
        } else {
            Element::from_aromatic_symbol(single, true).is_some()
        };
        if known {
            self.add(TokenKind::Symbol);
            Ok(())
        } else {
            Err(self.invalid_symbol("bracket"))
        }
    }

    fn chirality(&mut self) -> Result<(), LexError> {
        match self.peek() {
            Some('@') => {
                self.advance();
            }
            Some(c) if CLASS_PREFIXES.contains(&c) => {
                while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                    self.advance();
                }
            }
            _ => {}
        }

        let text = self.lexeme();
        if Chirality::parse(text).is_none() {
            return Err(self.error_at_start(LexErrorKind::InvalidChirality(text.to_owned())));
        }
        self.add(TokenKind::Chirality);
        Ok(())
    }

    /// Magnitude is a digit run or a run of repeated signs, never both.
    fn charge(&mut self, sign: char) {
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.digits();
        } else {
            while self.peek() == Some(sign) {
                self.advance();
            }
        }
        self.add(TokenKind::Charge);
    }

    fn percent_ring_number(&mut self) -> Result<(), LexError> {
        for _ in 0..2 {
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error_at_start(LexErrorKind::MalformedRingNumber));
            }
            self.advance();
        }
        self.add(TokenKind::RingNumber);
        Ok(())
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    // Only called when a character remains.
    fn advance(&mut self) -> char {
        let c = self.peek().unwrap_or('\0');
        self.current += c.len_utf8();
        c
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(kind, self.lexeme(), self.start));
    }

    fn error_at_start(&self, kind: LexErrorKind) -> LexError {
        LexError::new(self.start, kind)
    }

    fn invalid_symbol(&self, context: &'static str) -> LexError {
        self.error_at_start(LexErrorKind::InvalidElement {
            text: self.lexeme().to_owned(),
            context,
        })
    }
}
