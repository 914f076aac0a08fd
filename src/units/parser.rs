//! Unit expression parser.
//!
//! Accepts the forms found in spectral file headers: `nm`, `erg/s/cm^2/AA`,
//! `erg / (s cm2 Angstrom)`, `W m**-2 Hz-1`, `1e-17 erg/s/cm^2/Angstrom`.
//! A `/` applies to the single factor that follows it.

use super::dimension::Dimension;
use crate::error::{Result, SpecplotError};

/// Scale to SI and dimension of a parsed expression.
pub(crate) type Term = (f64, Dimension);

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Symbol(String),
    Exponent(i32),
    Mul,
    Div,
    Pow,
    LParen,
    RParen,
}

const PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("μ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
];

/// Units that accept SI prefixes.
fn prefixable(symbol: &str) -> Option<Term> {
    let term = match symbol {
        "m" => (1.0, Dimension::LENGTH),
        "g" => (1e-3, Dimension::MASS),
        "s" => (1.0, Dimension::TIME),
        "Hz" => (1.0, Dimension::FREQUENCY),
        "J" => (1.0, Dimension::ENERGY),
        "W" => (1.0, Dimension::POWER),
        "erg" => (1e-7, Dimension::ENERGY),
        "eV" => (1.602_176_634e-19, Dimension::ENERGY),
        "Jy" => (1e-26, Dimension::SPECTRAL_FLUX_DENSITY),
        "K" => (1.0, Dimension::TEMPERATURE),
        "A" => (1.0, Dimension::CURRENT),
        "pc" => (3.085_677_581_491_367_3e16, Dimension::LENGTH),
        _ => return None,
    };
    Some(term)
}

/// Units matched only by their full name.
fn named(symbol: &str) -> Option<Term> {
    let term = match symbol {
        "Angstrom" | "angstrom" | "AA" | "Å" | "Ang" => (1e-10, Dimension::LENGTH),
        "micron" | "microns" => (1e-6, Dimension::LENGTH),
        "min" => (60.0, Dimension::TIME),
        "hr" | "hour" => (3600.0, Dimension::TIME),
        "day" => (86_400.0, Dimension::TIME),
        "ct" | "count" | "counts" | "one" | "dimensionless" => (1.0, Dimension::DIMENSIONLESS),
        _ => return None,
    };
    Some(term)
}

/// Resolve a bare symbol, trying full names, then prefix + unit.
pub(crate) fn lookup_symbol(symbol: &str) -> Option<Term> {
    if let Some(term) = named(symbol).or_else(|| prefixable(symbol)) {
        return Some(term);
    }

    PREFIXES.iter().find_map(|(prefix, factor)| {
        symbol
            .strip_prefix(prefix)
            .filter(|rest| !rest.is_empty())
            .and_then(prefixable)
            .map(|(scale, dim)| (scale * factor, dim))
    })
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphabetic() || c == 'Å' || c == 'µ' || c == 'μ'
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut spaced = false;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            spaced = true;
            i += 1;
            continue;
        }

        let follows_factor = matches!(
            tokens.last(),
            Some(Token::Symbol(_)) | Some(Token::RParen)
        ) && !spaced;
        let after_pow = matches!(tokens.last(), Some(Token::Pow));
        let signed_digit = (c == '-' || c == '+')
            && chars.get(i + 1).map_or(false, |n| n.is_ascii_digit());

        if (c.is_ascii_digit() || signed_digit) && (follows_factor || after_pow) {
            // Integer exponent: `cm2`, `s-1`, `^-2`
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            let exp = text
                .parse::<i32>()
                .map_err(|e| SpecplotError::unit_parse(input, e.to_string()))?;
            tokens.push(Token::Exponent(exp));
        } else if c.is_ascii_digit()
            || signed_digit
            || (c == '.' && chars.get(i + 1).map_or(false, |n| n.is_ascii_digit())
                && !follows_factor)
        {
            let start = i;
            i += 1;
            while i < chars.len() {
                let ch = chars[i];
                let exp_sign = (ch == '-' || ch == '+')
                    && matches!(chars.get(i - 1), Some('e') | Some('E'));
                if ch.is_ascii_digit() || ch == '.' || ch == 'e' || ch == 'E' || exp_sign {
                    i += 1;
                } else {
                    break;
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| SpecplotError::unit_parse(input, format!("bad number '{}'", text)))?;
            tokens.push(Token::Number(value));
        } else if is_symbol_char(c) {
            let start = i;
            while i < chars.len() && is_symbol_char(chars[i]) {
                i += 1;
            }
            tokens.push(Token::Symbol(chars[start..i].iter().collect()));
        } else {
            match c {
                '*' if chars.get(i + 1) == Some(&'*') => {
                    tokens.push(Token::Pow);
                    i += 1;
                }
                '*' | '.' => tokens.push(Token::Mul),
                '/' => tokens.push(Token::Div),
                '^' => tokens.push(Token::Pow),
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                other => {
                    return Err(SpecplotError::unit_parse(
                        input,
                        format!("unexpected character '{}'", other),
                    ))
                }
            }
            i += 1;
        }

        spaced = false;
    }

    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, reason: impl Into<String>) -> SpecplotError {
        SpecplotError::unit_parse(self.input, reason)
    }

    fn product(&mut self) -> Result<Term> {
        let (mut scale, mut dim) = self.power()?;

        loop {
            let divide = match self.peek() {
                Some(Token::Mul) => {
                    self.pos += 1;
                    false
                }
                Some(Token::Div) => {
                    self.pos += 1;
                    true
                }
                Some(Token::Number(_)) | Some(Token::Symbol(_)) | Some(Token::LParen) => false,
                _ => break,
            };

            let (s, d) = self.power()?;
            let combined = if divide {
                scale /= s;
                dim.checked_div(d)
            } else {
                scale *= s;
                dim.checked_mul(d)
            };
            dim = combined.ok_or_else(|| self.error("exponent out of range"))?;
        }

        Ok((scale, dim))
    }

    fn power(&mut self) -> Result<Term> {
        let (scale, dim) = self.primary()?;

        let exp = match self.peek() {
            Some(Token::Pow) => {
                self.pos += 1;
                match self.next() {
                    Some(Token::Exponent(e)) => e,
                    _ => return Err(self.error("expected integer exponent")),
                }
            }
            Some(Token::Exponent(e)) => {
                let e = *e;
                self.pos += 1;
                e
            }
            _ => 1,
        };

        let dim = dim
            .checked_powi(exp)
            .ok_or_else(|| self.error("exponent out of range"))?;
        Ok((scale.powi(exp), dim))
    }

    fn primary(&mut self) -> Result<Term> {
        match self.next() {
            Some(Token::Number(value)) => Ok((value, Dimension::DIMENSIONLESS)),
            Some(Token::Symbol(symbol)) => lookup_symbol(&symbol)
                .ok_or_else(|| self.error(format!("unknown unit '{}'", symbol))),
            Some(Token::LParen) => {
                let term = self.product()?;
                match self.next() {
                    Some(Token::RParen) => Ok(term),
                    _ => Err(self.error("missing ')'")),
                }
            }
            Some(token) => Err(self.error(format!("unexpected {:?}", token))),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

/// Parse a unit expression into its SI scale and dimension.
pub(crate) fn parse_expression(input: &str) -> Result<Term> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok((1.0, Dimension::DIMENSIONLESS));
    }

    let tokens = tokenize(trimmed)?;
    let mut parser = Parser {
        input: trimmed,
        tokens,
        pos: 0,
    };
    let term = parser.product()?;

    if parser.pos < parser.tokens.len() {
        return Err(parser.error("trailing tokens"));
    }
    if term.0 == 0.0 || !term.0.is_finite() {
        return Err(parser.error(format!("scale {} is not a usable factor", term.0)));
    }

    Ok(term)
}
