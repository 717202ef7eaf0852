//! # Lexer
//!
//! Splits an input string into typed tokens, one token per `next_token` call.
//! Runs of spaces and tabs between tokens are skipped, every other character must start
//! a number, an identifier, an operator or a bracket.
//!
//! ```text
//!  "sin(x) * -2.5"
//!   Sin  LeftParen  Variable(x)  RightParen  Mult  Number(-2.5)  Eof
//! ```
//!
//! A leading `+`/`-` belongs to a numeric literal only where an operand is expected
//! (start of input, after an operator or an opening bracket), so `x-1` lexes as
//! `x`, `-`, `1` while `2^-1` lexes as `2`, `^`, `-1`.

use crate::symbolic::symbolic_errors::SymbolicError;
use log::trace;
use regex::Regex;
use std::sync::LazyLock;
use strum_macros::Display;

static SPACE_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]+").expect("valid space pattern"));
static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_]+").expect("valid variable pattern"));
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(0|[1-9][0-9]*)(\.[0-9]+)?").expect("valid number pattern")
});

/// suffix marking an imaginary literal, `i` alone is the imaginary unit
pub const IMAGINARY_UNIT: char = 'i';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    Number,
    Variable,
    Plus,
    Minus,
    Mult,
    Div,
    Pow,
    Sin,
    Cos,
    Ln,
    Exp,
    LeftParen,
    RightParen,
    Eof,
}

impl TokenKind {
    /// kinds that may start an operand (the `atom` production)
    pub const ATOM_START: [TokenKind; 7] = [
        TokenKind::Number,
        TokenKind::Variable,
        TokenKind::LeftParen,
        TokenKind::Sin,
        TokenKind::Cos,
        TokenKind::Ln,
        TokenKind::Exp,
    ];

    fn from_reserved_word(word: &str) -> Option<TokenKind> {
        match word {
            "sin" => Some(TokenKind::Sin),
            "cos" => Some(TokenKind::Cos),
            "ln" => Some(TokenKind::Ln),
            "exp" => Some(TokenKind::Exp),
            _ => None,
        }
    }

    fn from_operator(c: char) -> Option<TokenKind> {
        match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Mult),
            '/' => Some(TokenKind::Div),
            '^' => Some(TokenKind::Pow),
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            _ => None,
        }
    }

    /// true if an operand has to follow a token of this kind
    fn expects_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Mult
                | TokenKind::Div
                | TokenKind::Pow
                | TokenKind::LeftParen
        )
    }
}

/// Smallest lexical unit. `position` is the byte offset of the lexeme in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, position: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.to_string(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    // current byte offset, always on a char boundary
    pos: usize,
    last_kind: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            last_kind: None,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_space_sequence(&mut self) {
        if let Some(m) = SPACE_SEQUENCE.find(self.rest()) {
            self.pos += m.end();
        }
    }

    fn operand_expected(&self) -> bool {
        self.last_kind.map_or(true, |kind| kind.expects_operand())
    }

    fn starts_signed_number(&self) -> bool {
        let mut chars = self.rest().chars();
        matches!(chars.next(), Some('+') | Some('-'))
            && chars.next().is_some_and(|c| c.is_ascii_digit())
            && self.operand_expected()
    }

    /// Consumes the match of `regexp` at the cursor and returns it as a token of `kind`.
    fn token_by_pattern(&mut self, regexp: &Regex, kind: TokenKind) -> Result<Token, SymbolicError> {
        let start = self.pos;
        match regexp.find(self.rest()) {
            Some(m) => {
                self.pos += m.end();
                Ok(Token::new(kind, m.as_str(), start))
            }
            None => Err(SymbolicError::Lex {
                ch: self.peek().unwrap_or('\0'),
                position: start,
            }),
        }
    }

    fn identifier(&mut self) -> Result<Token, SymbolicError> {
        let mut token = self.token_by_pattern(&VARIABLE, TokenKind::Variable)?;
        if let Some(kind) = TokenKind::from_reserved_word(&token.lexeme) {
            token.kind = kind;
        } else if token.lexeme.len() == 1 && token.lexeme.starts_with(IMAGINARY_UNIT) {
            token.kind = TokenKind::Number;
        }
        Ok(token)
    }

    fn number(&mut self) -> Result<Token, SymbolicError> {
        let mut token = self.token_by_pattern(&NUMBER, TokenKind::Number)?;
        if self.peek() == Some(IMAGINARY_UNIT) {
            self.pos += IMAGINARY_UNIT.len_utf8();
            token.lexeme.push(IMAGINARY_UNIT);
        }
        Ok(token)
    }

    /// Returns the next token; at the end of input returns `Eof`, again on every further call.
    pub fn next_token(&mut self) -> Result<Token, SymbolicError> {
        self.skip_space_sequence();

        let Some(current) = self.peek() else {
            return Ok(Token::eof(self.pos));
        };

        let token = if current.is_ascii_alphabetic() || current == '_' {
            self.identifier()?
        } else if current.is_ascii_digit() || self.starts_signed_number() {
            self.number()?
        } else if let Some(kind) = TokenKind::from_operator(current) {
            let start = self.pos;
            self.pos += current.len_utf8();
            Token::new(kind, &self.input[start..self.pos], start)
        } else {
            return Err(SymbolicError::Lex {
                ch: current,
                position: self.pos,
            });
        };
        trace!("token {} \"{}\" at {}", token.kind, token.lexeme, token.position);
        self.last_kind = Some(token.kind);
        Ok(token)
    }
}

/// Lexes the whole input, the trailing `Eof` token included.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SymbolicError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
