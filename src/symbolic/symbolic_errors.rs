use crate::symbolic::lexer::{Token, TokenKind};
use std::fmt;

/// Errors of the symbolic engine.
///
/// Lexing and parsing abort on the first offending character or token, `resolve` aborts on
/// the first unresolved variable or domain violation. Nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// character the lexer does not recognize
    Lex { ch: char, position: usize },
    /// token no grammar production accepts at this point
    Parse {
        found: Token,
        expected: Vec<TokenKind>,
    },
    /// numeric lexeme the scalar type cannot represent (the imaginary unit for real scalars)
    InvalidLiteral { lexeme: String, position: usize },
    /// `resolve` reached a free variable
    UnresolvedVariable { name: String },
    /// arithmetic outside the domain of an operation
    Domain {
        operation: &'static str,
        reason: String,
    },
    /// substitution built from inconsistent parallel lists
    InvalidSubstitution { reason: String },
    /// numeric parameter outside the range an operation accepts
    InvalidArgument { reason: String },
}

impl SymbolicError {
    /// Offset in the input text the error refers to, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            SymbolicError::Lex { position, .. } => Some(*position),
            SymbolicError::Parse { found, .. } => Some(found.position),
            SymbolicError::InvalidLiteral { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl fmt::Display for SymbolicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolicError::Lex { ch, position } => {
                write!(f, "Unexpected character '{}' on pos {}", ch, position)
            }
            SymbolicError::Parse { found, expected } => {
                let expected: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
                write!(
                    f,
                    "Got unexpected token \"{}\" of type {} on pos {}, expected one of: {}",
                    found.lexeme,
                    found.kind,
                    found.position,
                    expected.join(", ")
                )
            }
            SymbolicError::InvalidLiteral { lexeme, position } => {
                write!(f, "Literal \"{}\" on pos {} is not supported", lexeme, position)
            }
            SymbolicError::UnresolvedVariable { name } => {
                write!(f, "Variable \"{}\" has no value", name)
            }
            SymbolicError::Domain { operation, reason } => {
                write!(f, "Domain error in {}: {}", operation, reason)
            }
            SymbolicError::InvalidSubstitution { reason } => {
                write!(f, "Invalid substitution: {}", reason)
            }
            SymbolicError::InvalidArgument { reason } => {
                write!(f, "Invalid argument: {}", reason)
            }
        }
    }
}

impl std::error::Error for SymbolicError {}
