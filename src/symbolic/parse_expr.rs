use crate::symbolic::expression::Expression;
use crate::symbolic::lexer::{Lexer, Token, TokenKind};
use crate::symbolic::symbolic_engine::{Expr, Node};
use crate::symbolic::symbolic_errors::SymbolicError;
use crate::symbolic::symbolic_traits::Scalar;
use log::debug;
use std::marker::PhantomData;
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedExpr::symbolic::parse_expr::parse_expression_func;
/// let parsed_expression = parse_expression_func::<f64>("x^2.5 * ln(x + y)").unwrap();
/// assert_eq!(parsed_expression.to_string(), "((x ^ 2.5) * ln((x + y)))");
/// ```
//   recursive descent over the precedence levels, lowest first
//
//     expr    := term (('+' | '-') term)*          left-assoc
//     term    := power (('*' | '/') power)*        left-assoc
//     power   := atom ('^' power)?                 right-assoc
//     atom    := NUMBER | VARIABLE | '(' expr ')'
//              | ('sin'|'cos'|'ln'|'exp') '(' expr ')'
//
//                  "y^2+exp(x)*3"
//                |  expr                        |
//                |______________________________|
//                |  term     +   term           |
//                |  y^2      |   exp(x)*3       |
//                |___\|/_____|______\|/_________|
//                |  power    |  power * power   |
//                |  y ^ 2    |  exp(x)   3      |
//                |___________|__\|/_____________|
//                |           |  atom: exp(expr) |
//                |___________|__________________|
pub struct Parser<'a, T> {
    lexer: Lexer<'a>,
    // token under the cursor
    current: Token,
    // last consumed token
    previous: Token,
    _scalar: PhantomData<T>,
}

impl<'a, T: Scalar> Parser<'a, T> {
    /// Creates a parser and reads the first token.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, SymbolicError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            previous: Token::eof(0),
            _scalar: PhantomData,
        })
    }

    fn advance(&mut self) -> Result<(), SymbolicError> {
        let next = self.lexer.next_token()?;
        self.previous = std::mem::replace(&mut self.current, next);
        Ok(())
    }

    fn unexpected(&self, expected: &[TokenKind]) -> SymbolicError {
        SymbolicError::Parse {
            found: self.current.clone(),
            expected: expected.to_vec(),
        }
    }

    /// Moves past the current token if its kind is one of `kinds`, fails otherwise.
    fn expect(&mut self, kinds: &[TokenKind]) -> Result<(), SymbolicError> {
        if !kinds.contains(&self.current.kind) {
            return Err(self.unexpected(kinds));
        }
        self.advance()
    }

    /// Moves past the current token if it is of the given kind.
    /// returns true = success, false = fail
    fn match_kind(&mut self, kind: TokenKind) -> Result<bool, SymbolicError> {
        if self.current.kind == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses the whole input; anything left after the top level expression is an error.
    pub fn parse_expression(&mut self) -> Result<Expression<T>, SymbolicError> {
        let expr = self.parse_expr()?;
        self.expect(&[TokenKind::Eof])?;
        debug!("parsed \"{}\" into {}", self.lexer.input(), expr);
        Ok(Expression::from_node(expr))
    }

    fn parse_expr(&mut self) -> Result<Node<T>, SymbolicError> {
        let mut expr = self.parse_term()?;
        loop {
            if self.match_kind(TokenKind::Plus)? {
                expr = Expr::plus(expr, self.parse_term()?);
            } else if self.match_kind(TokenKind::Minus)? {
                expr = Expr::minus(expr, self.parse_term()?);
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_term(&mut self) -> Result<Node<T>, SymbolicError> {
        let mut term = self.parse_power()?;
        loop {
            if self.match_kind(TokenKind::Mult)? {
                term = Expr::mult(term, self.parse_power()?);
            } else if self.match_kind(TokenKind::Div)? {
                term = Expr::div(term, self.parse_power()?);
            } else {
                return Ok(term);
            }
        }
    }

    fn parse_power(&mut self) -> Result<Node<T>, SymbolicError> {
        let base = self.parse_atom()?;
        if self.match_kind(TokenKind::Pow)? {
            // right-assoc: 2^3^2 = 2^(3^2)
            let exponent = self.parse_power()?;
            return Ok(Expr::pow(base, exponent));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Node<T>, SymbolicError> {
        if self.match_kind(TokenKind::LeftParen)? {
            let expr = self.parse_expr()?;
            self.expect(&[TokenKind::RightParen])?;
            return Ok(expr);
        }

        if self.match_kind(TokenKind::Number)? {
            let token = &self.previous;
            return match T::from_literal(&token.lexeme) {
                Some(value) => Ok(Expr::number(value)),
                None => Err(SymbolicError::InvalidLiteral {
                    lexeme: token.lexeme.clone(),
                    position: token.position,
                }),
            };
        }

        if self.match_kind(TokenKind::Variable)? {
            return Ok(Expr::variable(&self.previous.lexeme));
        }

        let function = self.current.kind;
        let build: fn(Node<T>) -> Node<T> = match function {
            TokenKind::Sin => Expr::sin,
            TokenKind::Cos => Expr::cos,
            TokenKind::Ln => Expr::ln,
            TokenKind::Exp => Expr::exp,
            _ => return Err(self.unexpected(&TokenKind::ATOM_START)),
        };
        self.advance()?;
        self.expect(&[TokenKind::LeftParen])?;
        let arg = self.parse_expr()?;
        self.expect(&[TokenKind::RightParen])?;
        Ok(build(arg))
    }
}

/// Parses `input` into an expression tree.
pub fn parse_expression_func<T: Scalar>(input: &str) -> Result<Expression<T>, SymbolicError> {
    Parser::new(Lexer::new(input))?.parse_expression()
}
