//! Recursive descent parser with precedence climbing for binary operators.
//!
//! Grammar:
//!
//! ```text
//! Expression     := Additive [As]
//! Additive       := Multiplicative (('+' | '-') Multiplicative)*
//! Multiplicative := Power (('*' | '/' | '%') Power)*
//! Power          := Primary ['^' Power]
//! Primary        := ColumnRef | FunctionCall | '(' Expression ')'
//! FunctionCall   := FunctionName '(' Expression (',' Expression)* ')'
//! As             := ('AS' | 'as') ColumnRef
//! ```
//!
//! A top-level expression must apply at least one operator or function.
//! Arity mismatches are recorded and parsing continues; every other error
//! stops the parse. Either way the caller gets every error recorded.

use super::ast::SyntaxNode;
use super::error::{ParseError, ParseErrors};
use super::function::{ComputedFunction, Operator, Precedence};
use super::token::{Token, TokenKind};

/// Default limit on nested parentheses, function calls and operators.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parse a token list with the default depth limit.
pub fn parse(tokens: &[Token]) -> Result<SyntaxNode, ParseErrors> {
    Parser::new(tokens).parse()
}

/// Single-use parser over a borrowed token list.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            errors: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole token list into a single expression tree.
    pub fn parse(mut self) -> Result<SyntaxNode, ParseErrors> {
        let result = self.parse_top_level();
        let errors = std::mem::take(&mut self.errors);

        match result {
            Ok(tree) => match ParseErrors::new(errors) {
                Some(errors) => Err(errors),
                None => Ok(tree),
            },
            Err(error) => Err(ParseErrors::ending_with(errors, error)),
        }
    }

    fn parse_top_level(&mut self) -> Result<SyntaxNode, ParseError> {
        if self.is_eof() {
            return Err(self.unexpected("expression"));
        }

        let tree = self.parse_expression()?;

        if !self.is_eof() {
            return Err(self.unexpected("end of input"));
        }

        if let SyntaxNode::Column { name, span } = tree.unwrap_parens() {
            return Err(ParseError::BareColumn {
                name: name.clone(),
                position: span.start,
            });
        }

        Ok(tree)
    }

    fn parse_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.parse_binary(Precedence::AddSub)?;

        if let Some(as_token) = self.peek().filter(|t| t.kind == TokenKind::As) {
            let position = as_token.position();
            self.advance();
            let alias = self.expect_column_name()?;
            attach_alias(&mut node, alias, position)?;
        }

        Ok(node)
    }

    /// Precedence climbing over binary operators.
    ///
    /// A left-associative chain is built in a loop rather than by recursion,
    /// so the height of the tree is checked against the depth limit each
    /// time an operator wraps `left`.
    fn parse_binary(&mut self, min_prec: Precedence) -> Result<SyntaxNode, ParseError> {
        let base = self.depth;
        let result = self.parse_binary_chain(min_prec);
        self.depth = base;
        result
    }

    fn parse_binary_chain(&mut self, min_prec: Precedence) -> Result<SyntaxNode, ParseError> {
        let base = self.depth;
        let mut left = self.parse_primary()?;
        // Levels of operators, calls and parens, not counting columns
        let mut height = left.depth() - 1;

        while let Some((operator, position)) = self.peek_operator() {
            let prec = operator.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();

            let next_prec = if operator.is_right_associative() {
                prec
            } else {
                prec.next()
            };
            self.depth = base + 1;
            let right = self.parse_binary(next_prec)?;

            height = 1 + height.max(right.depth() - 1);
            if base + height > self.max_depth {
                return Err(ParseError::TooDeep {
                    max_depth: self.max_depth,
                    position,
                });
            }

            left = SyntaxNode::binary(operator, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<SyntaxNode, ParseError> {
        const EXPECTED: &str = "column name, function or '('";

        let Some(token) = self.peek() else {
            return Err(self.unexpected(EXPECTED));
        };

        match token.kind {
            TokenKind::ColumnRef => {
                self.advance();
                Ok(SyntaxNode::column(token.text.clone(), token.span))
            }
            TokenKind::Function(function) => {
                self.advance();
                let position = token.position();
                self.descend(position, |p| p.parse_function_call(function, position))
            }
            TokenKind::LeftParen => {
                self.advance();
                self.descend(token.position(), |p| {
                    let inner = p.parse_expression()?;
                    p.expect(TokenKind::RightParen)?;
                    Ok(SyntaxNode::paren(inner))
                })
            }
            _ => Err(self.unexpected(EXPECTED)),
        }
    }

    fn parse_function_call(
        &mut self,
        function: ComputedFunction,
        position: usize,
    ) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::LeftParen)?;

        let mut args = vec![self.parse_expression()?];
        while self.consume(TokenKind::Comma) {
            args.push(self.parse_expression()?);
        }

        self.expect(TokenKind::RightParen)?;

        let arity = function.arity();
        if !arity.accepts(args.len()) {
            self.errors.push(ParseError::Arity {
                function,
                expected: arity,
                found: args.len(),
                position,
            });
        }

        Ok(SyntaxNode::function(function, args))
    }

    /// Run `f` one nesting level deeper, failing past the depth limit.
    /// `position` is the token that opened the new level.
    fn descend<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep {
                max_depth: self.max_depth,
                position,
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ==================== Helper methods ====================

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_operator(&self) -> Option<(Operator, usize)> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Operator(operator) => Some((operator, token.position())),
            _ => None,
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.display_name()))
        }
    }

    fn expect_column_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::ColumnRef => {
                self.advance();
                Ok(token.text.clone())
            }
            _ => Err(self.unexpected("column name")),
        }
    }

    /// Position of the current token, or the end of the input.
    fn current_position(&self) -> usize {
        match self.peek() {
            Some(token) => token.position(),
            None => self.tokens.last().map_or(0, |t| t.span.end),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: describe(token),
                position: token.position(),
            },
            None => ParseError::UnexpectedEnd {
                expected: expected.to_string(),
                position: self.current_position(),
            },
        }
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::ColumnRef => format!("column \"{}\"", token.text),
        kind => kind.display_name(),
    }
}

/// Name the computed column produced by `node`, looking through parentheses.
fn attach_alias(node: &mut SyntaxNode, name: String, position: usize) -> Result<(), ParseError> {
    match node {
        SyntaxNode::Paren { inner } => attach_alias(inner, name, position),
        SyntaxNode::BinaryOp { alias, .. } | SyntaxNode::Function { alias, .. } => {
            if let Some(existing) = alias {
                return Err(ParseError::DuplicateAlias {
                    existing: existing.clone(),
                    position,
                });
            }
            *alias = Some(name);
            Ok(())
        }
        SyntaxNode::Column { name: column, .. } => Err(ParseError::AliasOnColumn {
            name: column.clone(),
            position,
        }),
    }
}
