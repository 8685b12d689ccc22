// ABOUTME: Recursive-descent parser turning a token stream into an expression tree

use crate::error::ParseError;
use crate::expr::{Expr, ExprKind, Literal};
use crate::lexer::{tokenize, Position, Token, TokenKind};

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Parses every top-level expression, collecting every error encountered
    /// rather than stopping at the first one so a single bad form doesn't
    /// blank out the rest of the program.
    fn parse_program(&mut self) -> Vec<Expr> {
        let mut exprs = Vec::new();
        while !self.at_eof() {
            match self.parse_expr() {
                Ok(expr) => exprs.push(expr),
                Err(err) => {
                    self.errors.push(err);
                    self.recover();
                }
            }
        }
        exprs
    }

    /// Skips past the offending token so parsing can continue after an error.
    fn recover(&mut self) {
        if !self.at_eof() {
            self.advance();
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Eof => Err(unexpected(token.position, "an expression", "end of input")),
            TokenKind::RParen => Err(ParseError::UnexpectedClosing {
                line: token.position.line,
                column: token.position.column,
                delim: ')',
            }),
            TokenKind::RBracket => Err(ParseError::UnexpectedClosing {
                line: token.position.line,
                column: token.position.column,
                delim: ']',
            }),
            TokenKind::RBrace => Err(ParseError::UnexpectedClosing {
                line: token.position.line,
                column: token.position.column,
                delim: '}',
            }),
            TokenKind::Error(lexeme) => Err(ParseError::Other {
                line: token.position.line,
                column: token.position.column,
                message: format!("malformed token '{}'", lexeme),
            }),
            TokenKind::LParen => self.parse_seq(TokenKind::RParen, ')', ExprKind::List),
            TokenKind::LBracket => self.parse_seq(TokenKind::RBracket, ']', ExprKind::Vector),
            TokenKind::LBrace => self.parse_map(),
            TokenKind::Quote => {
                self.advance();
                let inner = self.parse_expr()?;
                Ok(Expr::new(ExprKind::Quote(Box::new(inner)), token.position))
            }
            TokenKind::Quasiquote => {
                self.advance();
                let inner = self.parse_expr()?;
                Ok(Expr::new(
                    ExprKind::Quasiquote(Box::new(inner)),
                    token.position,
                ))
            }
            TokenKind::Unquote => {
                self.advance();
                let inner = self.parse_expr()?;
                Ok(Expr::new(ExprKind::Unquote(Box::new(inner)), token.position))
            }
            TokenKind::Splice => {
                self.advance();
                let inner = self.parse_expr()?;
                Ok(Expr::new(ExprKind::Splice(Box::new(inner)), token.position))
            }
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Number(n)),
                    token.position,
                ))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::String(s)),
                    token.position,
                ))
            }
            TokenKind::Keyword(k) => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Keyword(k)),
                    token.position,
                ))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Bool(true)),
                    token.position,
                ))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Bool(false)),
                    token.position,
                ))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::new(ExprKind::Literal(Literal::Nil), token.position))
            }
            TokenKind::Symbol(s) => {
                self.advance();
                Ok(Expr::new(ExprKind::Symbol(s), token.position))
            }
        }
    }

    fn parse_seq(
        &mut self,
        closing: TokenKind,
        closing_char: char,
        build: impl Fn(Vec<Expr>) -> ExprKind,
    ) -> Result<Expr, ParseError> {
        let open = self.advance();
        let mut items = Vec::new();
        loop {
            if self.at_eof() {
                return Err(ParseError::UnterminatedCollection {
                    line: open.position.line,
                    column: open.position.column,
                });
            }
            if std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(&closing) {
                self.advance();
                break;
            }
            items.push(self.parse_expr_or_recover(closing_char)?);
        }
        Ok(Expr::new(build(items), open.position))
    }

    fn parse_map(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance();
        let mut pairs = Vec::new();
        loop {
            if self.at_eof() {
                return Err(ParseError::UnterminatedCollection {
                    line: open.position.line,
                    column: open.position.column,
                });
            }
            if matches!(self.peek().kind, TokenKind::RBrace) {
                self.advance();
                break;
            }
            let key = self.parse_expr_or_recover('}')?;
            if self.at_eof() {
                return Err(ParseError::UnterminatedCollection {
                    line: open.position.line,
                    column: open.position.column,
                });
            }
            let value = self.parse_expr_or_recover('}')?;
            pairs.push((key, value));
        }
        Ok(Expr::new(ExprKind::Map(pairs), open.position))
    }

    /// Used inside a collection: a nested parse error still aborts the
    /// enclosing collection (it can't recover mid-structure), but it is
    /// recorded so the caller can continue with the next top-level form.
    fn parse_expr_or_recover(&mut self, _closing_char: char) -> Result<Expr, ParseError> {
        self.parse_expr()
    }
}

fn unexpected(position: Position, expected: &str, got: &str) -> ParseError {
    ParseError::UnexpectedToken {
        line: position.line,
        column: position.column,
        expected: expected.to_string(),
        got: got.to_string(),
    }
}

/// Parses a whole program, collecting every top-level form and every error.
/// `Ok` never means "no errors" by itself — callers that want REPL-like
/// continuation should check `errors` alongside `exprs`.
pub struct ParseResult {
    pub exprs: Vec<Expr>,
    pub errors: Vec<ParseError>,
}

pub fn parse_program(source: &str) -> ParseResult {
    let tokens = tokenize(source);
    let mut parser = Parser::new(tokens);
    let exprs = parser.parse_program();
    ParseResult {
        exprs,
        errors: parser.errors,
    }
}

/// Convenience wrapper for callers that want a single `Result` and don't
/// care about partial recovery (e.g. the host's lex/parse-failure path).
pub fn parse(source: &str) -> Result<Vec<Expr>, Vec<ParseError>> {
    let result = parse_program(source);
    if result.errors.is_empty() {
        Ok(result.exprs)
    } else {
        Err(result.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(src: &str) -> Vec<Expr> {
        parse(src).unwrap_or_else(|e| panic!("unexpected parse errors: {:?}", e))
    }

    #[test]
    fn parses_atoms() {
        assert!(matches!(
            ok("42")[0].kind,
            ExprKind::Literal(Literal::Number(n)) if n == 42.0
        ));
        assert!(matches!(ok("nil")[0].kind, ExprKind::Literal(Literal::Nil)));
        assert!(matches!(
            ok("true")[0].kind,
            ExprKind::Literal(Literal::Bool(true))
        ));
        assert!(matches!(ok("x")[0].kind, ExprKind::Symbol(ref s) if s == "x"));
    }

    #[test]
    fn parses_list_vector_map() {
        assert!(matches!(ok("(1 2 3)")[0].kind, ExprKind::List(ref v) if v.len() == 3));
        assert!(matches!(ok("[1 2 3]")[0].kind, ExprKind::Vector(ref v) if v.len() == 3));
        assert!(matches!(ok("{:a 1 :b 2}")[0].kind, ExprKind::Map(ref v) if v.len() == 2));
    }

    #[test]
    fn parses_quote_family() {
        assert!(matches!(ok("'x")[0].kind, ExprKind::Quote(_)));
        assert!(matches!(ok("`x")[0].kind, ExprKind::Quasiquote(_)));
        assert!(matches!(ok("~x")[0].kind, ExprKind::Unquote(_)));
        assert!(matches!(ok("~@x")[0].kind, ExprKind::Splice(_)));
    }

    #[test]
    fn empty_list_parses_as_empty_list_expr() {
        match &ok("()")[0].kind {
            ExprKind::List(items) => assert!(items.is_empty()),
            other => panic!("expected empty list, got {:?}", other),
        }
    }

    #[test]
    fn reports_unterminated_collection() {
        let result = parse_program("(1 2");
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, ParseError::UnterminatedCollection { .. })));
    }

    #[test]
    fn reports_unexpected_closing_delimiter() {
        let result = parse_program(")");
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, ParseError::UnexpectedClosing { .. })));
    }

    #[test]
    fn collects_multiple_errors_and_keeps_going() {
        let result = parse_program(") 1 )");
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.exprs.len(), 1);
    }

    #[test]
    fn parses_multiple_top_level_forms() {
        let exprs = ok("1 2 3");
        assert_eq!(exprs.len(), 3);
    }
}
