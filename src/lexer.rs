// ABOUTME: Lexer module turning source text into a positioned token stream

use nom::{
    branch::alt,
    bytes::complete::{escaped, tag, take_while, take_while1},
    character::complete::{char, digit1, hex_digit1, oct_digit1, none_of, one_of},
    combinator::{opt, recognize},
    sequence::preceded,
    IResult, Parser,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Number(f64),
    String(String),
    Keyword(String),
    True,
    False,
    Nil,
    Symbol(String),
    Quote,
    Quasiquote,
    Unquote,
    Splice,
    Error(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

fn parse_number(input: &str) -> IResult<&str, f64> {
    let hex = recognize(preceded(tag("0x"), hex_digit1))
        .map(|s: &str| i64::from_str_radix(&s[2..], 16).unwrap_or(0) as f64);
    let oct = recognize(preceded(tag("0o"), oct_digit1))
        .map(|s: &str| i64::from_str_radix(&s[2..], 8).unwrap_or(0) as f64);
    let decimal = recognize((
        digit1,
        opt((char('.'), opt(digit1))),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .map(|s: &str| s.parse::<f64>().unwrap_or(0.0));

    let (rest, sign) = opt(char('-'))(input)?;
    let (rest, magnitude) = alt((hex, oct, decimal)).parse(rest)?;
    let value = if sign.is_some() { -magnitude } else { magnitude };
    Ok((rest, value))
}

fn parse_string_body(input: &str) -> IResult<&str, String> {
    let (input, _) = char('"')(input)?;
    if let Ok((input, _)) = char::<_, nom::error::Error<_>>('"')(input) {
        return Ok((input, String::new()));
    }
    let (input, content) = escaped(none_of("\"\\"), '\\', one_of("\"\\nrt"))(input)?;
    let (input, _) = char('"')(input)?;

    let mut out = String::new();
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    Ok((input, out))
}

fn is_symbol_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || "+-*/%<>=!?".contains(c)
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || "_-+*/%<>=!?".contains(c)
}

fn parse_symbol_text(input: &str) -> IResult<&str, String> {
    let (input, first) = one_of(
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_+-*/%<>=!?",
    )(input)?;
    let (input, rest) = take_while(is_symbol_char)(input)?;
    let mut s = String::new();
    s.push(first);
    s.push_str(rest);
    Ok((input, s))
}

fn parse_keyword_text(input: &str) -> IResult<&str, String> {
    let (input, _) = char(':')(input)?;
    let (input, name) = take_while1(is_symbol_char)(input)?;
    Ok((input, name.to_string()))
}

/// Splits source into tokens, tracking line/column. Never fails: unrecognised
/// input becomes an `Error` token so the parser can report it with position
/// and keep going rather than aborting the whole lex.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = source;
    let mut line = 1usize;
    let mut column = 1usize;

    let advance = |rest: &mut &str, line: &mut usize, column: &mut usize, n: usize| {
        for c in rest[..n].chars() {
            if c == '\n' {
                *line += 1;
                *column = 1;
            } else {
                *column += 1;
            }
        }
        *rest = &rest[n..];
    };

    loop {
        // whitespace
        let ws_len = rest
            .char_indices()
            .take_while(|(_, c)| c.is_whitespace())
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        if ws_len > 0 {
            advance(&mut rest, &mut line, &mut column, ws_len);
            continue;
        }

        // comments
        if let Some(stripped) = rest.strip_prefix(";;") {
            let _ = stripped;
            let len = rest.find('\n').unwrap_or(rest.len());
            advance(&mut rest, &mut line, &mut column, len);
            continue;
        }

        if rest.is_empty() {
            break;
        }

        let pos = Position { line, column };
        let c = rest.chars().next().unwrap();

        macro_rules! single {
            ($kind:expr) => {{
                tokens.push(Token { kind: $kind, position: pos });
                advance(&mut rest, &mut line, &mut column, c.len_utf8());
                continue;
            }};
        }

        match c {
            '(' => single!(TokenKind::LParen),
            ')' => single!(TokenKind::RParen),
            '[' => single!(TokenKind::LBracket),
            ']' => single!(TokenKind::RBracket),
            '{' => single!(TokenKind::LBrace),
            '}' => single!(TokenKind::RBrace),
            '\'' => single!(TokenKind::Quote),
            '`' => single!(TokenKind::Quasiquote),
            '"' => {
                if let Ok((remaining, text)) = parse_string_body(rest) {
                    let consumed = rest.len() - remaining.len();
                    tokens.push(Token { kind: TokenKind::String(text), position: pos });
                    advance(&mut rest, &mut line, &mut column, consumed);
                    continue;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Error("unterminated string".to_string()),
                        position: pos,
                    });
                    advance(&mut rest, &mut line, &mut column, rest.len());
                    continue;
                }
            }
            '~' => {
                if rest.starts_with("~@") {
                    tokens.push(Token { kind: TokenKind::Splice, position: pos });
                    advance(&mut rest, &mut line, &mut column, 2);
                } else {
                    tokens.push(Token { kind: TokenKind::Unquote, position: pos });
                    advance(&mut rest, &mut line, &mut column, 1);
                }
                continue;
            }
            '@' => single!(TokenKind::Splice),
            '^' => single!(TokenKind::Splice),
            ':' => {
                if let Ok((remaining, name)) = parse_keyword_text(rest) {
                    let consumed = rest.len() - remaining.len();
                    tokens.push(Token { kind: TokenKind::Keyword(name), position: pos });
                    advance(&mut rest, &mut line, &mut column, consumed);
                    continue;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Error(":".to_string()),
                        position: pos,
                    });
                    advance(&mut rest, &mut line, &mut column, 1);
                    continue;
                }
            }
            _ if c.is_ascii_digit() || (c == '-' && rest[1..].starts_with(|d: char| d.is_ascii_digit())) => {
                if let Ok((remaining, n)) = parse_number(rest) {
                    let consumed = rest.len() - remaining.len();
                    tokens.push(Token { kind: TokenKind::Number(n), position: pos });
                    advance(&mut rest, &mut line, &mut column, consumed);
                    continue;
                }
                tokens.push(Token { kind: TokenKind::Error(c.to_string()), position: pos });
                advance(&mut rest, &mut line, &mut column, c.len_utf8());
                continue;
            }
            _ if is_symbol_start(c) => {
                let (_, text) = parse_symbol_text(rest).unwrap();
                let consumed = text.len();
                let kind = match text.as_str() {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "nil" => TokenKind::Nil,
                    _ => TokenKind::Symbol(text),
                };
                tokens.push(Token { kind, position: pos });
                advance(&mut rest, &mut line, &mut column, consumed);
                continue;
            }
            other => {
                tokens.push(Token {
                    kind: TokenKind::Error(other.to_string()),
                    position: pos,
                });
                advance(&mut rest, &mut line, &mut column, other.len_utf8());
                continue;
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        position: Position { line, column },
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_numbers() {
        assert_eq!(kinds("42"), vec![TokenKind::Number(42.0), TokenKind::Eof]);
        assert_eq!(kinds("-3.5"), vec![TokenKind::Number(-3.5), TokenKind::Eof]);
        assert_eq!(kinds("0x1F"), vec![TokenKind::Number(31.0), TokenKind::Eof]);
    }

    #[test]
    fn tokenizes_strings_with_escapes() {
        assert_eq!(
            kinds(r#""a\nb""#),
            vec![TokenKind::String("a\nb".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn tokenizes_keywords_and_literals() {
        assert_eq!(
            kinds(":name true false nil"),
            vec![
                TokenKind::Keyword("name".to_string()),
                TokenKind::True,
                TokenKind::False,
                TokenKind::Nil,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokenizes_structural_and_reader_macros() {
        assert_eq!(
            kinds("([{}])'`~~@"),
            vec![
                TokenKind::LParen,
                TokenKind::LBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::RBracket,
                TokenKind::RParen,
                TokenKind::Quote,
                TokenKind::Quasiquote,
                TokenKind::Unquote,
                TokenKind::Splice,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize("(a\n  b)");
        let b = &tokens[2];
        assert_eq!(b.position, Position { line: 2, column: 3 });
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            kinds(";; hello\n42"),
            vec![TokenKind::Number(42.0), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_becomes_error_token() {
        let tokens = tokenize("\"abc");
        assert!(matches!(tokens[0].kind, TokenKind::Error(_)));
    }
}
