// ABOUTME: Syntax highlighter for REPL with color support
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for language syntax elements while preserving display width

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

// ANSI color codes (using 3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_BOOLEAN: &str = "\x1b[33m"; // Yellow
const COLOR_KEYWORD: &str = "\x1b[35m"; // Magenta
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)
const COLOR_QUOTE: &str = "\x1b[1;33m"; // Bold yellow

/// Main highlighter helper for the REPL. Provides syntax-aware color
/// highlighting; also implements the other `rustyline::Helper` sub-traits as
/// no-ops since this REPL doesn't offer completion or hints.
pub struct LispHelper;

impl LispHelper {
    pub fn new() -> Self {
        LispHelper
    }

    /// Colorizes a formatted result value for the `=>` REPL echo line.
    pub fn highlight_output(text: &str) -> String {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        highlight_line(text, &special_forms, &builtins)
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for LispHelper {}

impl Completer for LispHelper {
    type Candidate = String;
}

impl Hinter for LispHelper {
    type Hint = String;
}

impl Validator for LispHelper {}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line(line, &special_forms, &builtins);

        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true // Always trigger re-highlighting on character input or cursor movement
    }
}

/// Tokenize a line and apply syntax highlighting. Mirrors the lexer's token
/// boundaries closely enough for display purposes; it does not need to be a
/// faithful re-lex since a wrong color is cosmetic, not a parse error.
fn highlight_line(
    line: &str,
    special_forms: &HashSet<&'static str>,
    builtins: &HashSet<&'static str>,
) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Comments: ;; to end of line
            ';' => {
                result.push_str(COLOR_COMMENT);
                while i < chars.len() && chars[i] != '\n' {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            // Strings: preserve exact content but colorize
            '"' => {
                result.push_str(COLOR_STRING);
                result.push('"');
                i += 1;

                let mut found_close = false;
                while i < chars.len() {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        result.push(chars[i]);
                        result.push(chars[i + 1]);
                        i += 2;
                    } else if chars[i] == '"' {
                        result.push('"');
                        i += 1;
                        found_close = true;
                        break;
                    } else {
                        result.push(chars[i]);
                        i += 1;
                    }
                }

                result.push_str(COLOR_RESET);
                if !found_close {
                    while i < chars.len() && chars[i] != '\n' {
                        result.push(chars[i]);
                        i += 1;
                    }
                }
            }

            // Keywords: :ident
            ':' => {
                let start = i;
                i += 1;
                while i < chars.len() && is_symbol_char(chars[i]) {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                result.push_str(COLOR_KEYWORD);
                result.push_str(&text);
                result.push_str(COLOR_RESET);
            }

            // Numbers
            '0'..='9' => {
                let start = i;
                while i < chars.len() && is_number_char(chars[i]) {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                result.push_str(COLOR_NUMBER);
                result.push_str(&text);
                result.push_str(COLOR_RESET);
            }

            // Signed numbers vs. +/-/*// symbols
            '+' | '-' => {
                if i + 1 < chars.len() && chars[i + 1].is_ascii_digit() {
                    let start = i;
                    i += 1;
                    while i < chars.len() && is_number_char(chars[i]) {
                        i += 1;
                    }
                    let text: String = chars[start..i].iter().collect();
                    result.push_str(COLOR_NUMBER);
                    result.push_str(&text);
                    result.push_str(COLOR_RESET);
                } else {
                    push_symbol(&mut result, &chars, &mut i, special_forms, builtins);
                }
            }

            // Quote-like reader macros
            '\'' | '`' => {
                result.push_str(COLOR_QUOTE);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }

            // Unquote / splice
            '~' => {
                result.push_str(COLOR_QUOTE);
                result.push('~');
                i += 1;
                if i < chars.len() && chars[i] == '@' {
                    result.push('@');
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            // Parentheses and brackets
            '(' | ')' | '[' | ']' | '{' | '}' => {
                result.push_str(COLOR_PARENS);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }

            // Whitespace
            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }

            // Symbols, including true/false/nil literals
            _ => push_symbol(&mut result, &chars, &mut i, special_forms, builtins),
        }
    }

    result
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || "_-+*/%<>=!?".contains(c)
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == 'x' || c == 'o'
}

fn is_symbol_boundary(c: char) -> bool {
    c.is_whitespace() || "()[]{}\";'`~".contains(c)
}

fn push_symbol(
    result: &mut String,
    chars: &[char],
    i: &mut usize,
    special_forms: &HashSet<&'static str>,
    builtins: &HashSet<&'static str>,
) {
    let start = *i;
    while *i < chars.len() && !is_symbol_boundary(chars[*i]) {
        *i += 1;
    }
    let symbol: String = chars[start..*i].iter().collect();

    if symbol == "true" || symbol == "false" || symbol == "nil" {
        result.push_str(COLOR_BOOLEAN);
        result.push_str(&symbol);
        result.push_str(COLOR_RESET);
    } else if special_forms.contains(symbol.as_str()) {
        result.push_str(COLOR_SPECIAL_FORM);
        result.push_str(&symbol);
        result.push_str(COLOR_RESET);
    } else if builtins.contains(symbol.as_str()) {
        result.push_str(COLOR_BUILTIN);
        result.push_str(&symbol);
        result.push_str(COLOR_RESET);
    } else {
        result.push_str(&symbol);
    }
}

/// The reserved special forms (see `eval::eval_special_form`).
fn get_special_forms() -> HashSet<&'static str> {
    [
        "def", "defn", "fn", "let", "if", "do", "quote", "defmacro",
    ]
    .iter()
    .copied()
    .collect()
}

/// The primitive library's names (see `builtins::register_builtins`).
fn get_builtins() -> HashSet<&'static str> {
    [
        // Arithmetic
        "+", "-", "*", "/", "%", // Comparison
        "=", "<", ">", "<=", ">=", // Logic
        "and", "or", "not", // List operations
        "cons", "car", "cdr", "list", "first", "rest", "reverse", "length",
        "empty?", // Vector operations
        "vec", "nth", // Map operations
        "get", "assoc", "keys", "vals", // Higher-order
        "map", "filter", "reduce", // Type predicates
        "list?", "vector?", "map?", "fn?", "nil?", "number?", "string?", "true?", "false?",
        "type-of", // Console/strings
        "print", "str", "str-length", "str-concat", "str-upper", "str-lower", // Help
        "help",
    ]
    .iter()
    .copied()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line("42", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_NUMBER));
    }

    #[test]
    fn test_string_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line("\"hello\"", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_STRING));
    }

    #[test]
    fn test_comment_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line(";; a comment", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_COMMENT));
    }

    #[test]
    fn test_special_form_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line("(def x 5)", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_SPECIAL_FORM));
        assert!(highlighted.contains(COLOR_PARENS));
    }

    #[test]
    fn test_builtin_function_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line("(+ 1 2)", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_BUILTIN));
        assert!(highlighted.contains(COLOR_PARENS));
    }

    #[test]
    fn test_boolean_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line("true false nil", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_BOOLEAN));
    }

    #[test]
    fn test_quote_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line("'(1 2 3)", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_QUOTE));
    }

    #[test]
    fn test_keyword_highlighting() {
        let special_forms = get_special_forms();
        let builtins = get_builtins();
        let highlighted = highlight_line("{:name \"Alice\"}", &special_forms, &builtins);
        assert!(highlighted.contains(COLOR_KEYWORD));
    }
}
