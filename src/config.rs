// ABOUTME: Version and REPL banner constants

#[allow(dead_code)]
pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Lisp Interpreter v1.0";
pub const WELCOME_SUBTITLE: &str = "A tree-walking Lisp with hygienic macros";
pub const WELCOME_FOOTER: &str =
    "Type (help) for a list of built-ins, or (quit)/Ctrl-D to exit.";

#[allow(dead_code)]
pub const HELP_TEXT: &str = r#"
Available commands:
  (quit) or (exit)     - Exit the REPL
  (help)               - Show the quick reference
  (help 'name)         - Show detailed help for a built-in
  (clear)              - Clear the screen

Type any expression to evaluate it. Use Ctrl-D or (quit) to exit.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_strings_are_non_empty() {
        assert!(!WELCOME_MESSAGE.is_empty());
        assert!(!WELCOME_SUBTITLE.is_empty());
        assert!(!WELCOME_FOOTER.is_empty());
    }
}
