// ABOUTME: End-to-end tests for the string and console-I/O builtins

use lisp_core::host::{run, OutputKind};

fn values(source: &str) -> Vec<String> {
    run(source)
        .into_iter()
        .filter(|line| line.kind == OutputKind::Value)
        .map(|line| line.text)
        .collect()
}

#[test]
fn str_concatenates_the_textual_form_of_every_argument() {
    assert_eq!(values(r#"(print (str "a" "b" 1 true))"#), vec!["ab1true"]);
}

#[test]
fn str_with_no_arguments_is_the_empty_string() {
    assert_eq!(values("(print (str))"), vec![""]);
}

#[test]
fn str_length_counts_unicode_characters_not_bytes() {
    assert_eq!(values(r#"(print (str-length "héllo"))"#), vec!["5"]);
}

#[test]
fn str_concat_requires_only_strings() {
    let lines = run(r#"(str-concat "a" 1)"#);
    assert!(lines.iter().any(|l| l.kind == OutputKind::Error));
}

#[test]
fn str_upper_and_str_lower_round_trip() {
    assert_eq!(values(r#"(print (str-upper "hi"))"#), vec!["HI"]);
    assert_eq!(values(r#"(print (str-lower "HI"))"#), vec!["hi"]);
}

#[test]
fn print_joins_multiple_arguments_with_a_single_space() {
    let lines = run(r#"(print "a" "b" "c")"#);
    // print's own output goes through the sink (stdout here); run()'s
    // returned lines only ever carry the expression's own result, which is
    // nil and therefore suppressed. Only the timing line remains.
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].kind, OutputKind::Time);
}

#[test]
fn nested_collections_quote_their_string_elements() {
    assert_eq!(values(r#"(print (list "a" "b"))"#), vec![r#"("a" "b")"#]);
}
