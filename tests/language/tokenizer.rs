//! Tokenizer integration tests

use formcfg_language::{ConfigReader, tokenize};
use proptest::prelude::*;

fn texts(source: &str) -> Vec<String> {
    tokenize(source).into_iter().map(|t| t.text).collect()
}

// =============================================================================
// Token Boundaries
// =============================================================================

#[test]
fn full_statement_tokens() {
    assert_eq!(
        texts(r#"FilterByFormID("Mod.esp"|800) . BipedObjectSlots = 32 | 33;"#),
        vec![
            "FilterByFormID",
            "(",
            "\"Mod.esp\"",
            "|",
            "800",
            ")",
            ".",
            "BipedObjectSlots",
            "=",
            "32",
            "|",
            "33",
            ";",
        ]
    );
}

#[test]
fn doubled_operators_are_two_tokens() {
    assert_eq!(texts("a&&b||!c"), vec!["a", "&", "&", "b", "|", "|", "!", "c"]);
}

#[test]
fn comment_inside_string_is_kept() {
    assert_eq!(texts(r#"x = "a # b"; # gone"#), vec!["x", "=", "\"a # b\"", ";"]);
}

#[test]
fn comment_line_is_stripped() {
    let with = "FilterByFormID(\"A.esp\"|1) # comment\n.FullName = \"x\";";
    let without = "FilterByFormID(\"A.esp\"|1)\n.FullName = \"x\";";
    assert_eq!(texts(with), texts(without));
}

#[test]
fn unterminated_string_is_one_token() {
    let tokens = texts("\"abc\n;");
    assert_eq!(tokens, vec!["\"abc", ";"]);
    assert!(!tokens[0].ends_with('"'));
}

#[test]
fn carriage_return_ends_string() {
    assert_eq!(texts("\"abc\r\n;"), vec!["\"abc", ";"]);
}

#[test]
fn positions_track_lines() {
    let tokens = tokenize("if (\r\n\tIsPluginExists(\"A\")\n)");
    let last = tokens.last().unwrap();
    assert_eq!(last.text, ")");
    assert_eq!((last.span.line, last.span.column), (3, 1));
}

// =============================================================================
// Reader
// =============================================================================

#[test]
fn reader_reports_end_of_file_as_empty() {
    let mut reader = ConfigReader::from_text("one two");
    assert_eq!(reader.get_token(), "one");
    assert_eq!(reader.get_token(), "two");
    assert!(reader.end_of_file());
    assert_eq!(reader.get_token(), "");
    assert_eq!(reader.peek(), "");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn spacing_does_not_change_tokens(
        words in prop::collection::vec("[A-Za-z0-9]{1,8}|[.,=!&|();]", 0..30),
        pad in "[ \t]{0,3}",
    ) {
        let tight = words.join(" ");
        let loose = words.join(&format!("{pad} \n {pad}"));
        prop_assert_eq!(texts(&tight), texts(&loose));
    }

    #[test]
    fn tokens_never_empty(source in "\\PC{0,200}") {
        prop_assert!(tokenize(&source).iter().all(|t| !t.text.is_empty()));
    }
}
