//! Condition guard integration tests

use formcfg_foundation::{DiagnosticLog, FormRef, HostEnvironment, Severity};
use formcfg_language::{
    ConditionToken, ConfigReader, Operator, evaluate_conditions, format_conditions,
    parse_conditions, try_evaluate_conditions,
};
use proptest::prelude::*;

/// Plugins `A`, `B`, `C` active per the flags; forms live if their plugin is.
struct Flags {
    a: bool,
    b: bool,
    c: bool,
}

impl HostEnvironment for Flags {
    fn is_plugin_active(&self, plugin: &str) -> bool {
        match plugin {
            "A" => self.a,
            "B" => self.b,
            "C" => self.c,
            _ => false,
        }
    }

    fn is_form_live(&self, form: &FormRef) -> bool {
        self.is_plugin_active(form.plugin())
    }
}

fn parse(source: &str) -> Vec<ConditionToken> {
    let mut reader = ConfigReader::from_text(source);
    let tokens = parse_conditions(&mut reader).expect("condition should parse");
    reader.expect(")").expect("closing parenthesis");
    tokens
}

fn eval(source: &str, a: bool, b: bool, c: bool) -> bool {
    try_evaluate_conditions(&parse(source), &Flags { a, b, c }).expect("condition should reduce")
}

// =============================================================================
// Precedence
// =============================================================================

proptest! {
    #[test]
    fn and_binds_tighter_than_or(a: bool, b: bool, c: bool) {
        let source = r#"IsPluginExists("A") || IsPluginExists("B") && IsPluginExists("C"))"#;
        prop_assert_eq!(eval(source, a, b, c), a || (b && c));
    }

    #[test]
    fn not_binds_tighter_than_and(a: bool, b: bool, c: bool) {
        let source = r#"!IsPluginExists("A") && IsPluginExists("B"))"#;
        prop_assert_eq!(eval(source, a, b, c), !a && b);
    }

    #[test]
    fn parentheses_group(a: bool, b: bool, c: bool) {
        let source = r#"(IsPluginExists("A") || IsPluginExists("B")) && !(IsFormExists("C"|1)))"#;
        prop_assert_eq!(eval(source, a, b, c), (a || b) && !c);
    }
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn double_operators_fold() {
    let tokens = parse(r#"IsPluginExists("A") && IsPluginExists("B"))"#);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1], ConditionToken::Operator(Operator::And));
}

#[test]
fn syntax_errors_have_positions() {
    for source in [
        r#"IsPluginExists("A") & IsPluginExists("B"))"#,
        r#"IsPluginExists("A") &&)"#,
        r#"IsPluginExists("A") IsPluginExists("B"))"#,
        r#"IsModLoaded("A"))"#,
        ")",
        r#"(IsPluginExists("A")"#,
    ] {
        let mut reader = ConfigReader::from_text(source);
        let err = parse_conditions(&mut reader).expect_err(source);
        assert!(err.position().is_some(), "{source}: {err}");
    }
}

#[test]
fn formatted_guard_reparses() {
    let tokens = parse(r#"!IsPluginExists("A")&&(IsFormExists("B"|0x0012)||IsPluginExists("C")))"#);
    let text = format_conditions(&tokens);
    assert_eq!(parse(&format!("{text})")), tokens);
}

// =============================================================================
// Malformed Lists
// =============================================================================

#[test]
fn malformed_list_is_false_and_critical() {
    let tokens = vec![ConditionToken::Operator(Operator::And)];
    let mut log = DiagnosticLog::default();
    let host = Flags { a: true, b: true, c: true };
    assert!(!evaluate_conditions(&tokens, &host, &mut log));
    assert_eq!(log.count(Severity::Critical), 1);
}
