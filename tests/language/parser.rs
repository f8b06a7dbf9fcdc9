//! Generic parser integration tests

use formcfg_foundation::{DiagnosticLog, FormRef, HostEnvironment, Result};
use formcfg_language::{
    ConfigReader, Grammar, Parser, ParserConfig, Statement, active_expressions, indent,
    parse_text, pretty_print,
};

/// `Set(form) = <number> ;`
struct Setter;

impl Grammar for Setter {
    type Payload = (String, f64);

    fn parse_expression_statement(&mut self, reader: &mut ConfigReader) -> Result<Self::Payload> {
        reader.expect("Set")?;
        reader.expect("(")?;
        let form = reader.parse_form()?;
        reader.expect(")")?;
        reader.expect("=")?;
        let value = reader.parse_number()?;
        reader.expect(";")?;
        Ok((form, value))
    }

    fn print_expression_statement(&self, payload: &Self::Payload, level: usize) -> String {
        let (plugin, id) = payload.0.split_once('|').unwrap_or((&payload.0, "0"));
        format!("{}Set(\"{plugin}\"|{id}) = {};", indent(level), payload.1)
    }
}

struct Plugins(&'static [&'static str]);

impl HostEnvironment for Plugins {
    fn is_plugin_active(&self, plugin: &str) -> bool {
        self.0.contains(&plugin)
    }

    fn is_form_live(&self, form: &FormRef) -> bool {
        self.0.contains(&form.plugin())
    }
}

const CHAIN: &str = r#"
Set("Base.esm"|1) = 1;
if (IsPluginExists("A.esp")) {
    Set("A.esp"|0x10) = 2;
    if (IsPluginExists("B.esp")) {
        Set("B.esp"|20) = 3;
    }
} else if (IsPluginExists("C.esp")) {
    Set("C.esp"|30) = 4;
} else {
    Set("Base.esm"|40) = 5.5;
}
Set("Base.esm"|2) = 6;
"#;

fn values(active: &'static [&'static str]) -> Vec<f64> {
    let mut log = DiagnosticLog::default();
    let statements = parse_text(CHAIN, Setter, &mut log);
    assert!(log.is_empty());
    active_expressions(&statements, &Plugins(active), &mut log)
        .into_iter()
        .map(|(_, value)| *value)
        .collect()
}

// =============================================================================
// Branch Selection
// =============================================================================

#[test]
fn first_true_branch_wins() {
    assert_eq!(values(&["A.esp", "C.esp"]), vec![1.0, 2.0, 6.0]);
    assert_eq!(values(&["A.esp", "B.esp"]), vec![1.0, 2.0, 3.0, 6.0]);
    assert_eq!(values(&["C.esp"]), vec![1.0, 4.0, 6.0]);
    assert_eq!(values(&[]), vec![1.0, 5.5, 6.0]);
}

#[test]
fn tree_shape() {
    let mut log = DiagnosticLog::default();
    let statements = parse_text(CHAIN, Setter, &mut log);
    assert_eq!(statements.len(), 3);
    let chain = statements[1].as_conditional().unwrap();
    assert_eq!(chain.else_if_branches.len(), 1);
    assert_eq!(chain.if_branch.body.len(), 2);
    assert!(chain.if_branch.body[1].as_conditional().is_some());
    assert_eq!(
        statements[0].as_expression(),
        Some(&("Base.esm|1".to_string(), 1.0))
    );
    assert_eq!(
        chain.if_branch.body[0].as_expression().map(|p| p.0.as_str()),
        Some("A.esp|10")
    );
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn abort_keeps_only_earlier_statements() {
    let source = r#"
Set("A"|1) = 1;
Set("A"|2) = 2;
Set("A"|3) = ;
Set("A"|4) = 4;
"#;
    let mut log = DiagnosticLog::default();
    let statements = parse_text(source, Setter, &mut log);
    assert_eq!(statements.len(), 2);
    assert_eq!(log.len(), 1);
    let diagnostic = log.iter().next().unwrap();
    assert_eq!(diagnostic.position.map(|(line, _)| line), Some(4));
}

#[test]
fn recovery_resumes_after_semicolon() {
    let source = r#"
Set("A"|1) = 1;
Set("A"|2) = x 2;
Set("A"|3) = 3;
"#;
    let mut log = DiagnosticLog::default();
    let statements = Parser::from_text(source, Setter)
        .with_config(ParserConfig::recovering())
        .parse(&mut log);
    let ids: Vec<_> = statements
        .iter()
        .filter_map(Statement::as_expression)
        .map(|(form, _)| form.as_str())
        .collect();
    assert_eq!(ids, vec!["A|1", "A|3"]);
    assert_eq!(log.len(), 1);
}

#[test]
fn malformed_conditional_discards_chain() {
    let source = r#"
Set("A"|1) = 1;
if (IsPluginExists("A") &&) {
    Set("A"|2) = 2;
}
"#;
    let mut log = DiagnosticLog::default();
    let statements = parse_text(source, Setter, &mut log);
    assert_eq!(statements.len(), 1);
    assert_eq!(log.len(), 1);
}

// =============================================================================
// Printing
// =============================================================================

#[test]
fn pretty_print_reparses() {
    let mut log = DiagnosticLog::default();
    let statements = parse_text(CHAIN, Setter, &mut log);
    let printed = pretty_print(&Setter, &statements);
    let reparsed = parse_text(&printed, Setter, &mut log);
    assert!(log.is_empty());
    assert_eq!(reparsed, statements);
}
