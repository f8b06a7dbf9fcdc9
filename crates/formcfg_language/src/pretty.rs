//! Pretty-printer for statement trees.
//!
//! Renders parsed statements back to configuration syntax. Conditionals are
//! laid out one brace per line, bodies indented one level; expression lines
//! are rendered by the grammar.

use std::fmt::Write;

use crate::condition::format_conditions;
use crate::grammar::{Grammar, indent};
use crate::statement::{Branch, Statement};

/// Pretty-print statements at the top level, one per line.
#[must_use]
pub fn pretty_print<G: Grammar>(grammar: &G, statements: &[Statement<G::Payload>]) -> String {
    let mut printer = PrettyPrinter {
        grammar,
        output: String::new(),
    };
    printer.print_all(statements, 0);
    printer.output
}

struct PrettyPrinter<'g, G: Grammar> {
    grammar: &'g G,
    output: String,
}

impl<G: Grammar> PrettyPrinter<'_, G> {
    fn print_all(&mut self, statements: &[Statement<G::Payload>], level: usize) {
        for statement in statements {
            self.print(statement, level);
        }
    }

    fn print(&mut self, statement: &Statement<G::Payload>, level: usize) {
        match statement {
            Statement::Expression(payload) => {
                let line = self.grammar.print_expression_statement(payload, level);
                self.output.push_str(&line);
                self.output.push('\n');
            }
            Statement::Conditional(chain) => {
                self.output.push_str(&indent(level));
                self.print_branch("if", &chain.if_branch, level);
                for branch in &chain.else_if_branches {
                    self.print_branch(" else if", branch, level);
                }
                if let Some(body) = &chain.else_body {
                    self.output.push_str(" else {\n");
                    self.print_all(body, level + 1);
                    self.output.push_str(&indent(level));
                    self.output.push('}');
                }
                self.output.push('\n');
            }
        }
    }

    fn print_branch(&mut self, keyword: &str, branch: &Branch<G::Payload>, level: usize) {
        let _ = writeln!(
            self.output,
            "{keyword} ({}) {{",
            format_conditions(&branch.conditions)
        );
        self.print_all(&branch.body, level + 1);
        self.output.push_str(&indent(level));
        self.output.push('}');
    }
}
