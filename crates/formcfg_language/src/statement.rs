//! The statement tree produced by the parser.
//!
//! Each node owns its children; there are no back-references.

use formcfg_foundation::{DiagnosticLog, HostEnvironment};

use crate::condition::{ConditionToken, evaluate_conditions};

/// One parsed statement, generic over the grammar's payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement<T> {
    /// A single terminated line, as parsed by the domain grammar.
    Expression(T),
    /// An `if` / `else if` / `else` chain.
    Conditional(ConditionalStatement<T>),
}

impl<T> Statement<T> {
    /// Returns the payload if this is an expression statement.
    #[must_use]
    pub fn as_expression(&self) -> Option<&T> {
        match self {
            Self::Expression(payload) => Some(payload),
            Self::Conditional(_) => None,
        }
    }

    /// Returns the chain if this is a conditional statement.
    #[must_use]
    pub fn as_conditional(&self) -> Option<&ConditionalStatement<T>> {
        match self {
            Self::Conditional(conditional) => Some(conditional),
            Self::Expression(_) => None,
        }
    }
}

/// A guard and the body it selects.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch<T> {
    /// Infix guard tokens.
    pub conditions: Vec<ConditionToken>,
    /// Statements run when the guard holds.
    pub body: Vec<Statement<T>>,
}

/// An `if` / `else if` / `else` chain.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalStatement<T> {
    /// The leading `if` branch.
    pub if_branch: Branch<T>,
    /// `else if` branches in source order.
    pub else_if_branches: Vec<Branch<T>>,
    /// The trailing `else` body, if any.
    pub else_body: Option<Vec<Statement<T>>>,
}

impl<T> ConditionalStatement<T> {
    /// Returns the guarded branches in source order.
    pub fn branches(&self) -> impl Iterator<Item = &Branch<T>> {
        std::iter::once(&self.if_branch).chain(&self.else_if_branches)
    }

    /// Selects the active body.
    ///
    /// That is the body of the first branch whose guard holds, else the
    /// `else` body, else nothing. Guards are re-evaluated on every call.
    pub fn evaluates(&self, env: &impl HostEnvironment, log: &mut DiagnosticLog) -> &[Statement<T>] {
        for branch in self.branches() {
            if evaluate_conditions(&branch.conditions, env, log) {
                return &branch.body;
            }
        }
        self.else_body.as_deref().unwrap_or(&[])
    }
}

/// Collects the payloads that are active under the host, in source order.
///
/// Conditionals are resolved recursively; inactive branches contribute nothing.
pub fn active_expressions<'a, T>(
    statements: &'a [Statement<T>],
    env: &impl HostEnvironment,
    log: &mut DiagnosticLog,
) -> Vec<&'a T> {
    let mut out = Vec::new();
    collect_active(statements, env, log, &mut out);
    out
}

fn collect_active<'a, T>(
    statements: &'a [Statement<T>],
    env: &impl HostEnvironment,
    log: &mut DiagnosticLog,
    out: &mut Vec<&'a T>,
) {
    for statement in statements {
        match statement {
            Statement::Expression(payload) => out.push(payload),
            Statement::Conditional(conditional) => {
                collect_active(conditional.evaluates(env, log), env, log, out);
            }
        }
    }
}
