//! Condition guards for `if` / `else if` blocks.
//!
//! Guards are parsed into an infix token list. Each evaluation converts the
//! list to postfix (shunting-yard, precedence `!` > `&&` > `||`) and reduces
//! it on a boolean stack. Nothing is cached between evaluations.

use std::fmt;

use formcfg_foundation::{DiagnosticLog, Error, FormRef, HostEnvironment, Result, Severity};

use crate::config::MAX_NESTING_DEPTH;
use crate::helpers::format_form;
use crate::reader::ConfigReader;

// =============================================================================
// Tokens
// =============================================================================

/// The predicates a guard may call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionFunction {
    /// `IsPluginExists("Plugin.esp")`
    IsPluginExists,
    /// `IsFormExists("Plugin.esp"|1A2B)`
    IsFormExists,
}

impl ConditionFunction {
    /// Looks up a predicate by its keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "IsPluginExists" => Some(Self::IsPluginExists),
            "IsFormExists" => Some(Self::IsFormExists),
            _ => None,
        }
    }

    /// Returns the predicate's keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::IsPluginExists => "IsPluginExists",
            Self::IsFormExists => "IsFormExists",
        }
    }
}

/// A single predicate call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    /// Which predicate.
    pub function: ConditionFunction,
    /// Plugin name, or a `Plugin|hex` form reference.
    pub argument: String,
}

impl Condition {
    /// Answers the predicate against the host.
    pub fn evaluate(&self, env: &impl HostEnvironment) -> bool {
        match self.function {
            ConditionFunction::IsPluginExists => env.is_plugin_active(&self.argument),
            ConditionFunction::IsFormExists => self
                .argument
                .parse::<FormRef>()
                .is_ok_and(|form| env.is_form_live(&form)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function {
            ConditionFunction::IsPluginExists => write!(f, "IsPluginExists(\"{}\")", self.argument),
            ConditionFunction::IsFormExists => {
                write!(f, "IsFormExists({})", format_form(&self.argument))
            }
        }
    }
}

/// Boolean operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `&&`
    And,
    /// `||`
    Or,
    /// `!` (prefix)
    Not,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Not => 3,
            Self::And => 2,
            Self::Or => 1,
        }
    }

    /// Returns true for the prefix operator.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }

    /// Returns the operator's source text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
        }
    }
}

/// Grouping parentheses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parenthesis {
    /// `(`
    Open,
    /// `)`
    Close,
}

/// One element of an infix guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionToken {
    /// A predicate call.
    Condition(Condition),
    /// An operator.
    Operator(Operator),
    /// A parenthesis.
    Parenthesis(Parenthesis),
}

impl ConditionToken {
    /// Returns true if an operand has just been completed by this token.
    fn ends_operand(&self) -> bool {
        matches!(
            self,
            Self::Condition(_) | Self::Parenthesis(Parenthesis::Close)
        )
    }
}

/// Formats an infix guard back into configuration syntax.
#[must_use]
pub fn format_conditions(tokens: &[ConditionToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            ConditionToken::Condition(c) => out.push_str(&c.to_string()),
            ConditionToken::Operator(Operator::Not) => out.push('!'),
            ConditionToken::Operator(op) => {
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
            }
            ConditionToken::Parenthesis(Parenthesis::Open) => out.push('('),
            ConditionToken::Parenthesis(Parenthesis::Close) => out.push(')'),
        }
    }
    out
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a guard whose opening `(` has already been consumed.
///
/// Stops before the matching `)`, which the caller consumes.
///
/// # Errors
///
/// Returns a syntax error for unknown keywords, misplaced operators or
/// operands, a lone `&` or `|`, unbalanced parentheses, a trailing operator,
/// an empty guard, or parentheses nested deeper than [`MAX_NESTING_DEPTH`].
pub fn parse_conditions(reader: &mut ConfigReader) -> Result<Vec<ConditionToken>> {
    let mut tokens = Vec::new();
    parse_group(reader, &mut tokens, 0)?;
    Ok(tokens)
}

fn parse_group(
    reader: &mut ConfigReader,
    out: &mut Vec<ConditionToken>,
    depth: usize,
) -> Result<()> {
    let group_start = out.len();

    loop {
        let next = reader.peek();
        match next.as_str() {
            "" => return Err(reader.error("expected ')', found end of file")),
            ")" => break,
            "(" => {
                expect_operand_position(reader, &out[group_start..])?;
                reader.get_token();
                if depth >= MAX_NESTING_DEPTH {
                    return Err(reader.error("nesting too deep"));
                }
                out.push(ConditionToken::Parenthesis(Parenthesis::Open));
                parse_group(reader, out, depth + 1)?;
                reader.expect(")")?;
                out.push(ConditionToken::Parenthesis(Parenthesis::Close));
            }
            "&" | "|" => {
                reader.get_token();
                let second = reader.get_token();
                if second != next {
                    return Err(reader.error(format!("expected '{next}{next}'")));
                }
                if !out[group_start..].last().is_some_and(ConditionToken::ends_operand) {
                    return Err(reader.error(format!("'{next}{next}' is missing its left operand")));
                }
                let op = if next == "&" { Operator::And } else { Operator::Or };
                out.push(ConditionToken::Operator(op));
            }
            "!" => {
                reader.get_token();
                match out[group_start..].last() {
                    Some(ConditionToken::Operator(Operator::Not)) => {
                        return Err(reader.error("'!' cannot follow '!'"));
                    }
                    Some(token) if token.ends_operand() => {
                        return Err(reader.error("'!' must be preceded by an operator"));
                    }
                    _ => {}
                }
                out.push(ConditionToken::Operator(Operator::Not));
            }
            keyword => match ConditionFunction::from_keyword(keyword) {
                Some(function) => {
                    expect_operand_position(reader, &out[group_start..])?;
                    reader.get_token();
                    let condition = parse_call(reader, function)?;
                    out.push(ConditionToken::Condition(condition));
                }
                None => {
                    return Err(reader.error(format!("invalid keyword '{keyword}' in condition")));
                }
            },
        }
    }

    match out[group_start..].last() {
        None => Err(reader.error("expected a condition")),
        Some(ConditionToken::Operator(op)) => Err(reader.error(format!(
            "condition ends with operator '{}'",
            op.symbol()
        ))),
        Some(_) => Ok(()),
    }
}

/// An operand may start a group or follow an operator, never another operand.
fn expect_operand_position(reader: &ConfigReader, group: &[ConditionToken]) -> Result<()> {
    if group.last().is_some_and(ConditionToken::ends_operand) {
        Err(reader.error("expected an operator between conditions"))
    } else {
        Ok(())
    }
}

fn parse_call(reader: &mut ConfigReader, function: ConditionFunction) -> Result<Condition> {
    reader.expect("(")?;
    let argument = match function {
        ConditionFunction::IsPluginExists => reader.parse_string()?,
        ConditionFunction::IsFormExists => reader.parse_form()?,
    };
    reader.expect(")")?;
    Ok(Condition { function, argument })
}

// =============================================================================
// Evaluation
// =============================================================================

/// Converts an infix guard to postfix.
///
/// Parentheses are consumed, never emitted.
///
/// # Errors
///
/// Returns an internal error if the parentheses do not balance.
pub fn to_postfix(tokens: &[ConditionToken]) -> Result<Vec<&ConditionToken>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<&ConditionToken> = Vec::new();

    for token in tokens {
        match token {
            ConditionToken::Condition(_) => output.push(token),
            ConditionToken::Operator(op) => {
                while let Some(ConditionToken::Operator(top)) = stack.last() {
                    let pops = top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && !op.is_unary());
                    if !pops {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(token);
            }
            ConditionToken::Parenthesis(Parenthesis::Open) => stack.push(token),
            ConditionToken::Parenthesis(Parenthesis::Close) => loop {
                match stack.pop() {
                    Some(ConditionToken::Parenthesis(Parenthesis::Open)) => break,
                    Some(top) => output.push(top),
                    None => return Err(Error::internal("unmatched ')' in condition")),
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if matches!(top, ConditionToken::Parenthesis(_)) {
            return Err(Error::internal("unmatched '(' in condition"));
        }
        output.push(top);
    }

    Ok(output)
}

/// Evaluates a guard, reporting structural problems as errors.
///
/// # Errors
///
/// Returns an internal error if the token list is not a well-formed
/// expression. Lists produced by [`parse_conditions`] never are.
pub fn try_evaluate_conditions(
    tokens: &[ConditionToken],
    env: &impl HostEnvironment,
) -> Result<bool> {
    let postfix = to_postfix(tokens)?;
    let mut stack: Vec<bool> = Vec::new();
    let underflow = || Error::internal("operator is missing an operand");

    for token in postfix {
        match token {
            ConditionToken::Condition(condition) => stack.push(condition.evaluate(env)),
            ConditionToken::Operator(Operator::Not) => {
                let value = stack.pop().ok_or_else(underflow)?;
                stack.push(!value);
            }
            ConditionToken::Operator(op) => {
                let right = stack.pop().ok_or_else(underflow)?;
                let left = stack.pop().ok_or_else(underflow)?;
                stack.push(match op {
                    Operator::And => left && right,
                    _ => left || right,
                });
            }
            ConditionToken::Parenthesis(_) => {
                return Err(Error::internal("parenthesis left in postfix condition"));
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        values => Err(Error::internal(format!(
            "condition reduced to {} values, expected 1",
            values.len()
        ))),
    }
}

/// Evaluates a guard against the host.
///
/// A malformed token list is logged as critical and evaluates to `false`.
pub fn evaluate_conditions(
    tokens: &[ConditionToken],
    env: &impl HostEnvironment,
    log: &mut DiagnosticLog,
) -> bool {
    match try_evaluate_conditions(tokens, env) {
        Ok(value) => value,
        Err(e) => {
            log.report(Severity::Critical, &e);
            false
        }
    }
}
