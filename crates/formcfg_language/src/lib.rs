//! Configuration language front end for formcfg.
//!
//! This crate provides:
//! - [`ConfigReader`] - Tokenization and a token cursor with shared value parsers
//! - [`Parser`] - The generic statement parser with nested `if` / `else` blocks
//! - [`Grammar`] - The seam where a record type plugs in its vocabulary
//! - Condition guards: parsing, shunting-yard conversion, and evaluation
//! - [`pretty_print`] - Rendering statement trees back to configuration syntax

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod condition;
pub mod config;
pub mod grammar;
pub mod helpers;
pub mod parser;
pub mod pretty;
pub mod reader;
pub mod span;
pub mod statement;
pub mod token;


pub use condition::{
    Condition, ConditionFunction, ConditionToken, Operator, Parenthesis, evaluate_conditions,
    format_conditions, parse_conditions, to_postfix, try_evaluate_conditions,
};
pub use config::{MAX_NESTING_DEPTH, ParserConfig, Recovery};
pub use grammar::{Grammar, indent};
pub use helpers::{
    FIRST_BIPED_SLOT, LAST_BIPED_SLOT, biped_slot_flag, format_form, get_biped_slots,
};
pub use parser::{Parser, parse_text};
pub use pretty::pretty_print;
pub use reader::{ConfigReader, tokenize};
pub use span::Span;
pub use statement::{Branch, ConditionalStatement, Statement, active_expressions};
pub use token::{DELIMITERS, Token, is_delimiter};
