//! Integration tests for Layer 2: Language
//!
//! Tests for the tokenizer, condition guards, and the generic parser.

mod conditions;
mod parser;
mod tokenizer;
