//! Integration tests for Layer 3: Patches
//!
//! Tests for the armor and keyword grammars applied to a form store.

mod armor;
mod files;
