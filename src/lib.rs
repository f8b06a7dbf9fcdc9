//! formcfg - Conditional configuration language for game form patches
//!
//! This crate re-exports all layers of the formcfg system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: formcfg_runtime    - Loader, session, snapshots, CLI
//! Layer 3: formcfg_patches    - Armor and Keyword grammars, patch application
//! Layer 2: formcfg_language   - Tokenizer, conditions, generic parser, printer
//! Layer 1: formcfg_storage    - Form store (plugins, forms, records)
//! Layer 0: formcfg_foundation - Core types (Error, DiagnosticLog, FormRef)
//! ```

pub use formcfg_foundation as foundation;
pub use formcfg_language as language;
pub use formcfg_patches as patches;
pub use formcfg_runtime as runtime;
pub use formcfg_storage as storage;
