//! In-memory form storage for formcfg.
//!
//! This crate provides:
//! - [`Record`] - Typed record data (armor, keywords)
//! - [`FormStore`] - Active plugins plus live forms, answering condition guards

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod record;
pub mod store;

pub use record::{ArmorRecord, Form, KeywordRecord, Record, RecordType};
pub use store::FormStore;
