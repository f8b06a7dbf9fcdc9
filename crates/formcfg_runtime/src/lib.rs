//! Loader, read/apply session, snapshots, and CLI for formcfg.
//!
//! This crate provides:
//! - [`LoaderConfig`] - Where configuration files live
//! - [`discover_files`] - Recursive, sorted file discovery per record type
//! - [`Session`] - Read every file, then apply every file
//! - Form store snapshot serialization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod discover;
pub mod serialize;
pub mod session;

pub use config::LoaderConfig;
pub use discover::discover_files;
pub use serialize::{SNAPSHOT_VERSION, from_bytes, load_from_file, save_to_file, to_bytes};
pub use session::{LoadedFile, Session, SessionSummary};
