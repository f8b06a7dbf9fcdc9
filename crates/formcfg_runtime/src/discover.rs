//! Configuration file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use formcfg_foundation::DiagnosticLog;
use formcfg_storage::RecordType;

use crate::config::LoaderConfig;

/// Lists one record type's configuration files, sorted by path.
///
/// A missing directory yields nothing and logs nothing. Directories or
/// entries that exist but cannot be read are logged as warnings and skipped.
/// Symbolic links to files are read; symbolic links to directories are not
/// followed.
#[must_use]
pub fn discover_files(
    config: &LoaderConfig,
    record_type: RecordType,
    log: &mut DiagnosticLog,
) -> Vec<PathBuf> {
    let root = config.record_dir(record_type);
    let mut files = Vec::new();
    if root.is_dir() {
        collect(config, &root, log, &mut files);
    }
    files.sort();
    files
}

fn collect(config: &LoaderConfig, dir: &Path, log: &mut DiagnosticLog, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log.warn(format!("failed to read directory {}: {e}", dir.display()));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log.warn(format!("failed to read entry in {}: {e}", dir.display()));
                continue;
            }
        };
        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => collect(config, &path, log, files),
            Ok(file_type) if file_type.is_file() || (file_type.is_symlink() && path.is_file()) => {
                if config.matches_extension(&path) {
                    files.push(path);
                }
            }
            Ok(_) => {}
            Err(e) => log.warn(format!("failed to read file type of {}: {e}", path.display())),
        }
    }
}
