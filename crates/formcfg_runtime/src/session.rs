//! The read-then-apply session.
//!
//! Every registered record type's files are read and parsed first, in
//! [`PATCH_ORDER`] and sorted path order. Only then is anything applied.
//! A failing file never stops the session; its diagnostics are tagged with
//! its path and processing moves on.

use std::path::{Path, PathBuf};

use formcfg_foundation::{DiagnosticLog, Severity};
use formcfg_patches::{PATCH_ORDER, PatchFile};
use formcfg_storage::{FormStore, RecordType};

use crate::config::LoaderConfig;
use crate::discover::discover_files;

/// One parsed configuration file.
#[derive(Clone, Debug)]
pub struct LoadedFile {
    /// Where the file was read from.
    pub path: PathBuf,
    /// Its parsed statements.
    pub patches: PatchFile,
}

/// Counts reported at the end of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Files read.
    pub files: usize,
    /// Top-level statements parsed.
    pub statements: usize,
    /// Warnings logged.
    pub warnings: usize,
    /// Errors logged.
    pub errors: usize,
    /// Critical diagnostics logged.
    pub critical: usize,
}

/// A loading session over one data directory.
pub struct Session {
    config: LoaderConfig,
    log: DiagnosticLog,
    files: Vec<LoadedFile>,
}

impl Session {
    /// Creates a session; the diagnostic log is built from the configuration.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        let log = config.diagnostic_log();
        Self {
            config,
            log,
            files: Vec::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the diagnostic log.
    #[must_use]
    pub const fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Returns the files read so far.
    #[must_use]
    pub fn files(&self) -> &[LoadedFile] {
        &self.files
    }

    /// Reads every registered record type. Returns the number of files read.
    pub fn read_all(&mut self) -> usize {
        PATCH_ORDER
            .iter()
            .map(|&record_type| self.read_record_type(record_type))
            .sum()
    }

    /// Reads one record type's files. Returns the number of files read.
    pub fn read_record_type(&mut self, record_type: RecordType) -> usize {
        let paths = discover_files(&self.config, record_type, &mut self.log);
        for path in &paths {
            self.read_file(record_type, path);
        }
        paths.len()
    }

    /// Reads and parses one file as the given record type.
    pub fn read_file(&mut self, record_type: RecordType, path: &Path) {
        self.log.set_current_file(Some(path));
        let patches = PatchFile::read(record_type, path, &mut self.log);
        self.log.set_current_file(None);
        self.files.push(LoadedFile {
            path: path.to_path_buf(),
            patches,
        });
    }

    /// Applies every file read so far, record types in [`PATCH_ORDER`].
    pub fn apply_all(&mut self, store: &mut FormStore) {
        for record_type in PATCH_ORDER {
            let files = self.files.iter().filter(|f| f.patches.record_type() == record_type);
            for file in files {
                self.log.set_current_file(Some(&file.path));
                file.patches.apply(store, &mut self.log);
            }
        }
        self.log.set_current_file(None);
    }

    /// Reads everything, then applies everything.
    pub fn run(&mut self, store: &mut FormStore) -> SessionSummary {
        self.read_all();
        self.apply_all(store);
        self.summary()
    }

    /// Summarizes what has been read and logged.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            files: self.files.len(),
            statements: self.files.iter().map(|f| f.patches.len()).sum(),
            warnings: self.log.count(Severity::Warning),
            errors: self.log.count(Severity::Error),
            critical: self.log.count(Severity::Critical),
        }
    }
}
