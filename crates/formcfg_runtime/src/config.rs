//! Configuration for loading configuration files.

use std::path::{Path, PathBuf};

use formcfg_foundation::{DiagnosticLog, DiagnosticOutput};
use formcfg_storage::RecordType;

/// Where configuration files live and how diagnostics are reported.
///
/// Each record type reads `<data_dir>/<project_name>/<TypeName>/**/*.<extension>`.
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// The host's data directory.
    pub data_dir: PathBuf,

    /// Project directory name under the data directory.
    pub project_name: String,

    /// File extension to load, matched case-insensitively.
    pub extension: String,

    /// Echo diagnostics to stderr as they are logged.
    pub diagnostics_to_stderr: bool,

    /// Diagnostic buffer size.
    pub max_diagnostics: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data"),
            project_name: "formcfg".to_string(),
            extension: "cfg".to_string(),
            diagnostics_to_stderr: true,
            max_diagnostics: 10_000,
        }
    }
}

impl LoaderConfig {
    /// Creates a configuration rooted at a data directory.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the project directory name.
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Builder method to set the file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method to set stderr echo.
    #[must_use]
    pub fn with_diagnostics_to_stderr(mut self, enabled: bool) -> Self {
        self.diagnostics_to_stderr = enabled;
        self
    }

    /// Builder method to set the diagnostic buffer size.
    #[must_use]
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }

    /// Returns the project directory.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.data_dir.join(&self.project_name)
    }

    /// Returns the directory scanned for one record type.
    #[must_use]
    pub fn record_dir(&self, record_type: RecordType) -> PathBuf {
        self.project_dir().join(record_type.name())
    }

    /// Returns true if `path` carries the configured extension.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Creates a diagnostic log as configured.
    #[must_use]
    pub fn diagnostic_log(&self) -> DiagnosticLog {
        let output = if self.diagnostics_to_stderr {
            DiagnosticOutput::Stderr
        } else {
            DiagnosticOutput::None
        };
        DiagnosticLog::new(self.max_diagnostics).with_output(output)
    }
}
