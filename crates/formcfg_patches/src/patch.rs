//! The apply phase.
//!
//! A parsed payload is applied to the store one operation at a time.
//! Semantic failures (unresolved forms, wrong record types, out-of-range
//! values) are logged as warnings and skip only the failing operation.

use formcfg_foundation::{DiagnosticLog, ErrorContext, Result, Severity};
use formcfg_language::Statement;
use formcfg_storage::{FormStore, RecordType};

/// A parsed expression statement that knows how to patch the store.
pub trait Patch {
    /// The record type this patch targets.
    const RECORD_TYPE: RecordType;

    /// Applies the patch, logging and skipping operations that fail.
    fn apply(&self, store: &mut FormStore, log: &mut DiagnosticLog);
}

/// Applies a statement tree in source order.
///
/// Each conditional is evaluated against the store as it stands when the
/// conditional is reached, so earlier patches are visible to later guards.
pub fn apply_statements<P: Patch>(
    statements: &[Statement<P>],
    store: &mut FormStore,
    log: &mut DiagnosticLog,
) {
    for statement in statements {
        match statement {
            Statement::Expression(patch) => patch.apply(store, log),
            Statement::Conditional(chain) => {
                let body = chain.evaluates(&*store, log);
                apply_statements(body, store, log);
            }
        }
    }
}

/// Logs a failed operation as a warning tagged with the record type.
pub(crate) fn warn_on_error<T>(record_type: RecordType, result: Result<T>, log: &mut DiagnosticLog) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            let e = e.with_context(ErrorContext::new().with_record_type(record_type.name()));
            log.report(Severity::Warning, &e);
            None
        }
    }
}
