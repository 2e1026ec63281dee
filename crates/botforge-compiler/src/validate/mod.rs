//! Caller-side validation of bot specifications.
//!
//! Generation accepts any specification and degrades where it must. These
//! checks let front-ends reject the inputs Discord would refuse, and report
//! the ones that would only degrade as warnings.

mod structure;
mod warnings;

pub use warnings::ValidationWarning;

use crate::diagnostic::CompilerError;
use crate::ir::ProjectSpec;

/// Validates `spec`, returning the non-fatal findings.
///
/// Reporting the warnings is the caller's job; they are only logged at
/// debug level here.
pub fn validate_spec(spec: &ProjectSpec) -> Result<Vec<ValidationWarning>, CompilerError> {
    structure::validate_structure(spec)?;

    let warnings = warnings::collect_warnings(spec);
    for warning in &warnings {
        tracing::debug!(%warning, "validation warning");
    }
    Ok(warnings)
}
