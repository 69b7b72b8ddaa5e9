//! Local precondition checks run before any request is built.
//!
//! The only rule is that both path IDs are positive. Every failing field is
//! reported, in declaration order, so the caller can fix all of them at once.

/// A single field that failed its precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: &'static str,
}

/// One or more request fields failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Names of the offending fields, e.g. `["ConfigID", "Version"]`.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

const MUST_BE_POSITIVE: &str = "must be a positive integer";

pub(crate) fn require_positive_ids(config_id: i64, version: i64) -> Result<(), ValidationError> {
    let violations: Vec<FieldViolation> = [("ConfigID", config_id), ("Version", version)]
        .into_iter()
        .filter(|(_, value)| *value <= 0)
        .map(|(field, _)| FieldViolation {
            field,
            reason: MUST_BE_POSITIVE,
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
