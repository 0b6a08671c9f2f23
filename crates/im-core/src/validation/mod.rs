//! Field validation.
//!
//! A [`StepSchema`] lists the [`FieldRule`]s of one form step. [`validate`] runs
//! a schema against the raw string values of a data bucket and returns the
//! first failing rule of every field. An empty [`FieldErrors`] means the
//! bucket is fully valid.

mod rules;
mod schema;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use rules::FieldRule;
pub use schema::{FieldSpec, StepSchema, StepSchemas};

/// Raw form values keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

/// Failing error kind per field name.
pub type FieldErrors = BTreeMap<String, ValidationErrorKind>;

/// Kind of a field validation failure.
///
/// Only the kind is reported; rendering a message is left to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Value is empty after trimming.
    Required,
    /// Trimmed value is shorter than `min` characters.
    MinLength { min: usize },
    /// Value is not shaped like `local@domain.tld`.
    EmailShape,
    /// Value is not a plausible calendar year.
    NumericYear,
    /// Non-empty value is not an absolute URL.
    UrlShape,
    /// Value is not part of the allowed set for this field.
    EnumMembership,
}

/// Validate `data` against `schema`.
///
/// Fields missing from `data` are validated as the empty string. Each field
/// reports at most one error: the first rule (in schema order) that fails.
pub fn validate(schema: &StepSchema, data: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in schema.fields() {
        let value = data.get(spec.name).map(String::as_str).unwrap_or("");
        if let Some(kind) = spec.rules.iter().find_map(|rule| rule.check(value).err()) {
            errors.insert(spec.name.to_string(), kind);
        }
    }
    errors
}
