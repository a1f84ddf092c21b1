//! Read-only views over a form's state

use super::field::{FormErrors, FormValues};
use serde::Serialize;

/// Per-field view used to decide whether an error should be shown
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldState {
    /// Whether the field should currently be rendered as invalid
    pub invalid: bool,
    /// The validation message for the field, if any
    pub error: Option<String>,
}

/// Point-in-time view of a whole form, recomputed on every read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub initial_values: FormValues,
    pub current_values: FormValues,
    pub errors: FormErrors,
    /// No field is currently rendered as invalid (honors the display mode)
    pub is_valid: bool,
    /// Current values differ structurally from the initial values
    pub is_dirty: bool,
    /// A value-changing update has happened since construction or last reset
    pub has_been_updated: bool,
}

impl FormSnapshot {
    /// Dump the snapshot as JSON for debugging
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
