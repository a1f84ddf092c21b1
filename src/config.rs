//! Configuration for form synchronization behavior

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Debounce interval applied when the host does not configure one
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Host-tunable options for a form instance.
///
/// All fields are optional so the struct can be embedded in a host
/// application's own config file; absent fields fall back to the reference
/// behavior (300 ms trailing-edge debounce, validation on change and blur).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Quiet period before an edit is propagated to the store, in milliseconds
    pub debounce_ms: Option<u64>,
    /// Run the validation engine when a change propagation fires
    pub validate_on_change: Option<bool>,
    /// Run the validation engine when a blur propagation fires
    pub validate_on_blur: Option<bool>,
}

impl FormConfig {
    /// The effective debounce quiet period
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    /// Whether change propagations validate (defaults to true)
    pub fn validate_on_change(&self) -> bool {
        self.validate_on_change.unwrap_or(true)
    }

    /// Whether blur propagations validate (defaults to true)
    pub fn validate_on_blur(&self) -> bool {
        self.validate_on_blur.unwrap_or(true)
    }
}
