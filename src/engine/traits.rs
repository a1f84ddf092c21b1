//! Trait abstraction for the host-supplied collaborators, enabling mocking in tests

use crate::state::{FormErrors, FormValues};
use anyhow::Result;
use async_trait::async_trait;

/// External validation logic: maps the full set of current values to
/// field-level error messages. Supplied once per form instance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ValidationEngine: Send + Sync {
    /// Validate the given values, returning a message per failing field.
    ///
    /// An empty map means the form is valid. Returning `Err` signals the
    /// engine itself failed (not a validation failure) and rejects the
    /// store operation that awaited it.
    async fn validate(&self, values: &FormValues) -> Result<FormErrors>;
}

/// External submit logic, invoked by `FormStore::submit` with a copy of the
/// current values. Validation is not re-run at this point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: FormValues) -> Result<()>;
}
