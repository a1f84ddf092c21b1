//! Error taxonomy for store operations

use thiserror::Error;

/// Failures surfaced by asynchronous store operations.
///
/// Per-field validation messages are not errors in this sense; they live in
/// `FormErrors` as data. These variants cover the operations themselves
/// failing.
#[derive(Debug, Error)]
pub enum FormError {
    /// The external validation engine failed to produce a result
    #[error("validation engine failed: {0}")]
    Engine(#[source] anyhow::Error),

    /// The submit handler rejected or failed
    #[error("submit handler failed: {0}")]
    Submit(#[source] anyhow::Error),

    /// `submit` was called on a form constructed without a submit handler
    #[error("no submit handler configured for this form")]
    NoSubmitHandler,
}
