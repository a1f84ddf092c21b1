//! Debounced synchronization between input fields and a shared form-state store
//!
//! Two components, in dependency order: [`FormStore`] owns the canonical
//! values, validation errors, and touched flags for one form instance, and
//! [`FieldSynchronizer`] bridges a single input's change/blur events to the
//! store through trailing-edge debounced propagation, cancelled on teardown.
//! Validation and submit logic are supplied by the host through the
//! [`ValidationEngine`] and [`SubmitHandler`] traits.
//!
//! All operations run as deferred continuations on the host's tokio
//! runtime; nothing here spawns worker threads or touches disk.

pub mod config;
pub mod engine;
mod error;
pub mod state;
pub mod sync;

pub use config::{DEFAULT_DEBOUNCE_MS, FormConfig};
pub use engine::{ClosureEngine, SubmitHandler, ValidationEngine};
pub use error::FormError;
pub use state::{
    ClearTarget, ErrorDisplayMode, FieldState, FieldValue, FormErrors, FormSnapshot, FormStore,
    FormValues,
};
pub use sync::{Debouncer, FieldHook, FieldSynchronizer};
