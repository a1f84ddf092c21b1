//! Debounced propagation between inputs and the form store

mod debounce;
mod field_sync;

pub use debounce::Debouncer;
pub use field_sync::{FieldHook, FieldSynchronizer};
