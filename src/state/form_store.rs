//! The shared form-state store and its operations

use super::field::{FieldValue, FormErrors, FormValues};
use super::snapshot::{FieldState, FormSnapshot};
use crate::engine::{SubmitHandler, ValidationEngine};
use crate::error::FormError;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Which errors are surfaced by `field_state`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDisplayMode {
    /// Only fields the user has interacted with show their errors
    #[default]
    TouchedOnly,
    /// Every outstanding error is shown, touched or not
    AllErrors,
}

/// Target for `FormStore::clear_errors`
#[derive(Debug, Clone)]
pub enum ClearTarget {
    All,
    Field(String),
    Replace(FormErrors),
}

#[derive(Debug)]
struct StoreInner {
    initial_values: FormValues,
    values: FormValues,
    errors: FormErrors,
    touched: HashSet<String>,
    display_mode: ErrorDisplayMode,
    has_been_updated: bool,
}

impl StoreInner {
    fn field_state(&self, field: &str) -> FieldState {
        let shown = match self.display_mode {
            ErrorDisplayMode::TouchedOnly => self.touched.contains(field),
            ErrorDisplayMode::AllErrors => true,
        };
        let error = if shown {
            self.errors.get(field).map(str::to_string)
        } else {
            None
        };
        FieldState {
            invalid: error.is_some(),
            error,
        }
    }

    fn is_valid(&self) -> bool {
        self.errors
            .fields()
            .all(|field| !self.field_state(field).invalid)
    }
}

/// Canonical state for one form instance.
///
/// Owns the value/error/touched maps for a named set of fields and serializes
/// every mutation through its own operations. The store is a cloneable handle
/// over shared interior state, so field synchronizers and deferred tasks can
/// all reach the same instance.
#[derive(Clone)]
pub struct FormStore {
    id: Uuid,
    inner: Arc<Mutex<StoreInner>>,
    engine: Arc<dyn ValidationEngine>,
    on_submit: Option<Arc<dyn SubmitHandler>>,
}

impl FormStore {
    /// Create a store seeded with initial values and a validation engine
    pub fn new(initial_values: FormValues, engine: Arc<dyn ValidationEngine>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(
            "form {id}: created with {} initial fields",
            initial_values.len()
        );
        Self {
            id,
            inner: Arc::new(Mutex::new(StoreInner {
                values: initial_values.clone(),
                initial_values,
                errors: FormErrors::new(),
                touched: HashSet::new(),
                display_mode: ErrorDisplayMode::default(),
                has_been_updated: false,
            })),
            engine,
            on_submit: None,
        }
    }

    /// Create a store that can also be submitted
    pub fn with_submit(
        initial_values: FormValues,
        engine: Arc<dyn ValidationEngine>,
        on_submit: Arc<dyn SubmitHandler>,
    ) -> Self {
        let mut store = Self::new(initial_values, engine);
        store.on_submit = Some(on_submit);
        store
    }

    /// Identifier of this form instance, carried in log events
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Point-in-time view of the whole form; recomputed on every call
    pub async fn snapshot(&self) -> FormSnapshot {
        let inner = self.inner.lock().await;
        FormSnapshot {
            initial_values: inner.initial_values.clone(),
            current_values: inner.values.clone(),
            errors: inner.errors.clone(),
            is_valid: inner.is_valid(),
            is_dirty: inner.values != inner.initial_values,
            has_been_updated: inner.has_been_updated,
        }
    }

    /// Display view of one field, honoring the current display mode
    pub async fn field_state(&self, field: &str) -> FieldState {
        self.inner.lock().await.field_state(field)
    }

    /// The canonical value for a field, if the field exists
    pub async fn current_value(&self, field: &str) -> Option<FieldValue> {
        self.inner.lock().await.values.get(field).cloned()
    }

    /// Whether the user has interacted with the field
    pub async fn is_touched(&self, field: &str) -> bool {
        self.inner.lock().await.touched.contains(field)
    }

    /// Current error display mode
    pub async fn display_mode(&self) -> ErrorDisplayMode {
        self.inner.lock().await.display_mode
    }

    /// Write a field's value, optionally revalidate, and mark it touched.
    ///
    /// The whole update happens under one lock: once this resolves, readers
    /// see the new value, the refreshed errors, and the touched flag
    /// together. A validation engine failure rejects the operation and
    /// leaves errors and the touched set as they were.
    pub async fn set_field_value(
        &self,
        field: &str,
        value: FieldValue,
        should_validate: bool,
    ) -> Result<(), FormError> {
        let mut inner = self.inner.lock().await;
        let changed = inner.values.get(field) != Some(&value);
        inner.values.set(field, value);
        if changed {
            inner.has_been_updated = true;
        }
        if should_validate {
            let outcome = self
                .engine
                .validate(&inner.values)
                .await
                .map_err(FormError::Engine)?;
            inner.errors = outcome;
        }
        inner.touched.insert(field.to_string());
        tracing::debug!(
            "form {}: set {field} (changed={changed}, validated={should_validate})",
            self.id
        );
        Ok(())
    }

    /// Clear validation errors.
    ///
    /// Whatever the target (one field, a replacement map, or everything),
    /// the operation always finishes with an empty error map.
    pub async fn clear_errors(&self, target: ClearTarget) {
        let mut inner = self.inner.lock().await;
        match target {
            ClearTarget::All => {}
            ClearTarget::Field(name) => {
                inner.errors.remove(&name);
            }
            ClearTarget::Replace(next) => inner.errors = next,
        }
        // Every target variant ends with a full wipe.
        inner.errors.clear();
        tracing::debug!("form {}: errors cleared", self.id);
    }

    /// Reset the form using one of two mutually exclusive strategies.
    ///
    /// With `None`, current values revert to the initial values. With
    /// `Some(partial)`, the given values are merged over the current ones
    /// and the initial values are NOT restored. Both strategies clear
    /// errors, clear the touched set, revert the display mode to
    /// `TouchedOnly`, and reset the has-been-updated latch.
    pub async fn reset_form(&self, next_values: Option<FormValues>) {
        let mut inner = self.inner.lock().await;
        match next_values {
            None => inner.values = inner.initial_values.clone(),
            Some(partial) => inner.values.merge(partial),
        }
        inner.errors.clear();
        inner.touched.clear();
        inner.display_mode = ErrorDisplayMode::TouchedOnly;
        inner.has_been_updated = false;
        tracing::info!("form {}: reset", self.id);
    }

    /// Switch to showing all errors, then validate one field or the form.
    ///
    /// The mode switch is sticky: it persists until the next `reset_form`,
    /// even if the validation itself fails. A single-field trigger updates
    /// only that field's error entry and marks the field touched; a
    /// whole-form trigger replaces the error map.
    pub async fn trigger_validation(&self, field: Option<&str>) -> Result<(), FormError> {
        let mut inner = self.inner.lock().await;
        inner.display_mode = ErrorDisplayMode::AllErrors;
        let outcome = self
            .engine
            .validate(&inner.values)
            .await
            .map_err(FormError::Engine)?;
        match field {
            Some(name) => {
                match outcome.get(name) {
                    Some(message) => inner.errors.set(name, message.to_string()),
                    None => {
                        inner.errors.remove(name);
                    }
                }
                inner.touched.insert(name.to_string());
                tracing::debug!("form {}: validation triggered for {name}", self.id);
            }
            None => {
                inner.errors = outcome;
                tracing::debug!("form {}: validation triggered for all fields", self.id);
            }
        }
        Ok(())
    }

    /// Invoke the submit handler with a copy of the current values.
    ///
    /// No validation runs here; either it already passed or the handler
    /// short-circuits on its own.
    pub async fn submit(&self) -> Result<(), FormError> {
        let handler = self.on_submit.clone().ok_or(FormError::NoSubmitHandler)?;
        let values = self.inner.lock().await.values.clone();
        tracing::info!("form {}: submitting {} fields", self.id, values.len());
        handler.submit(values).await.map_err(FormError::Submit)
    }
}
