//! Bridges one input's change/blur events to the form store

use super::debounce::Debouncer;
use crate::config::FormConfig;
use crate::state::{FieldValue, FormStore};
use std::sync::Arc;

/// Caller-supplied hook invoked with the propagated value after a debounced
/// propagation lands
pub type FieldHook = Arc<dyn Fn(&FieldValue) + Send + Sync>;

/// Keeps a responsive local echo of one field and forwards edits to the
/// store with trailing-edge debouncing.
///
/// Change and blur run on independent timers; each burst of events inside a
/// quiet period collapses to a single propagation carrying the newest value.
/// Dropping the synchronizer cancels both pending timers, so no propagation
/// fires after teardown. A synchronizer built without a store runs
/// standalone: edits stay local and only the hooks fire.
pub struct FieldSynchronizer {
    field: String,
    local: FieldValue,
    default_value: FieldValue,
    store: Option<FormStore>,
    config: FormConfig,
    change_timer: Debouncer,
    blur_timer: Debouncer,
    change_hook: Option<FieldHook>,
    blur_hook: Option<FieldHook>,
}

impl FieldSynchronizer {
    /// Create a synchronizer bound to one field of a form store
    pub fn attached(field: &str, store: FormStore, config: FormConfig) -> Self {
        Self::build(field, Some(store), FieldValue::default(), config)
    }

    /// Create a synchronizer with no store, usable outside any form
    pub fn standalone(field: &str, default_value: FieldValue, config: FormConfig) -> Self {
        Self::build(field, None, default_value, config)
    }

    fn build(
        field: &str,
        store: Option<FormStore>,
        default_value: FieldValue,
        config: FormConfig,
    ) -> Self {
        let delay = config.debounce_delay();
        Self {
            field: field.to_string(),
            local: default_value.clone(),
            default_value,
            store,
            config,
            change_timer: Debouncer::new(delay),
            blur_timer: Debouncer::new(delay),
            change_hook: None,
            blur_hook: None,
        }
    }

    /// Hook to run after each change propagation
    pub fn set_change_hook(&mut self, hook: FieldHook) {
        self.change_hook = Some(hook);
    }

    /// Hook to run after each blur propagation
    pub fn set_blur_hook(&mut self, hook: FieldHook) {
        self.blur_hook = Some(hook);
    }

    /// The field this synchronizer owns
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The local echo of the field's value
    pub fn value(&self) -> &FieldValue {
        &self.local
    }

    /// Whether a change or blur propagation is still waiting to fire
    pub fn is_propagation_pending(&self) -> bool {
        self.change_timer.is_pending() || self.blur_timer.is_pending()
    }

    /// Record an edit: the local echo updates immediately, the store update
    /// is debounced. Edits inside one quiet period propagate once, with the
    /// newest value.
    pub fn on_change(&mut self, raw: FieldValue) {
        self.local = raw.clone();
        let task = Self::propagate(
            self.store.clone(),
            self.field.clone(),
            raw,
            self.config.validate_on_change(),
            self.change_hook.clone(),
            "change",
        );
        self.change_timer.schedule(task);
    }

    /// Record a blur: same coalescing rule as `on_change`, on its own timer
    pub fn on_blur(&mut self, raw: FieldValue) {
        self.local = raw.clone();
        let task = Self::propagate(
            self.store.clone(),
            self.field.clone(),
            raw,
            self.config.validate_on_blur(),
            self.blur_hook.clone(),
            "blur",
        );
        self.blur_timer.schedule(task);
    }

    /// Resynchronize the local echo from the store's canonical value.
    ///
    /// Called once after construction and again whenever the store's value
    /// changes externally (reset, bulk update). Standalone synchronizers
    /// fall back to their default value.
    pub async fn set_initial_value(&mut self) {
        self.local = match &self.store {
            Some(store) => store
                .current_value(&self.field)
                .await
                .unwrap_or_else(|| self.default_value.clone()),
            None => self.default_value.clone(),
        };
    }

    async fn propagate(
        store: Option<FormStore>,
        field: String,
        value: FieldValue,
        should_validate: bool,
        hook: Option<FieldHook>,
        kind: &'static str,
    ) {
        if let Some(store) = store {
            if let Err(err) = store.set_field_value(&field, value.clone(), should_validate).await {
                // Nobody awaits a debounced propagation, so failures are
                // logged and dropped; there is no retry.
                tracing::error!("{kind} propagation for {field} failed: {err}");
                return;
            }
        }
        if let Some(hook) = hook {
            hook(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ClosureEngine, ValidationEngine};
    use crate::state::{FormErrors, FormValues};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn counting_engine(count: Arc<AtomicUsize>) -> Arc<dyn ValidationEngine> {
        Arc::new(ClosureEngine::new(move |_: &FormValues| {
            count.fetch_add(1, Ordering::SeqCst);
            FormErrors::new()
        }))
    }

    fn name_store(validations: Arc<AtomicUsize>) -> FormStore {
        FormStore::new(
            FormValues::new().with_field("name", ""),
            counting_engine(validations),
        )
    }

    fn recording_hook(seen: Arc<Mutex<Vec<String>>>) -> FieldHook {
        Arc::new(move |value: &FieldValue| {
            seen.lock().unwrap().push(value.as_text().to_string());
        })
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    mod change_propagation {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_local_echo_updates_immediately() {
            let store = name_store(Arc::new(AtomicUsize::new(0)));
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());

            sync.on_change("a".into());

            // Before the quiet period elapses: echo is live, store is not
            assert_eq!(sync.value().as_text(), "a");
            assert_eq!(store.current_value("name").await.unwrap().as_text(), "");
        }

        #[tokio::test(start_paused = true)]
        async fn test_typing_burst_propagates_once_with_final_value() {
            let validations = Arc::new(AtomicUsize::new(0));
            let store = name_store(validations.clone());
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());

            sync.on_change("a".into());
            sync.on_change("ab".into());
            sync.on_change("abc".into());
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(store.current_value("name").await.unwrap().as_text(), "abc");
            assert_eq!(validations.load(Ordering::SeqCst), 1);
            assert!(store.is_touched("name").await);
        }

        #[tokio::test(start_paused = true)]
        async fn test_separate_windows_propagate_in_order() {
            let validations = Arc::new(AtomicUsize::new(0));
            let store = name_store(validations.clone());
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());

            sync.on_change("ab".into());
            tokio::time::sleep(Duration::from_millis(400)).await;
            sync.on_change("abc".into());
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(store.current_value("name").await.unwrap().as_text(), "abc");
            assert_eq!(validations.load(Ordering::SeqCst), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_change_hook_sees_coalesced_value() {
            let store = name_store(Arc::new(AtomicUsize::new(0)));
            let mut sync = FieldSynchronizer::attached("name", store, FormConfig::default());
            let seen = Arc::new(Mutex::new(Vec::new()));
            sync.set_change_hook(recording_hook(seen.clone()));

            sync.on_change("a".into());
            sync.on_change("abc".into());
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(*seen.lock().unwrap(), vec!["abc".to_string()]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_validation_respects_config() {
            let validations = Arc::new(AtomicUsize::new(0));
            let store = name_store(validations.clone());
            let config = FormConfig {
                validate_on_change: Some(false),
                ..Default::default()
            };
            let mut sync = FieldSynchronizer::attached("name", store.clone(), config);

            sync.on_change("abc".into());
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(store.current_value("name").await.unwrap().as_text(), "abc");
            assert_eq!(validations.load(Ordering::SeqCst), 0);
        }
    }

    mod teardown {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_drop_mid_window_prevents_propagation() {
            init_tracing();
            let validations = Arc::new(AtomicUsize::new(0));
            let store = name_store(validations.clone());
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());

            sync.on_change("abc".into());
            assert!(sync.is_propagation_pending());
            drop(sync);
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(store.current_value("name").await.unwrap().as_text(), "");
            assert_eq!(validations.load(Ordering::SeqCst), 0);
            assert!(!store.is_touched("name").await);
        }

        #[tokio::test(start_paused = true)]
        async fn test_drop_cancels_change_and_blur_independently() {
            let validations = Arc::new(AtomicUsize::new(0));
            let store = name_store(validations.clone());
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());

            sync.on_change("abc".into());
            sync.on_blur("abc".into());
            drop(sync);
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(validations.load(Ordering::SeqCst), 0);
        }
    }

    mod blur_propagation {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_blur_runs_on_its_own_timer() {
            let store = name_store(Arc::new(AtomicUsize::new(0)));
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());
            let changes = Arc::new(Mutex::new(Vec::new()));
            let blurs = Arc::new(Mutex::new(Vec::new()));
            sync.set_change_hook(recording_hook(changes.clone()));
            sync.set_blur_hook(recording_hook(blurs.clone()));

            sync.on_change("abc".into());
            sync.on_blur("abc".into());
            tokio::time::sleep(Duration::from_millis(400)).await;

            // Scheduling the blur did not displace the pending change
            assert_eq!(*changes.lock().unwrap(), vec!["abc".to_string()]);
            assert_eq!(*blurs.lock().unwrap(), vec!["abc".to_string()]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_blur_burst_coalesces() {
            let validations = Arc::new(AtomicUsize::new(0));
            let store = name_store(validations.clone());
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());

            sync.on_blur("ab".into());
            sync.on_blur("abc".into());
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(store.current_value("name").await.unwrap().as_text(), "abc");
            assert_eq!(validations.load(Ordering::SeqCst), 1);
        }
    }

    mod standalone {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_edits_stay_local_and_hooks_fire() {
            let mut sync = FieldSynchronizer::standalone(
                "query",
                FieldValue::from("start"),
                FormConfig::default(),
            );
            let seen = Arc::new(Mutex::new(Vec::new()));
            sync.set_change_hook(recording_hook(seen.clone()));

            sync.on_change("a".into());
            sync.on_change("ab".into());
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(sync.value().as_text(), "ab");
            assert_eq!(*seen.lock().unwrap(), vec!["ab".to_string()]);
        }

        #[tokio::test]
        async fn test_set_initial_value_falls_back_to_default() {
            let mut sync = FieldSynchronizer::standalone(
                "query",
                FieldValue::from("start"),
                FormConfig::default(),
            );
            sync.on_change("typed".into());
            sync.set_initial_value().await;
            assert_eq!(sync.value().as_text(), "start");
        }
    }

    mod initial_value {
        use super::*;

        #[tokio::test]
        async fn test_pulls_current_value_from_store() {
            let store = FormStore::new(
                FormValues::new().with_field("name", "seed"),
                counting_engine(Arc::new(AtomicUsize::new(0))),
            );
            let mut sync = FieldSynchronizer::attached("name", store, FormConfig::default());

            sync.set_initial_value().await;
            assert_eq!(sync.value().as_text(), "seed");
        }

        #[tokio::test]
        async fn test_resynchronizes_after_external_reset() {
            let store = FormStore::new(
                FormValues::new().with_field("name", "seed"),
                counting_engine(Arc::new(AtomicUsize::new(0))),
            );
            let mut sync = FieldSynchronizer::attached("name", store.clone(), FormConfig::default());
            sync.set_initial_value().await;

            store
                .reset_form(Some(FormValues::new().with_field("name", "bulk")))
                .await;
            sync.set_initial_value().await;

            assert_eq!(sync.value().as_text(), "bulk");
        }

        #[tokio::test]
        async fn test_missing_field_falls_back_to_default() {
            let store = FormStore::new(
                FormValues::new(),
                counting_engine(Arc::new(AtomicUsize::new(0))),
            );
            let mut sync = FieldSynchronizer::attached("phantom", store, FormConfig::default());

            sync.set_initial_value().await;
            assert_eq!(sync.value(), &FieldValue::default());
        }
    }
}
