//! Process-wide backend selection.
//!
//! [`ServiceSelector`] memoizes one live backend. Replacing it (explicit
//! recreate or a mode change) always cleans up the old instance first, and
//! the whole check-create-publish sequence runs under a single lock, so
//! concurrent callers never build two backends at once.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::backend::OnDeviceAiService;
use crate::factory::BackendFactory;
use crate::prefs::{KEY_FORCE_MOCK, PreferenceStore};
use crate::types::{BackendKind, NOT_INITIALIZED_LABEL};

type Slot = Option<Arc<dyn OnDeviceAiService>>;

/// Owner of the current backend instance.
pub struct ServiceSelector {
    factory: BackendFactory,
    prefs: Arc<dyn PreferenceStore>,
    current: Mutex<Slot>,
}

impl ServiceSelector {
    /// Selector with no backend created yet.
    #[must_use]
    pub fn new(factory: BackendFactory, prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            factory,
            prefs,
            current: Mutex::new(None),
        }
    }

    /// The current backend, creating it on first use or when
    /// `force_recreate` is set.
    pub fn get_instance(&self, force_recreate: bool) -> Arc<dyn OnDeviceAiService> {
        let mut current = self.current.lock();
        if !force_recreate {
            if let Some(backend) = current.as_ref() {
                return Arc::clone(backend);
            }
        }
        self.recreate(&mut current)
    }

    /// Persist the force-mock flag and rebuild the backend.
    ///
    /// A failed write is logged and the rebuild still happens; the new
    /// backend then reflects whatever the store actually holds.
    pub fn set_force_mock_mode(&self, force_mock: bool) -> Arc<dyn OnDeviceAiService> {
        let mut current = self.current.lock();
        if let Err(e) = self.prefs.set_bool(KEY_FORCE_MOCK, force_mock) {
            warn!(error = %e, force_mock, "Could not persist force-mock preference");
        }
        info!(force_mock, "Force mock mode changed");
        self.recreate(&mut current)
    }

    /// Whether the current backend is the rule-based one. `false` before
    /// any backend exists.
    #[must_use]
    pub fn is_using_mock_backend(&self) -> bool {
        self.current_kind() == Some(BackendKind::RuleBased)
    }

    /// Variant of the current backend, if one exists.
    #[must_use]
    pub fn current_kind(&self) -> Option<BackendKind> {
        self.current.lock().as_ref().map(|backend| backend.kind())
    }

    /// Status label for the current backend.
    #[must_use]
    pub fn current_backend_label(&self) -> &'static str {
        self.current_kind()
            .map_or(NOT_INITIALIZED_LABEL, BackendKind::label)
    }

    /// Clean up and forget the current backend. The next
    /// [`get_instance`](Self::get_instance) builds a fresh one.
    pub fn shutdown(&self) {
        if let Some(backend) = self.current.lock().take() {
            backend.cleanup();
            debug!(backend = backend.kind().label(), "Backend shut down");
        }
    }

    fn recreate(&self, current: &mut Slot) -> Arc<dyn OnDeviceAiService> {
        if let Some(old) = current.take() {
            old.cleanup();
            debug!(backend = old.kind().label(), "Previous backend released");
        }
        let backend = self.factory.create(self.prefs.as_ref());
        info!(backend = backend.kind().label(), "AI backend ready");
        *current = Some(Arc::clone(&backend));
        backend
    }
}

impl Drop for ServiceSelector {
    fn drop(&mut self) {
        self.shutdown();
    }
}
