//! Backend construction and selection rule.
//!
//! ```text
//! force_mock_ai set? ──yes──► rule-based
//!        │ no
//!        ▼
//! model loader registered, model file present, enough memory?
//!        │ yes                                   │ no
//!        ▼                                       ▼
//! load + readiness check ──any failure──► rule-based
//!        │ ok
//!        ▼
//!   model backend
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kompanion_core::config::{KompanionConfig, LatencyConfig};
use sysinfo::System;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::backend::OnDeviceAiService;
use crate::error::AiError;
use crate::prefs::{KEY_FORCE_MOCK, KEY_MODEL_PATH, PreferenceStore};
use crate::rule_based::RuleBasedBackend;

/// Reports device resources relevant to running a model.
pub trait DeviceProbe: Send + Sync {
    /// Currently available system memory, if it can be determined.
    fn available_memory_bytes(&self) -> Option<u64>;
}

/// [`DeviceProbe`] backed by `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl DeviceProbe for SystemProbe {
    fn available_memory_bytes(&self) -> Option<u64> {
        let mut sys = System::new();
        sys.refresh_memory();
        Some(sys.available_memory())
    }
}

/// Constructs and initialises a model-backed backend.
///
/// No inference runtime ships with this crate; hosts that integrate one
/// register a loader with [`BackendFactory::with_loader`].
pub trait ModelLoader: Send + Sync {
    /// Load the model at `model_path` and return a ready backend.
    ///
    /// # Errors
    /// Any error makes the factory fall back to the rule-based backend.
    fn load(
        &self,
        model_path: &Path,
        runtime: Handle,
    ) -> Result<Arc<dyn OnDeviceAiService>, AiError>;
}

/// Builds backends according to preferences and device capabilities.
pub struct BackendFactory {
    runtime: Handle,
    latency: LatencyConfig,
    min_model_memory_bytes: u64,
    loader: Option<Arc<dyn ModelLoader>>,
    probe: Arc<dyn DeviceProbe>,
}

impl BackendFactory {
    /// Factory producing backends that deliver on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle, config: &KompanionConfig) -> Self {
        Self {
            runtime,
            latency: config.latency,
            min_model_memory_bytes: config
                .backend
                .min_model_memory_mb
                .saturating_mul(1024 * 1024),
            loader: None,
            probe: Arc::new(SystemProbe),
        }
    }

    /// Register a model loader.
    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn ModelLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Replace the device probe.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn DeviceProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Apply the selection rule. Never fails: every failure path ends in the
    /// rule-based backend.
    pub fn create(&self, prefs: &dyn PreferenceStore) -> Arc<dyn OnDeviceAiService> {
        let force_mock = prefs.get_bool(KEY_FORCE_MOCK).unwrap_or_else(|e| {
            warn!(error = %e, "Could not read force-mock preference, assuming false");
            None
        });

        if force_mock.unwrap_or(false) {
            info!("Using rule-based backend (forced by preference)");
            return self.rule_based();
        }

        if let Some(loader) = &self.loader {
            match self.try_model(loader.as_ref(), prefs) {
                Ok(Some(backend)) => return backend,
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Model backend failed, falling back to rule-based"),
            }
        }

        info!("Using rule-based backend (default)");
        self.rule_based()
    }

    fn rule_based(&self) -> Arc<dyn OnDeviceAiService> {
        Arc::new(RuleBasedBackend::new(self.runtime.clone(), self.latency))
    }

    /// `Ok(None)` when the model is simply not usable on this device.
    fn try_model(
        &self,
        loader: &dyn ModelLoader,
        prefs: &dyn PreferenceStore,
    ) -> Result<Option<Arc<dyn OnDeviceAiService>>, AiError> {
        let Some(path) = prefs.get_string(KEY_MODEL_PATH)? else {
            debug!("No model path configured");
            return Ok(None);
        };
        let path = PathBuf::from(path);
        if !path.is_file() {
            debug!(path = %path.display(), "Model file not present");
            return Ok(None);
        }

        match self.probe.available_memory_bytes() {
            Some(available) if available >= self.min_model_memory_bytes => {}
            available => {
                debug!(
                    ?available,
                    required = self.min_model_memory_bytes,
                    "Insufficient memory for model"
                );
                return Ok(None);
            }
        }

        let runtime = self.runtime.clone();
        let backend = panic::catch_unwind(AssertUnwindSafe(|| loader.load(&path, runtime)))
            .map_err(|_| AiError::BackendInit("model loader panicked".into()))?
            .map_err(|e| match e {
                AiError::BackendInit(_) => e,
                other => AiError::BackendInit(other.to_string()),
            })?;

        if !backend.is_available() {
            backend.cleanup();
            return Err(AiError::BackendInit("model backend reported not ready".into()));
        }

        info!(path = %path.display(), "Using on-device model backend");
        Ok(Some(backend))
    }
}
