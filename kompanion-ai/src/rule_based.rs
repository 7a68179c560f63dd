//! Rule-based backend: keyword tables and templates behind the async contract.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use kompanion_core::config::LatencyConfig;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use crate::backend::OnDeviceAiService;
use crate::callback::{self, AiCallback};
use crate::error::AiError;
use crate::scheduler::{DeliveryScheduler, SchedulerStats};
use crate::types::{AiRequest, BackendKind, RequestId};

type Generator = fn(&AiRequest) -> String;

/// Always-available backend producing deterministic, template-based text
/// after a fixed simulated latency per request kind.
pub struct RuleBasedBackend {
    scheduler: DeliveryScheduler,
    latency: LatencyConfig,
    released: AtomicBool,
    generate: Generator,
}

impl RuleBasedBackend {
    /// Create a backend delivering on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle, latency: LatencyConfig) -> Self {
        Self {
            scheduler: DeliveryScheduler::new(runtime),
            latency,
            released: AtomicBool::new(false),
            generate: AiRequest::generate_rule_based,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_generator(
        runtime: Handle,
        latency: LatencyConfig,
        generate: Generator,
    ) -> Self {
        Self {
            generate,
            ..Self::new(runtime, latency)
        }
    }

    /// Delivery queue statistics.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }
}

impl OnDeviceAiService for RuleBasedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::RuleBased
    }

    fn is_available(&self) -> bool {
        !self.released.load(Ordering::Acquire)
    }

    fn submit(&self, request: AiRequest, callback: Box<dyn AiCallback>) -> RequestId {
        let kind = request.kind();

        if self.released.load(Ordering::Acquire) {
            warn!(%kind, "Request issued after cleanup");
            return self.scheduler.schedule(Duration::ZERO, move || {
                callback::deliver(callback, Err(AiError::Released));
            });
        }

        debug!(%kind, ?request, "Scheduling rule-based request");
        let generate = self.generate;
        self.scheduler.schedule_with(
            kind.latency(&self.latency),
            move || run_generation(generate, &request),
            move |result| callback::deliver(callback, result),
        )
    }

    fn cancel(&self) {
        let cancelled = self.scheduler.cancel_all();
        debug!(cancelled, "Cancelled all pending AI operations");
    }

    fn cleanup(&self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            self.cancel();
            info!("Rule-based backend released");
        }
    }
}

/// Generate, turning any panic into a [`AiError::Generation`].
fn run_generation(generate: Generator, request: &AiRequest) -> Result<String, AiError> {
    let kind = request.kind();
    panic::catch_unwind(AssertUnwindSafe(|| generate(request))).map_err(|payload| {
        let reason = panic_reason(payload.as_ref());
        error!(%kind, %reason, "Generation fault");
        AiError::Generation(format!("{}: {reason}", kind.failure_prefix()))
    })
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn backend() -> RuleBasedBackend {
        RuleBasedBackend::new(Handle::current(), LatencyConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn recipe_arrives_after_latency() {
        let backend = backend();
        let (cb, mut rx) = callback::channel();
        backend.suggest_recipes("chicken, rice", None, cb);
        assert!(rx.try_recv().is_err(), "must not deliver before returning");

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(rx.try_recv().is_err(), "recipe latency is 1200ms");

        tokio::time::sleep(Duration::from_millis(200)).await;
        let text = rx.try_recv().unwrap().unwrap();
        assert!(text.contains("**Herb-Roasted Chicken**"));
    }

    #[tokio::test(start_paused = true)]
    async fn each_kind_has_its_own_latency() {
        let backend = backend();
        let (sub_cb, sub_rx) = callback::channel();
        let (chat_cb, chat_rx) = callback::channel();
        let start = tokio::time::Instant::now();

        backend.suggest_substitutes("butter", None, sub_cb);
        backend.chat("hello", None, chat_cb);

        sub_rx.await.unwrap().unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(800) && elapsed < Duration::from_millis(900));
        chat_rx.await.unwrap().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_callback() {
        let backend = backend();
        let (cb, rx) = callback::channel();
        backend.generate_grocery_list("", "Weekly family meals", cb);
        backend.cancel();

        // Callback dropped unused, so the receiver closes.
        assert!(rx.await.is_err());
        assert_eq!(backend.stats().total_delivered, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cancel_during_slow_generation_suppresses_callback() {
        let backend =
            RuleBasedBackend::with_generator(Handle::current(), LatencyConfig::immediate(), |_| {
                std::thread::sleep(Duration::from_millis(200));
                "slow answer".to_string()
            });
        let fired = Arc::new(AtomicUsize::new(0));
        let (s, e) = (Arc::clone(&fired), Arc::clone(&fired));
        backend.chat(
            "hello",
            None,
            callback::from_fns(
                move |_| {
                    s.fetch_add(1, Ordering::SeqCst);
                },
                move |_| {
                    e.fetch_add(1, Ordering::SeqCst);
                },
            ),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        backend.cancel();
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0, "no callback after cancel returned");
        assert_eq!(backend.stats().total_delivered, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn panic_becomes_error_callback() {
        let backend =
            RuleBasedBackend::with_generator(Handle::current(), LatencyConfig::immediate(), |_| {
                panic!("template table corrupted")
            });
        let (cb, rx) = callback::channel();
        backend.suggest_recipes("eggs", None, cb);

        let outcome = rx.await.unwrap();
        assert_eq!(
            outcome,
            Err("Failed to generate recipe suggestions: template table corrupted".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_is_idempotent_and_rejects_new_requests() {
        let backend = backend();
        let (pending_cb, pending_rx) = callback::channel();
        backend.chat("help", None, pending_cb);

        backend.cleanup();
        backend.cleanup();
        assert!(!backend.is_available());
        assert!(pending_rx.await.is_err());

        let (cb, rx) = callback::channel();
        backend.chat("help", None, cb);
        assert_eq!(rx.await.unwrap(), Err("AI backend has been released".to_string()));
    }
}
