//! Delayed delivery queue backing the asynchronous request contract.
//!
//! Every request is turned into a timer task on the owning tokio runtime:
//! sleep for the simulated processing time, produce the result, then hand it
//! to the delivery closure. Callers never block and never see a delivery
//! before `schedule` returns.
//!
//! Cancellation guarantee: once [`DeliveryScheduler::cancel`] or
//! [`DeliveryScheduler::cancel_all`] returns, no delivery for a cancelled
//! request will start and none is still running. A task only delivers after
//! *claiming* its slot in the pending table, and claim plus delivery happen
//! under a shared delivery gate that cancellation waits on. The one
//! exception is a cancel issued from inside a delivery closure, which cannot
//! wait on itself; there the delivery in progress is the caller's own.
//!
//! Producing the result (the slow part) happens before the claim, outside
//! every lock, so a cancel never waits on generation.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::types::RequestId;

thread_local! {
    /// Set while this thread runs a delivery closure.
    static IN_DELIVERY: Cell<bool> = const { Cell::new(false) };
}

/// Thread-safe delayed-delivery queue bound to one runtime.
pub struct DeliveryScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    /// Read-held across claim + delivery; cancellation takes it for write.
    gate: Arc<RwLock<()>>,
    runtime: Handle,
}

struct SchedulerInner {
    /// `None` until the spawned task's abort handle is recorded.
    pending: HashMap<RequestId, Option<AbortHandle>>,
    next_id: RequestId,
    total_scheduled: u64,
    total_delivered: u64,
    total_cancelled: u64,
}

/// Statistics about the delivery queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Deliveries still waiting on their timer.
    pub pending: usize,
    /// Total requests scheduled.
    pub total_scheduled: u64,
    /// Total deliveries that ran.
    pub total_delivered: u64,
    /// Total requests removed by cancellation.
    pub total_cancelled: u64,
}

impl DeliveryScheduler {
    /// Create a scheduler that spawns its timers on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                pending: HashMap::new(),
                next_id: 0,
                total_scheduled: 0,
                total_delivered: 0,
                total_cancelled: 0,
            })),
            gate: Arc::new(RwLock::new(())),
            runtime,
        }
    }

    /// Run `job` after `delay`, unless cancelled first.
    pub fn schedule<F>(&self, delay: Duration, job: F) -> RequestId
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_with(delay, || (), move |()| job())
    }

    /// After `delay`, run `produce` and pass its output to `deliver`.
    ///
    /// `produce` is skipped if the request was cancelled during the delay;
    /// `deliver` only runs if the request is still pending once `produce`
    /// has finished.
    pub fn schedule_with<T, P, D>(&self, delay: Duration, produce: P, deliver: D) -> RequestId
    where
        T: Send + 'static,
        P: FnOnce() -> T + Send + 'static,
        D: FnOnce(T) + Send + 'static,
    {
        // Held across the spawn so the task cannot claim its slot before it
        // is registered.
        let mut inner = self.inner.lock();

        let id = inner.next_id;
        inner.next_id += 1;
        inner.total_scheduled += 1;
        inner.pending.insert(id, None);

        let shared = Arc::clone(&self.inner);
        let gate = Arc::clone(&self.gate);
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !shared.lock().pending.contains_key(&id) {
                return;
            }
            let output = produce();

            let _open = gate.read();
            if claim(&shared, id) {
                let _marker = DeliveryMarker::enter();
                deliver(output);
            }
        });

        if let Some(slot) = inner.pending.get_mut(&id) {
            *slot = Some(task.abort_handle());
        }
        id
    }

    /// Cancel one pending delivery. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&self, id: RequestId) -> bool {
        let mut inner = self.inner.lock();
        let Some(handle) = inner.pending.remove(&id) else {
            return false;
        };
        inner.total_cancelled += 1;
        if let Some(handle) = handle {
            handle.abort();
        }
        drop(inner);

        self.wait_for_deliveries();
        true
    }

    /// Cancel every pending delivery. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let cancelled = {
            let mut inner = self.inner.lock();
            let cancelled = inner.pending.len();
            for (_, handle) in inner.pending.drain() {
                if let Some(handle) = handle {
                    handle.abort();
                }
            }
            inner.total_cancelled += cancelled as u64;
            cancelled
        };

        self.wait_for_deliveries();
        if cancelled > 0 {
            debug!(cancelled, "Cancelled pending deliveries");
        }
        cancelled
    }

    /// Block until deliveries that already claimed their slot have finished.
    fn wait_for_deliveries(&self) {
        if !IN_DELIVERY.with(Cell::get) {
            drop(self.gate.write());
        }
    }

    /// Deliveries still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Get queue statistics.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        let inner = self.inner.lock();
        SchedulerStats {
            pending: inner.pending.len(),
            total_scheduled: inner.total_scheduled,
            total_delivered: inner.total_delivered,
            total_cancelled: inner.total_cancelled,
        }
    }
}

/// Marks the current thread as delivering until dropped, panics included.
struct DeliveryMarker;

impl DeliveryMarker {
    fn enter() -> Self {
        IN_DELIVERY.with(|flag| flag.set(true));
        Self
    }
}

impl Drop for DeliveryMarker {
    fn drop(&mut self) {
        IN_DELIVERY.with(|flag| flag.set(false));
    }
}

/// Take the slot for `id`; only the winner may deliver.
fn claim(inner: &Mutex<SchedulerInner>, id: RequestId) -> bool {
    let mut inner = inner.lock();
    if inner.pending.remove(&id).is_some() {
        inner.total_delivered += 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let shared = Arc::clone(&hits);
        let make = move || -> Box<dyn FnOnce() + Send> {
            let hits = Arc::clone(&shared);
            Box::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        (hits, make)
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_after_delay() {
        let scheduler = DeliveryScheduler::new(Handle::current());
        let (hits, job) = counter();

        scheduler.schedule(Duration::from_millis(500), job());
        assert_eq!(hits.load(Ordering::SeqCst), 0, "never delivered inline");

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.stats().total_delivered, 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_prevents_delivery() {
        let scheduler = DeliveryScheduler::new(Handle::current());
        let (hits, job) = counter();

        scheduler.schedule(Duration::from_millis(100), job());
        scheduler.schedule(Duration::from_millis(200), job());
        assert_eq!(scheduler.cancel_all(), 2);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let stats = scheduler.stats();
        assert_eq!(stats.total_scheduled, 2);
        assert_eq!(stats.total_cancelled, 2);
        assert_eq!(stats.total_delivered, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_single_request() {
        let scheduler = DeliveryScheduler::new(Handle::current());
        let (hits, job) = counter();

        let first = scheduler.schedule(Duration::from_millis(100), job());
        scheduler.schedule(Duration::from_millis(100), job());
        assert!(scheduler.cancel(first));
        assert!(!scheduler.cancel(first));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_delivery_is_noop() {
        let scheduler = DeliveryScheduler::new(Handle::current());
        let (hits, job) = counter();

        let id = scheduler.schedule(Duration::from_millis(10), job());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.cancel_all(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_request_skips_produce() {
        let scheduler = DeliveryScheduler::new(Handle::current());
        let produced = Arc::new(AtomicUsize::new(0));
        let shared = Arc::clone(&produced);

        scheduler.schedule_with(
            Duration::from_millis(100),
            move || shared.fetch_add(1, Ordering::SeqCst),
            |_| panic!("cancelled request delivered"),
        );
        scheduler.cancel_all();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(produced.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cancel_waits_for_delivery_in_progress() {
        let scheduler = DeliveryScheduler::new(Handle::current());
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));
        let (s, f) = (Arc::clone(&started), Arc::clone(&finished));

        scheduler.schedule(Duration::ZERO, move || {
            s.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(100));
            f.fetch_add(1, Ordering::SeqCst);
        });
        while started.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // Already claimed, so nothing to cancel, but the running delivery
        // must be over once this returns.
        assert_eq!(scheduler.cancel_all(), 0);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_from_inside_delivery_returns() {
        let scheduler = Arc::new(DeliveryScheduler::new(Handle::current()));
        let (hits, job) = counter();

        let inner = Arc::clone(&scheduler);
        let first = job();
        scheduler.schedule(Duration::from_millis(10), move || {
            inner.cancel_all();
            first();
        });
        scheduler.schedule(Duration::from_millis(50), job());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.stats().total_cancelled, 1);
    }
}
