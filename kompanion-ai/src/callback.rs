//! Result sink for asynchronous requests.
//!
//! A callback is consumed by its terminal call: [`AiCallback::on_success`]
//! and [`AiCallback::on_error`] take `self: Box<Self>`, so at most one of
//! them can ever run. Backends guarantee that exactly one runs per request
//! unless the request is cancelled, in which case the callback is dropped
//! without being called.

use tokio::sync::oneshot;

use crate::error::AiError;

/// Three-case result sink.
pub trait AiCallback: Send + 'static {
    /// Terminal: the generated text.
    fn on_success(self: Box<Self>, response: String);

    /// Terminal: a human-readable failure message.
    fn on_error(self: Box<Self>, error: String);

    /// Partial output, zero or more times, strictly before the terminal call.
    fn on_progress(&self, _partial: &str) {}
}

/// Route a result to the matching terminal arm.
pub fn deliver(callback: Box<dyn AiCallback>, result: Result<String, AiError>) {
    match result {
        Ok(text) => callback.on_success(text),
        Err(err) => callback.on_error(err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Closure adapter
// ---------------------------------------------------------------------------

/// Callback built from two closures.
pub struct FnCallback<S, E> {
    success: S,
    error: E,
}

impl<S, E> AiCallback for FnCallback<S, E>
where
    S: FnOnce(String) + Send + 'static,
    E: FnOnce(String) + Send + 'static,
{
    fn on_success(self: Box<Self>, response: String) {
        (self.success)(response);
    }

    fn on_error(self: Box<Self>, error: String) {
        (self.error)(error);
    }
}

/// Box a pair of closures as a callback.
pub fn from_fns<S, E>(success: S, error: E) -> Box<dyn AiCallback>
where
    S: FnOnce(String) + Send + 'static,
    E: FnOnce(String) + Send + 'static,
{
    Box::new(FnCallback { success, error })
}

// ---------------------------------------------------------------------------
// Channel adapter
// ---------------------------------------------------------------------------

/// Outcome received through a [`channel`] callback.
pub type Outcome = Result<String, String>;

/// Callback that forwards its outcome into a oneshot channel.
pub struct ChannelCallback {
    tx: oneshot::Sender<Outcome>,
}

impl AiCallback for ChannelCallback {
    fn on_success(self: Box<Self>, response: String) {
        // Receiver dropped means nobody is waiting any more.
        let _ = self.tx.send(Ok(response));
    }

    fn on_error(self: Box<Self>, error: String) {
        let _ = self.tx.send(Err(error));
    }
}

/// A callback plus the receiver its outcome arrives on.
///
/// If the request is cancelled the callback is dropped unused and the
/// receiver resolves to `Err(RecvError)`.
#[must_use]
pub fn channel() -> (Box<dyn AiCallback>, oneshot::Receiver<Outcome>) {
    let (tx, rx) = oneshot::channel();
    (Box::new(ChannelCallback { tx }), rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn deliver_routes_by_result() {
        let successes = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));
        let cb = |s: &Arc<AtomicUsize>, e: &Arc<AtomicUsize>| {
            let (s, e) = (Arc::clone(s), Arc::clone(e));
            from_fns(
                move |_| {
                    s.fetch_add(1, Ordering::SeqCst);
                },
                move |_| {
                    e.fetch_add(1, Ordering::SeqCst);
                },
            )
        };

        deliver(cb(&successes, &errors), Ok("done".into()));
        deliver(cb(&successes, &errors), Err(AiError::Released));

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn channel_receives_outcome() {
        let (cb, mut rx) = channel();
        cb.on_error("boom".into());
        assert_eq!(rx.try_recv().unwrap(), Err("boom".to_string()));
    }

    #[test]
    fn dropped_channel_callback_closes_receiver() {
        let (cb, mut rx) = channel();
        drop(cb);
        assert!(matches!(rx.try_recv(), Err(oneshot::error::TryRecvError::Closed)));
    }
}
