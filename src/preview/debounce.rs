//! Trailing-edge debouncer.
//!
//! `schedule` restarts the quiet-period timer; when it expires the most
//! recent input is dispatched. Nothing fires on the leading edge.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

type Dispatch<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Coalesces bursts of inputs into one dispatch of the last input.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    dispatch: Dispatch<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, dispatch: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
            dispatch: Arc::new(dispatch),
        }
    }

    // == Schedule ==
    /// Replaces any pending input with `input` and restarts the timer.
    pub fn schedule(&self, input: T) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let dispatch = Arc::clone(&self.dispatch);
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dispatch(input);
        }));
    }

    // == Cancel ==
    /// Drops the pending input, if any. Returns true if something was
    /// waiting to fire.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}
