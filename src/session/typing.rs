//! Simulated "peer is typing" indicator.
//!
//! A send arms a one-shot task: after `show_after` the indicator turns on,
//! after a further `hide_after` it turns off. The task handle is owned here
//! and aborted on re-arm and on drop.
//!
//! Aborting does not stop a task that is already running on another worker,
//! so the task only holds a weak sender and publishes under the cycle lock:
//! once `cancel` has bumped the cycle, a stale task can no longer write.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default delay between a send and the indicator appearing.
pub const DEFAULT_SHOW_AFTER: Duration = Duration::from_millis(1000);

/// Default time the indicator stays visible.
pub const DEFAULT_HIDE_AFTER: Duration = Duration::from_millis(3000);

/// Delays driving the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    pub show_after: Duration,
    pub hide_after: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            show_after: DEFAULT_SHOW_AFTER,
            hide_after: DEFAULT_HIDE_AFTER,
        }
    }
}

pub struct TypingIndicator {
    state: Arc<watch::Sender<bool>>,
    /// Current cycle number; bumped by every cancel.
    cycle: Arc<Mutex<u64>>,
    pending: Option<JoinHandle<()>>,
    timings: TypingTimings,
}

/// Write `value` if `cycle` is still current and the indicator still exists.
fn publish(state: &Weak<watch::Sender<bool>>, cycle: &Mutex<u64>, armed: u64, value: bool) -> bool {
    let current = cycle.lock().unwrap_or_else(|e| e.into_inner());
    if *current != armed {
        return false;
    }
    match state.upgrade() {
        Some(tx) => {
            tx.send_replace(value);
            true
        }
        None => false,
    }
}

impl TypingIndicator {
    pub fn new(timings: TypingTimings) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            state: Arc::new(tx),
            cycle: Arc::new(Mutex::new(0)),
            pending: None,
            timings,
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel any pending cycle and start a new one.
    ///
    /// Returns false when no tokio runtime is available; the indicator then
    /// stays as it is.
    pub fn arm(&mut self) -> bool {
        self.cancel();

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => {
                tracing::warn!("No async runtime, typing indicator skipped");
                return false;
            }
        };

        let state = Arc::downgrade(&self.state);
        let cycle = Arc::clone(&self.cycle);
        let armed = *cycle.lock().unwrap_or_else(|e| e.into_inner());
        let TypingTimings {
            show_after,
            hide_after,
        } = self.timings;

        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(show_after).await;
            if !publish(&state, &cycle, armed, true) {
                return;
            }
            tracing::debug!("Peer typing indicator on");
            tokio::time::sleep(hide_after).await;
            if publish(&state, &cycle, armed, false) {
                tracing::debug!("Peer typing indicator off");
            }
        }));
        true
    }

    /// Abort the pending cycle, if any. No write from it lands afterwards.
    pub fn cancel(&mut self) {
        *self.cycle.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        if let Some(h) = self.pending.take() {
            h.abort();
        }
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> TypingTimings {
        TypingTimings {
            show_after: Duration::from_millis(100),
            hide_after: Duration::from_millis(300),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_shows_then_hides() {
        let mut ind = TypingIndicator::new(fast());
        assert!(ind.arm());
        assert!(!ind.is_visible());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(ind.is_visible());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!ind.is_visible());
        assert!(!ind.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_cycle() {
        let mut ind = TypingIndicator::new(fast());
        ind.arm();
        tokio::time::sleep(Duration::from_millis(50)).await;
        ind.arm();

        // The first cycle would have fired at 100ms.
        tokio::time::sleep(Duration::from_millis(75)).await;
        assert!(!ind.is_visible());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(ind.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_cycle() {
        let mut ind = TypingIndicator::new(fast());
        let rx = ind.subscribe();
        ind.arm();
        ind.cancel();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!ind.is_visible());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_no_write_after_cancel_on_worker_thread() {
        let timings = TypingTimings {
            show_after: Duration::from_millis(1),
            hide_after: Duration::from_millis(1),
        };
        for _ in 0..200 {
            let mut ind = TypingIndicator::new(timings);
            let rx = ind.subscribe();
            ind.arm();
            tokio::time::sleep(Duration::from_micros(900)).await;
            ind.cancel();
            let seen = *rx.borrow();
            tokio::time::sleep(Duration::from_millis(5)).await;
            assert_eq!(*rx.borrow(), seen);
        }
    }

    #[test]
    fn test_stale_cycle_cannot_publish() {
        let (tx, rx) = watch::channel(false);
        let tx = Arc::new(tx);
        let cycle = Mutex::new(3);
        assert!(!publish(&Arc::downgrade(&tx), &cycle, 2, true));
        assert!(!*rx.borrow());
        assert!(publish(&Arc::downgrade(&tx), &cycle, 3, true));
        assert!(*rx.borrow());

        let weak = Arc::downgrade(&tx);
        drop(tx);
        assert!(!publish(&weak, &cycle, 3, false));
    }

    #[test]
    fn test_arm_without_runtime() {
        let mut ind = TypingIndicator::new(fast());
        assert!(!ind.arm());
        assert!(!ind.is_armed());
    }
}
