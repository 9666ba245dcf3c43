//! Debounced recomputation scheduling
//!
//! Every state change calls [`RequestScheduler::notify`]. Only the last
//! notification of a burst produces a [`Trigger`], `delay` after it was made.
//! The pending timer is an explicit task handle that is aborted and replaced
//! on every notification.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

/// A debounce window elapsed without further notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    generation: u64,
}

pub struct RequestScheduler {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Trigger>,
}

impl RequestScheduler {
    /// Create a scheduler and the receiver its triggers are delivered on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Trigger>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            generation: 0,
            pending: None,
            tx,
        };
        (scheduler, rx)
    }

    /// Cancel any pending trigger and arm a new one `delay` from now
    pub fn notify(&mut self) {
        self.cancel();

        let trigger = Trigger {
            generation: self.generation,
        };
        let deadline = Instant::now() + self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // Receiver gone means the controller shut down
            let _ = tx.send(trigger);
        }));
        debug!(generation = trigger.generation, "Recalculation scheduled");
    }

    /// Disarm without re-arming
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        // A timer that fired before the abort may already have queued its
        // trigger; bumping the generation makes `accept` reject it.
        self.generation += 1;
    }

    /// Whether a received trigger belongs to the currently armed timer.
    /// Accepting a trigger consumes it.
    pub fn accept(&mut self, trigger: Trigger) -> bool {
        if self.pending.is_some() && trigger.generation == self.generation {
            self.pending = None;
            true
        } else {
            debug!(
                generation = trigger.generation,
                current = self.generation,
                "Ignoring superseded trigger"
            );
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for RequestScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(150);

    #[tokio::test(start_paused = true)]
    async fn test_single_notify_fires_after_delay() {
        let (mut scheduler, mut rx) = RequestScheduler::new(DELAY);
        let start = Instant::now();

        scheduler.notify();
        let trigger = rx.recv().await.expect("trigger should fire");

        assert_eq!(start.elapsed(), DELAY);
        assert!(scheduler.accept(trigger));
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_coalesces_into_one_trigger() {
        let (mut scheduler, mut rx) = RequestScheduler::new(DELAY);
        let start = Instant::now();

        // Five notifications 50ms apart, all inside the window
        for i in 0..5 {
            scheduler.notify();
            if i < 4 {
                tokio::time::advance(Duration::from_millis(50)).await;
            }
        }
        assert!(rx.try_recv().is_err(), "nothing fires during the burst");

        let trigger = rx.recv().await.expect("trigger should fire");
        // Last notify at t=200ms, so the trigger lands at t=350ms
        assert_eq!(start.elapsed(), Duration::from_millis(350));
        assert!(scheduler.accept(trigger));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err(), "exactly one trigger per burst");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_notifications_fire_separately() {
        let (mut scheduler, mut rx) = RequestScheduler::new(DELAY);

        scheduler.notify();
        let first = rx.recv().await.unwrap();
        assert!(scheduler.accept(first));

        scheduler.notify();
        let second = rx.recv().await.unwrap();
        assert!(scheduler.accept(second));
        assert_ne!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_trigger_rejected_after_renotify() {
        let (mut scheduler, mut rx) = RequestScheduler::new(DELAY);

        scheduler.notify();
        // Let the timer fire and queue its trigger without consuming it
        tokio::time::sleep(DELAY * 2).await;
        let stale = rx.try_recv().expect("first timer fired");

        scheduler.notify();
        assert!(!scheduler.accept(stale));

        let fresh = rx.recv().await.unwrap();
        assert!(scheduler.accept(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_trigger() {
        let (mut scheduler, mut rx) = RequestScheduler::new(DELAY);

        scheduler.notify();
        scheduler.cancel();
        assert!(!scheduler.is_armed());

        tokio::time::sleep(DELAY * 4).await;
        assert!(rx.try_recv().is_err());
    }
}
