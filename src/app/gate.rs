//! Single-flight guard for user actions.
//!
//! Only one start or continue may stream at a time. A second request while a
//! permit is held is rejected rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ActionGate {
    busy: Arc<AtomicBool>,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, or `None` when an action is already in flight.
    pub fn try_acquire(&self) -> Option<ActionPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ActionPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the lifetime of one action. Dropping it, on any path including
/// unwinding, reopens the gate.
#[derive(Debug)]
pub struct ActionPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ActionPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let gate = ActionGate::new();
        let permit = gate.try_acquire();
        assert!(permit.is_some());
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());
    }

    #[test]
    fn test_drop_reopens_gate() {
        let gate = ActionGate::new();
        drop(gate.try_acquire());
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let gate = ActionGate::new();
        let other = gate.clone();
        let _permit = gate.try_acquire().unwrap();
        assert!(other.is_busy());
        assert!(other.try_acquire().is_none());
    }

    #[tokio::test]
    async fn test_released_when_task_panics() {
        let gate = ActionGate::new();
        let permit = gate.try_acquire().unwrap();

        let handle = tokio::spawn(async move {
            let _permit = permit;
            panic!("stream task failed");
        });
        assert!(handle.await.is_err());
        assert!(!gate.is_busy());
    }
}
