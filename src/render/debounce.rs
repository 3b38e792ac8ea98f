use std::time::{Duration, Instant};

/// Default quiet period before the outline is rebuilt.
pub const DEFAULT_OUTLINE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Trailing-edge debounce: fires once after `quiet` has elapsed since the
/// last [`touch`](Self::touch).
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    last_touch: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_touch: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_touch = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_touch.is_some()
    }

    /// Returns true exactly once per burst of touches, when the quiet period
    /// has elapsed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.last_touch {
            Some(last) if now.saturating_duration_since(last) >= self.quiet => {
                self.last_touch = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.last_touch = None;
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_OUTLINE_DEBOUNCE)
    }
}
