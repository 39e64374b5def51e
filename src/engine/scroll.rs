//! Scroll-driven pagination trigger.

use crate::engine::SessionStatus;

// ===== ScrollTrigger =====

/// Edge detector over the sentinel's visibility.
///
/// The sentinel is the virtual row just past the last loaded result; the
/// shell reports its visibility relative to the viewport on every observer
/// callback (here: every frame). The trigger fires "advance" at most once
/// per not-visible→visible transition, and only while the session is idle.
///
/// Re-arming: leaving visibility re-arms the trigger, and so does observing
/// a non-idle status. The latter is what allows back-to-back page loads
/// while the user parks the viewport at the bottom of the list: the
/// `Loading` status observed during the fetch re-arms the trigger, so the
/// next idle observation fires again.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    armed: bool,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl ScrollTrigger {
    /// Armed trigger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report one visibility observation; returns true when the session
    /// should advance to the next page.
    pub fn observe(&mut self, visible: bool, status: &SessionStatus) -> bool {
        if !visible || !status.is_idle() {
            self.armed = true;
            return false;
        }
        if self.armed {
            self.armed = false;
            return true;
        }
        false
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "scroll_tests.rs"]
mod tests;
