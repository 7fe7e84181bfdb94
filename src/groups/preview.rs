//! Ephemeral preview group shown during multi-card drags.
//!
//! The preview's outline blinks on a fixed interval. The blink is a
//! cooperative periodic task: `BlinkTimer::tick` is advanced with elapsed
//! time (not frame count) and yields the number of toggles due. Hiding or
//! confirming the preview stops the timer first, so it never toggles a
//! discarded preview.

use std::time::Duration;

use super::group::Group;

/// Cancellable periodic timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlinkTimer {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl BlinkTimer {
    /// Create a running timer. A zero interval never fires.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    /// Advance by `dt`, returning how many intervals elapsed.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        if !self.running || self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;

        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Stop the timer; later ticks do nothing.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Whether the timer is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The toggle interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// A transient group with a blinking outline.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewGroup {
    group: Group,
    outline_visible: bool,
    blink: BlinkTimer,
}

impl PreviewGroup {
    pub(crate) fn new(group: Group, interval: Duration) -> Self {
        Self {
            group,
            outline_visible: true,
            blink: BlinkTimer::new(interval),
        }
    }

    /// The underlying (empty) group.
    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }

    pub(crate) fn group_mut(&mut self) -> &mut Group {
        &mut self.group
    }

    /// Whether the outline is currently drawn.
    #[must_use]
    pub fn outline_visible(&self) -> bool {
        self.outline_visible
    }

    /// Whether the outline is still blinking.
    #[must_use]
    pub fn is_blinking(&self) -> bool {
        self.blink.is_running()
    }

    /// Advance the blink; odd toggle counts flip the outline.
    pub(crate) fn tick(&mut self, dt: Duration) {
        let toggles = self.blink.tick(dt);
        if toggles % 2 == 1 {
            self.outline_visible = !self.outline_visible;
        }
    }

    /// Stop blinking and hand back the group with a solid outline.
    pub(crate) fn finish(mut self) -> Group {
        self.blink.stop();
        self.outline_visible = true;
        self.group
    }

    /// Stop blinking before the preview is dropped.
    pub(crate) fn cancel(&mut self) {
        self.blink.stop();
        self.outline_visible = false;
    }
}
