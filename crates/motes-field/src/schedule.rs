//! Frame pacing, the cancellable loop handle and resize debouncing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Quiet period before a resize is acted upon.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Handle to a running frame loop.
///
/// Clones share the same flag, so stopping any of them stops the loop.
#[derive(Debug, Clone)]
pub struct FrameHandle {
    active: Arc<AtomicBool>,
}

impl FrameHandle {
    fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether another frame should be scheduled.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Cancel the loop. Safe to call any number of times; returns `true` only
    /// for the call that actually stopped it.
    pub fn stop(&self) -> bool {
        let was_active = self.active.swap(false, Ordering::AcqRel);
        if was_active {
            tracing::debug!("frame loop stopped");
        }
        was_active
    }
}

/// Paces one simulation step per display refresh.
#[derive(Debug)]
pub struct FrameLoop {
    /// Time between frames.
    interval: Duration,
    /// When the current frame started.
    frame_started: Option<Instant>,
    /// Handle of the current run, if any.
    handle: Option<FrameHandle>,
}

impl FrameLoop {
    /// Create a loop targeting `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            frame_started: None,
            handle: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a new run. Any previous run is stopped first.
    pub fn start(&mut self) -> FrameHandle {
        if let Some(previous) = self.handle.take() {
            previous.stop();
        }
        let handle = FrameHandle::new();
        self.handle = Some(handle.clone());
        self.frame_started = None;
        handle
    }

    /// Stop the current run, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(FrameHandle::is_active)
    }

    /// Mark the start of a frame.
    pub fn begin_frame(&mut self, now: Instant) {
        self.frame_started = Some(now);
    }

    /// Time left before the next frame is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.frame_started {
            Some(started) => self
                .interval
                .saturating_sub(now.saturating_duration_since(started)),
            None => Duration::ZERO,
        }
    }
}

/// Holds back a rapidly changing value until it settles.
#[derive(Debug)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T: Copy> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new value, restarting the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the latest value once the quiet period has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((value, at)) if now.saturating_duration_since(at) >= self.delay => {
                self.pending = None;
                Some(value)
            }
            _ => None,
        }
    }

    /// Time until the pending value is released, if one is waiting.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, at)| self.delay.saturating_sub(now.saturating_duration_since(at)))
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent_and_shared() {
        let mut frames = FrameLoop::new(60);
        let handle = frames.start();
        let clone = handle.clone();
        assert!(handle.is_active());
        assert!(frames.is_active());

        assert!(clone.stop());
        assert!(!handle.stop());
        assert!(!handle.stop());
        assert!(!handle.is_active());
        assert!(!frames.is_active());
    }

    #[test]
    fn restart_stops_previous_run() {
        let mut frames = FrameLoop::new(60);
        let first = frames.start();
        let second = frames.start();
        assert!(!first.is_active());
        assert!(second.is_active());
        frames.stop();
        frames.stop();
        assert!(!second.is_active());
    }

    #[test]
    fn remaining_counts_down_from_interval() {
        let mut frames = FrameLoop::new(50);
        assert_eq!(frames.interval(), Duration::from_millis(20));
        let t0 = Instant::now();
        assert_eq!(frames.remaining(t0), Duration::ZERO);
        frames.begin_frame(t0);
        assert_eq!(frames.remaining(t0 + Duration::from_millis(5)), Duration::from_millis(15));
        assert_eq!(frames.remaining(t0 + Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn zero_fps_is_clamped() {
        assert_eq!(FrameLoop::new(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn debounce_releases_latest_after_quiet_period() {
        let mut debounce = Debounce::new(RESIZE_DEBOUNCE);
        let t0 = Instant::now();
        debounce.push((80u16, 24u16), t0);
        debounce.push((100u16, 30u16), t0 + Duration::from_millis(60));

        assert_eq!(debounce.poll(t0 + Duration::from_millis(120)), None);
        assert_eq!(
            debounce.remaining(t0 + Duration::from_millis(120)),
            Some(Duration::from_millis(40))
        );
        assert_eq!(
            debounce.poll(t0 + Duration::from_millis(160)),
            Some((100, 30))
        );
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(t0 + Duration::from_millis(500)), None);
    }
}
