use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::grid::Grid;
use crate::solver::Step;

/// Cloneable handle for abandoning a replay. A new solve request should
/// cancel the token of the replay it supersedes; the replay then stops
/// emitting frames between one frame and the next.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayStatus { Completed, Cancelled }

/// Replays a step sequence onto a display buffer at a bounded cadence.
///
/// Every step is applied to the buffer, but frames are only emitted every
/// `stride` steps, so total animation time stays within `max_duration`
/// no matter how long the search ran. The final frame is always emitted
/// with the fully applied buffer, so the displayed end state matches the
/// true solution even when the last step fell between strides.
#[derive(Clone, Copy, Debug)]
pub struct Playback {
    frame_delay: Duration,
    max_duration: Duration,
}

impl Playback {
    /// Defaults: 40ms between frames, 10s animation ceiling.
    pub fn new() -> Self {
        Self { frame_delay: Duration::from_millis(40), max_duration: Duration::from_secs(10) }
    }

    pub fn with_timing(frame_delay: Duration, max_duration: Duration) -> Self {
        Self { frame_delay, max_duration }
    }

    /// Most frames the configured timing allows before the ceiling.
    pub fn max_frames(&self) -> usize {
        if self.frame_delay.is_zero() { return usize::MAX; }
        (self.max_duration.as_nanos() / self.frame_delay.as_nanos()).max(1) as usize
    }

    /// Steps per rendered frame for a sequence of `len` steps. Ceiling
    /// division keeps the rendered frame count at or under `max_frames`;
    /// flooring would overshoot whenever max_frames < len < 2*max_frames.
    pub fn frame_stride(&self, len: usize) -> usize {
        let max_frames = self.max_frames();
        if len > max_frames { len.div_ceil(max_frames) } else { 1 }
    }

    /// Applies `steps` to a copy of `initial`, invoking `on_frame` with the
    /// buffer every stride-th step and once more at the end. Sleeps
    /// `frame_delay` after each emitted frame. Checks `cancel` before every
    /// emission; once cancelled, no further frames are observable.
    pub fn replay<F>(&self, initial: &Grid, steps: &[Step], cancel: &CancelToken, mut on_frame: F) -> ReplayStatus
    where
        F: FnMut(&Grid),
    {
        let stride = self.frame_stride(steps.len());
        let mut buffer = initial.clone();

        for (i, step) in steps.iter().enumerate() {
            step.apply_to(&mut buffer);
            if (i + 1) % stride == 0 {
                if cancel.is_cancelled() { return ReplayStatus::Cancelled; }
                on_frame(&buffer);
                thread::sleep(self.frame_delay);
            }
        }

        if cancel.is_cancelled() { return ReplayStatus::Cancelled; }
        on_frame(&buffer);
        ReplayStatus::Completed
    }
}

impl Default for Playback {
    fn default() -> Self { Self::new() }
}

/// Applies every step in order to a copy of `initial`. Replaying the full
/// sequence this way reproduces the solver's final grid exactly.
pub fn apply_all(initial: &Grid, steps: &[Step]) -> Grid {
    let mut g = initial.clone();
    for step in steps { step.apply_to(&mut g); }
    g
}
