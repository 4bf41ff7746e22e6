// scheduler.rs - Frame timing
//
// The host owns the display-synchronised callback (requestAnimationFrame in
// the browser). Each callback hands its timestamp to `FrameScheduler::tick`,
// which turns it into the elapsed milliseconds since the previous frame and
// decides whether the frame should run at all.

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Stopped,
    Running,
    Paused,
}

#[derive(Clone, Debug)]
pub struct FrameScheduler {
    state: State,
    prev_ms: f64,
    paused_at: f64,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: State::Stopped,
            prev_ms: 0.0,
            paused_at: 0.0,
            frames: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Frames delivered since the last `start`
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Record the baseline timestamp and begin delivering frames
    pub fn start(&mut self, now_ms: f64) {
        self.state = State::Running;
        self.prev_ms = now_ms;
        self.frames = 0;
        debug!(now_ms, "frame scheduler started");
    }

    /// Elapsed milliseconds since the previous frame, or `None` when the
    /// scheduler is not running. Clock steps backwards report 0.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        if self.state != State::Running {
            return None;
        }
        let elapsed = (now_ms - self.prev_ms).max(0.0);
        self.prev_ms = now_ms;
        self.frames += 1;
        Some(elapsed)
    }

    /// Suspend frame delivery, remembering when
    pub fn pause(&mut self, now_ms: f64) {
        if self.state == State::Running {
            self.state = State::Paused;
            self.paused_at = now_ms;
            debug!(now_ms, "frame scheduler paused");
        }
    }

    /// Continue after `pause`. The paused interval is excluded from the next
    /// frame's elapsed time.
    pub fn resume(&mut self, now_ms: f64) {
        if self.state == State::Paused {
            self.prev_ms += (now_ms - self.paused_at).max(0.0);
            self.state = State::Running;
            debug!(now_ms, "frame scheduler resumed");
        }
    }

    pub fn stop(&mut self) {
        if self.state != State::Stopped {
            self.state = State::Stopped;
            debug!(frames = self.frames, "frame scheduler stopped");
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive `frame` for `count` frames spaced `step_ms` apart, starting at t = 0.
/// Used by headless runs where there is no display to synchronise with.
pub fn run_fixed(
    scheduler: &mut FrameScheduler,
    count: u64,
    step_ms: f64,
    mut frame: impl FnMut(f64),
) {
    scheduler.start(0.0);
    for i in 1..=count {
        if let Some(elapsed) = scheduler.tick(i as f64 * step_ms) {
            frame(elapsed);
        }
    }
    scheduler.stop();
}
