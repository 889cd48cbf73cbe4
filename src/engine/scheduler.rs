//! Frame scheduling: a pure Running/Paused state machine throttling
//! step+draw work below the host's frame-callback rate.

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;

/// Host hooks for the per-frame callback primitive. The browser
/// implementation wraps requestAnimationFrame/cancelAnimationFrame;
/// tests count calls.
pub trait TickSource {
    /// Register one frame callback with the host.
    fn request(&mut self);
    /// Cancel the pending callback, if the host still holds one.
    fn cancel(&mut self);
}

/// Placeholder before the host hooks are installed.
pub struct NullTicks;

impl TickSource for NullTicks {
    fn request(&mut self) {}
    fn cancel(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// What a fired frame callback should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Paused: no work, no re-arm. The loop is broken until play().
    Halt,
    /// Running but inside the throttle interval: re-arm only.
    Wait,
    /// Interval elapsed: step + draw, then re-arm.
    Step,
}

/// The state machine never talks to the host itself; `play`/`pause`
/// report whether a request/cancel is due and `on_frame` reports the
/// work for this callback. Keeping the decisions pure lets tests drive
/// the machine with a hand-advanced clock.
pub struct Scheduler {
    state: RunState,
    target_fps: u32,
    interval_ms: f64,
    last_step_ms: Option<f64>,
    pending: bool,
}

impl Scheduler {
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.clamp(MIN_FPS, MAX_FPS);
        Self {
            state: RunState::Running,
            target_fps,
            interval_ms: 1000.0 / target_fps as f64,
            last_step_ms: None,
            pending: false,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.clamp(MIN_FPS, MAX_FPS);
        self.interval_ms = 1000.0 / self.target_fps as f64;
    }

    /// Transition to Running. Returns true when a tick must be
    /// requested; false when one is already in flight, so double
    /// play() never double-schedules.
    pub fn play(&mut self) -> bool {
        self.state = RunState::Running;
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Transition to Paused. Returns true when a pending tick must be
    /// cancelled.
    pub fn pause(&mut self) -> bool {
        self.state = RunState::Paused;
        std::mem::replace(&mut self.pending, false)
    }

    /// Force Running and mark a tick pending; the caller requests one
    /// unconditionally. Escape hatch for hosts whose callback
    /// bookkeeping went out of sync.
    pub fn force(&mut self) {
        self.state = RunState::Running;
        self.pending = true;
    }

    /// Decide what the callback firing at `now_ms` should do. A Paused
    /// machine halts the loop; a Running one re-arms every time and
    /// steps only when the throttle interval has elapsed since the last
    /// executed step.
    pub fn on_frame(&mut self, now_ms: f64) -> Frame {
        self.pending = false;
        if self.state == RunState::Paused {
            return Frame::Halt;
        }

        let due = match self.last_step_ms {
            None => true,
            Some(last) => now_ms - last >= self.interval_ms,
        };

        self.pending = true;
        if due {
            self.last_step_ms = Some(now_ms);
            Frame::Step
        } else {
            Frame::Wait
        }
    }
}
