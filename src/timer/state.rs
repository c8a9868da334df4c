use crate::domain::TimerMode;

/// Fixed countdown length per mode, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub pomodoro: i64,
    pub short_break: i64,
    pub long_break: i64,
}

impl TimerDurations {
    pub fn for_mode(&self, mode: TimerMode) -> i64 {
        match mode {
            TimerMode::Pomodoro => self.pomodoro,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            pomodoro: TimerMode::Pomodoro.default_secs(),
            short_break: TimerMode::ShortBreak.default_secs(),
            long_break: TimerMode::LongBreak.default_secs(),
        }
    }
}

/// Something the caller has to react to after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown hit zero; timer is stopped and reset
    Finished(TimerMode),
}

/// Countdown state machine: Stopped/Running crossed with the three modes.
/// Ticks are milliseconds from any monotonic origin.
#[derive(Debug, Clone)]
pub struct Timer {
    durations: TimerDurations,
    mode: TimerMode,
    remaining: i64,
    running: bool,
    anchor_ms: u64,
}

impl Timer {
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            mode: TimerMode::Pomodoro,
            remaining: durations.pomodoro,
            running: false,
            anchor_ms: 0,
        }
    }

    /// Select a mode: resets the countdown and always stops
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.remaining = self.durations.for_mode(mode);
        self.running = false;
    }

    /// Start counting down from `now_ms`. Returns false if already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.anchor_ms = now_ms;
        true
    }

    /// Recompute the remaining time; stops and resets on reaching zero
    pub fn tick(&mut self, now_ms: u64) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }

        let elapsed = (now_ms.saturating_sub(self.anchor_ms) / 1000) as i64;
        self.remaining = self.duration() - elapsed;

        if self.remaining <= 0 {
            self.running = false;
            self.remaining = self.duration();
            return Some(TimerEvent::Finished(self.mode));
        }
        None
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Full length of the active mode
    pub fn duration(&self) -> i64 {
        self.durations.for_mode(self.mode)
    }

    /// Countdown as "MM:SS"
    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as zero-padded "MM:SS" using floor divmod
pub fn format_clock(seconds: i64) -> String {
    let minutes = seconds.div_euclid(60);
    let secs = seconds.rem_euclid(60);
    format!("{:02}:{:02}", minutes, secs)
}
