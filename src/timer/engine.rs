use super::alert::Alert;
use super::state::{Timer, TimerDurations, TimerEvent};
use crate::domain::TimerMode;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Millisecond tick source for the timer loop
pub trait Clock: Send {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the loop was created
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Input sent from the UI to the timer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    SwitchMode(TimerMode),
    StartStop,
    Shutdown,
}

/// Read-only view of the timer published once per loop iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub running: bool,
    pub remaining: i64,
    pub duration: i64,
    pub display: String,
    /// Terminal bells requested so far
    pub bells: u64,
}

impl TimerSnapshot {
    /// Fraction of the countdown already elapsed, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.duration <= 0 {
            return 0.0;
        }
        (1.0 - self.remaining as f64 / self.duration as f64).clamp(0.0, 1.0)
    }

    fn of(timer: &Timer, bells: u64) -> Self {
        Self {
            mode: timer.mode(),
            running: timer.is_running(),
            remaining: timer.remaining(),
            duration: timer.duration(),
            display: timer.display(),
            bells,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Shutdown,
}

/// Owns the `Timer` and drives it at a fixed cadence on its own thread
pub struct TimerEngine {
    timer: Timer,
    commands: Receiver<TimerCommand>,
    snapshot: Arc<Mutex<TimerSnapshot>>,
    clock: Box<dyn Clock>,
    alert: Arc<dyn Alert>,
    frame: Duration,
    bells: u64,
}

impl TimerEngine {
    pub fn new(
        durations: TimerDurations,
        clock: Box<dyn Clock>,
        alert: Arc<dyn Alert>,
        frame: Duration,
    ) -> (Self, Sender<TimerCommand>, Arc<Mutex<TimerSnapshot>>) {
        let timer = Timer::new(durations);
        let snapshot = Arc::new(Mutex::new(TimerSnapshot::of(&timer, 0)));
        let (tx, rx) = mpsc::channel();

        let engine = Self {
            timer,
            commands: rx,
            snapshot: Arc::clone(&snapshot),
            clock,
            alert,
            frame,
            bells: 0,
        };
        (engine, tx, snapshot)
    }

    /// Loop until a Shutdown command arrives or every sender is dropped
    pub fn run(mut self) {
        info!("timer loop started ({:?} per frame)", self.frame);
        loop {
            let frame_start = Instant::now();
            if self.step() == Step::Shutdown {
                break;
            }
            if let Some(rest) = self.frame.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
        info!("timer loop stopped");
    }

    /// One iteration: drain input, advance the countdown, publish
    fn step(&mut self) -> Step {
        loop {
            match self.commands.try_recv() {
                Ok(TimerCommand::Shutdown) | Err(TryRecvError::Disconnected) => return Step::Shutdown,
                Ok(command) => self.apply(command),
                Err(TryRecvError::Empty) => break,
            }
        }

        if let Some(TimerEvent::Finished(mode)) = self.timer.tick(self.clock.now_ms()) {
            info!("{} finished, playing alert", mode.key());
            if self.alert.terminal_bell() {
                self.bells += 1;
            }
            self.alert.play();
        }

        self.publish();
        Step::Continue
    }

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::SwitchMode(mode) => {
                self.timer.switch_mode(mode);
                info!("timer mode set to {}", mode.key());
            }
            TimerCommand::StartStop => {
                if self.timer.start(self.clock.now_ms()) {
                    info!("{} started", self.timer.mode().key());
                } else {
                    debug!("start ignored, timer already running");
                }
            }
            TimerCommand::Shutdown => {}
        }
    }

    fn publish(&self) {
        let snapshot = TimerSnapshot::of(&self.timer, self.bells);
        match self.snapshot.lock() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

/// UI-side handle to a running timer loop
pub struct TimerHandle {
    commands: Sender<TimerCommand>,
    snapshot: Arc<Mutex<TimerSnapshot>>,
    thread: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn send(&self, command: TimerCommand) {
        if self.commands.send(command).is_err() {
            warn!("timer loop is gone, dropped {:?}", command);
        }
    }

    /// Latest published state
    pub fn snapshot(&self) -> TimerSnapshot {
        match self.snapshot.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop and wait for its thread
    pub fn shutdown(mut self) {
        let _ = self.commands.send(TimerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("timer thread panicked");
            }
        }
    }
}

/// Spawns at most one timer loop at a time
pub struct TimerLauncher {
    durations: TimerDurations,
    alert: Arc<dyn Alert>,
    frame: Duration,
    handle: Option<TimerHandle>,
}

impl TimerLauncher {
    pub fn new(durations: TimerDurations, alert: Arc<dyn Alert>, frame: Duration) -> Self {
        Self {
            durations,
            alert,
            frame,
            handle: None,
        }
    }

    /// Start the timer loop. Returns Ok(false) if one is already alive.
    pub fn launch(&mut self) -> Result<bool> {
        if self.handle.as_ref().is_some_and(TimerHandle::is_alive) {
            debug!("timer already running, not launching another");
            return Ok(false);
        }
        if let Some(stale) = self.handle.take() {
            stale.shutdown();
        }

        let (engine, commands, snapshot) = TimerEngine::new(
            self.durations,
            Box::new(MonotonicClock::new()),
            Arc::clone(&self.alert),
            self.frame,
        );
        let thread = thread::Builder::new()
            .name("pomodoro-timer".to_string())
            .spawn(move || engine.run())
            .context("Failed to spawn timer thread")?;

        self.handle = Some(TimerHandle {
            commands,
            snapshot,
            thread: Some(thread),
        });
        Ok(true)
    }

    pub fn handle(&self) -> Option<&TimerHandle> {
        self.handle.as_ref()
    }

    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.shutdown();
        }
    }
}

impl Drop for TimerLauncher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
