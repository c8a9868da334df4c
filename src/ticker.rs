use std::time::Duration;

/// Default UI event poll interval in milliseconds
pub const DEFAULT_UI_TICK_MS: u64 = 250;

/// Default timer loop cadence (iterations per second)
pub const DEFAULT_TIMER_FPS: u32 = 30;

/// UI poll duration; zero falls back to the default
pub fn ui_tick_duration(ms: u64) -> Duration {
    if ms == 0 {
        Duration::from_millis(DEFAULT_UI_TICK_MS)
    } else {
        Duration::from_millis(ms)
    }
}

/// Length of one timer loop iteration; zero fps falls back to the default
pub fn frame_duration(fps: u32) -> Duration {
    let fps = if fps == 0 { DEFAULT_TIMER_FPS } else { fps };
    Duration::from_secs(1) / fps
}
