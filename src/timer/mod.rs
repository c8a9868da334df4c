pub mod alert;
pub mod engine;
pub mod state;

pub use alert::{Alert, BellAlert, SoundAlert};
pub use engine::{TimerCommand, TimerLauncher, TimerSnapshot};
pub use state::TimerDurations;
