use crate::domain::TimerMode;
use crate::ticker::{DEFAULT_TIMER_FPS, DEFAULT_UI_TICK_MS};
use crate::timer::TimerDurations;
use anyhow::{Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const APP_DIR: &str = "pomotask";

/// User settings stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Alarm clip, relative paths resolve against the working directory
    pub alarm_sound: PathBuf,
    pub pomodoro_secs: i64,
    pub short_break_secs: i64,
    pub long_break_secs: i64,
    pub timer_fps: u32,
    pub ui_tick_ms: u64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alarm_sound: PathBuf::from("audio/audio_clock-alarm.mp3"),
            pomodoro_secs: TimerMode::Pomodoro.default_secs(),
            short_break_secs: TimerMode::ShortBreak.default_secs(),
            long_break_secs: TimerMode::LongBreak.default_secs(),
            timer_fps: DEFAULT_TIMER_FPS,
            ui_tick_ms: DEFAULT_UI_TICK_MS,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Countdown lengths; non-positive values fall back to the built-in ones
    pub fn durations(&self) -> TimerDurations {
        let pick = |mode: TimerMode, secs: i64| {
            if secs > 0 {
                secs
            } else {
                warn!("ignoring {} duration of {}s", mode.key(), secs);
                mode.default_secs()
            }
        };
        TimerDurations {
            pomodoro: pick(TimerMode::Pomodoro, self.pomodoro_secs),
            short_break: pick(TimerMode::ShortBreak, self.short_break_secs),
            long_break: pick(TimerMode::LongBreak, self.long_break_secs),
        }
    }

    /// Parsed log level, Info when unrecognised
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Get the config directory (~/.config/pomotask on Linux)
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_DIR))
}

/// Get path to the default config.json
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Get path to the log file, creating its directory
pub fn log_file() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine data directory")?;
    let dir = base.join(APP_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir.join("pomotask.log"))
}

/// Load config from a JSON file; a missing file means defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Save config as pretty JSON
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json)
}

/// Write a default config, refusing to overwrite an existing one
pub fn init_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }
    save_config(path, &AppConfig::default())
}

/// Atomically write content to a file using temp file + rename
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}
