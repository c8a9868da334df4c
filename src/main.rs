mod app;
mod config;
mod domain;
mod input;
mod logging;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{default_config_path, init_config, load_config, log_file, AppConfig};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::TaskStore;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use timer::{Alert, BellAlert, SoundAlert, TimerLauncher};

#[derive(Parser)]
#[command(name = "pomotask")]
#[command(about = "A terminal task tracker with a pomodoro timer", long_about = None)]
struct Cli {
    /// Path to config.json. Defaults to ~/.config/pomotask/config.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ring the terminal bell instead of playing the alarm sound
    #[arg(long)]
    no_sound: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    InitConfig,
    /// Print the config file location
    ConfigPath,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    match cli.command {
        Some(Commands::InitConfig) => {
            init_config(&config_path)?;
            println!("Wrote default config: {}", config_path.display());
            Ok(())
        }
        Some(Commands::ConfigPath) => {
            println!("{}", config_path.display());
            Ok(())
        }
        None => {
            let config = load_config(&config_path)?;
            run_tui(config, cli.no_sound)
        }
    }
}

fn run_tui(config: AppConfig, no_sound: bool) -> Result<()> {
    // Logging is best effort; the app works without it
    match log_file().and_then(|path| logging::init_file_logger(&path, config.level_filter())) {
        Ok(()) => info!("pomotask starting"),
        Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
    }

    // A missing alarm clip is fatal before the terminal is taken over
    let alert: Arc<dyn Alert> = if no_sound {
        Arc::new(BellAlert)
    } else {
        let sound = SoundAlert::load(&config.alarm_sound).with_context(|| {
            format!(
                "Could not load alarm sound {} (use --no-sound to skip)",
                config.alarm_sound.display()
            )
        })?;
        Arc::new(sound)
    };

    let launcher = TimerLauncher::new(
        config.durations(),
        alert,
        ticker::frame_duration(config.timer_fps),
    );
    let mut app = AppState::new(TaskStore::new(), launcher);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &config);

    // Stop the timer thread before giving the terminal back
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("pomotask exiting");

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    config: &AppConfig,
) -> Result<()> {
    let tick_rate = ticker::ui_tick_duration(config.ui_tick_ms);

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // The timer thread never touches the terminal; ring its bell here
        if app.take_bell() {
            execute!(terminal.backend_mut(), Print('\x07'))?;
        }

        // Poll with a timeout so the countdown keeps redrawing
        if event::poll(tick_rate)? {
            let should_quit = match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key)?,
                Event::Mouse(mouse) => input::handle_mouse(app, mouse)?,
                _ => false,
            };
            if should_quit {
                return Ok(());
            }
        }
    }
}
