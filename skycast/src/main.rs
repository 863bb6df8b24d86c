//! skycast - current weather for any city, in your terminal
//!
//! # Usage
//!
//! ```sh
//! # Locate by IP address, then search for cities
//! OPENWEATHER_API_KEY=... skycast
//!
//! # Fixed position, imperial units
//! skycast --api-key ... --lat 47.61 --lon -122.33 --units imperial
//! ```

use std::io;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skycast::config::{Args, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_args(args).context("invalid configuration")?;
    skycast::logging::init(&config.log_file)?;

    // ===== Terminal setup =====
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("entering alternate screen");
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            restore_terminal_raw();
            return Err(e).context("creating terminal");
        }
    };

    let result = skycast::run_app(&mut terminal, config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "skycast exited with an error");
    }
    result
}

/// Best-effort restore when no `Terminal` exists yet
fn restore_terminal_raw() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
