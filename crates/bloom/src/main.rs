mod app;
mod logging;
mod page;
mod sections;

use std::io::stdout;

use bloom_config::Config;
use bloom_core::SystemClock;
use bloom_motion::SystemFrameClock;
use chrono::Local;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

use crate::app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let config = Config::load()?;
    let target = config.resolve_target(&Local)?;
    let app = App::new(config, target, SystemClock, SystemFrameClock::new())
        .with_config_path(bloom_config::config_path());

    let terminal = ratatui::init();
    if let Err(err) = execute!(stdout(), EnableMouseCapture) {
        tracing::warn!(error = %err, "mouse capture unavailable");
    }
    let result = app.run(terminal);
    if let Err(err) = execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(error = %err, "failed to release mouse capture");
    }
    ratatui::restore();
    result
}
