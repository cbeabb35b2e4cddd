// Calendar time-grid
// Runs the live time grid for the current week and logs every render-state change

use std::path::PathBuf;

use anyhow::{Context, Result};
use calendar_timegrid::services::column_layout::WeekOptions;
use calendar_timegrid::services::live_clock::TokioTimerDriver;
use calendar_timegrid::services::settings::SettingsService;
use calendar_timegrid::utils::date::local_now;
use calendar_timegrid::{RenderState, TimeGridController};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting calendar time grid");

    let settings_service = match std::env::args().nth(1) {
        Some(path) => SettingsService::new(PathBuf::from(path)),
        None => SettingsService::with_default_path(),
    };
    log::info!("Using settings at {}", settings_service.path().display());
    let settings = settings_service.load_or_default();

    let (driver, mut fired) = TokioTimerDriver::new();
    let mut grid = TimeGridController::from_settings(&settings, driver, local_now())
        .context("Failed to build the time grid")?;

    for ruler in grid.ruler_columns() {
        log::info!("Ruler {} at {}px", ruler.label, ruler.left);
    }
    log_state(grid.render_state())?;
    let week_options = WeekOptions::from(&settings);

    loop {
        tokio::select! {
            Some(timer) = fired.recv() => {
                let mut changed = grid.handle_timer(timer, local_now());
                changed |= grid
                    .follow_today(&week_options)
                    .context("Failed to rebuild the displayed week")?;
                if changed {
                    log_state(grid.render_state())?;
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                log::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn log_state(state: &RenderState) -> Result<()> {
    let json = serde_json::to_string(state).context("Failed to serialize render state")?;
    log::info!("Render state: {}", json);
    Ok(())
}
