use std::process::ExitCode;
use std::sync::Arc;

use falcon_odds::upload::{HttpOddsService, SubmissionRunner};
use falcon_odds::{logging, Config, OddsCalculator};
use tracing::error;

fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("{e}");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = match HttpOddsService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            error!("Could not build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runner = match SubmissionRunner::new(Arc::new(service)) {
        Ok(runner) => runner,
        Err(e) => {
            error!("Could not start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 560.0])
            .with_min_inner_size([420.0, 420.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Millennium Falcon Odds Calculator",
        options,
        Box::new(move |cc| Box::new(OddsCalculator::new(cc, &config, runner))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Window closed with error: {}", e);
            ExitCode::FAILURE
        }
    }
}
