mod app;
mod config;
mod data;
mod error;
mod logging;
mod pipeline;
mod processing;
mod state;
mod ui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use app::{ParticleSizeApp, APP_TITLE};
use eframe::egui;
use error::AnalysisError;

const PROMPT: &str = "Enter the file path to the Excel file: ";

fn prompt_for_path() -> Result<PathBuf, AnalysisError> {
    let mut stdout = io::stdout();
    write!(stdout, "{PROMPT}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(pipeline::clean_input_path(&line)))
}

fn report(err: &AnalysisError) -> ExitCode {
    tracing::error!(error = %err, "analysis aborted");
    println!("{}", err.user_message());
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    logging::init_logging();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => return report(&e),
    };

    let path = match prompt_for_path() {
        Ok(path) => path,
        Err(e) => return report(&e),
    };

    let analysis = match pipeline::run(&path, &config) {
        Ok(analysis) => analysis,
        Err(e) => return report(&e),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([640.0, 400.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let result = eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ParticleSizeApp::new(cc, analysis)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("failed to open display: {e}");
            eprintln!("Could not open the display window: {e}");
            ExitCode::FAILURE
        }
    }
}
