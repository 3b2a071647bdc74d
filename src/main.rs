mod app;
mod args;
mod color;
mod data;
mod report;
mod state;
mod ui;

use anyhow::anyhow;
use app::DashboardApp;
use args::Args;
use clap::Parser;
use data::loader::{DataSource, DatasetLoader, DefaultDataset};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let default = match &args.data {
        Some(path) => DefaultDataset::File(path.clone()),
        None => DefaultDataset::Bundled,
    };
    let loader = DatasetLoader::new(default);

    if args.headless {
        return report::run(&args, loader);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Candidate Pulse – TikTok engagement",
        options,
        Box::new(move |_cc| {
            let mut state = AppState::new(loader);
            state.load(&DataSource::Default);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("failed to start the window: {e}"))
}
