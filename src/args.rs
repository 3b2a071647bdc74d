use std::path::PathBuf;

use clap::Parser;

/// Engagement dashboard for social-media metrics per political candidate.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) CSV used as the default dataset instead of the bundled one.
    /// Required columns: Kandidat, Parti, Likerklikk, Kommentarer, Delinger, Visninger.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Print a report to the standard output instead of opening a window.
    #[arg(long)]
    pub headless: bool,

    /// (repeatable) Party to include in the headless report. All parties when not given.
    #[arg(short, long = "party")]
    pub parties: Vec<String>,

    /// Case-insensitive candidate name search for the headless report.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// (file path) Write the filtered table as CSV (headless mode).
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Print the headless report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Turn on debug logging unless RUST_LOG says otherwise.
    #[arg(long)]
    pub verbose: bool,
}
