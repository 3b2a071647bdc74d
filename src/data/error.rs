use thiserror::Error;

/// Why a dataset could not be loaded. The session keeps running; the user
/// may retry with another file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV line {line} has {found} cells, the header has {expected}")]
    TooManyCells {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
