use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::LoadError;
use super::model::{CandidateRecord, RawTable};
use super::schema::ColumnIndex;

/// Dataset shipped with the binary, used when no other default is configured.
const BUNDLED_CSV: &[u8] = include_bytes!("../../data/candidates.csv");

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The session's default dataset (bundled, or a configured file).
    Default,
    /// Bytes of a file the user supplied during the session.
    Upload { name: String, bytes: Vec<u8> },
}

impl DataSource {
    /// Read a user-chosen file into an upload source.
    pub fn upload_from_path(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(DataSource::Upload { name, bytes })
    }

    /// Short human-readable label.
    pub fn label(&self) -> &str {
        match self {
            DataSource::Default => "default dataset",
            DataSource::Upload { name, .. } => name,
        }
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse a CSV stream into a [`RawTable`], rejecting it when any required
/// column is absent or a row has more cells than the header. Short rows are
/// padded with blank cells; bad numeric cells are carried as missing values.
pub fn parse_csv<R: Read>(input: R) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = ColumnIndex::resolve(&headers).map_err(LoadError::MissingColumns)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        if row.len() > headers.len() {
            return Err(LoadError::TooManyCells {
                line: row.position().map_or(0, |p| p.line()),
                expected: headers.len(),
                found: row.len(),
            });
        }
        let mut cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        cells.resize(headers.len(), String::new());
        records.push(CandidateRecord::from_cells(cells, &columns));
    }

    Ok(RawTable {
        headers,
        columns,
        records,
    })
}

// ---------------------------------------------------------------------------
// Memoizing loader
// ---------------------------------------------------------------------------

/// What the `Default` source resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultDataset {
    Bundled,
    File(PathBuf),
}

/// Loader owned by the session. The default dataset is parsed at most once
/// until [`DatasetLoader::invalidate`] is called; uploads are parsed every
/// time.
#[derive(Debug)]
pub struct DatasetLoader {
    default: DefaultDataset,
    cached_default: Option<Arc<RawTable>>,
}

impl DatasetLoader {
    pub fn new(default: DefaultDataset) -> Self {
        Self {
            default,
            cached_default: None,
        }
    }

    /// Load a source. A schema failure leaves the cache untouched.
    pub fn load(&mut self, source: &DataSource) -> Result<Arc<RawTable>, LoadError> {
        match source {
            DataSource::Default => {
                if let Some(table) = &self.cached_default {
                    log::debug!("Default dataset served from cache");
                    return Ok(Arc::clone(table));
                }
                let table = Arc::new(self.parse_default()?);
                log::info!(
                    "Loaded default dataset ({} rows, columns {:?})",
                    table.len(),
                    table.headers
                );
                self.cached_default = Some(Arc::clone(&table));
                Ok(table)
            }
            DataSource::Upload { name, bytes } => {
                let table = parse_csv(bytes.as_slice())?;
                log::info!("Loaded upload {name:?} ({} rows)", table.len());
                Ok(Arc::new(table))
            }
        }
    }

    /// Drop the cached default dataset so the next load re-reads it.
    pub fn invalidate(&mut self) {
        if self.cached_default.take().is_some() {
            log::debug!("Default dataset cache invalidated");
        }
    }

    fn parse_default(&self) -> Result<RawTable, LoadError> {
        match &self.default {
            DefaultDataset::Bundled => parse_csv(BUNDLED_CSV),
            DefaultDataset::File(path) => parse_csv(std::fs::File::open(path)?),
        }
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(DefaultDataset::Bundled)
    }
}
