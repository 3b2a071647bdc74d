use std::path::Path;

use anyhow::Result;

use crate::color::PartyColors;
use crate::data::derive::derive;
use crate::data::export::write_csv_file;
use crate::data::filter::{init_filter_state, FilterState};
use crate::data::loader::{DataSource, DatasetLoader};
use crate::data::model::CandidateTable;
use crate::data::view::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Session loader; memoizes the default dataset.
    pub loader: DatasetLoader,

    /// Label of the source the current table came from.
    pub source_label: Option<String>,

    /// Derived table (None until a load succeeds).
    pub table: Option<CandidateTable>,

    /// Party selection and candidate search.
    pub filters: FilterState,

    /// Logarithmic y-axis on the bar charts. Presentation only.
    pub log_y: bool,

    /// Filtered table and aggregates for the current selections (cached).
    pub view: Option<DashboardView>,

    /// Colour per party of the loaded table.
    pub party_colors: PartyColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(loader: DatasetLoader) -> Self {
        Self {
            loader,
            source_label: None,
            table: None,
            filters: FilterState::default(),
            log_y: false,
            view: None,
            party_colors: PartyColors::default(),
            status_message: None,
        }
    }

    /// Load a source and make it current. On failure the previous table
    /// stays active and the error is shown in the status line.
    pub fn load(&mut self, source: &DataSource) -> bool {
        match self.loader.load(source) {
            Ok(raw) => {
                self.source_label = Some(source.label().to_string());
                self.set_table(derive(&raw));
                true
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", source.label());
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    /// Re-read the default dataset, bypassing the cache.
    pub fn reload_default(&mut self) -> bool {
        self.loader.invalidate();
        self.load(&DataSource::Default)
    }

    /// Ingest a derived table, select every party and rebuild the view.
    pub fn set_table(&mut self, table: CandidateTable) {
        self.filters = init_filter_state(&table);
        self.party_colors = PartyColors::new(&table.parties);
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the view after a selection change.
    pub fn refilter(&mut self) {
        self.view = self
            .table
            .as_ref()
            .map(|table| DashboardView::build(table, &self.filters));
    }

    /// Toggle a single party in the selection.
    pub fn toggle_party(&mut self, party: &str) {
        if !self.filters.parties.remove(party) {
            self.filters.parties.insert(party.to_string());
        }
        self.refilter();
    }

    /// Select all parties of the loaded table.
    pub fn select_all_parties(&mut self) {
        if let Some(table) = &self.table {
            self.filters.parties = table.parties.clone();
            self.refilter();
        }
    }

    /// Deselect all parties.
    pub fn select_no_parties(&mut self) {
        self.filters.parties.clear();
        self.refilter();
    }

    pub fn set_search(&mut self, search: &str) {
        if self.filters.search != search {
            self.filters.search = search.to_string();
            self.refilter();
        }
    }

    /// Write the filtered table to `path`.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let view = self
            .view
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no dataset loaded"))?;
        write_csv_file(&view.filtered, path)
    }
}
