use std::collections::BTreeSet;
use std::sync::Arc;

use super::schema::{self, ColumnIndex};

// ---------------------------------------------------------------------------
// CandidateRecord – one source row
// ---------------------------------------------------------------------------

/// One row of the source table, as parsed from CSV.
///
/// Numeric cells that are blank or not numbers are `None`. The raw cell text
/// is kept so that unknown columns survive an export unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub candidate_name: Option<String>,
    pub party: Option<String>,
    pub likes: Option<f64>,
    pub comments: Option<f64>,
    pub shares: Option<f64>,
    pub views: Option<f64>,
    /// Supplied `Engasjement` cell, only meaningful when the column exists.
    pub engagement: Option<f64>,
    /// Supplied `SUM` cell, only meaningful when the column exists.
    pub sum_total: Option<f64>,
    /// Raw cell text, aligned with the table headers.
    pub cells: Vec<String>,
}

impl CandidateRecord {
    /// Build a record from a raw row using resolved column positions.
    pub fn from_cells(cells: Vec<String>, columns: &ColumnIndex) -> Self {
        let text = |idx: usize| parse_text(cells.get(idx).map(String::as_str));
        let number = |idx: usize| parse_number(cells.get(idx).map(String::as_str));

        CandidateRecord {
            candidate_name: text(columns.candidate),
            party: text(columns.party),
            likes: number(columns.likes),
            comments: number(columns.comments),
            shares: number(columns.shares),
            views: number(columns.views),
            engagement: columns.engagement.and_then(number),
            sum_total: columns.sum.and_then(number),
            cells,
        }
    }
}

/// Only an empty cell is missing. Whitespace is kept as written, so a party
/// of spaces is still a party that can be selected.
fn parse_text(cell: Option<&str>) -> Option<String> {
    cell.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Lenient numeric parse. Blank, non-numeric and NaN cells are missing.
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    let s = cell?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ---------------------------------------------------------------------------
// RawTable – a loaded, schema-checked dataset before derivation
// ---------------------------------------------------------------------------

/// Output of the loader: header row, resolved column positions and records.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub columns: ColumnIndex,
    pub records: Vec<CandidateRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DerivedMetrics – computed per record
// ---------------------------------------------------------------------------

/// Derived statistics of one record. `None` means undefined: a missing
/// input or a division by zero views.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedMetrics {
    pub engagement: Option<f64>,
    pub engagement_rate_pct: Option<f64>,
    pub likes_per_million_views: Option<f64>,
    pub comments_per_million_views: Option<f64>,
    pub shares_per_million_views: Option<f64>,
}

impl DerivedMetrics {
    /// Look up a derived value by its export column name.
    ///
    /// Returns `None` when `column` is not a derived column.
    pub fn by_column(&self, column: &str) -> Option<Option<f64>> {
        match column {
            schema::ENGAGEMENT => Some(self.engagement),
            schema::ENGAGEMENT_RATE => Some(self.engagement_rate_pct),
            schema::LIKES_PER_MILLION => Some(self.likes_per_million_views),
            schema::COMMENTS_PER_MILLION => Some(self.comments_per_million_views),
            schema::SHARES_PER_MILLION => Some(self.shares_per_million_views),
            _ => None,
        }
    }
}

/// A source record together with its derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub record: CandidateRecord,
    pub metrics: DerivedMetrics,
}

// ---------------------------------------------------------------------------
// CandidateTable – derived dataset, the unit the filter and aggregator see
// ---------------------------------------------------------------------------

/// A derived table. Tables are never mutated; filtering builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTable {
    /// Source headers, shared between a table and every view filtered from it.
    pub headers: Arc<[String]>,
    pub columns: ColumnIndex,
    pub rows: Vec<Candidate>,
    /// Sorted distinct non-missing party values.
    pub parties: BTreeSet<String>,
}

impl CandidateTable {
    /// Build the party index from the rows.
    pub fn from_rows(headers: Arc<[String]>, columns: ColumnIndex, rows: Vec<Candidate>) -> Self {
        let parties = rows
            .iter()
            .filter_map(|c| c.record.party.clone())
            .collect();
        CandidateTable {
            headers,
            columns,
            rows,
            parties,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the source carried a `SUM` column.
    pub fn has_sum(&self) -> bool {
        self.columns.sum.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ColumnIndex {
        ColumnIndex {
            candidate: 0,
            party: 1,
            likes: 2,
            comments: 3,
            shares: 4,
            views: 5,
            engagement: None,
            sum: Some(6),
        }
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn malformed_numbers_become_missing() {
        let rec = CandidateRecord::from_cells(
            cells(&["A", "X", "12", "abc", "", " 7 ", "NaN"]),
            &columns(),
        );
        assert_eq!(rec.likes, Some(12.0));
        assert_eq!(rec.comments, None);
        assert_eq!(rec.shares, None);
        assert_eq!(rec.views, Some(7.0));
        assert_eq!(rec.sum_total, None);
        assert_eq!(rec.engagement, None);
    }

    #[test]
    fn empty_names_are_missing() {
        let rec = CandidateRecord::from_cells(cells(&["", "", "1", "2", "3", "4"]), &columns());
        assert_eq!(rec.candidate_name, None);
        assert_eq!(rec.party, None);
        // Short rows do not panic on the optional column.
        assert_eq!(rec.sum_total, None);
    }

    #[test]
    fn whitespace_text_is_kept() {
        let rec = CandidateRecord::from_cells(cells(&[" A ", "  ", "1", "2", "3", "4"]), &columns());
        assert_eq!(rec.candidate_name.as_deref(), Some(" A "));
        assert_eq!(rec.party.as_deref(), Some("  "));
    }

    #[test]
    fn negative_counts_are_accepted() {
        let rec = CandidateRecord::from_cells(cells(&["A", "X", "-5", "0", "0", "10"]), &columns());
        assert_eq!(rec.likes, Some(-5.0));
    }

    #[test]
    fn party_index_skips_missing_values() {
        let rows = [Some("Y"), None, Some("X"), Some("Y")]
            .iter()
            .map(|p| Candidate {
                record: CandidateRecord {
                    candidate_name: None,
                    party: p.map(str::to_string),
                    likes: None,
                    comments: None,
                    shares: None,
                    views: None,
                    engagement: None,
                    sum_total: None,
                    cells: Vec::new(),
                },
                metrics: DerivedMetrics::default(),
            })
            .collect();
        let table = CandidateTable::from_rows(Arc::from(Vec::<String>::new()), columns(), rows);
        let parties: Vec<&str> = table.parties.iter().map(String::as_str).collect();
        assert_eq!(parties, vec!["X", "Y"]);
        assert!(table.has_sum());
    }
}
