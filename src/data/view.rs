use super::aggregate::{aggregate_by_party, aggregate_totals, PartyTotals, RankColumn, Totals};
use super::filter::FilterState;
use super::model::CandidateTable;

/// Everything the presenter needs for one set of selections: the filtered
/// table and its aggregates. Rebuilt on every selection change.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub filtered: CandidateTable,
    pub totals: Totals,
    pub by_party: Vec<PartyTotals>,
    pub primary: RankColumn,
}

impl DashboardView {
    pub fn build(table: &CandidateTable, filters: &FilterState) -> Self {
        let filtered = filters.apply(table);
        let totals = aggregate_totals(&filtered);
        let by_party = aggregate_by_party(&filtered);
        let primary = RankColumn::primary(&filtered);
        DashboardView {
            filtered,
            totals,
            by_party,
            primary,
        }
    }
}
