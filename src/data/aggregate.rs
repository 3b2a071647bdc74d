use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::derive::engagement_rate_pct;
use super::model::{Candidate, CandidateRecord, CandidateTable};
use super::schema;

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Column sums over a set of records. Missing cells are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
    /// Present only when the source table has a `SUM` column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_total: Option<f64>,
}

impl Totals {
    fn empty(has_sum: bool) -> Self {
        Totals {
            sum_total: has_sum.then_some(0.0),
            ..Totals::default()
        }
    }

    fn add(&mut self, record: &CandidateRecord) {
        self.views += record.views.unwrap_or(0.0);
        self.likes += record.likes.unwrap_or(0.0);
        self.comments += record.comments.unwrap_or(0.0);
        self.shares += record.shares.unwrap_or(0.0);
        if let Some(sum) = self.sum_total.as_mut() {
            *sum += record.sum_total.unwrap_or(0.0);
        }
    }

    /// Engagement rate of the summed counts.
    pub fn engagement_rate_pct(&self) -> Option<f64> {
        engagement_rate_pct(
            Some(self.likes + self.comments + self.shares),
            Some(self.views),
        )
    }

    /// Value used when ranking by `column`.
    pub fn value(&self, column: RankColumn) -> Option<f64> {
        match column {
            RankColumn::Sum => self.sum_total,
            RankColumn::Views => Some(self.views),
            RankColumn::EngagementRate => self.engagement_rate_pct(),
        }
    }
}

/// Sum every count column of a table. An empty table gives zeros.
pub fn aggregate_totals(table: &CandidateTable) -> Totals {
    let mut totals = Totals::empty(table.has_sum());
    for c in &table.rows {
        totals.add(&c.record);
    }
    totals
}

/// Sums for one party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyTotals {
    pub party: String,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Group by party and sum the count columns per group.
///
/// One entry per distinct party present, sorted by party name. Records
/// without a party are not grouped.
pub fn aggregate_by_party(table: &CandidateTable) -> Vec<PartyTotals> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
    for c in &table.rows {
        let Some(party) = c.record.party.as_deref() else {
            continue;
        };
        groups
            .entry(party)
            .or_insert_with(|| Totals::empty(table.has_sum()))
            .add(&c.record);
    }
    groups
        .into_iter()
        .map(|(party, totals)| PartyTotals {
            party: party.to_string(),
            totals,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Column a ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankColumn {
    Sum,
    Views,
    EngagementRate,
}

impl RankColumn {
    /// `SUM` when the table has it, otherwise views.
    pub fn primary(table: &CandidateTable) -> Self {
        if table.has_sum() {
            RankColumn::Sum
        } else {
            RankColumn::Views
        }
    }

    /// Column header shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            RankColumn::Sum => schema::SUM,
            RankColumn::Views => schema::VIEWS,
            RankColumn::EngagementRate => schema::ENGAGEMENT_RATE,
        }
    }

    /// Ranking value of one candidate.
    pub fn value(self, candidate: &Candidate) -> Option<f64> {
        match self {
            RankColumn::Sum => candidate.record.sum_total,
            RankColumn::Views => candidate.record.views,
            RankColumn::EngagementRate => candidate.metrics.engagement_rate_pct,
        }
    }
}

/// Descending order with undefined values last.
fn descending_undefined_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable descending sort by `key`; undefined keys go last and ties keep
/// their input order.
pub fn rank_by<T, F>(items: &[T], key: F) -> Vec<&T>
where
    F: Fn(&T) -> Option<f64>,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| descending_undefined_last(key(a), key(b)));
    ranked
}

/// Rank the candidates of a table by `column`.
pub fn rank(table: &CandidateTable, column: RankColumn) -> Vec<&Candidate> {
    rank_by(&table.rows, |c| column.value(c))
}

/// Rank party totals by `column`.
pub fn rank_parties(parties: &[PartyTotals], column: RankColumn) -> Vec<&PartyTotals> {
    rank_by(parties, |p| p.totals.value(column))
}
