use std::sync::Arc;

use super::model::{Candidate, CandidateRecord, CandidateTable, DerivedMetrics, RawTable};

/// Decimals kept for the engagement rate (percent).
pub const RATE_DECIMALS: i32 = 2;
/// Decimals kept for the per-million-views figures.
pub const PER_MILLION_DECIMALS: i32 = 1;

/// Round to `decimals` places, ties to even on the scaled value.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// `numerator / denominator * scale`, rounded. Undefined when an input is
/// missing or the quotient is not finite (zero denominator).
fn scaled_ratio(
    numerator: Option<f64>,
    denominator: Option<f64>,
    scale: f64,
    decimals: i32,
) -> Option<f64> {
    let q = numerator? / denominator? * scale;
    q.is_finite().then(|| round_to(q, decimals))
}

/// Engagement as a percentage of views.
pub fn engagement_rate_pct(engagement: Option<f64>, views: Option<f64>) -> Option<f64> {
    scaled_ratio(engagement, views, 100.0, RATE_DECIMALS)
}

/// A count rescaled to its value per one million views.
pub fn per_million(metric: Option<f64>, views: Option<f64>) -> Option<f64> {
    scaled_ratio(metric, views, 1_000_000.0, PER_MILLION_DECIMALS)
}

/// Supplied engagement when the source has the column, else the sum of
/// likes, comments and shares.
pub fn resolve_engagement(record: &CandidateRecord, supplied: bool) -> Option<f64> {
    if supplied {
        record.engagement
    } else {
        Some(record.likes? + record.comments? + record.shares?)
    }
}

/// Compute the derived metrics of one record.
pub fn derive_metrics(record: &CandidateRecord, engagement_supplied: bool) -> DerivedMetrics {
    let engagement = resolve_engagement(record, engagement_supplied);
    DerivedMetrics {
        engagement,
        engagement_rate_pct: engagement_rate_pct(engagement, record.views),
        likes_per_million_views: per_million(record.likes, record.views),
        comments_per_million_views: per_million(record.comments, record.views),
        shares_per_million_views: per_million(record.shares, record.views),
    }
}

/// Derive every record of a loaded table. Pure: the raw table is untouched.
pub fn derive(raw: &RawTable) -> CandidateTable {
    let supplied = raw.columns.engagement.is_some();
    let rows = raw
        .records
        .iter()
        .map(|record| Candidate {
            record: record.clone(),
            metrics: derive_metrics(record, supplied),
        })
        .collect();
    CandidateTable::from_rows(Arc::from(raw.headers.clone()), raw.columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn derived(csv: &str) -> CandidateTable {
        derive(&parse_csv(csv.as_bytes()).unwrap())
    }

    const HEADER: &str = "Kandidat,Parti,Likerklikk,Kommentarer,Delinger,Visninger";

    #[test]
    fn worked_example() {
        let table = derived(&format!("{HEADER}\nA,X,100,10,5,10000\nB,Y,50,5,2,5000\n"));
        let a = &table.rows[0].metrics;
        let b = &table.rows[1].metrics;
        assert_eq!(a.engagement, Some(115.0));
        assert_eq!(b.engagement, Some(57.0));
        assert_eq!(a.engagement_rate_pct, Some(1.15));
        assert_eq!(b.engagement_rate_pct, Some(1.14));
        assert_eq!(a.likes_per_million_views, Some(10000.0));
        assert_eq!(a.comments_per_million_views, Some(1000.0));
        assert_eq!(a.shares_per_million_views, Some(500.0));
    }

    #[test]
    fn zero_views_leave_ratios_undefined() {
        let table = derived(&format!("{HEADER}\nA,X,10,1,1,0\nB,X,0,0,0,0\n"));
        for row in &table.rows {
            assert!(row.metrics.engagement.is_some());
            assert_eq!(row.metrics.engagement_rate_pct, None);
            assert_eq!(row.metrics.likes_per_million_views, None);
            assert_eq!(row.metrics.comments_per_million_views, None);
            assert_eq!(row.metrics.shares_per_million_views, None);
        }
    }

    #[test]
    fn missing_count_propagates() {
        let table = derived(&format!("{HEADER}\nA,X,,1,1,100\n"));
        let m = &table.rows[0].metrics;
        assert_eq!(m.engagement, None);
        assert_eq!(m.engagement_rate_pct, None);
        assert_eq!(m.likes_per_million_views, None);
        assert_eq!(m.comments_per_million_views, Some(10000.0));
    }

    #[test]
    fn supplied_engagement_wins() {
        let table = derived(&format!(
            "{HEADER},Engasjement\nA,X,100,10,5,10000,500\nB,X,100,10,5,10000,\n"
        ));
        assert_eq!(table.rows[0].metrics.engagement, Some(500.0));
        assert_eq!(table.rows[0].metrics.engagement_rate_pct, Some(5.0));
        // Column present but cell blank: undefined, not recomputed.
        assert_eq!(table.rows[1].metrics.engagement, None);
    }

    #[test]
    fn rate_matches_formula() {
        let cases = [(1.0, 2.0, 3.0, 7.0), (123.0, 45.0, 6.0, 98765.0), (0.0, 0.0, 1.0, 3.0)];
        for (l, c, s, v) in cases {
            let rec = CandidateRecord {
                candidate_name: None,
                party: None,
                likes: Some(l),
                comments: Some(c),
                shares: Some(s),
                views: Some(v),
                engagement: None,
                sum_total: None,
                cells: Vec::new(),
            };
            let m = derive_metrics(&rec, false);
            assert_eq!(m.engagement_rate_pct, Some(round_to((l + c + s) / v * 100.0, 2)));
        }
    }

    #[test]
    fn per_million_scales_linearly() {
        let views = Some(250_000.0);
        let single = per_million(Some(37.0), views).unwrap();
        let double = per_million(Some(74.0), views).unwrap();
        assert_eq!(double, single * 2.0);
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(1.25, 1), 1.2);
        assert_eq!(round_to(-1.005, 1), -1.0);
    }

    #[test]
    fn derive_keeps_record_order_and_source() {
        let raw = parse_csv(format!("{HEADER}\nB,Y,1,1,1,10\nA,X,1,1,1,10\n").as_bytes()).unwrap();
        let table = derive(&raw);
        assert_eq!(table.rows[0].record, raw.records[0]);
        assert_eq!(table.rows[1].record.candidate_name.as_deref(), Some("A"));
        assert_eq!(&table.headers[..], &raw.headers[..]);
    }
}
