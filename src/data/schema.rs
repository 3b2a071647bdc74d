/// Column names of the candidate table as they appear in CSV files.
///
/// The wire names are Norwegian; the Rust side uses English field names.

// ── Required source columns ─────────────────────────────────────────────────
pub const CANDIDATE: &str = "Kandidat";
pub const PARTY: &str = "Parti";
pub const LIKES: &str = "Likerklikk";
pub const COMMENTS: &str = "Kommentarer";
pub const SHARES: &str = "Delinger";
pub const VIEWS: &str = "Visninger";

pub const REQUIRED: [&str; 6] = [CANDIDATE, PARTY, LIKES, COMMENTS, SHARES, VIEWS];

// ── Optional source columns ─────────────────────────────────────────────────
pub const ENGAGEMENT: &str = "Engasjement";
pub const SUM: &str = "SUM";

// ── Derived columns (written on export) ─────────────────────────────────────
pub const ENGAGEMENT_RATE: &str = "Engasjementsrate_%";
pub const LIKES_PER_MILLION: &str = "Likes_per_1M_views";
pub const COMMENTS_PER_MILLION: &str = "Comments_per_1M_views";
pub const SHARES_PER_MILLION: &str = "Shares_per_1M_views";

/// Derived columns in the order they are appended on export.
pub const DERIVED: [&str; 5] = [
    ENGAGEMENT,
    ENGAGEMENT_RATE,
    LIKES_PER_MILLION,
    COMMENTS_PER_MILLION,
    SHARES_PER_MILLION,
];

// ---------------------------------------------------------------------------
// ColumnIndex – header positions resolved once per load
// ---------------------------------------------------------------------------

/// Position of every known column in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub candidate: usize,
    pub party: usize,
    pub likes: usize,
    pub comments: usize,
    pub shares: usize,
    pub views: usize,
    pub engagement: Option<usize>,
    pub sum: Option<usize>,
}

impl ColumnIndex {
    /// Resolve column positions from a header row.
    ///
    /// Returns the names of all missing required columns (in canonical order)
    /// when the header is incomplete.
    pub fn resolve(headers: &[String]) -> Result<Self, Vec<String>> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        // All required columns are known to exist past this point.
        let required = |name: &str| find(name).unwrap_or_default();
        Ok(ColumnIndex {
            candidate: required(CANDIDATE),
            party: required(PARTY),
            likes: required(LIKES),
            comments: required(COMMENTS),
            shares: required(SHARES),
            views: required(VIEWS),
            engagement: find(ENGAGEMENT),
            sum: find(SUM),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_required_and_optional_columns() {
        let h = headers(&[
            "SUM", "Kandidat", "Parti", "Likerklikk", "Kommentarer", "Delinger", "Visninger",
        ]);
        let idx = ColumnIndex::resolve(&h).unwrap();
        assert_eq!(idx.candidate, 1);
        assert_eq!(idx.views, 6);
        assert_eq!(idx.sum, Some(0));
        assert_eq!(idx.engagement, None);
    }

    #[test]
    fn reports_every_missing_column() {
        let h = headers(&["Kandidat", "Likerklikk", "Delinger"]);
        let missing = ColumnIndex::resolve(&h).unwrap_err();
        assert_eq!(missing, vec!["Parti", "Kommentarer", "Visninger"]);
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let h = headers(&["kandidat", "Parti", "Likerklikk", "Kommentarer", "Delinger", "Visninger"]);
        assert_eq!(ColumnIndex::resolve(&h).unwrap_err(), vec!["Kandidat"]);
    }
}
