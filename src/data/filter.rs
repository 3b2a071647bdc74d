use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{Candidate, CandidateTable};

// ---------------------------------------------------------------------------
// Filter selections
// ---------------------------------------------------------------------------

/// User selections driving the filtered view.
///
/// An empty party set selects nothing; there is no implicit "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub parties: BTreeSet<String>,
    pub search: String,
}

impl FilterState {
    /// Apply the selections to a table.
    pub fn apply(&self, table: &CandidateTable) -> CandidateTable {
        filter(table, &self.parties, &self.search)
    }
}

/// Initialise a [`FilterState`] with every party selected and no search.
pub fn init_filter_state(table: &CandidateTable) -> FilterState {
    FilterState {
        parties: table.parties.clone(),
        search: String::new(),
    }
}

/// Whether one candidate passes the selections.
///
/// * party must be present and selected
/// * an empty search matches everything; otherwise the name must contain it,
///   ignoring case, and a missing name never matches
pub fn matches(candidate: &Candidate, parties: &BTreeSet<String>, search: &str) -> bool {
    let party_ok = candidate
        .record
        .party
        .as_ref()
        .is_some_and(|p| parties.contains(p));
    if !party_ok {
        return false;
    }
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    candidate
        .record
        .candidate_name
        .as_ref()
        .is_some_and(|name| name.to_lowercase().contains(&needle))
}

/// Keep the rows passing [`matches`], in their original order.
pub fn filter(table: &CandidateTable, parties: &BTreeSet<String>, search: &str) -> CandidateTable {
    let rows: Vec<Candidate> = table
        .rows
        .iter()
        .filter(|c| matches(c, parties, search))
        .cloned()
        .collect();
    log::debug!(
        "Filter kept {}/{} rows (parties={:?}, search={:?})",
        rows.len(),
        table.len(),
        parties,
        search
    );
    CandidateTable::from_rows(Arc::clone(&table.headers), table.columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::derive;
    use crate::data::loader::parse_csv;

    fn table() -> CandidateTable {
        let csv = "Kandidat,Parti,Likerklikk,Kommentarer,Delinger,Visninger\n\
                   Anna Berg,X,100,10,5,10000\n\
                   Bjørn Lie,Y,50,5,2,5000\n\
                   ,X,1,1,1,10\n\
                   ANNE Dahl,Z,3,3,3,30\n\
                   Per Moe,,3,3,3,30\n\
                   annette Vik,X,9,9,9,90\n";
        derive(&parse_csv(csv.as_bytes()).unwrap())
    }

    fn set(parties: &[&str]) -> BTreeSet<String> {
        parties.iter().map(|p| p.to_string()).collect()
    }

    fn names(t: &CandidateTable) -> Vec<Option<&str>> {
        t.rows
            .iter()
            .map(|c| c.record.candidate_name.as_deref())
            .collect()
    }

    #[test]
    fn party_filter_keeps_order() {
        let out = filter(&table(), &set(&["X"]), "");
        assert_eq!(names(&out), vec![Some("Anna Berg"), None, Some("annette Vik")]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let out = filter(&table(), &set(&["X", "Y", "Z"]), "ANN");
        assert_eq!(
            names(&out),
            vec![Some("Anna Berg"), Some("ANNE Dahl"), Some("annette Vik")]
        );
        let out = filter(&table(), &set(&["Y"]), "bjØrn");
        assert_eq!(names(&out), vec![Some("Bjørn Lie")]);
    }

    #[test]
    fn search_is_not_a_pattern() {
        let out = filter(&table(), &set(&["X", "Y", "Z"]), "a.*");
        assert!(out.is_empty());
    }

    #[test]
    fn missing_name_never_matches_search() {
        let out = filter(&table(), &set(&["X"]), "a");
        assert!(out.rows.iter().all(|c| c.record.candidate_name.is_some()));
    }

    #[test]
    fn missing_party_is_never_selected() {
        let all = table();
        let out = filter(&all, &all.parties, "");
        assert_eq!(out.len(), 5);
        assert!(out.rows.iter().all(|c| c.record.party.is_some()));
    }

    #[test]
    fn empty_party_set_yields_nothing() {
        let t = table();
        for search in ["", "a", "Per"] {
            assert!(filter(&t, &BTreeSet::new(), search).is_empty());
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = table();
        let cases = [(set(&["X"]), ""), (set(&["X", "Z"]), "an"), (set(&["Y"]), "zzz")];
        for (parties, search) in cases {
            let once = filter(&t, &parties, search);
            let twice = filter(&once, &parties, search);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn filtering_does_not_touch_the_source() {
        let t = table();
        let before = t.clone();
        let _ = filter(&t, &set(&["Y"]), "b");
        assert_eq!(t, before);
    }

    #[test]
    fn init_selects_every_party() {
        let t = table();
        let state = init_filter_state(&t);
        assert_eq!(state.parties, set(&["X", "Y", "Z"]));
        assert!(state.search.is_empty());
        assert_eq!(state.apply(&t).len(), 5);
    }

    #[test]
    fn filtered_table_reindexes_parties() {
        let out = filter(&table(), &set(&["X", "Y"]), "Bj");
        assert_eq!(out.parties, set(&["Y"]));
    }
}
