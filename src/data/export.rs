use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Candidate, CandidateTable};
use super::schema;

/// File name offered when exporting the filtered view.
pub const EXPORT_FILE_NAME: &str = "filtered_candidates.csv";

/// Export header: the source columns in their order, then any derived column
/// the source did not already carry.
pub fn export_headers(table: &CandidateTable) -> Vec<String> {
    let mut headers: Vec<String> = table.headers.to_vec();
    for derived in schema::DERIVED {
        if !headers.iter().any(|h| h == derived) {
            headers.push(derived.to_string());
        }
    }
    headers
}

/// Undefined values are written as empty cells.
pub fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Cell text of one candidate under `headers` (as built by
/// [`export_headers`]).
pub fn row_cells(candidate: &Candidate, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| match candidate.metrics.by_column(header) {
            Some(value) => format_cell(value),
            None => candidate.record.cells.get(idx).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Write a table as CSV, derived columns included. Source cells of derived
/// columns are replaced by the recomputed values.
pub fn write_csv<W: Write>(table: &CandidateTable, out: W) -> Result<()> {
    let headers = export_headers(table);
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&headers).context("writing CSV header")?;

    for (row_no, candidate) in table.rows.iter().enumerate() {
        let record = row_cells(candidate, &headers);
        writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Export to a file.
pub fn write_csv_file(table: &CandidateTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, file)?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::derive;
    use crate::data::filter::filter;
    use crate::data::loader::parse_csv;

    fn table(csv: &str) -> CandidateTable {
        derive(&parse_csv(csv.as_bytes()).unwrap())
    }

    fn to_csv_bytes(table: &CandidateTable) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        write_csv(table, &mut buf)?;
        Ok(buf)
    }

    #[test]
    fn derived_columns_are_appended() {
        let t = table("Kandidat,Parti,Likerklikk,Kommentarer,Delinger,Visninger,Note\nA,X,100,10,5,10000,hi\n");
        let text = String::from_utf8(to_csv_bytes(&t).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Kandidat,Parti,Likerklikk,Kommentarer,Delinger,Visninger,Note,Engasjement,Engasjementsrate_%,Likes_per_1M_views,Comments_per_1M_views,Shares_per_1M_views")
        );
        assert_eq!(lines.next(), Some("A,X,100,10,5,10000,hi,115,1.15,10000,1000,500"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn undefined_values_export_as_empty() {
        let t = table("Kandidat,Parti,Likerklikk,Kommentarer,Delinger,Visninger\nA,X,1,1,1,0\n");
        let text = String::from_utf8(to_csv_bytes(&t).unwrap()).unwrap();
        assert_eq!(text.lines().nth(1), Some("A,X,1,1,1,0,3,,,,"));
    }

    #[test]
    fn stale_derived_columns_are_overwritten_in_place() {
        let t = table("Kandidat,Engasjementsrate_%,Parti,Likerklikk,Kommentarer,Delinger,Visninger\nA,99,X,1,1,2,100\n");
        let headers = export_headers(&t);
        assert_eq!(headers[1], "Engasjementsrate_%");
        assert_eq!(headers.len(), 11);
        let text = String::from_utf8(to_csv_bytes(&t).unwrap()).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("A,4,X,"));
    }

    #[test]
    fn export_then_reload_reproduces_metrics() {
        let t = table(
            "Kandidat,Parti,Likerklikk,Kommentarer,Delinger,Visninger,SUM\n\
             \"Berg, Anna\",X,412300,18250,9400,5120000,5559950\n\
             B,Y,7,3,1,0,11\n\
             C,X,,3,1,77,\n\
             D,Y,33,0,1,333333,333367\n",
        );
        let filtered = filter(&t, &t.parties, "");
        let bytes = to_csv_bytes(&filtered).unwrap();
        let reloaded = derive(&parse_csv(bytes.as_slice()).unwrap());

        assert_eq!(reloaded.len(), filtered.len());
        for (a, b) in filtered.rows.iter().zip(&reloaded.rows) {
            assert_eq!(a.metrics, b.metrics);
            assert_eq!(a.record.candidate_name, b.record.candidate_name);
            assert_eq!(a.record.sum_total, b.record.sum_total);
        }
    }

    #[test]
    fn writes_file() {
        let t = table("Kandidat,Parti,Likerklikk,Kommentarer,Delinger,Visninger\nA,X,1,1,1,10\n");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        write_csv_file(&t, &path).unwrap();
        let reloaded = parse_csv(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(reloaded.len(), 1);
    }
}
