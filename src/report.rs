use std::collections::BTreeSet;
use std::fmt::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::args::Args;
use crate::data::aggregate::{rank, rank_parties, PartyTotals, RankColumn, Totals};
use crate::data::derive::derive;
use crate::data::export::write_csv_file;
use crate::data::filter::FilterState;
use crate::data::loader::{DataSource, DatasetLoader};
use crate::data::model::CandidateTable;
use crate::data::view::DashboardView;
use crate::ui::format::{format_count, format_metric};

/// One line of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub candidate: Option<String>,
    pub party: Option<String>,
    pub value: Option<f64>,
}

/// Serializable summary of a [`DashboardView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: usize,
    pub ranked_by: &'static str,
    pub totals: Totals,
    pub by_party: Vec<PartyTotals>,
    pub ranking: Vec<RankedEntry>,
    pub engagement_ranking: Vec<RankedEntry>,
}

fn ranked_entries(table: &CandidateTable, column: RankColumn) -> Vec<RankedEntry> {
    rank(table, column)
        .into_iter()
        .map(|c| RankedEntry {
            candidate: c.record.candidate_name.clone(),
            party: c.record.party.clone(),
            value: column.value(c),
        })
        .collect()
}

impl Report {
    pub fn from_view(view: &DashboardView) -> Self {
        Report {
            rows: view.filtered.len(),
            ranked_by: view.primary.label(),
            totals: view.totals,
            by_party: rank_parties(&view.by_party, view.primary)
                .into_iter()
                .cloned()
                .collect(),
            ranking: ranked_entries(&view.filtered, view.primary),
            engagement_ranking: ranked_entries(&view.filtered, RankColumn::EngagementRate),
        }
    }

    /// Plain-text rendering.
    pub fn to_text(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let t = &self.totals;
        writeln!(out, "Rows:           {}", self.rows)?;
        writeln!(out, "Total views:    {}", format_count(t.views))?;
        writeln!(out, "Total likes:    {}", format_count(t.likes))?;
        writeln!(out, "Total comments: {}", format_count(t.comments))?;
        writeln!(out, "Total shares:   {}", format_count(t.shares))?;
        let sum = t.sum_total.map_or_else(|| "—".to_string(), format_count);
        writeln!(out, "Total SUM:      {sum}")?;

        writeln!(out, "\nRanking by {}:", self.ranked_by)?;
        write_ranking(&mut out, &self.ranking)?;

        writeln!(out, "\nRanking by engagement rate (%):")?;
        write_ranking(&mut out, &self.engagement_ranking)?;

        writeln!(out, "\nPer party:")?;
        for p in &self.by_party {
            writeln!(
                out,
                "  {:<12} views {:>14}  likes {:>12}",
                p.party,
                format_count(p.totals.views),
                format_count(p.totals.likes)
            )?;
        }
        Ok(out)
    }
}

fn write_ranking(out: &mut impl Write, entries: &[RankedEntry]) -> fmt::Result {
    for (pos, e) in entries.iter().enumerate() {
        writeln!(
            out,
            "  {:>3}. {:<28} {:<8} {}",
            pos + 1,
            e.candidate.as_deref().unwrap_or("<missing>"),
            e.party.as_deref().unwrap_or(""),
            format_metric(e.value)
        )?;
    }
    Ok(())
}

/// Selections from the command line. No `--party` means every party.
pub fn filters_from_args(args: &Args, table: &CandidateTable) -> FilterState {
    let parties: BTreeSet<String> = if args.parties.is_empty() {
        table.parties.clone()
    } else {
        for p in &args.parties {
            if !table.parties.contains(p) {
                log::warn!("Party {p:?} does not occur in the dataset");
            }
        }
        args.parties.iter().cloned().collect()
    };
    FilterState {
        parties,
        search: args.search.clone(),
    }
}

/// Run the pipeline once on the default dataset and print the report.
pub fn run(args: &Args, mut loader: DatasetLoader) -> Result<()> {
    let raw = loader
        .load(&DataSource::Default)
        .context("loading default dataset")?;
    let table = derive(&raw);
    let filters = filters_from_args(args, &table);
    let view = DashboardView::build(&table, &filters);
    log::info!("{} of {} rows selected", view.filtered.len(), table.len());

    let report = Report::from_view(&view);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text()?);
    }

    if let Some(path) = &args.export {
        write_csv_file(&view.filtered, path)?;
    }
    Ok(())
}
