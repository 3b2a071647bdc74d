use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{rank, RankColumn};
use crate::data::export::{export_headers, row_cells, EXPORT_FILE_NAME};
use crate::data::loader::DataSource;
use crate::data::model::Candidate;
use crate::data::schema;
use crate::data::view::DashboardView;
use crate::state::AppState;

use super::format::{format_count, format_metric};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let parties = match &state.table {
        Some(table) => table.parties.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Party multi-select ----
            let header_text = format!("Party  ({}/{})", state.filters.parties.len(), parties.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("party_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_parties();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_parties();
                        }
                    });

                    for party in &parties {
                        let mut checked = state.filters.parties.contains(party);
                        let text = RichText::new(party)
                            .color(state.party_colors.color_for(Some(party.as_str())));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_party(party);
                        }
                    }
                });
            ui.separator();

            // ---- Chart options ----
            ui.checkbox(&mut state.log_y, "Log scale for y-axis");
            ui.separator();

            // ---- Candidate search ----
            ui.strong("Search candidate");
            let mut search = state.filters.search.clone();
            if ui.text_edit_singleline(&mut search).changed() {
                state.set_search(&search);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload default dataset").clicked() {
                state.reload_default();
                ui.close_menu();
            }
            ui.separator();
            let can_export = state.view.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(view)) = (&state.table, &state.view) {
            ui.label(format!(
                "{} candidates loaded, {} visible",
                table.len(),
                view.filtered.len()
            ));
            if let Some(label) = &state.source_label {
                ui.label(RichText::new(label).weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.heading(value);
    });
}

/// Column sums of the filtered view.
pub fn kpi_row(ui: &mut Ui, view: &DashboardView) {
    let t = &view.totals;
    ui.columns(5, |cols| {
        kpi(&mut cols[0], "Total views", format_count(t.views));
        kpi(&mut cols[1], "Total likes", format_count(t.likes));
        kpi(&mut cols[2], "Total comments", format_count(t.comments));
        kpi(&mut cols[3], "Total shares", format_count(t.shares));
        kpi(
            &mut cols[4],
            "Total SUM",
            t.sum_total.map_or_else(|| "—".to_string(), format_count),
        );
    });
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn text_table(ui: &mut Ui, id: &str, headers: &[String], rows: &[Vec<String>], max_height: f32) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .columns(Column::auto().at_least(60.0), headers.len())
            .header(20.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    for cell in &rows[row.index()] {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

fn name_and_party(c: &Candidate) -> [String; 2] {
    [
        c.record.candidate_name.clone().unwrap_or_default(),
        c.record.party.clone().unwrap_or_default(),
    ]
}

/// Columns of the ranking table: name, party, then every count column the
/// table has, `SUM` first.
pub fn ranking_columns(has_sum: bool) -> Vec<&'static str> {
    let mut cols = vec![schema::CANDIDATE, schema::PARTY];
    if has_sum {
        cols.push(schema::SUM);
    }
    cols.extend([schema::VIEWS, schema::LIKES, schema::COMMENTS, schema::SHARES]);
    cols
}

/// Candidates ranked by the primary column.
pub fn ranking_table(ui: &mut Ui, view: &DashboardView) {
    ui.strong(format!("Ranking by {}", view.primary.label()));

    let table = &view.filtered;
    let headers: Vec<String> = ranking_columns(table.has_sum())
        .into_iter()
        .map(str::to_string)
        .collect();
    let rows: Vec<Vec<String>> = rank(table, view.primary)
        .into_iter()
        .map(|c| {
            let mut cells = name_and_party(c).to_vec();
            if table.has_sum() {
                cells.push(format_metric(c.record.sum_total));
            }
            cells.extend(
                [c.record.views, c.record.likes, c.record.comments, c.record.shares]
                    .into_iter()
                    .map(format_metric),
            );
            cells
        })
        .collect();
    text_table(ui, "ranking_table", &headers, &rows, 260.0);
}

/// Candidates ranked by engagement rate, with per-million figures.
pub fn engagement_table(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Engagement (per 1M views)");

    let headers: Vec<String> = [
        schema::CANDIDATE,
        schema::PARTY,
        schema::ENGAGEMENT_RATE,
        schema::LIKES_PER_MILLION,
        schema::COMMENTS_PER_MILLION,
        schema::SHARES_PER_MILLION,
        schema::VIEWS,
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    let rows: Vec<Vec<String>> = rank(&view.filtered, RankColumn::EngagementRate)
        .into_iter()
        .map(|c| {
            let m = &c.metrics;
            let mut cells = name_and_party(c).to_vec();
            cells.extend(
                [
                    m.engagement_rate_pct,
                    m.likes_per_million_views,
                    m.comments_per_million_views,
                    m.shares_per_million_views,
                    c.record.views,
                ]
                .into_iter()
                .map(format_metric),
            );
            cells
        })
        .collect();
    text_table(ui, "engagement_table", &headers, &rows, 260.0);
}

/// The whole filtered table, exactly as it would be exported.
pub fn data_table(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Data and calculations");
    ui.label(
        "Engasjement = Likerklikk + Kommentarer + Delinger. \
         Engasjementsrate = Engasjement / Visninger × 100. \
         Per-1M figures are each count / Visninger × 1 000 000.",
    );
    let headers = export_headers(&view.filtered);
    let rows: Vec<Vec<String>> = view
        .filtered
        .rows
        .iter()
        .map(|c| row_cells(c, &headers))
        .collect();
    text_table(ui, "data_table", &headers, &rows, 320.0);
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open candidate CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match DataSource::upload_from_path(&path) {
            Ok(source) => {
                state.load(&source);
            }
            Err(e) => {
                log::error!("Failed to read {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_to(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_columns_follow_sum_presence() {
        assert_eq!(
            ranking_columns(true),
            vec!["Kandidat", "Parti", "SUM", "Visninger", "Likerklikk", "Kommentarer", "Delinger"]
        );
        assert!(!ranking_columns(false).contains(&"SUM"));
    }
}
