use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, tables, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to start  (File → Open CSV…)");
        });
        return;
    };
    let colors = &state.party_colors;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("TikTok engagement per candidate");
            panels::kpi_row(ui, view);
            ui.separator();

            ui.columns(2, |cols| {
                panels::ranking_table(&mut cols[0], view);
                panels::engagement_table(&mut cols[1], view);
            });
            ui.separator();

            ui.columns(2, |cols| {
                charts::primary_per_candidate(&mut cols[0], view, state.log_y, colors);
                charts::engagement_rate_per_candidate(&mut cols[1], view, colors);
            });
            ui.columns(2, |cols| {
                charts::primary_per_party(&mut cols[0], view, state.log_y, colors);
                charts::views_vs_engagement(&mut cols[1], view, colors);
            });
            ui.separator();

            panels::data_table(ui, view);
        });
}
