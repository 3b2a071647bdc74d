use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::PartyColors;
use crate::data::aggregate::{rank, rank_parties, RankColumn};
use crate::data::model::Candidate;
use crate::data::view::DashboardView;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bar height on a linear or log10 axis. Undefined values, and values that
/// have no logarithm, are not drawn.
pub fn bar_height(value: Option<f64>, log_y: bool) -> Option<f64> {
    let v = value?;
    if log_y {
        (v > 0.0).then(|| v.log10())
    } else {
        Some(v)
    }
}

/// Axis label for a tick at `value` when bars sit at integer positions.
fn category_label(labels: &[String], value: f64) -> String {
    if value.fract().abs() > f64::EPSILON || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

fn y_tick_label(value: f64, log_y: bool) -> String {
    if log_y {
        format!("{:.0}", 10f64.powf(value))
    } else {
        format!("{value}")
    }
}

fn candidate_name(c: &Candidate) -> String {
    c.record
        .candidate_name
        .clone()
        .unwrap_or_else(|| "<missing>".to_string())
}

/// One bar chart per candidate, bars grouped per party so the legend shows
/// party colours.
fn candidate_bars(
    ui: &mut Ui,
    id: &str,
    title: &str,
    ranked: &[&Candidate],
    column: RankColumn,
    log_y: bool,
    colors: &PartyColors,
) {
    ui.strong(title);

    let labels: Vec<String> = ranked.iter().map(|c| candidate_name(c)).collect();
    let mut by_party: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
    for (pos, c) in ranked.iter().enumerate() {
        let Some(height) = bar_height(column.value(c), log_y) else {
            continue;
        };
        let party = c.record.party.clone().unwrap_or_default();
        by_party.entry(party).or_default().push(
            Bar::new(pos as f64, height)
                .name(&labels[pos])
                .width(0.7),
        );
    }

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_axis_formatter(move |mark, _range| y_tick_label(mark.value, log_y))
        .y_axis_label(column.label())
        .show(ui, |plot_ui| {
            for (party, bars) in by_party {
                let color = colors.color_for(Some(party.as_str()));
                plot_ui.bar_chart(BarChart::new(bars).name(party).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Primary metric (`SUM` or views) per candidate, descending.
pub fn primary_per_candidate(ui: &mut Ui, view: &DashboardView, log_y: bool, colors: &PartyColors) {
    let ranked = rank(&view.filtered, view.primary);
    let title = format!("Total {} per candidate", view.primary.label());
    candidate_bars(ui, "primary_per_candidate", &title, &ranked, view.primary, log_y, colors);
}

/// Engagement rate per candidate, descending. Always on a linear axis.
pub fn engagement_rate_per_candidate(ui: &mut Ui, view: &DashboardView, colors: &PartyColors) {
    let ranked = rank(&view.filtered, RankColumn::EngagementRate);
    candidate_bars(
        ui,
        "engagement_per_candidate",
        "Engagement rate (%) per candidate",
        &ranked,
        RankColumn::EngagementRate,
        false,
        colors,
    );
}

/// Primary metric summed per party, descending.
pub fn primary_per_party(ui: &mut Ui, view: &DashboardView, log_y: bool, colors: &PartyColors) {
    let column = view.primary;
    ui.strong(format!("{} per party", column.label()));

    let ranked = rank_parties(&view.by_party, column);
    let labels: Vec<String> = ranked.iter().map(|p| p.party.clone()).collect();
    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .filter_map(|(pos, p)| {
            let height = bar_height(p.totals.value(column), log_y)?;
            Some(
                Bar::new(pos as f64, height)
                    .name(&p.party)
                    .fill(colors.color_for(Some(p.party.as_str())))
                    .width(0.7),
            )
        })
        .collect();

    Plot::new("primary_per_party")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_axis_formatter(move |mark, _range| y_tick_label(mark.value, log_y))
        .y_axis_label(column.label())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

/// Views against engagement rate, one series per party.
pub fn views_vs_engagement(ui: &mut Ui, view: &DashboardView, colors: &PartyColors) {
    ui.strong("Views vs. engagement rate");

    let mut by_party: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for c in &view.filtered.rows {
        let (Some(views), Some(rate)) = (c.record.views, c.metrics.engagement_rate_pct) else {
            continue;
        };
        let party = c.record.party.clone().unwrap_or_default();
        by_party.entry(party).or_default().push([views, rate]);
    }

    Plot::new("views_vs_engagement")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Visninger")
        .y_axis_label("Engasjementsrate_%")
        .show(ui, |plot_ui| {
            for (party, points) in by_party {
                let color = colors.color_for(Some(party.as_str()));
                plot_ui.points(
                    Points::new(points)
                        .name(party)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_axis_drops_non_positive_values() {
        assert_eq!(bar_height(Some(100.0), true), Some(2.0));
        assert_eq!(bar_height(Some(0.0), true), None);
        assert_eq!(bar_height(Some(0.0), false), Some(0.0));
        assert_eq!(bar_height(None, false), None);
    }

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_label(&labels, 1.0), "B");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn log_ticks_show_linear_values() {
        assert_eq!(y_tick_label(3.0, true), "1000");
        assert_eq!(y_tick_label(2.5, false), "2.5");
    }
}
