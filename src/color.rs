use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Party colours
// ---------------------------------------------------------------------------

/// Fixed colour per party, built once per loaded dataset so a party keeps its
/// colour while the selection changes.
#[derive(Debug, Clone)]
pub struct PartyColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl PartyColors {
    pub fn new(parties: &BTreeSet<String>) -> Self {
        let mapping = parties
            .iter()
            .cloned()
            .zip(generate_palette(parties.len()))
            .collect();
        PartyColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Colour of a party; unknown or missing parties are grey.
    pub fn color_for(&self, party: Option<&str>) -> Color32 {
        party
            .and_then(|p| self.mapping.get(p))
            .copied()
            .unwrap_or(self.default_color)
    }
}

impl Default for PartyColors {
    fn default() -> Self {
        Self::new(&BTreeSet::new())
    }
}
