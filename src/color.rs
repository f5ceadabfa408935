use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed attrition colours
// ---------------------------------------------------------------------------

/// Employees who stayed.
pub const STAYED: Color32 = Color32::from_rgb(70, 130, 180);
/// Employees who left (coral, matching the attrition-rate bars).
pub const LEFT: Color32 = Color32::from_rgb(255, 127, 80);

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Category colours: department → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour map from the sorted set of category values.
    pub fn new(values: &BTreeSet<String>) -> Self {
        let palette = generate_palette(values.len());
        let mapping: BTreeMap<String, Color32> = values
            .iter()
            .zip(palette.into_iter())
            .map(|(v, c)| (v.clone(), c))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category value.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging colormap for the correlation heatmap
// ---------------------------------------------------------------------------

/// Map a correlation coefficient in [-1, 1] to a blue–white–red colour.
/// NaN (undefined correlation) renders gray.
pub fn diverging(r: f64) -> Color32 {
    if !r.is_finite() {
        return Color32::from_gray(90);
    }
    let t = (r.clamp(-1.0, 1.0)) as f32;

    let white = LinSrgb::new(1.0_f32, 1.0, 1.0);
    let cold = LinSrgb::new(0.05_f32, 0.18, 0.66);
    let warm = LinSrgb::new(0.70_f32, 0.02, 0.15);

    let mixed = if t < 0.0 {
        white.mix(cold, -t)
    } else {
        white.mix(warm, t)
    };
    let srgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (srgb.red * 255.0) as u8,
        (srgb.green * 255.0) as u8,
        (srgb.blue * 255.0) as u8,
    )
}

/// Readable annotation colour on top of [`diverging`] cells.
pub fn annotation_color(r: f64) -> Color32 {
    if r.is_finite() && r.abs() > 0.55 {
        Color32::WHITE
    } else {
        Color32::from_gray(25)
    }
}
