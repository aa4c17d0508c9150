use serde::{Deserialize, Serialize};

fn default_days() -> Vec<String> {
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_dpi() -> u32 {
    200
}

fn default_paper_width() -> f64 {
    11.0
}

fn default_paper_height() -> f64 {
    8.5
}

fn default_margin() -> f64 {
    0.1
}

fn default_font_fraction() -> f64 {
    0.02
}

/// Page and week-shape configuration. The day list defines both the column
/// count and the labels an occurrence's day name must match exactly.
/// Defaults give a landscape US-letter page at 200 dpi with a Monday–Friday
/// week; 0.02 font fraction is roughly 12 pt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub days: Vec<String>,
    pub dpi: u32,
    pub paper_width_in: f64,
    pub paper_height_in: f64,
    pub margin_x_in: f64,
    pub margin_y_in: f64,
    /// Font size as a fraction of page height.
    pub font_fraction: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            days: default_days(),
            dpi: default_dpi(),
            paper_width_in: default_paper_width(),
            paper_height_in: default_paper_height(),
            margin_x_in: default_margin(),
            margin_y_in: default_margin(),
            font_fraction: default_font_fraction(),
        }
    }
}

impl RenderOptions {
    pub fn num_days(&self) -> usize {
        self.days.len()
    }

    /// Fraction of the page height reserved for the day-label band.
    pub fn header_fraction(&self) -> f64 {
        2.0 * self.font_fraction
    }

    pub fn width_px(&self) -> u32 {
        (self.paper_width_in * f64::from(self.dpi)) as u32
    }

    pub fn height_px(&self) -> u32 {
        (self.paper_height_in * f64::from(self.dpi)) as u32
    }

    pub fn font_size_px(&self) -> u32 {
        (self.font_fraction * f64::from(self.height_px())) as u32
    }

    /// Grid line width in pixels, scaled with resolution so printed line
    /// weight stays constant across dpi settings.
    pub fn line_width_px(&self) -> u32 {
        (self.dpi / 48).max(1)
    }
}
