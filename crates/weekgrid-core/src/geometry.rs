//! Pure time and page-fraction math.
//!
//! Page fractions live in a `[0, 1] x [0, 1]` system covering the printable
//! area, y increasing upward. [`PageMetrics`] converts fractions to pixel
//! coordinates, extending the scale past the printable area so the
//! configured margins stay blank.

use crate::config::RenderOptions;
use crate::types::TimeWindow;

/// Converts a military HHMM integer to minutes since midnight.
///
/// The minute component is not validated; `1075` yields `635` rather than
/// an error, matching the input format's tolerance for such values.
pub fn military_to_minutes(hhmm: u16) -> u32 {
    u32::from(hhmm / 100) * 60 + u32::from(hhmm % 100)
}

/// Horizontal midpoint of a day's column. Columns split the printable width
/// evenly, so for five days the midpoints sit at 0.1, 0.3, 0.5, 0.7, 0.9.
pub fn column_x_fraction(day: usize, num_days: usize) -> f64 {
    let width = 1.0 / num_days as f64;
    day as f64 * width + width / 2.0
}

/// Vertical midpoint of `[start_min, end_min]` mapped onto the band below
/// the header, earliest window minute at the top, later times lower down.
pub fn row_y_fraction(
    start_min: u32,
    end_min: u32,
    window: &TimeWindow,
    header_fraction: f64,
) -> f64 {
    let span = f64::from(window.span_minutes());
    let mid = (f64::from(start_min) + f64::from(end_min)) / 2.0;
    let along = (mid - f64::from(window.earliest)) / span;
    (1.0 - along) * (1.0 - header_fraction)
}

/// Box height as a fraction of page height, proportional to event duration
/// relative to the visible window.
pub fn box_height_fraction(
    start_min: u32,
    end_min: u32,
    window: &TimeWindow,
    header_fraction: f64,
) -> f64 {
    let span = f64::from(window.span_minutes());
    f64::from(end_min.saturating_sub(start_min)) / span * (1.0 - header_fraction)
}

/// Fraction-to-pixel mapping for a configured page.
///
/// The printable area maps to `[0, 1]`; the margins become overrun beyond
/// each end of the scale, exactly `margin / page` on each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    width_px: f64,
    height_px: f64,
    x_overrun: f64,
    y_overrun: f64,
}

impl PageMetrics {
    pub fn new(options: &RenderOptions) -> Self {
        let width_px = f64::from(options.width_px());
        let height_px = f64::from(options.height_px());
        let dpi = f64::from(options.dpi);
        Self {
            width_px,
            height_px,
            x_overrun: options.margin_x_in * dpi / width_px,
            y_overrun: options.margin_y_in * dpi / height_px,
        }
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    /// Maps an x page fraction to a pixel column.
    pub fn x_px(&self, x: f64) -> f64 {
        (x + self.x_overrun) / (1.0 + 2.0 * self.x_overrun) * self.width_px
    }

    /// Maps a y page fraction (y up) to a pixel row (y down).
    pub fn y_px(&self, y: f64) -> f64 {
        (1.0 + self.y_overrun - y) / (1.0 + 2.0 * self.y_overrun) * self.height_px
    }

    /// Converts a width fraction to pixels.
    pub fn w_px(&self, w: f64) -> f64 {
        w / (1.0 + 2.0 * self.x_overrun) * self.width_px
    }

    /// Converts a height fraction to pixels.
    pub fn h_px(&self, h: f64) -> f64 {
        h / (1.0 + 2.0 * self.y_overrun) * self.height_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(earliest: u32, latest: u32) -> TimeWindow {
        let mut w = TimeWindow::empty();
        w.observe(earliest, latest);
        w
    }

    #[test]
    fn military_conversion() {
        assert_eq!(military_to_minutes(930), 570);
        assert_eq!(military_to_minutes(1245), 765);
        assert_eq!(military_to_minutes(0), 0);
        // Minute overflow passes through unvalidated.
        assert_eq!(military_to_minutes(1075), 675);
    }

    #[test]
    fn column_midpoints_evenly_spaced() {
        let mids: Vec<f64> = (0..5).map(|d| column_x_fraction(d, 5)).collect();
        let expected = [0.1, 0.3, 0.5, 0.7, 0.9];
        for (got, want) in mids.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
        assert!(mids.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn box_height_monotone_in_duration() {
        let w = window(480, 1080);
        let mut last = -1.0;
        for dur in [0u32, 30, 60, 120, 240] {
            let h = box_height_fraction(600, 600 + dur, &w, 0.04);
            assert!(h >= 0.0);
            assert!(h >= last);
            last = h;
        }
    }

    #[test]
    fn earliest_event_sits_at_top_of_band() {
        let w = window(480, 1080);
        let header = 0.04;
        // Instantaneous event at the window start maps to the band top.
        let y = row_y_fraction(480, 480, &w, header);
        assert!((y - (1.0 - header)).abs() < 1e-12);
        // Window end maps to the page bottom.
        let y = row_y_fraction(1080, 1080, &w, header);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn page_metrics_maps_printable_corners() {
        let opts = RenderOptions::default();
        let m = PageMetrics::new(&opts);
        let margin_px = opts.margin_x_in * f64::from(opts.dpi);
        // Fraction 0 lands one margin in from the left edge; fraction 1 one
        // margin in from the right.
        assert!((m.x_px(0.0) - margin_px * (2200.0 / 2240.0)).abs() < 1e-9);
        assert!(m.x_px(1.0) < 2200.0);
        assert!(m.x_px(1.0) > 2200.0 - 2.0 * margin_px);
        // y is flipped: fraction 1 is near the top of the image.
        assert!(m.y_px(1.0) < m.y_px(0.0));
    }
}
