use crate::config::RenderOptions;
use crate::geometry::PageMetrics;
use crate::layout::layout_week;
use crate::types::{Rgb, Schedule};
use anyhow::Result;
use tracing::debug;

/// Drawing capability the renderer needs from a backend. Coordinates are
/// pixels, y increasing downward; text is anchored at its center point.
pub trait Canvas {
    fn fill_background(&mut self, color: Rgb) -> Result<()>;
    /// Filled axis-aligned rectangle from its top-left corner.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) -> Result<()>;
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width_px: u32, color: Rgb)
        -> Result<()>;
    /// Text centered horizontally and vertically on `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, size_px: u32, color: Rgb) -> Result<()>;
}

/// Draws the whole page: event boxes with their labels in file order, then
/// the column separators, then the header band. Grid lines therefore
/// overprint box edges, and later occurrences overpaint earlier ones at
/// identical coordinates.
pub fn render(schedule: &Schedule, options: &RenderOptions, canvas: &mut dyn Canvas) -> Result<()> {
    let metrics = PageMetrics::new(options);
    let font_px = options.font_size_px();
    let line_px = options.line_width_px();
    let num_days = options.num_days();

    canvas.fill_background(schedule.background_color)?;

    let boxes = layout_week(schedule, options);
    debug!("Rendering {} box(es) across {} day(s)", boxes.len(), num_days);
    for placed in &boxes {
        let w = metrics.w_px(placed.width);
        let h = metrics.h_px(placed.height);
        let x = metrics.x_px(placed.x_mid) - w / 2.0;
        let y = metrics.y_px(placed.y_mid + placed.height / 2.0);
        canvas.fill_rect(x, y, w, h, placed.colors.bg)?;

        let x_mid = metrics.x_px(placed.x_mid);
        let half_font = options.font_fraction / 2.0;
        canvas.draw_text(
            &placed.name,
            x_mid,
            metrics.y_px(placed.y_mid + half_font),
            font_px,
            placed.colors.fg,
        )?;
        canvas.draw_text(
            &placed.time_label,
            x_mid,
            metrics.y_px(placed.y_mid - half_font),
            font_px,
            placed.colors.fg,
        )?;
    }

    draw_columns(options, &metrics, schedule.header_color, line_px, canvas)?;
    draw_header(schedule, options, &metrics, font_px, line_px, canvas)
}

/// One separator at every day's left border plus the right page edge.
fn draw_columns(
    options: &RenderOptions,
    metrics: &PageMetrics,
    color: Rgb,
    line_px: u32,
    canvas: &mut dyn Canvas,
) -> Result<()> {
    let num_days = options.num_days();
    for day in 0..=num_days {
        let x = metrics.x_px(day as f64 / num_days as f64);
        canvas.draw_line(x, metrics.y_px(0.0), x, metrics.y_px(1.0), line_px, color)?;
    }
    Ok(())
}

/// Day labels centered in their columns, above a full-width divider.
fn draw_header(
    schedule: &Schedule,
    options: &RenderOptions,
    metrics: &PageMetrics,
    font_px: u32,
    line_px: u32,
    canvas: &mut dyn Canvas,
) -> Result<()> {
    let header = options.header_fraction();
    let num_days = options.num_days();
    for (day, label) in options.days.iter().enumerate() {
        canvas.draw_text(
            label,
            metrics.x_px(crate::geometry::column_x_fraction(day, num_days)),
            metrics.y_px(1.0 - header / 2.0),
            font_px,
            schedule.header_color,
        )?;
    }
    let y = metrics.y_px(1.0 - header);
    canvas.draw_line(
        metrics.x_px(0.0),
        y,
        metrics.x_px(1.0),
        y,
        line_px,
        schedule.header_color,
    )
}

/// Test double that records draw calls instead of producing pixels.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background(Rgb),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        width_px: u32,
        color: Rgb,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size_px: u32,
        color: Rgb,
    },
}

impl Canvas for RecordingCanvas {
    fn fill_background(&mut self, color: Rgb) -> Result<()> {
        self.calls.push(DrawCall::Background(color));
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) -> Result<()> {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn draw_line(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        width_px: u32,
        color: Rgb,
    ) -> Result<()> {
        self.calls.push(DrawCall::Line {
            x0,
            y0,
            x1,
            y1,
            width_px,
            color,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, size_px: u32, color: Rgb) -> Result<()> {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            size_px,
            color,
        });
        Ok(())
    }
}
