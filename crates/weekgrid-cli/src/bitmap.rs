use anyhow::{anyhow, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use weekgrid_core::{Canvas, Rgb};

/// [`Canvas`] backed by a plotters bitmap. Nothing touches the filesystem
/// until [`BitmapCanvas::save`] flushes the PNG, so a failed run leaves no
/// partial output behind.
pub struct BitmapCanvas<'a> {
    backend: BitMapBackend<'a>,
    width: u32,
    height: u32,
}

impl<'a> BitmapCanvas<'a> {
    pub fn new<P: AsRef<Path> + ?Sized>(path: &'a P, width: u32, height: u32) -> Self {
        Self {
            backend: BitMapBackend::new(path, (width, height)),
            width,
            height,
        }
    }

    pub fn save(mut self) -> Result<()> {
        self.backend
            .present()
            .map_err(|e| anyhow!("writing output image: {e}"))
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.r, rgb.g, rgb.b)
}

impl Canvas for BitmapCanvas<'_> {
    fn fill_background(&mut self, rgb: Rgb) -> Result<()> {
        self.backend
            .draw_rect(
                (0, 0),
                (self.width as i32, self.height as i32),
                &color(rgb),
                true,
            )
            .map_err(|e| anyhow!("filling background: {e}"))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rgb: Rgb) -> Result<()> {
        let upper_left = (x.round() as i32, y.round() as i32);
        let bottom_right = ((x + width).round() as i32, (y + height).round() as i32);
        self.backend
            .draw_rect(upper_left, bottom_right, &color(rgb), true)
            .map_err(|e| anyhow!("drawing box: {e}"))
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width_px: u32, rgb: Rgb)
        -> Result<()> {
        let style = ShapeStyle::from(&color(rgb)).stroke_width(width_px);
        self.backend
            .draw_line(
                (x0.round() as i32, y0.round() as i32),
                (x1.round() as i32, y1.round() as i32),
                &style,
            )
            .map_err(|e| anyhow!("drawing line: {e}"))
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, size_px: u32, rgb: Rgb) -> Result<()> {
        let fg = color(rgb);
        let style = TextStyle::from(("sans-serif", f64::from(size_px)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center))
            .color(&fg);
        self.backend
            .draw_text(text, &style, (x.round() as i32, y.round() as i32))
            .map_err(|e| anyhow!("drawing text {text:?}: {e}"))
    }
}
