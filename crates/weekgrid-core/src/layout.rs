use crate::config::RenderOptions;
use crate::geometry::{box_height_fraction, column_x_fraction, military_to_minutes, row_y_fraction};
use crate::types::{ColorCombo, Schedule};

/// Geometry and labels for one occurrence, in page fractions. Box width is
/// exactly one column, so adjacent days' boxes touch at the border.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBox {
    pub x_mid: f64,
    pub y_mid: f64,
    pub width: f64,
    pub height: f64,
    pub colors: ColorCombo,
    pub name: String,
    pub time_label: String,
}

/// Computes box geometry for every occurrence, in file order. The schedule's
/// final time window drives the vertical scale; an empty schedule yields an
/// empty list.
pub fn layout_week(schedule: &Schedule, options: &RenderOptions) -> Vec<PlacedBox> {
    let num_days = options.num_days();
    let header = options.header_fraction();
    let column_width = 1.0 / num_days as f64;

    let mut boxes = Vec::new();
    for event in &schedule.events {
        for occ in &event.occurrences {
            let start_min = military_to_minutes(occ.start);
            let end_min = military_to_minutes(occ.end);
            boxes.push(PlacedBox {
                x_mid: column_x_fraction(occ.day, num_days),
                y_mid: row_y_fraction(start_min, end_min, &schedule.window, header),
                width: column_width,
                height: box_height_fraction(start_min, end_min, &schedule.window, header),
                colors: event.colors,
                name: event.name.clone(),
                time_label: occ.time_range_string(),
            });
        }
    }
    boxes
}
