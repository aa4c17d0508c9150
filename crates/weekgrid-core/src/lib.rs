pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod parser;
pub mod render;
pub mod types;

pub use config::RenderOptions;
pub use error::ScheduleError;
pub use layout::{layout_week, PlacedBox};
pub use render::{render, Canvas, DrawCall, RecordingCanvas};
pub use types::{ColorCombo, Event, Occurrence, Rgb, Schedule, TimeWindow};
