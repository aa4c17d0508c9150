use serde::{Deserialize, Serialize};

/// 8-bit RGB color, decoded from `#RRGGBB` or `0xRRGGBB` literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decodes a hex color literal. Accepts `#RRGGBB` and `0xRRGGBB`.
    pub fn decode(raw: &str) -> Option<Self> {
        let hex = raw
            .strip_prefix('#')
            .or_else(|| raw.strip_prefix("0x"))
            .or_else(|| raw.strip_prefix("0X"))?;
        if hex.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }
}

/// Foreground/background color pair shared by all events of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCombo {
    pub fg: Rgb,
    pub bg: Rgb,
}

impl ColorCombo {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self { fg, bg }
    }
}

/// One concrete placement of an event: a day column plus a start/end time.
///
/// Times are raw military HHMM integers as read from the input; they are
/// only converted to minute-of-day by [`crate::geometry::military_to_minutes`].
/// No invariant enforces `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Index into the configured day labels.
    pub day: usize,
    pub start: u16,
    pub end: u16,
}

impl Occurrence {
    pub const fn new(day: usize, start: u16, end: u16) -> Self {
        Self { day, start, end }
    }

    /// Formats the time range as `"HH:MM - HH:MM"`.
    pub fn time_range_string(&self) -> String {
        format!(
            "{:02}:{:02} - {:02}:{:02}",
            self.start / 100,
            self.start % 100,
            self.end / 100,
            self.end % 100
        )
    }
}

/// A named event with its resolved colors and its occurrences in file order.
/// Rendering follows file order, so later boxes overpaint earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub colors: ColorCombo,
    pub occurrences: Vec<Occurrence>,
}

/// Minute-of-day range spanning every parsed occurrence, used to scale the
/// vertical axis. Starts at the empty sentinels and only ever widens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub earliest: u32,
    pub latest: u32,
}

pub const MINUTES_IN_A_DAY: u32 = 24 * 60;

impl TimeWindow {
    pub const fn empty() -> Self {
        Self {
            earliest: MINUTES_IN_A_DAY,
            latest: 0,
        }
    }

    /// Widens the window to cover `[start_min, end_min]`.
    pub fn observe(&mut self, start_min: u32, end_min: u32) {
        if start_min < self.earliest {
            self.earliest = start_min;
        }
        if end_min > self.latest {
            self.latest = end_min;
        }
    }

    /// Minutes represented on the vertical axis. Falls back to a full day
    /// when no occurrence was observed or the window is degenerate, so the
    /// axis never inverts and heights never divide by zero.
    pub fn span_minutes(&self) -> u32 {
        if self.latest <= self.earliest {
            MINUTES_IN_A_DAY
        } else {
            self.latest - self.earliest
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything the parser extracts from one input file.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Color of the header text, column separators and divider line.
    pub header_color: Rgb,
    /// Page background color.
    pub background_color: Rgb,
    /// Category name to color combo, from the header block. Last write wins
    /// on duplicate category names.
    pub categories: std::collections::HashMap<String, ColorCombo>,
    pub events: Vec<Event>,
    pub window: TimeWindow,
}
