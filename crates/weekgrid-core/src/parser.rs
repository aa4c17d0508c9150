use crate::error::ScheduleError;
use crate::geometry::military_to_minutes;
use crate::types::{ColorCombo, Event, Occurrence, Rgb, Schedule, TimeWindow};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Reads and parses a schedule file. `days` is the configured, ordered list
/// of day labels; an occurrence's day name must match one of them exactly.
pub fn load_schedule<P: AsRef<Path>>(path: P, days: &[String]) -> Result<Schedule> {
    let path = path.as_ref();
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode_schedule_bytes(&raw);
    let schedule = parse_schedule_content(text.as_ref(), days)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(schedule)
}

fn decode_schedule_bytes(raw: &[u8]) -> std::borrow::Cow<'_, str> {
    if let Some((enc, bom_len)) = encoding_rs::Encoding::for_bom(raw) {
        debug!("Decoded using BOM: {}", enc.name());
        let (cow, _, had_errors) = enc.decode(&raw[bom_len..]);
        if had_errors {
            warn!("Decode had errors (replacement characters used)");
        }
        return cow;
    }

    match std::str::from_utf8(raw) {
        Ok(s) => std::borrow::Cow::Borrowed(s),
        Err(_) => {
            warn!("Input is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(raw)
        }
    }
}

/// Line cursor keeping a 1-based position for diagnostics.
struct Lines<'a> {
    iter: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            iter: content.lines().enumerate(),
        }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        self.iter.next().map(|(idx, line)| (idx + 1, line))
    }

    fn expect(&mut self, expected: &'static str) -> Result<(usize, &'a str), ScheduleError> {
        self.next().ok_or(ScheduleError::UnexpectedEof { expected })
    }

    /// Skips blank lines; returns the next non-blank line, if any.
    fn next_non_blank(&mut self) -> Option<(usize, &'a str)> {
        loop {
            let (num, line) = self.next()?;
            if !line.trim().is_empty() {
                return Some((num, line));
            }
        }
    }
}

/// Parses the full schedule grammar:
/// a page-color header line, a category block terminated by a blank line,
/// then event blocks until end of input. Fails on the first malformed line
/// with its position; nothing is drawn from a schedule that did not parse.
pub fn parse_schedule_content(content: &str, days: &[String]) -> Result<Schedule, ScheduleError> {
    let mut lines = Lines::new(content);

    let (header_color, background_color) = parse_page_colors(&mut lines)?;
    let categories = parse_category_block(&mut lines)?;

    let mut events = Vec::new();
    let mut window = TimeWindow::empty();
    while let Some(event) = parse_event_block(&mut lines, &categories, days, &mut window)? {
        debug!(
            "Parsed event {:?} with {} occurrence(s)",
            event.name,
            event.occurrences.len()
        );
        events.push(event);
    }

    if events.is_empty() {
        warn!("Schedule contains no events; the full-day window will be used");
    }

    Ok(Schedule {
        header_color,
        background_color,
        categories,
        events,
        window,
    })
}

/// Line 1: `"<label># <fg> # <bg>"`. The first segment is a free-form label,
/// the second the header/grid color, the third the page background.
fn parse_page_colors(lines: &mut Lines) -> Result<(Rgb, Rgb), ScheduleError> {
    let (num, line) = lines.expect("the page color header line")?;
    let segments: Vec<&str> = line.split('#').collect();
    let malformed = || ScheduleError::PageColors {
        line: num,
        text: line.trim().to_string(),
    };
    if segments.len() < 3 {
        return Err(malformed());
    }
    let fg = Rgb::decode(segments[1].trim()).ok_or_else(malformed)?;
    let bg = Rgb::decode(segments[2].trim()).ok_or_else(malformed)?;
    Ok((fg, bg))
}

/// Category lines `"<name> #<fg> #<bg>"` up to the first blank line (or end
/// of input). Duplicate names keep the last definition.
fn parse_category_block(
    lines: &mut Lines,
) -> Result<HashMap<String, ColorCombo>, ScheduleError> {
    let mut categories = HashMap::new();
    while let Some((num, line)) = lines.next() {
        if line.trim().is_empty() {
            break;
        }
        let category = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        let segments: Vec<&str> = line.split('#').collect();
        if segments.len() < 3 {
            return Err(ScheduleError::CategoryLine {
                line: num,
                text: line.trim().to_string(),
            });
        }
        let color_error = || ScheduleError::CategoryColor {
            line: num,
            category: category.clone(),
        };
        let fg = Rgb::decode(segments[1].trim()).ok_or_else(color_error)?;
        let bg = Rgb::decode(segments[2].trim()).ok_or_else(color_error)?;
        if categories.insert(category.clone(), ColorCombo::new(fg, bg)).is_some() {
            warn!("Category {:?} defined more than once; keeping the later colors", category);
        }
    }
    Ok(categories)
}

/// One event block: name line (blank lines before it are skipped), category
/// line, occurrence count, then that many `"<Day> <start> <end>"` lines.
/// Returns `Ok(None)` once the input is exhausted.
fn parse_event_block(
    lines: &mut Lines,
    categories: &HashMap<String, ColorCombo>,
    days: &[String],
    window: &mut TimeWindow,
) -> Result<Option<Event>, ScheduleError> {
    let Some((_, name_line)) = lines.next_non_blank() else {
        return Ok(None);
    };
    let name = name_line.trim().to_string();

    let (cat_num, category_line) = lines.expect("an event's category line")?;
    let category = category_line.trim();
    let colors = *categories
        .get(category)
        .ok_or_else(|| ScheduleError::UnknownCategory {
            line: cat_num,
            event: name.clone(),
            category: category.to_string(),
        })?;

    let (count_num, count_line) = lines.expect("an event's occurrence count")?;
    let count: usize =
        count_line
            .trim()
            .parse()
            .map_err(|_| ScheduleError::OccurrenceCount {
                line: count_num,
                text: count_line.trim().to_string(),
            })?;

    let mut occurrences = Vec::with_capacity(count);
    for _ in 0..count {
        let (num, line) = lines.expect("an occurrence line")?;
        occurrences.push(parse_occurrence(num, line, days, window)?);
    }

    Ok(Some(Event {
        name,
        colors,
        occurrences,
    }))
}

fn parse_occurrence(
    num: usize,
    line: &str,
    days: &[String],
    window: &mut TimeWindow,
) -> Result<Occurrence, ScheduleError> {
    let malformed = || ScheduleError::OccurrenceLine {
        line: num,
        text: line.trim().to_string(),
    };
    let mut fields = line.split_whitespace();
    let day_name = fields.next().ok_or_else(malformed)?;
    let start: u16 = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(malformed)?;
    let end: u16 = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(malformed)?;

    let day = days
        .iter()
        .position(|d| d == day_name)
        .ok_or_else(|| ScheduleError::UnknownDay {
            line: num,
            day: day_name.to_string(),
        })?;

    window.observe(military_to_minutes(start), military_to_minutes(end));
    Ok(Occurrence::new(day, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_days() -> Vec<String> {
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    const BASIC: &str = "\
My Week# 0x333333 # 0xFFFFFF
Work #0x000000 #0x87CEEB
Gym #0xFFFFFF #0x228B22

Standup
Work
2
Monday 900 1000
Wednesday 1400 1530

Lifting
Gym
1
Friday 800 830
";

    #[test]
    fn parses_header_categories_and_events() {
        let schedule = parse_schedule_content(BASIC, &week_days()).unwrap();
        assert_eq!(schedule.header_color, Rgb::new(0x33, 0x33, 0x33));
        assert_eq!(schedule.background_color, Rgb::new(0xFF, 0xFF, 0xFF));
        assert_eq!(schedule.categories.len(), 2);
        assert_eq!(schedule.events.len(), 2);

        let standup = &schedule.events[0];
        assert_eq!(standup.name, "Standup");
        assert_eq!(standup.colors.bg, Rgb::new(0x87, 0xCE, 0xEB));
        assert_eq!(
            standup.occurrences,
            vec![Occurrence::new(0, 900, 1000), Occurrence::new(2, 1400, 1530)]
        );
    }

    #[test]
    fn window_tightens_across_all_occurrences() {
        let two_events = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

A
Work
2
Monday 900 1000
Wednesday 1400 1530
";
        let schedule = parse_schedule_content(two_events, &week_days()).unwrap();
        assert_eq!(schedule.window.earliest, 540);
        assert_eq!(schedule.window.latest, 930);

        let schedule = parse_schedule_content(BASIC, &week_days()).unwrap();
        assert_eq!(schedule.window.earliest, 480);
        assert_eq!(schedule.window.latest, 930);
    }

    #[test]
    fn category_color_failure_is_distinguished() {
        let bad = "\
W# 0x000000 # 0xFFFFFF
Work #notacolor #FFFFFF
";
        let err = parse_schedule_content(bad, &week_days()).unwrap_err();
        assert!(err.is_category_color());
        assert_eq!(
            err,
            ScheduleError::CategoryColor {
                line: 2,
                category: "Work".to_string()
            }
        );
    }

    #[test]
    fn malformed_page_header_is_fatal() {
        let err = parse_schedule_content("no separators here\n", &week_days()).unwrap_err();
        assert!(matches!(err, ScheduleError::PageColors { line: 1, .. }));

        let err = parse_schedule_content("", &week_days()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnexpectedEof {
                expected: "the page color header line"
            }
        );
    }

    #[test]
    fn unknown_day_and_category_are_reported() {
        let bad_day = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

A
Work
1
Funday 900 1000
";
        let err = parse_schedule_content(bad_day, &week_days()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnknownDay {
                line: 7,
                day: "Funday".to_string()
            }
        );

        let bad_category = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

A
Play
1
Monday 900 1000
";
        let err = parse_schedule_content(bad_category, &week_days()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnknownCategory {
                line: 5,
                event: "A".to_string(),
                category: "Play".to_string()
            }
        );
    }

    #[test]
    fn day_name_match_is_exact() {
        let lowercase = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

A
Work
1
monday 900 1000
";
        let err = parse_schedule_content(lowercase, &week_days()).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownDay { .. }));
    }

    #[test]
    fn truncated_event_block_is_an_error() {
        let truncated = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

A
Work
2
Monday 900 1000
";
        let err = parse_schedule_content(truncated, &week_days()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnexpectedEof {
                expected: "an occurrence line"
            }
        );

        let name_only = "\
W# 0x000000 # 0xFFFFFF

Orphan
";
        let err = parse_schedule_content(name_only, &week_days()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnexpectedEof {
                expected: "an event's category line"
            }
        );
    }

    #[test]
    fn bad_occurrence_count_and_line() {
        let bad_count = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

A
Work
two
Monday 900 1000
";
        let err = parse_schedule_content(bad_count, &week_days()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::OccurrenceCount {
                line: 6,
                text: "two".to_string()
            }
        );

        let bad_line = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

A
Work
1
Monday nine ten
";
        let err = parse_schedule_content(bad_line, &week_days()).unwrap_err();
        assert!(matches!(err, ScheduleError::OccurrenceLine { line: 7, .. }));
    }

    #[test]
    fn zero_events_is_a_valid_schedule() {
        let empty = "W# 0x000000 # 0xFFFFFF\n";
        let schedule = parse_schedule_content(empty, &week_days()).unwrap();
        assert!(schedule.events.is_empty());
        assert_eq!(schedule.window.span_minutes(), 1440);

        // Categories but no events is also fine.
        let cats_only = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0xFFFFFF

";
        let schedule = parse_schedule_content(cats_only, &week_days()).unwrap();
        assert!(schedule.events.is_empty());
    }

    #[test]
    fn duplicate_category_keeps_last_definition() {
        let dup = "\
W# 0x000000 # 0xFFFFFF
Work #0x000000 #0x111111
Work #0x000000 #0x222222
";
        let schedule = parse_schedule_content(dup, &week_days()).unwrap();
        assert_eq!(
            schedule.categories["Work"].bg,
            Rgb::new(0x22, 0x22, 0x22)
        );
    }

    #[test]
    fn decode_utf8_and_bom() {
        let utf8 = "My Week".as_bytes();
        assert_eq!(decode_schedule_bytes(utf8), "My Week");

        let mut bom = vec![0xEF, 0xBB, 0xBF];
        bom.extend_from_slice("My Week".as_bytes());
        assert_eq!(decode_schedule_bytes(&bom), "My Week");
    }
}
