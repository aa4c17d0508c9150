use thiserror::Error;

/// Typed parse failures. Every variant carries the 1-based input line it
/// was detected on, so a diagnostic can point at the offending text before
/// any drawing happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("line {line}: malformed page color header {text:?} (expected \"label# <fg> # <bg>\")")]
    PageColors { line: usize, text: String },

    #[error("line {line}: failed to read color of category {category:?}")]
    CategoryColor { line: usize, category: String },

    #[error("line {line}: malformed category line {text:?} (expected \"<name> #<fg> #<bg>\")")]
    CategoryLine { line: usize, text: String },

    #[error("line {line}: event {event:?} references unknown category {category:?}")]
    UnknownCategory {
        line: usize,
        event: String,
        category: String,
    },

    #[error("line {line}: invalid occurrence count {text:?}")]
    OccurrenceCount { line: usize, text: String },

    #[error("line {line}: malformed occurrence {text:?} (expected \"<Day> <start> <end>\")")]
    OccurrenceLine { line: usize, text: String },

    #[error("line {line}: {day:?} is not a configured day label")]
    UnknownDay { line: usize, day: String },

    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },
}

impl ScheduleError {
    /// The category-color abort is the one failure the original tool
    /// reported deliberately; the CLI maps it to a distinguished exit code.
    pub fn is_category_color(&self) -> bool {
        matches!(self, Self::CategoryColor { .. })
    }
}
