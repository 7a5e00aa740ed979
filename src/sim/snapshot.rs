use crate::sim::catalog::Size;
use crate::sim::competitors::CompetitorResult;

pub const MESSAGE_WRAP_COLUMN: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub message_lines: Vec<String>,
    pub prompt: String,
    pub input: String,
    /// Visible page of the genre picker, empty unless a genre is being chosen.
    pub genre_options: Vec<GenreOption>,
    pub development: Option<DevelopmentView>,
    pub sales: Option<SalesGraph>,
    pub competitors: Vec<CompetitorResult>,
    pub stats: StudioStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreOption {
    pub number: usize,
    pub genre: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevelopmentView {
    pub name: String,
    pub genre: &'static str,
    pub size: Size,
    pub seconds_left: u64,
}

impl DevelopmentView {
    pub fn summary(&self) -> String {
        format!(
            "Developing '{}' ({}, {}): {} seconds left",
            self.name, self.genre, self.size, self.seconds_left
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesGraph {
    pub name: String,
    pub genre: &'static str,
    pub price: i64,
    pub history: Vec<i64>,
    pub min: i64,
    pub max: i64,
    pub peak: i64,
    pub time_left_secs: u64,
    pub event: Option<&'static str>,
}

impl SalesGraph {
    pub fn title(&self) -> String {
        format!("Sales for '{}' @ ${} [{}]", self.name, self.price, self.genre)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioStats {
    pub money: i64,
    pub days: u64,
    pub fans: u64,
    pub hot_genre: &'static str,
}

/// Splits `message` into lines of at most `width` characters, breaking on the
/// last space inside each window or hard at `width` when there is none.
pub fn wrap_message(message: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = message.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;
    while width > 0 && chars.len() - start > width {
        let window = &chars[start..start + width];
        match window.iter().rposition(|c| *c == ' ') {
            Some(space) => {
                lines.push(window[..space].iter().collect());
                start += space + 1;
            }
            None => {
                lines.push(window.iter().collect());
                start += width;
            }
        }
    }
    lines.push(chars[start..].iter().collect());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_messages_stay_on_one_line() {
        assert_eq!(wrap_message("hello", 60), vec!["hello".to_string()]);
        assert_eq!(wrap_message("", 60), vec![String::new()]);
    }

    #[test]
    fn long_words_break_hard_at_the_column() {
        let message = "x".repeat(130);
        let lines = wrap_message(&message, MESSAGE_WRAP_COLUMN);
        let lengths: Vec<usize> = lines.iter().map(String::len).collect();
        assert_eq!(lengths, vec![60, 60, 10]);
    }

    #[test]
    fn breaks_on_the_last_space_before_the_column() {
        let message = format!("{} {}", "a".repeat(55), "b".repeat(20));
        let lines = wrap_message(&message, MESSAGE_WRAP_COLUMN);
        assert_eq!(lines, vec!["a".repeat(55), "b".repeat(20)]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let message = "é".repeat(61);
        let lines = wrap_message(&message, MESSAGE_WRAP_COLUMN);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 60);
    }

    proptest! {
        #[test]
        fn wrapped_lines_fit_the_column(message in "[a-z ]{0,300}") {
            for line in wrap_message(&message, MESSAGE_WRAP_COLUMN) {
                prop_assert!(line.chars().count() <= MESSAGE_WRAP_COLUMN);
            }
        }
    }
}
