use serde::{Deserialize, Serialize};
use std::fmt;

/// Titles and bylines longer than this are cut when shown in a card listing.
pub const DISPLAY_LIMIT: usize = 80;

/// Heading rank (1 = `h1`) that delimits cards within one document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(pub u8);

impl HeadingLevel {
    pub fn tag(self) -> String {
        format!("h{}", self.0)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// A self-contained excerpt of evidence.
///
/// `year` holds the literal trailing one or two digits of the cited date, with
/// `0` meaning the citation could not be read. No century is resolved, so a
/// card dated `2000` or `'00` also carries `0` and counts as undated: strict
/// segmentation drops it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Card {
    pub title: String,
    pub author: String,
    pub year: u8,
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Card {
    pub fn has_year(&self) -> bool {
        self.year != 0
    }

    /// Missing any of title, author, year or contents.
    pub fn is_incomplete(&self) -> bool {
        self.title.is_empty() || self.author.is_empty() || !self.has_year() || self.contents.is_empty()
    }

    pub fn label(&self) -> String {
        truncate_for_display(&self.title)
    }

    pub fn byline(&self) -> String {
        truncate_for_display(&format!("{} {}", self.author, self.year))
    }
}

fn truncate_for_display(text: &str) -> String {
    if text.chars().count() > DISPLAY_LIMIT {
        let cut: String = text.chars().take(DISPLAY_LIMIT).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// A card paired with its relevance for one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCard<'a> {
    pub position: usize,
    pub score: i64,
    pub card: &'a Card,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Drop cards missing a title, author, year or contents.
    pub strict: bool,
    /// Re-tag converter paragraphs by their inline font size before segmenting.
    pub normalize_styles: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            strict: true,
            normalize_styles: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Cards scoring at least this much are always shown.
    pub show_threshold: i64,
    /// Lower-scoring cards are admitted until this many are shown.
    pub min_cards: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            show_threshold: 30,
            min_cards: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_truncates_long_titles_on_char_boundaries() {
        let card = Card {
            title: "é".repeat(100),
            ..Card::default()
        };
        let label = card.label();
        assert!(label.ends_with("..."));
        assert_eq!(label.chars().count(), DISPLAY_LIMIT + 3);
    }

    #[test]
    fn byline_joins_author_and_year() {
        let card = Card {
            author: "Smith".to_string(),
            year: 19,
            ..Card::default()
        };
        assert_eq!(card.byline(), "Smith 19");
    }

    #[test]
    fn incomplete_when_year_is_absent() {
        let card = Card {
            title: "Title".to_string(),
            author: "Smith".to_string(),
            year: 0,
            contents: "text".to_string(),
            url: None,
        };
        assert!(card.is_incomplete());
        assert!(!Card { year: 9, ..card }.is_incomplete());
    }

    #[test]
    fn heading_level_renders_as_tag() {
        assert_eq!(HeadingLevel(4).tag(), "h4");
        assert_eq!(HeadingLevel(2).to_string(), "h2");
    }
}
