use crate::citation::author_and_year;
use crate::document::DocumentNode;
use crate::models::{Card, HeadingLevel, SegmentOptions};
use crate::traits::DocumentTree;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"^[hH]([1-6])$").unwrap();
}

/// A heading node followed by every node up to the next heading of its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: DocumentNode,
    pub content: Vec<DocumentNode>,
}

pub fn heading_level_of(tag: &str) -> Option<HeadingLevel> {
    HEADING_RE
        .captures(tag)
        .and_then(|capture| capture.get(1))
        .and_then(|digit| digit.as_str().parse().ok())
        .map(HeadingLevel)
}

/// Most frequent heading level in `nodes`, or `None` without headings.
///
/// Ties go to the lowest level (the most prominent heading).
pub fn dominant_heading_level(nodes: &[DocumentNode]) -> Option<HeadingLevel> {
    let mut counts = BTreeMap::<HeadingLevel, usize>::new();
    for level in nodes.iter().filter_map(|node| heading_level_of(&node.tag)) {
        *counts.entry(level).or_default() += 1;
    }

    let mut best: Option<(HeadingLevel, usize)> = None;
    for (level, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((level, count));
        }
    }
    best.map(|(level, _)| level)
}

/// Splits `nodes` at every heading of `level`. Nodes before the first such
/// heading belong to no section.
pub fn split_sections(nodes: Vec<DocumentNode>, level: HeadingLevel) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for node in nodes {
        if heading_level_of(&node.tag) == Some(level) {
            sections.push(Section {
                heading: node,
                content: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.content.push(node);
        }
    }

    debug!(sections = sections.len(), level = %level, "found sections");
    sections
}

impl Section {
    pub fn into_card(self) -> Card {
        let (author, year) = self
            .content
            .first()
            .map(|first| author_and_year(&first.text))
            .unwrap_or_default();

        let contents = self
            .content
            .iter()
            .map(|node| node.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Card {
            title: self.heading.text,
            author,
            year,
            contents,
            url: None,
        }
    }
}

/// Extracts the cards of a document.
///
/// Only `options.strict` applies here. `normalize_styles` is read when the
/// document is parsed (see `HtmlDocument::parse_with`); nodes handed in are
/// taken as already normalized.
pub fn segment<D>(document: &D, options: SegmentOptions) -> Vec<Card>
where
    D: DocumentTree + ?Sized,
{
    let nodes = document.nodes();
    let Some(level) = dominant_heading_level(&nodes) else {
        debug!("document has no headings");
        return Vec::new();
    };
    debug!(level = %level, "most frequent heading level");

    let mut cards = Vec::new();
    for card in split_sections(nodes, level).into_iter().map(Section::into_card) {
        if options.strict && card.is_incomplete() {
            debug!(title = %card.title, "card blocked by strict setting");
            continue;
        }
        cards.push(card);
    }

    debug!(cards = cards.len(), "found cards");
    cards
}
