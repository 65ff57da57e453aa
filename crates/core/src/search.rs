//! Relevance scoring and thresholded selection of cards.
//!
//! Token overlap counts every matching (card token, query token) pair, so a
//! word repeated on either side is counted once per repetition. Rankings
//! depend on this; it is not a set intersection.

use crate::models::{Card, ScoredCard, SelectionPolicy};
use std::collections::HashMap;
use tracing::debug;

const AUTHOR_POINTS: i64 = 15;
const YEAR_POINTS: i64 = 4;
const TITLE_POINTS: i64 = 3;
const CONTENTS_POINTS: i64 = 1;

/// Matching token pairs between two strings split on single spaces,
/// compared case-insensitively.
pub fn shared_word_count(one: &str, two: &str) -> usize {
    let one = one.to_lowercase();
    let two = two.to_lowercase();
    let right = two.split(' ').collect::<Vec<_>>();
    one.split(' ')
        .map(|left| right.iter().filter(|word| **word == left).count())
        .sum()
}

pub fn has_shared_word(one: &str, two: &str) -> bool {
    shared_word_count(one, two) >= 1
}

pub fn score(card: &Card, query: &str) -> i64 {
    let mut points = 0;
    if has_shared_word(&card.author, query) {
        points += AUTHOR_POINTS;
    }
    if has_shared_word(&card.year.to_string(), query) {
        points += YEAR_POINTS;
    }
    points += shared_word_count(&card.title, query) as i64 * TITLE_POINTS;
    points += shared_word_count(&card.contents, query) as i64 * CONTENTS_POINTS;
    points
}

pub fn score_all<'a>(cards: &'a [Card], query: &str) -> Vec<ScoredCard<'a>> {
    cards
        .iter()
        .enumerate()
        .map(|(position, card)| ScoredCard {
            position,
            score: score(card, query),
            card,
        })
        .collect()
}

/// Walks score buckets from highest to lowest. A card is kept while fewer than
/// `min_cards` are selected, or when its bucket meets the show threshold.
/// Cards sharing a score keep their collection order.
pub fn select<'a>(scored: Vec<ScoredCard<'a>>, policy: SelectionPolicy) -> Vec<ScoredCard<'a>> {
    let mut levels = Vec::new();
    let mut buckets = HashMap::<i64, Vec<ScoredCard<'a>>>::new();
    for entry in scored {
        let bucket = buckets.entry(entry.score).or_insert_with(|| {
            levels.push(entry.score);
            Vec::new()
        });
        bucket.push(entry);
    }
    levels.sort_unstable_by(|left, right| right.cmp(left));

    let mut selected = Vec::new();
    for level in levels {
        for entry in buckets.remove(&level).unwrap_or_default() {
            if selected.len() < policy.min_cards || level >= policy.show_threshold {
                selected.push(entry);
            }
        }
    }
    selected
}

pub fn rank<'a>(cards: &'a [Card], query: &str, policy: SelectionPolicy) -> Vec<ScoredCard<'a>> {
    debug!(query = %query, cards = cards.len(), "searching cards");
    select(score_all(cards, query), policy)
}

/// The ordered subset of `cards` to show for `query`.
///
/// An empty query is not special-cased here.
pub fn filter<'a>(cards: &'a [Card], query: &str, policy: SelectionPolicy) -> Vec<&'a Card> {
    rank(cards, query, policy)
        .into_iter()
        .map(|entry| entry.card)
        .collect()
}
