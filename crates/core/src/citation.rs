//! Author and year extraction from the first line of a card.
//!
//! Recognized citations start with a capitalized surname (alone, `et al`, or
//! paired with `&`/`and`), an optional comma, then a date: a delimited date
//! like `5/12/19`, a four digit year, or a one or two digit year.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CITATION_RE: Regex = Regex::new(
        r"([A-Z]+\w+|[A-Z]+\w+\s*&\s*[A-Z]+\w+|[A-Z]+\w+\s+et\s+al|[A-Z]+\w+\s+and\s+[A-Z]+\w+),?\s+[‘']?([0-9]{1,2}[-,/][0-9]{1,2}[-,/][0-9]{1,4}|[0-9]{4}|[0-9]{1,2})[\s,]*"
    )
    .unwrap();
    static ref YEAR_RE: Regex =
        Regex::new(r"(?:[0-9]{1,2}[/,-][0-9]{1,2}[/,-])?[0-9]*?([0-9]{1,2})$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub author: String,
    /// Trailing digits of the date; `0` when they could not be read.
    pub year: u8,
}

pub fn parse_citation(line: &str) -> Option<Citation> {
    let capture = CITATION_RE.captures(line)?;
    let author = capture.get(1)?.as_str().to_string();
    let year = capture
        .get(2)
        .and_then(|date| year_from_date(date.as_str()))
        .unwrap_or(0);
    Some(Citation { author, year })
}

/// Author and year of `line`, or `("", 0)` when it carries no citation.
pub fn author_and_year(line: &str) -> (String, u8) {
    parse_citation(line)
        .map(|citation| (citation.author, citation.year))
        .unwrap_or_default()
}

/// Last one or two digits of a date token, after any `D/M/` prefix.
pub fn year_from_date(date: &str) -> Option<u8> {
    YEAR_RE
        .captures(date.trim())
        .and_then(|capture| capture.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}
