use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FONT_SIZE_RE: Regex = Regex::new(r"font-size:\s*([0-9]+)px").unwrap();
}

/// Converter font sizes (px) and the tag each one stands for.
const SIZE_TABLE: [(&str, u32); 6] = [
    ("h1", 42),
    ("h2", 32),
    ("h3", 24),
    ("h4", 20),
    ("h6", 14),
    ("p", 16),
];

pub fn font_size_from_style(style: &str) -> Option<u32> {
    FONT_SIZE_RE
        .captures(style)
        .and_then(|capture| capture.get(1))
        .and_then(|size| size.as_str().parse().ok())
}

/// Closest tag for a pixel size. Ties resolve to the earlier table entry.
pub fn tag_for_font_size(size: u32) -> &'static str {
    let mut best = SIZE_TABLE[0];
    for entry in SIZE_TABLE.iter().skip(1) {
        if entry.1.abs_diff(size) < best.1.abs_diff(size) {
            best = *entry;
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_read_from_inline_style() {
        assert_eq!(font_size_from_style("display: inline; font-size: 24px;"), Some(24));
        assert_eq!(font_size_from_style("font-size:18px"), Some(18));
        assert_eq!(font_size_from_style("color: red"), None);
    }

    #[test]
    fn sizes_map_to_nearest_tag() {
        assert_eq!(tag_for_font_size(48), "h1");
        assert_eq!(tag_for_font_size(30), "h2");
        assert_eq!(tag_for_font_size(21), "h4");
        assert_eq!(tag_for_font_size(16), "p");
        assert_eq!(tag_for_font_size(13), "h6");
        // 15 is equidistant from h6 and p
        assert_eq!(tag_for_font_size(15), "h6");
    }
}
