use crate::styles::{font_size_from_style, tag_for_font_size};
use crate::traits::DocumentTree;
use scraper::{ElementRef, Html};
use std::collections::HashSet;

/// One element of a parsed document: its lower-cased tag and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    pub tag: String,
    pub text: String,
}

impl DocumentNode {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            text: text.into(),
        }
    }
}

/// HTML document flattened to every element in document order.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    nodes: Vec<DocumentNode>,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self::parse_with(html, false)
    }

    /// Parses `html`; with `normalize_styles`, converter output that encodes
    /// headings as sized spans is re-tagged first.
    pub fn parse_with(html: &str, normalize_styles: bool) -> Self {
        let document = Html::parse_document(html);
        let mut folded = HashSet::new();
        let mut nodes = Vec::new();

        for node in document.root_element().descendants() {
            let Some(element) = ElementRef::wrap(node) else {
                continue;
            };
            if node.ancestors().any(|ancestor| folded.contains(&ancestor.id())) {
                continue;
            }

            let mut tag = element.value().name().to_ascii_lowercase();
            if normalize_styles {
                if tag == "b" {
                    tag = "p".to_string();
                }
                if tag == "p" {
                    if let Some(size) = sized_span(element) {
                        tag = tag_for_font_size(size).to_string();
                        folded.insert(node.id());
                    }
                }
            }

            nodes.push(DocumentNode {
                tag,
                text: element.text().collect::<String>(),
            });
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl DocumentTree for HtmlDocument {
    fn nodes(&self) -> Vec<DocumentNode> {
        self.nodes.clone()
    }
}

fn sized_span(paragraph: ElementRef<'_>) -> Option<u32> {
    paragraph
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name().eq_ignore_ascii_case("span"))
        .find_map(|span| span.value().attr("style").and_then(font_size_from_style))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(document: &HtmlDocument) -> Vec<String> {
        document.nodes().into_iter().map(|node| node.tag).collect()
    }

    #[test]
    fn elements_are_listed_in_document_order() {
        let document = HtmlDocument::parse("<h1>One</h1><p>Body <em>x</em></p><h1>Two</h1>");
        let tags = tags(&document);
        let body = tags.iter().position(|tag| tag == "body").expect("body present");
        assert_eq!(&tags[body + 1..], ["h1", "p", "em", "h1"]);
    }

    #[test]
    fn text_includes_descendants() {
        let document = HtmlDocument::parse("<p>Body <em>x</em> end</p>");
        let paragraph = document
            .nodes()
            .into_iter()
            .find(|node| node.tag == "p")
            .expect("paragraph present");
        assert_eq!(paragraph.text, "Body x end");
    }

    #[test]
    fn sized_paragraphs_become_headings_when_normalizing() {
        let html = r#"<p><span style="font-size: 21px;">Big</span></p><b>Bold</b>"#;

        let normalized = tags(&HtmlDocument::parse_with(html, true));
        assert!(normalized.contains(&"h4".to_string()));
        assert!(!normalized.contains(&"span".to_string()));
        assert!(!normalized.contains(&"b".to_string()));

        let raw = tags(&HtmlDocument::parse(html));
        assert!(raw.contains(&"span".to_string()));
        assert!(raw.contains(&"b".to_string()));
    }

    #[test]
    fn span_without_size_leaves_paragraph_alone() {
        let html = r#"<p><span style="color: red">Plain</span></p>"#;
        let tags = tags(&HtmlDocument::parse_with(html, true));
        assert!(tags.contains(&"p".to_string()));
        assert!(tags.contains(&"span".to_string()));
    }
}
