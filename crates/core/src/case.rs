use crate::document::HtmlDocument;
use crate::error::IngestError;
use crate::models::{Card, SegmentOptions};
use crate::segment::segment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// The cards extracted from one document, as saved to a case file.
///
/// The source HTML travels with the cards so a loaded case can be segmented
/// again under different options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub name: String,
    pub source_path: Option<String>,
    pub checksum: String,
    pub ingested_at: DateTime<Utc>,
    pub document: String,
    pub cards: Vec<Card>,
}

impl Case {
    pub fn from_html(name: &str, html: &str, options: SegmentOptions) -> Self {
        Self {
            name: name.to_string(),
            source_path: None,
            checksum: digest_text(html),
            ingested_at: Utc::now(),
            document: html.to_string(),
            cards: segment_html(html, options),
        }
    }

    /// Rebuilds `cards` from the stored document.
    pub fn resegment(&mut self, options: SegmentOptions) {
        self.cards = segment_html(&self.document, options);
    }

    pub fn from_html_file(path: &Path, options: SegmentOptions) -> Result<Self, IngestError> {
        let html = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                IngestError::MissingFileName(format!("path missing filename: {}", path.display()))
            })?;

        let mut case = Self::from_html(name, &html, options);
        case.source_path = Some(path.to_string_lossy().to_string());
        Ok(case)
    }

    pub fn save(&self, path: &Path) -> Result<(), IngestError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, IngestError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn segment_html(html: &str, options: SegmentOptions) -> Vec<Card> {
    let document = HtmlDocument::parse_with(html, options.normalize_styles);
    segment(&document, options)
}

pub fn digest_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HTML: &str = "<h4>Warming</h4><p>Smith, 2019. Seas rise.</p><h4>Trade</h4><p>Lee 2020 tariffs</p>";

    #[test]
    fn case_holds_segmented_cards() {
        let case = Case::from_html("aff", HTML, SegmentOptions::default());
        assert_eq!(case.name, "aff");
        assert_eq!(case.cards.len(), 2);
        assert_eq!(case.checksum, digest_text(HTML));
        assert!(case.source_path.is_none());
    }

    #[test]
    fn case_file_survives_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let source = dir.path().join("neg.html");
        fs::write(&source, HTML)?;

        let case = Case::from_html_file(&source, SegmentOptions::default())?;
        assert_eq!(case.name, "neg");

        let saved = dir.path().join("neg.json");
        case.save(&saved)?;
        assert_eq!(Case::load(&saved)?, case);
        Ok(())
    }

    #[test]
    fn loaded_case_resegments_under_new_options() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let html = format!("{HTML}<h4>Uncited</h4><p>no citation here</p>");
        let case = Case::from_html("aff", &html, SegmentOptions::default());
        assert_eq!(case.cards.len(), 2);

        let saved = dir.path().join("aff.json");
        case.save(&saved)?;

        let mut loaded = Case::load(&saved)?;
        assert_eq!(loaded.document, html);
        loaded.resegment(SegmentOptions {
            strict: false,
            normalize_styles: true,
        });
        assert_eq!(loaded.cards.len(), 3);
        assert_eq!(loaded.cards[2].title, "Uncited");
        assert_eq!(loaded.cards[2].author, "");
        Ok(())
    }

    #[test]
    fn loading_garbage_is_a_case_file_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json")?;
        assert!(matches!(Case::load(&path), Err(IngestError::Serialization(_))));
        Ok(())
    }
}
