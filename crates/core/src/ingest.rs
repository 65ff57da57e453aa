use crate::{Case, IngestError, SegmentOptions};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub fn discover_html_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_html = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

        if is_html {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

/// Name for the case built from `path`: its location under `folder` with the
/// extension dropped and directories joined by `_`, so `aff/round1.html`
/// becomes `aff_round1`.
pub fn case_name(folder: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(folder).unwrap_or(path).with_extension("");
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("_")
}

pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

pub struct IngestionReport {
    pub cases: Vec<Case>,
    pub skipped_files: Vec<SkippedDocument>,
}

impl IngestionReport {
    pub fn card_count(&self) -> usize {
        self.cases.iter().map(|case| case.cards.len()).sum()
    }
}

pub fn ingest_folder(folder: &Path, options: SegmentOptions) -> Result<Vec<Case>, IngestError> {
    let report = ingest_folder_best_effort(folder, options)?;
    Ok(report.cases)
}

pub fn ingest_folder_best_effort(
    folder: &Path,
    options: SegmentOptions,
) -> Result<IngestionReport, IngestError> {
    let files = discover_html_files(folder);

    if files.is_empty() {
        return Err(IngestError::InvalidArgument(format!(
            "no html files found in {}",
            folder.display()
        )));
    }

    let mut cases = Vec::new();
    let mut skipped_files = Vec::new();

    for path in files {
        match Case::from_html_file(&path, options) {
            Ok(mut case) => {
                case.name = case_name(folder, &path);
                debug!(path = %path.display(), cards = case.cards.len(), "segmented document");
                cases.push(case);
            }
            Err(error) => {
                warn!(path = %path.display(), reason = %error, "skipped document");
                skipped_files.push(SkippedDocument {
                    path,
                    reason: error.to_string(),
                });
            }
        }
    }

    Ok(IngestionReport {
        cases,
        skipped_files,
    })
}

#[cfg(test)]
mod tests {
    use super::{case_name, discover_html_files, ingest_folder, ingest_folder_best_effort};
    use crate::SegmentOptions;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn discover_html_files_is_recursive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = dir.path();
        let nested = base.join("nested");
        fs::create_dir(&nested)?;

        fs::write(base.join("a.html"), "<h4>A</h4>")?;
        fs::write(nested.join("b.HTM"), "<h4>B</h4>")?;
        fs::write(base.join("notes.txt"), "ignored")?;

        let files = discover_html_files(base);
        assert_eq!(files.len(), 2);
        Ok(())
    }

    #[test]
    fn ingestion_fails_without_html() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let result = ingest_folder_best_effort(dir.path(), SegmentOptions::default());
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn best_effort_skips_unreadable_documents() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("good.html"),
            "<h4>Card</h4><p>Smith, 2019. Evidence.</p>",
        )?;
        fs::write(dir.path().join("binary.html"), [0xff, 0xfe, 0x00, 0xc3])?;

        let report = ingest_folder_best_effort(dir.path(), SegmentOptions::default())?;

        assert_eq!(report.cases.len(), 1);
        assert_eq!(report.card_count(), 1);
        assert_eq!(report.skipped_files.len(), 1);
        assert_eq!(
            report.skipped_files[0]
                .path
                .file_name()
                .and_then(|name| name.to_str()),
            Some("binary.html")
        );
        Ok(())
    }

    #[test]
    fn ingest_folder_returns_cases_in_path_order() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.html"), "<h4>B</h4><p>Lee 2020 text</p>")?;
        fs::write(dir.path().join("a.html"), "<h4>A</h4><p>Kim 2018 text</p>")?;

        let cases = ingest_folder(dir.path(), SegmentOptions::default())?;
        let names = cases.iter().map(|case| case.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn same_file_name_in_different_folders_gets_distinct_cases(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for side in ["aff", "neg"] {
            let folder = dir.path().join(side);
            fs::create_dir(&folder)?;
            fs::write(
                folder.join("round1.html"),
                format!("<h4>{side}</h4><p>Smith, 2019. Evidence.</p>"),
            )?;
        }

        let report = ingest_folder_best_effort(dir.path(), SegmentOptions::default())?;
        let names = report
            .cases
            .iter()
            .map(|case| case.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["aff_round1", "neg_round1"]);
        Ok(())
    }

    #[test]
    fn case_name_drops_extension_and_joins_folders() {
        let folder = Path::new("/cases");
        assert_eq!(case_name(folder, Path::new("/cases/top.html")), "top");
        assert_eq!(case_name(folder, Path::new("/cases/2024/aff/r1.htm")), "2024_aff_r1");
    }
}
