pub mod case;
pub mod citation;
pub mod document;
pub mod error;
pub mod ingest;
pub mod models;
pub mod search;
pub mod segment;
pub mod session;
pub mod styles;
pub mod traits;

pub use case::{digest_text, Case};
pub use citation::{author_and_year, parse_citation, year_from_date, Citation};
pub use document::{DocumentNode, HtmlDocument};
pub use error::{FilterError, IngestError};
pub use ingest::{
    case_name, discover_html_files, ingest_folder, ingest_folder_best_effort, IngestionReport,
    SkippedDocument,
};
pub use models::{Card, HeadingLevel, ScoredCard, SegmentOptions, SelectionPolicy, DISPLAY_LIMIT};
pub use search::{filter, rank, score, select, shared_word_count};
pub use segment::{dominant_heading_level, segment, split_sections, Section};
pub use session::{ApplyStatus, FilterSession};
pub use traits::{CardView, DocumentTree};
