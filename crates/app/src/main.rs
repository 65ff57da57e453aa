use cardsift_core::{
    ingest_folder_best_effort, rank, Card, Case, FilterSession, SegmentOptions, SelectionPolicy,
};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use view::TerminalView;

mod interactive;
mod view;

#[derive(Parser)]
#[command(name = "cardsift", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Drop cards missing a title, author, year or body.
    #[arg(long, env = "CARDSIFT_STRICT", default_value_t = true, action = ArgAction::Set)]
    strict: bool,

    /// Re-tag paragraphs by inline font size before segmenting.
    #[arg(long, env = "CARDSIFT_NORMALIZE_STYLES", default_value_t = true, action = ArgAction::Set)]
    normalize_styles: bool,

    /// Score at which a card is always shown.
    #[arg(long, env = "CARDSIFT_SHOW_THRESHOLD", default_value = "30")]
    show_threshold: i64,

    /// Minimum number of cards shown for any query.
    #[arg(long, env = "CARDSIFT_MIN_CARDS", default_value = "4")]
    min_cards: usize,
}

#[derive(Subcommand)]
enum Command {
    /// List the cards of an HTML document or saved case file.
    Cards {
        /// HTML document, or a case file ending in .json
        #[arg(long)]
        input: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Rank the cards of a document against a query.
    Search {
        #[arg(long)]
        input: String,
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Segment every HTML file under a folder into case files.
    Ingest {
        #[arg(long)]
        folder: String,
        /// Directory that receives one case file per document.
        #[arg(long)]
        out: String,
    },
    /// Read queries from stdin and refilter the card list after each line.
    Interactive {
        #[arg(long)]
        input: String,
    },
}

impl Cli {
    fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            strict: self.strict,
            normalize_styles: self.normalize_styles,
        }
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            show_threshold: self.show_threshold,
            min_cards: self.min_cards,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = cli.segment_options();
    let policy = cli.selection_policy();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        strict = options.strict,
        "cardsift boot"
    );

    match cli.command {
        Command::Cards { input, json } => {
            let case = load_case(&input, options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&case.cards)?);
            } else {
                println!("{} cards in {}", case.cards.len(), case.name);
                for (position, card) in case.cards.iter().enumerate() {
                    print_card(position, card);
                }
            }
        }
        Command::Search { input, query, json } => {
            let case = load_case(&input, options)?;
            let ranked = rank(&case.cards, &query, policy);

            if json {
                let hits = ranked
                    .iter()
                    .map(|entry| {
                        serde_json::json!({
                            "position": entry.position,
                            "score": entry.score,
                            "card": entry.card,
                        })
                    })
                    .collect::<Vec<_>>();
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                println!("query: {query}");
                for entry in ranked {
                    println!("score={}", entry.score);
                    print_card(entry.position, entry.card);
                }
            }
        }
        Command::Ingest { folder, out } => {
            let report = ingest_folder_best_effort(Path::new(&folder), options)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            if !report.skipped_files.is_empty() {
                warn!(
                    "skipped_files={} for folder={}",
                    report.skipped_files.len(),
                    folder
                );
            }

            let out_dir = Path::new(&out);
            tokio::fs::create_dir_all(out_dir).await?;
            for case in &report.cases {
                let target = out_dir.join(format!("{}.json", case.name));
                case.save(&target)
                    .map_err(|error| anyhow::anyhow!(error.to_string()))?;
            }

            println!(
                "{} cards from {} documents saved at {}",
                report.card_count(),
                report.cases.len(),
                Utc::now().to_rfc3339()
            );
        }
        Command::Interactive { input } => {
            let case = load_case(&input, options)?;
            let view = TerminalView::new(case.cards.clone());
            let session = Arc::new(FilterSession::new(case.cards, policy, view));
            info!(cards = session.cards().len(), "waiting for queries on stdin");

            let tally = interactive::run_queries(session, BufReader::new(tokio::io::stdin())).await?;
            info!(
                applied = tally.applied,
                reset = tally.reset,
                stale = tally.stale,
                failed = tally.failed,
                "input closed"
            );
        }
    }

    Ok(())
}

fn load_case(input: &str, options: SegmentOptions) -> anyhow::Result<Case> {
    let path = Path::new(input);
    let is_case_file = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let case = if is_case_file {
        Case::load(path).map(|mut case| {
            case.resegment(options);
            case
        })
    } else {
        Case::from_html_file(path, options)
    }
    .map_err(|error| anyhow::anyhow!("{}: {error}", path.display()))?;

    Ok(case)
}

fn print_card(position: usize, card: &Card) {
    println!("[{position}] {}", card.label());
    println!("    {}", card.byline());
}
