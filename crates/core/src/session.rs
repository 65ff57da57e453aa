use crate::models::{Card, SelectionPolicy};
use crate::search::rank;
use crate::traits::CardView;
use crate::FilterError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyStatus {
    /// The view now shows these positions, in order.
    Applied(Vec<usize>),
    /// Empty query; the view was restored to document order.
    Reset,
    /// A newer query was submitted before this one finished.
    Stale,
}

/// Runs queries against one card collection and pushes results to a view.
///
/// Scoring runs concurrently; only the latest submitted query may update the
/// view, and updates are serialized.
pub struct FilterSession<V>
where
    V: CardView,
{
    cards: Arc<[Card]>,
    policy: SelectionPolicy,
    view: V,
    latest: AtomicU64,
    apply_lock: Mutex<()>,
}

impl<V> FilterSession<V>
where
    V: CardView + Send + Sync,
{
    pub fn new(cards: Vec<Card>, policy: SelectionPolicy, view: V) -> Self {
        Self {
            cards: cards.into(),
            policy,
            view,
            latest: AtomicU64::new(0),
            apply_lock: Mutex::new(()),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub async fn submit(&self, query: &str) -> Result<ApplyStatus, FilterError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let visible = if query.trim().is_empty() {
            None
        } else {
            let cards = Arc::clone(&self.cards);
            let policy = self.policy;
            let query = query.to_string();
            let positions = tokio::task::spawn_blocking(move || {
                rank(&cards, &query, policy)
                    .into_iter()
                    .map(|entry| entry.position)
                    .collect::<Vec<_>>()
            })
            .await?;
            Some(positions)
        };

        let _guard = self.apply_lock.lock().await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "dropping stale filter result");
            return Ok(ApplyStatus::Stale);
        }

        match visible {
            Some(positions) => {
                self.view.apply(&positions).await?;
                Ok(ApplyStatus::Applied(positions))
            }
            None => {
                self.view.reset().await?;
                Ok(ApplyStatus::Reset)
            }
        }
    }
}
