use cardsift_core::{ApplyStatus, CardView, FilterError, FilterSession};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueryTally {
    pub applied: usize,
    pub reset: usize,
    pub stale: usize,
    pub failed: usize,
}

impl QueryTally {
    pub fn total(&self) -> usize {
        self.applied + self.reset + self.stale + self.failed
    }

    fn record(&mut self, outcome: Result<Result<ApplyStatus, FilterError>, JoinError>) {
        match outcome {
            Ok(Ok(ApplyStatus::Applied(_))) => self.applied += 1,
            Ok(Ok(ApplyStatus::Reset)) => self.reset += 1,
            Ok(Ok(ApplyStatus::Stale)) => {
                debug!("superseded query skipped");
                self.stale += 1;
            }
            Ok(Err(error)) => {
                warn!(%error, "failed to refresh cards");
                self.failed += 1;
            }
            Err(error) => {
                warn!(%error, "query task aborted");
                self.failed += 1;
            }
        }
    }
}

/// Submits every line of `input` as a query. Finished submissions are reaped
/// while reading, so only queries still in flight are held.
pub async fn run_queries<V, R>(session: Arc<FilterSession<V>>, input: R) -> std::io::Result<QueryTally>
where
    V: CardView + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight = JoinSet::new();
    let mut tally = QueryTally::default();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    let session = Arc::clone(&session);
                    in_flight.spawn(async move { session.submit(&line).await });
                }
                None => break,
            },
            Some(outcome) = in_flight.join_next(), if !in_flight.is_empty() => tally.record(outcome),
        }
    }

    while let Some(outcome) = in_flight.join_next().await {
        tally.record(outcome);
    }
    Ok(tally)
}
