use crate::domain::ParsedDocument;
use crate::errors::HarvestError;

/// Result of one dispatched fetch. Carries the originating feed's id so the
/// aggregator can attribute it regardless of arrival order; completion order
/// is not dispatch order under concurrency.
#[derive(Debug)]
pub enum FetchOutcome {
    Success {
        feed_id: i64,
        document: ParsedDocument,
    },
    Failure {
        feed_id: i64,
        error: HarvestError,
    },
}

impl FetchOutcome {
    pub fn feed_id(&self) -> i64 {
        match self {
            FetchOutcome::Success { feed_id, .. } => *feed_id,
            FetchOutcome::Failure { feed_id, .. } => *feed_id,
        }
    }
}
