use std::sync::{mpsc, Arc};
use std::thread;

use crate::client::FeedClient;
use crate::config::MarkPolicy;
use crate::domain::{Feed, FetchOutcome, Post};
use crate::poller::Cursor;
use crate::storage::traits::{FeedRepository, PostRepository};

/// What one fetch-and-ingest cycle did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub attempted: usize,
    pub ingested: usize,
    pub failed: usize,
}

/// Runs fetch-and-ingest cycles: takes a batch from the cursor, fans out one
/// fetch worker per feed, fans their outcomes back in, and persists one post
/// per successfully parsed feed.
pub struct Poller<F, P, C>
where
    F: FeedRepository,
    P: PostRepository,
    C: FeedClient + 'static,
{
    feeds: F,
    posts: P,
    client: Arc<C>,
    mark_policy: MarkPolicy,
}

impl<F, P, C> Poller<F, P, C>
where
    F: FeedRepository,
    P: PostRepository,
    C: FeedClient + 'static,
{
    pub fn new(feeds: F, posts: P, client: C, mark_policy: MarkPolicy) -> Self {
        Self {
            feeds,
            posts,
            client: Arc::new(client),
            mark_policy,
        }
    }

    /// One cycle: select batch, dispatch, aggregate.
    ///
    /// Every dispatched worker reports exactly one outcome, and the
    /// aggregation loop drains exactly that many, so a failing feed can
    /// neither abort the batch nor leave the cycle waiting. All workers are
    /// joined before returning.
    pub fn run_cycle(&self, cursor: &mut Cursor) -> CycleSummary {
        let batch = cursor.next_batch(&self.feeds);
        if batch.is_empty() {
            log::debug!("no feeds due for refresh");
            return CycleSummary::default();
        }

        if self.mark_policy == MarkPolicy::Before {
            self.mark_batch(&batch);
        }

        let (dispatched, workers, outcomes) = self.dispatch(&batch);
        let summary = self.aggregate(dispatched, outcomes);

        for worker in workers {
            // A worker that already sent its outcome has nothing left to do;
            // join only so no thread outlives the cycle.
            let _ = worker.join();
        }

        summary
    }

    /// Fan-out: one worker thread per feed, each sending exactly one tagged
    /// outcome. The feed id travels inside the outcome; arrival order carries
    /// no meaning.
    fn dispatch(
        &self,
        batch: &[Feed],
    ) -> (
        usize,
        Vec<thread::JoinHandle<()>>,
        mpsc::Receiver<FetchOutcome>,
    ) {
        let (tx, rx) = mpsc::channel();
        let mut workers = Vec::with_capacity(batch.len());
        let mut dispatched = 0;

        for feed in batch {
            let Some(feed_id) = feed.id else {
                log::warn!("skipping unsaved feed: {}", feed.url);
                continue;
            };

            let url = feed.url.clone();
            let client = Arc::clone(&self.client);
            let tx = tx.clone();
            dispatched += 1;

            workers.push(thread::spawn(move || {
                let outcome = match client.fetch(&url) {
                    Ok(document) => FetchOutcome::Success { feed_id, document },
                    Err(error) => FetchOutcome::Failure { feed_id, error },
                };
                // Send fails only if the cycle was abandoned
                let _ = tx.send(outcome);
            }));
        }

        (dispatched, workers, rx)
    }

    /// Fan-in: drain exactly `dispatched` outcomes in arrival order.
    fn aggregate(&self, dispatched: usize, outcomes: mpsc::Receiver<FetchOutcome>) -> CycleSummary {
        let mut summary = CycleSummary {
            attempted: dispatched,
            ..CycleSummary::default()
        };

        for outcome in outcomes.iter().take(dispatched) {
            match outcome {
                FetchOutcome::Success { feed_id, document } => {
                    let post = Post::from_document(feed_id, &document);
                    match self.posts.create(&post) {
                        Ok(()) => {
                            summary.ingested += 1;
                            log::info!("ingested post {} for feed {}", post.url, feed_id);
                            if self.mark_policy == MarkPolicy::AfterSuccess {
                                self.mark_one(feed_id);
                            }
                        }
                        Err(err) => {
                            summary.failed += 1;
                            log::error!("failed to store post for feed {}: {}", feed_id, err);
                        }
                    }
                }
                FetchOutcome::Failure { feed_id, error } => {
                    summary.failed += 1;
                    log::warn!("fetch failed for feed {}: {}", feed_id, error);
                }
            }
        }

        summary
    }

    fn mark_batch(&self, batch: &[Feed]) {
        for feed in batch {
            if let Some(feed_id) = feed.id {
                self.mark_one(feed_id);
            }
        }
    }

    fn mark_one(&self, feed_id: i64) {
        if let Err(err) = self.feeds.mark_fetched(feed_id) {
            log::error!("failed to mark feed {} as fetched: {}", feed_id, err);
        }
    }
}
