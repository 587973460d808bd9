use std::thread;
use std::time::{Duration, Instant};

use crate::client::FeedClient;
use crate::poller::{Cursor, Poller};
use crate::storage::traits::{FeedRepository, PostRepository};

/// Drives cycles on a fixed wall-clock interval. Cycles never overlap: if one
/// runs long, the next starts as soon as it finishes.
pub struct Runner<F, P, C>
where
    F: FeedRepository,
    P: PostRepository,
    C: FeedClient + 'static,
{
    poller: Poller<F, P, C>,
    interval: Duration,
}

impl<F, P, C> Runner<F, P, C>
where
    F: FeedRepository,
    P: PostRepository,
    C: FeedClient + 'static,
{
    pub fn new(poller: Poller<F, P, C>, interval: Duration) -> Self {
        Self { poller, interval }
    }

    /// Poll until `max_cycles` cycles have run, or forever when `None`.
    pub fn run(&self, cursor: &mut Cursor, max_cycles: Option<u64>) {
        let mut completed: u64 = 0;

        loop {
            let started = Instant::now();
            let summary = self.poller.run_cycle(cursor);
            completed += 1;

            log::info!(
                "cycle {} finished: {} attempted, {} ingested, {} failed",
                completed,
                summary.attempted,
                summary.ingested,
                summary.failed
            );

            if let Some(max) = max_cycles {
                if completed >= max {
                    break;
                }
            }

            if let Some(remaining) = self.interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
}
