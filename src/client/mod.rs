use std::time::Duration;

use reqwest::blocking::Client;
use rss::Channel;

use crate::domain::ParsedDocument;
use crate::errors::{HarvestError, HarvestResult};

/// One network retrieval of a feed document. No retry; the request timeout is
/// the only bound, so a hung peer surfaces as a transport error instead of
/// stalling the cycle.
#[cfg_attr(test, mockall::automock)]
pub trait FeedClient: Send + Sync {
    fn fetch(&self, url: &str) -> HarvestResult<ParsedDocument>;
}

pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn parse_bytes(bytes: &[u8]) -> HarvestResult<ParsedDocument> {
        let channel =
            Channel::read_from(bytes).map_err(|e| HarvestError::FeedParse(e.to_string()))?;
        Ok(ParsedDocument::from(channel))
    }
}

impl FeedClient for HttpFeedClient {
    fn fetch(&self, url: &str) -> HarvestResult<ParsedDocument> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status(status.as_u16()));
        }

        let bytes = response.bytes()?;
        Self::parse_bytes(&bytes)
    }
}
