use rss::Channel;

/// In-memory decode of one feed document. Built from a fetched channel,
/// consumed by the aggregator, then discarded.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<DocumentItem>,
}

/// One `<item>` of the channel. `pub_date` stays the raw publisher string;
/// parsing happens at post construction so a bad date cannot fail the decode.
#[derive(Debug, Clone, Default)]
pub struct DocumentItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub guid: Option<String>,
    pub description: Option<String>,
}

impl From<Channel> for ParsedDocument {
    fn from(channel: Channel) -> Self {
        let items = channel
            .items()
            .iter()
            .map(|item| DocumentItem {
                title: item.title().map(|s| s.to_string()),
                link: item.link().map(|s| s.to_string()),
                pub_date: item.pub_date().map(|s| s.to_string()),
                guid: item.guid().map(|g| g.value().to_string()),
                description: item.description().map(|s| s.to_string()),
            })
            .collect();

        ParsedDocument {
            title: channel.title().to_string(),
            link: channel.link().to_string(),
            description: channel.description().to_string(),
            items,
        }
    }
}
