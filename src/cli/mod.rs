use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "harvester")]
#[command(about = "Periodic RSS poller that ingests posts from registered feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new feed URL
    Add {
        /// Feed URL to register
        url: String,
    },

    /// Remove a feed by id
    Remove {
        /// Feed id (see `list`)
        id: i64,
    },

    /// List registered feeds
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recently ingested posts
    Posts {
        /// Maximum number of posts to show
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a single fetch-and-ingest cycle
    Run,

    /// Poll feeds on a fixed interval
    Watch {
        /// Stop after this many cycles (runs until interrupted if not set)
        #[arg(long)]
        cycles: Option<u64>,
    },
}
