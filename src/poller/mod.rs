pub mod cursor;
pub mod cycle;
pub mod runner;

pub use cursor::Cursor;
pub use cycle::{CycleSummary, Poller};
pub use runner::Runner;
