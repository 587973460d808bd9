use std::time::Duration;

use crate::errors::{HarvestError, HarvestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkPolicy {
    /// Mark the whole batch fetched before dispatching any fetch. A feed that
    /// fails this cycle waits for its next scheduled turn, but a stuck feed
    /// cannot monopolize future cycles.
    Before,
    /// Mark a feed fetched only after its post was stored. Transient failures
    /// retry sooner at the cost of a failing feed staying at the front of the
    /// sweep.
    AfterSuccess,
}

impl std::str::FromStr for MarkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(MarkPolicy::Before),
            "after-success" | "after_success" => Ok(MarkPolicy::AfterSuccess),
            _ => Err(format!("Unknown mark policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub poll_interval: Duration,
    pub batch_size: u32,
    pub fetch_timeout: Duration,
    pub mark_policy: MarkPolicy,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> HarvestResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        // Default db_path is relative to executable directory
        let db_path = std::env::var("HARVESTER_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("harvester.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./harvester.db".to_string())
        });

        let poll_interval = Duration::from_secs(Self::env_u64("POLL_INTERVAL_SECS", 10)?);
        let fetch_timeout = Duration::from_secs(Self::env_u64("FETCH_TIMEOUT_SECS", 30)?);
        let batch_size = Self::env_u64("BATCH_SIZE", 10)?.clamp(1, u32::MAX as u64) as u32;

        let mark_policy = match std::env::var("MARK_POLICY") {
            Ok(raw) => raw.parse().map_err(HarvestError::Config)?,
            Err(_) => MarkPolicy::Before,
        };

        Ok(Self {
            db_path,
            poll_interval,
            batch_size,
            fetch_timeout,
            mark_policy,
        })
    }

    fn env_u64(name: &str, default: u64) -> HarvestResult<u64> {
        match std::env::var(name) {
            Ok(raw) => raw
                .parse()
                .map_err(|_| HarvestError::Config(format!("{} must be a number: {}", name, raw))),
            Err(_) => Ok(default),
        }
    }
}
