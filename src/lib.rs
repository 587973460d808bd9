pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod poller;
pub mod storage;
