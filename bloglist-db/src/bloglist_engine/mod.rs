pub mod config;
pub mod stats;
pub mod storage_core;
pub mod types;
