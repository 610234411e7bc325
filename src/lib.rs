pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod stats;
pub mod storage;
pub mod summary;
pub mod types;
