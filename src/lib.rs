pub mod config;
pub mod docker;
pub mod helm;
pub mod manifest;
pub mod report;
pub mod runner;
pub mod types;
pub mod version;
