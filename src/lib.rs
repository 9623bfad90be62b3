// Library for tests to access modules

pub mod cli;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod labels;
pub mod models;
pub mod output;
pub mod prometheus_repo;
pub mod version;
