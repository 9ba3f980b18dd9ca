pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod fetch;
pub mod model;
pub mod output;
pub mod parser;
pub mod report;
pub mod session;
