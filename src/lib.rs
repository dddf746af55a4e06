pub mod cli;
pub mod comment;
pub mod config;
pub mod error;
pub mod formatter;
pub mod locator;
pub mod orchestrator;
pub mod parser;
pub mod sanitizer;
pub mod sources;
pub mod structured;
pub mod test_helpers;
