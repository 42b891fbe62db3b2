pub mod answers;
pub mod catalog;
pub mod config;
pub mod report;
