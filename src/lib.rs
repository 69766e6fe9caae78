//! Featherline: Feature Engineering Library
//!
//! Fills missing values, derives ticket, title, cabin and family features,
//! and bins numeric columns for passenger-survival tables.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
