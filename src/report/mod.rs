//! Report module - summarizing transformation results

pub mod summary;

pub use summary::*;
