//! Pipeline module - loading, the three transformation stages and the driver

pub mod binner;
pub mod config;
pub mod error;
pub mod filler;
pub mod loader;
pub mod processor;
pub mod transform;

pub use binner::*;
pub use config::*;
pub use error::*;
pub use filler::*;
pub use loader::*;
pub use processor::{RecordProcessor, SENTINEL};
pub use transform::*;
