//! Pipeline module - loading, encoding and aggregating the dataset

pub mod columns;
pub mod distribution;
pub mod encode;
pub mod error;
pub mod grouping;
pub mod loader;

pub use distribution::*;
pub use encode::*;
pub use error::ReportError;
pub use grouping::*;
pub use loader::*;
