//! Carbon footprint of Dutch companies: emissions per category and scope, a benchmark
//! against the company's industry, recommendations to reduce emissions and a markdown report.
#![forbid(unsafe_code)]
mod activity;
mod benchmark;
mod calculator;
pub mod csv;
mod emission_factors;
mod emissions;
pub mod fs;
mod industry;
mod insights;
mod model;
mod recommendations;
pub mod report;
pub mod serde;

pub use activity::*;
pub use benchmark::*;
pub use calculator::*;
pub use emission_factors::*;
pub use emissions::*;
pub use fs::{BlobStorageProvider, LocalDisk};
pub use industry::*;
pub use insights::*;
pub use model::*;
pub use recommendations::*;
