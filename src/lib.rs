#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod datamodel;
pub mod error;
pub mod http;
pub mod importers;
pub mod infer;

pub use analysis::{AnalysisOptions, AnalysisResult, analyze, analyze_bytes};
pub use error::AnalysisError;
