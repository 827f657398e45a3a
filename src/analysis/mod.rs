pub mod aggregate;
pub mod chart;
pub mod engine;
pub mod format;
pub mod insight;
pub mod options;
pub mod planner;
pub mod selection;
pub mod strategies;
pub mod summary;

pub use engine::{AnalysisResult, analyze, analyze_bytes};
pub use options::{AnalysisOptions, SelectionPolicy};
