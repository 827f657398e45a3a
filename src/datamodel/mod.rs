pub mod cell;
pub mod dataset;
pub mod record;

pub use cell::CellValue;
pub use dataset::Dataset;
pub use record::Record;
