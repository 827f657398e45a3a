pub mod columns;
pub mod datetime;
pub mod normalize;
pub mod parsing;
