pub mod cache;
pub mod records;
pub mod reporting;
