pub mod record_source;
pub mod sink;
