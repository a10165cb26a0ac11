pub mod config;
pub mod meta;
pub mod track_record;
