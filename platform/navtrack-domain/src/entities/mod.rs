pub mod performance;
pub mod track_record;
