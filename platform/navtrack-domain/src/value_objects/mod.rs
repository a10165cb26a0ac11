pub mod daily_record;
pub mod series_point;
