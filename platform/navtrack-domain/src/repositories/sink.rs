use crate::entities::track_record::TrackRecordView;

pub trait PerformanceSink {
    fn render(&self, view: &TrackRecordView) -> Result<(), String>;
}
