use courseware_core::duplication::TimeShift;
use courseware_core::types::DbId;
use courseware_db::models::course::Course;

/// Source and target of a duplication run.
#[derive(Debug, Clone)]
pub struct DuplicationContext {
    pub source_course: Course,
    pub target_course: Course,
    /// Offset added to every timestamp of a copied object.
    pub time_shift: TimeShift,
}

impl DuplicationContext {
    /// Context whose time shift moves dates by the difference between the
    /// two courses' start times.
    pub fn new(source_course: Course, target_course: Course) -> Self {
        let time_shift = TimeShift::between(source_course.start_at, target_course.start_at);
        Self {
            source_course,
            target_course,
            time_shift,
        }
    }

    pub fn with_time_shift(mut self, time_shift: TimeShift) -> Self {
        self.time_shift = time_shift;
        self
    }

    pub fn source_course_id(&self) -> DbId {
        self.source_course.id
    }

    pub fn target_course_id(&self) -> DbId {
        self.target_course.id
    }
}
