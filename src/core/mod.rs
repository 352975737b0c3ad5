pub mod overlap;
pub mod schedule;

pub use crate::domain::model::{CourseSection, Day, DaySet, MeetingPattern, Minute, TimeInterval};
pub use crate::domain::ports::ConflictPredicate;
pub use crate::utils::error::Result;
pub use overlap::MeetingOverlap;
pub use schedule::{ScheduleSet, DEFAULT_GRANULARITY};
