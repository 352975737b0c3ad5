pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use self::config::CliConfig;

pub use self::config::ScheduleFile;
pub use self::core::{ConflictPredicate, CourseSection, Day, MeetingOverlap, ScheduleSet};
pub use utils::error::{Result, ScheduleError};
