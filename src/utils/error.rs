use crate::domain::model::CourseSection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid section {crn}: {reason}")]
    InvalidSection { crn: String, reason: String },

    #[error("Section {} conflicts with scheduled section {}", .incoming.crn, .existing.crn)]
    Conflict {
        existing: Box<CourseSection>,
        incoming: Box<CourseSection>,
    },

    #[error("Invalid time '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("Invalid day '{value}'")]
    InvalidDay { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid config value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Conflict,
    Config,
    System,
}

impl ScheduleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSection { .. } | Self::InvalidTime { .. } | Self::InvalidDay { .. } => {
                ErrorCategory::Input
            }
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Conflict { existing, incoming } => format!(
                "{} {} ({}) overlaps {} {} ({})",
                incoming.subject,
                incoming.number,
                incoming.crn,
                existing.subject,
                existing.number,
                existing.crn
            ),
            Self::IoError(e) => format!("Could not read the schedule file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the section's days and start/end times",
            ErrorCategory::Conflict => "Drop one of the two sections or pick another section time",
            ErrorCategory::Config => "Fix the schedule file and try again",
            ErrorCategory::System => "Make sure the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
