use crate::core::{
    CourseSection, DaySet, MeetingPattern, ScheduleSet, TimeInterval, DEFAULT_GRANULARITY,
};
use crate::utils::error::{Result, ScheduleError};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A student's sections as written in a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleFile {
    pub schedule: Option<ScheduleSettings>,
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub name: Option<String>,
    pub granularity_minutes: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub crn: String,
    pub subject: Option<String>,
    pub number: Option<String>,
    pub title: Option<String>,
    pub credits: i32,
    pub days: String,
    pub start: String,
    pub end: String,
    pub extra_days: Option<String>,
    pub extra_start: Option<String>,
    pub extra_end: Option<String>,
}

impl SectionEntry {
    pub fn to_section(&self) -> Result<CourseSection> {
        let primary = MeetingPattern::new(
            TimeInterval::parse(&self.start, &self.end)?,
            DaySet::parse(&self.days)?,
        );

        let mut section = CourseSection::new(self.crn.clone(), self.credits, primary).with_course(
            self.subject.clone().unwrap_or_default(),
            self.number.clone().unwrap_or_default(),
            self.title.clone().unwrap_or_default(),
        );

        match (&self.extra_days, &self.extra_start, &self.extra_end) {
            (Some(days), Some(start), Some(end)) => {
                section = section.with_secondary(MeetingPattern::new(
                    TimeInterval::parse(start, end)?,
                    DaySet::parse(days)?,
                ));
            }
            (None, None, None) => {}
            _ => {
                return Err(ScheduleError::ConfigError {
                    message: format!(
                        "section {}: extra_days, extra_start and extra_end must be given together",
                        self.crn
                    ),
                })
            }
        }

        Ok(section)
    }
}

impl ScheduleFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScheduleError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.schedule.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn granularity(&self) -> u16 {
        self.schedule
            .as_ref()
            .and_then(|s| s.granularity_minutes)
            .unwrap_or(DEFAULT_GRANULARITY)
    }

    pub fn to_sections(&self) -> Result<Vec<CourseSection>> {
        self.sections.iter().map(SectionEntry::to_section).collect()
    }

    /// Loads every section, in file order, into a fresh schedule.
    pub fn build_schedule(&self) -> Result<ScheduleSet> {
        let sections = self.to_sections()?;
        let mut schedule = ScheduleSet::new().with_granularity(self.granularity())?;
        schedule.add_all(sections)?;
        tracing::info!(
            "Loaded {} sections ({} credits)",
            schedule.len(),
            schedule.total_credits()
        );
        Ok(schedule)
    }
}

impl Validate for ScheduleFile {
    fn validate(&self) -> Result<()> {
        validate_range("schedule.granularity_minutes", self.granularity(), 1, 60)?;
        for section in self.to_sections()? {
            section.validate()?;
        }
        Ok(())
    }
}
