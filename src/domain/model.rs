use crate::utils::error::{Result, ScheduleError};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minute offset within a day, `0..=1440`.
pub type Minute = u16;

pub const MINUTES_PER_DAY: Minute = 24 * 60;

/// Upper bound on a single section's credit-hours.
pub const MAX_SECTION_CREDITS: i32 = 30;

/// Weekday of the five-day teaching week.
///
/// The discriminants are the positional indices into `Mon,Tue,Wed,Thu,Fri`
/// and must stay in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon = 0,
    Tue = 1,
    Wed = 2,
    Thu = 3,
    Fri = 4,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// Registrar letter codes, `R` being Thursday.
    pub const CODES: &'static str = "MTWRF";

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn from_code(code: char) -> Option<Day> {
        Self::CODES
            .find(code.to_ascii_uppercase())
            .and_then(Self::from_index)
    }

    pub fn code(self) -> char {
        Self::CODES.as_bytes()[self.index()] as char
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        };
        f.write_str(name)
    }
}

impl FromStr for Day {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let day = match s.trim().to_ascii_lowercase().as_str() {
            "m" | "mon" | "monday" => Day::Mon,
            "t" | "tue" | "tues" | "tuesday" => Day::Tue,
            "w" | "wed" | "wednesday" => Day::Wed,
            "r" | "th" | "thu" | "thur" | "thurs" | "thursday" => Day::Thu,
            "f" | "fri" | "friday" => Day::Fri,
            _ => {
                return Err(ScheduleError::InvalidDay {
                    value: s.to_string(),
                })
            }
        };
        Ok(day)
    }
}

/// A subset of the five weekdays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, day: Day) {
        self.0 |= day.bit();
    }

    pub fn contains(&self, day: Day) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn intersects(&self, other: &DaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Day> + '_ {
        Day::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    /// Parses `"MWF"`, `"TR"`, `"Mon,Wed"` or a single day name.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let mut set = DaySet::empty();

        if trimmed.contains(|c: char| c == ',' || c.is_whitespace()) {
            for token in trimmed.split(|c: char| c == ',' || c.is_whitespace()) {
                if !token.is_empty() {
                    set.insert(token.parse()?);
                }
            }
        } else if !trimmed.is_empty() && trimmed.chars().all(|c| Day::from_code(c).is_some()) {
            for c in trimmed.chars() {
                if let Some(day) = Day::from_code(c) {
                    set.insert(day);
                }
            }
        } else {
            set.insert(trimmed.parse()?);
        }

        Ok(set)
    }
}

impl FromIterator<Day> for DaySet {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            write!(f, "{}", day.code())?;
        }
        Ok(())
    }
}

/// Parses a clock time into minutes since midnight.
///
/// Accepts `HH:MM` (24h, `24:00` included) and `H:MMAM` / `H:MM PM` (12h).
pub fn parse_clock(value: &str) -> Result<Minute> {
    let trimmed = value.trim();
    if trimmed == "24:00" {
        return Ok(MINUTES_PER_DAY);
    }

    for format in ["%H:%M", "%I:%M%p", "%I:%M %p"] {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, format) {
            return Ok((time.hour() * 60 + time.minute()) as Minute);
        }
    }

    Err(ScheduleError::InvalidTime {
        value: value.to_string(),
        reason: "expected HH:MM or H:MMAM/PM".to_string(),
    })
}

/// Start and end of a meeting as minute offsets within the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub start: Minute,
    pub end: Minute,
}

impl TimeInterval {
    pub fn new(start: Minute, end: Minute) -> Result<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_clock(start)?, parse_clock(end)?)
    }

    /// Half-open overlap: touching intervals do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Validate for TimeInterval {
    fn validate(&self) -> Result<()> {
        validate_range("end", self.end, 0, MINUTES_PER_DAY).map_err(|_| {
            ScheduleError::InvalidTime {
                value: self.end.to_string(),
                reason: format!("must not be later than {}", MINUTES_PER_DAY),
            }
        })?;
        if self.start >= self.end {
            return Err(ScheduleError::InvalidTime {
                value: format!("{}-{}", self.start, self.end),
                reason: "start must be before end".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// One weekly meeting: an interval repeated on a set of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeetingPattern {
    pub interval: TimeInterval,
    pub days: DaySet,
}

impl MeetingPattern {
    pub fn new(interval: TimeInterval, days: DaySet) -> Self {
        Self { interval, days }
    }

    pub fn overlaps(&self, other: &MeetingPattern) -> bool {
        self.days.intersects(&other.days) && self.interval.overlaps(&other.interval)
    }

    pub fn meets_on(&self, day: Day) -> bool {
        self.days.contains(day)
    }
}

impl fmt::Display for MeetingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.days, self.interval)
    }
}

/// A schedulable offering of a course.
///
/// Sections are compared by value: two sections are the same entry only if
/// every field matches, so distinct sections sharing a time stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseSection {
    pub crn: String,
    pub subject: String,
    pub number: String,
    pub title: String,
    pub credits: i32,
    pub primary: MeetingPattern,
    pub secondary: Option<MeetingPattern>,
}

impl CourseSection {
    pub fn new(crn: impl Into<String>, credits: i32, primary: MeetingPattern) -> Self {
        Self {
            crn: crn.into(),
            subject: String::new(),
            number: String::new(),
            title: String::new(),
            credits,
            primary,
            secondary: None,
        }
    }

    pub fn with_course(
        mut self,
        subject: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        self.subject = subject.into();
        self.number = number.into();
        self.title = title.into();
        self
    }

    pub fn with_secondary(mut self, pattern: MeetingPattern) -> Self {
        self.secondary = Some(pattern);
        self
    }

    /// Primary pattern first, then the secondary one when present.
    pub fn meetings(&self) -> impl Iterator<Item = &MeetingPattern> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }

    /// Conflict test using plain meeting overlap.
    pub fn conflicts(&self, other: &CourseSection) -> bool {
        self.meetings()
            .any(|a| other.meetings().any(|b| a.overlaps(b)))
    }
}

impl Validate for CourseSection {
    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ScheduleError::InvalidSection {
            crn: self.crn.clone(),
            reason,
        };

        validate_non_empty_string("crn", &self.crn).map_err(|e| invalid(e.to_string()))?;
        validate_range("credits", self.credits, 0, MAX_SECTION_CREDITS)
            .map_err(|e| invalid(e.to_string()))?;
        for meeting in self.meetings() {
            meeting
                .interval
                .validate()
                .map_err(|e| invalid(e.to_string()))?;
            if meeting.days.is_empty() {
                return Err(invalid(format!("meeting {} has no days", meeting.interval)));
            }
        }
        Ok(())
    }
}

impl fmt::Display for CourseSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}] {}", self.subject, self.number, self.crn, self.primary)?;
        if let Some(secondary) = &self.secondary {
            write!(f, " + {}", secondary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(days: &str, start: &str, end: &str) -> MeetingPattern {
        MeetingPattern::new(
            TimeInterval::parse(start, end).unwrap(),
            DaySet::parse(days).unwrap(),
        )
    }

    #[test]
    fn test_day_alphabet_order() {
        let names: Vec<String> = Day::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, ["Mon", "Tue", "Wed", "Thu", "Fri"]);
        assert_eq!(Day::from_index(3), Some(Day::Thu));
        assert_eq!(Day::from_index(5), None);
        assert_eq!(Day::from_code('R'), Some(Day::Thu));
        assert_eq!(Day::Fri.code(), 'F');
    }

    #[test]
    fn test_day_set_parsing() {
        let mwf = DaySet::parse("MWF").unwrap();
        assert_eq!(mwf.iter().collect::<Vec<_>>(), [Day::Mon, Day::Wed, Day::Fri]);

        let tr = DaySet::parse("Tue, thursday").unwrap();
        assert_eq!(tr.to_string(), "TR");
        assert_eq!([Day::Thu, Day::Tue].into_iter().collect::<DaySet>(), tr);

        assert_eq!(DaySet::parse("Wed").unwrap().len(), 1);
        assert!(DaySet::parse("Sat").is_err());
        assert!(DaySet::parse("MXF").is_err());
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("09:00").unwrap(), 540);
        assert_eq!(parse_clock("13:45").unwrap(), 825);
        assert_eq!(parse_clock("01:30PM").unwrap(), 810);
        assert_eq!(parse_clock("24:00").unwrap(), 1440);
        assert!(parse_clock("noon").is_err());
    }

    #[test]
    fn test_interval_rules() {
        assert!(TimeInterval::new(600, 600).is_err());
        assert!(TimeInterval::new(600, 1500).is_err());

        let a = TimeInterval::new(540, 600).unwrap();
        let b = TimeInterval::new(600, 650).unwrap();
        let c = TimeInterval::new(590, 610).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert_eq!(a.to_string(), "09:00-10:00");
    }

    #[test]
    fn test_section_conflicts_through_secondary_meeting() {
        let lecture = CourseSection::new("10001", 3, pattern("MWF", "09:00", "09:50"))
            .with_secondary(pattern("R", "14:00", "16:50"));
        let other = CourseSection::new("10002", 3, pattern("TR", "15:30", "16:45"));
        let unrelated = CourseSection::new("10003", 3, pattern("TR", "08:00", "09:15"));

        assert!(lecture.conflicts(&other));
        assert!(other.conflicts(&lecture));
        assert!(!lecture.conflicts(&unrelated));
        assert_eq!(lecture.meetings().count(), 2);
    }

    #[test]
    fn test_section_validation() {
        let ok = CourseSection::new("1", 3, pattern("M", "09:00", "10:00"));
        assert!(ok.validate().is_ok());

        let mut no_days = ok.clone();
        no_days.primary.days = DaySet::empty();
        assert!(matches!(
            no_days.validate(),
            Err(ScheduleError::InvalidSection { .. })
        ));

        let mut negative = ok.clone();
        negative.credits = -1;
        assert!(negative.validate().is_err());

        let mut oversized = ok.clone();
        oversized.credits = MAX_SECTION_CREDITS + 1;
        assert!(matches!(
            oversized.validate(),
            Err(ScheduleError::InvalidSection { .. })
        ));

        let mut blank = ok;
        blank.crn = "  ".to_string();
        assert!(blank.validate().is_err());
    }
}
