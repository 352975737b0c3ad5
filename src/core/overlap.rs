use crate::core::{ConflictPredicate, CourseSection};

/// Default conflict rule: some pair of meeting patterns shares a day and
/// their intervals overlap. Back-to-back meetings are allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeetingOverlap;

impl ConflictPredicate for MeetingOverlap {
    fn conflicts(&self, a: &CourseSection, b: &CourseSection) -> bool {
        a.conflicts(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DaySet, MeetingPattern, TimeInterval};

    fn section(crn: &str, days: &str, start: u16, end: u16) -> CourseSection {
        CourseSection::new(
            crn,
            3,
            MeetingPattern::new(
                TimeInterval::new(start, end).unwrap(),
                DaySet::parse(days).unwrap(),
            ),
        )
    }

    #[test]
    fn test_overlap_requires_shared_day() {
        let monday = section("1", "M", 540, 600);
        let tuesday = section("2", "T", 540, 600);
        let monday_again = section("3", "MW", 570, 630);

        assert!(!MeetingOverlap.conflicts(&monday, &tuesday));
        assert!(MeetingOverlap.conflicts(&monday, &monday_again));
        assert!(MeetingOverlap.conflicts(&monday_again, &monday));
    }

    #[test]
    fn test_back_to_back_is_not_a_conflict() {
        let first = section("1", "MWF", 540, 590);
        let second = section("2", "MWF", 590, 640);

        assert!(!MeetingOverlap.conflicts(&first, &second));
        assert!(!MeetingOverlap.conflicts(&second, &first));
    }
}
