use crate::core::{ConflictPredicate, CourseSection, Day, MeetingOverlap, Minute};
use crate::utils::error::{Result, ScheduleError};
use crate::utils::validation::{validate_range, Validate};

/// Smallest schedulable unit of time, in minutes.
pub const DEFAULT_GRANULARITY: Minute = 5;

/// A student's set of course sections, kept free of time conflicts.
///
/// Sections keep their insertion order. The sequence is only changed through
/// [`ScheduleSet::add`] and [`ScheduleSet::remove`], so every pair of members
/// passes the conflict predicate and `total_credits` always equals the sum of
/// the members' credits.
#[derive(Debug)]
pub struct ScheduleSet<P: ConflictPredicate = MeetingOverlap> {
    sections: Vec<CourseSection>,
    total_credits: i32,
    granularity: Minute,
    predicate: P,
}

impl ScheduleSet<MeetingOverlap> {
    pub fn new() -> Self {
        Self::with_predicate(MeetingOverlap)
    }

    /// Builds a schedule from `sections` in order. Fails on the first
    /// conflicting pair and keeps nothing.
    pub fn from_sections<I>(sections: I) -> Result<Self>
    where
        I: IntoIterator<Item = CourseSection>,
    {
        let mut schedule = Self::new();
        schedule.add_all(sections)?;
        Ok(schedule)
    }
}

impl Default for ScheduleSet<MeetingOverlap> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ConflictPredicate> ScheduleSet<P> {
    pub fn with_predicate(predicate: P) -> Self {
        Self {
            sections: Vec::new(),
            total_credits: 0,
            granularity: DEFAULT_GRANULARITY,
            predicate,
        }
    }

    pub fn with_granularity(mut self, minutes: Minute) -> Result<Self> {
        validate_range("granularity_minutes", minutes, 1, 60)?;
        self.granularity = minutes;
        Ok(self)
    }

    /// Appends `section` unless it is malformed or conflicts with a member.
    pub fn add(&mut self, section: CourseSection) -> Result<()> {
        section.validate()?;

        if let Some(existing) = self
            .sections
            .iter()
            .find(|existing| self.predicate.conflicts(existing, &section))
        {
            tracing::warn!(
                "Section {} conflicts with {} already scheduled",
                section.crn,
                existing.crn
            );
            return Err(ScheduleError::Conflict {
                existing: Box::new(existing.clone()),
                incoming: Box::new(section),
            });
        }

        self.total_credits += section.credits;
        tracing::debug!(
            "Added section {} ({} credits, total {})",
            section.crn,
            section.credits,
            self.total_credits
        );
        self.sections.push(section);
        Ok(())
    }

    /// Adds `sections` in order. On the first failure every section added by
    /// this call is dropped again and the error is returned.
    pub fn add_all<I>(&mut self, sections: I) -> Result<()>
    where
        I: IntoIterator<Item = CourseSection>,
    {
        let kept = self.sections.len();
        let kept_credits = self.total_credits;

        for section in sections {
            if let Err(e) = self.add(section) {
                self.sections.truncate(kept);
                self.total_credits = kept_credits;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Removes the first member equal to `section`.
    ///
    /// Credits only change when something was actually removed.
    pub fn remove(&mut self, section: &CourseSection) -> Option<CourseSection> {
        let Some(position) = self.sections.iter().position(|s| s == section) else {
            tracing::debug!("Section {} is not in the schedule", section.crn);
            return None;
        };

        let removed = self.sections.remove(position);
        self.total_credits -= removed.credits;
        tracing::debug!(
            "Removed section {} (total {} credits)",
            removed.crn,
            self.total_credits
        );
        Some(removed)
    }

    pub fn total_credits(&self) -> i32 {
        self.total_credits
    }

    pub fn granularity(&self) -> Minute {
        self.granularity
    }

    pub fn sections(&self) -> &[CourseSection] {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CourseSection> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains(&self, section: &CourseSection) -> bool {
        self.sections.contains(section)
    }

    /// Earliest start over every meeting of every section.
    pub fn earliest_start(&self) -> Option<Minute> {
        self.sections
            .iter()
            .flat_map(|s| s.meetings())
            .map(|m| m.interval.start)
            .min()
    }

    /// Latest end over every meeting of every section.
    pub fn latest_end(&self) -> Option<Minute> {
        self.sections
            .iter()
            .flat_map(|s| s.meetings())
            .map(|m| m.interval.end)
            .max()
    }

    /// Whether some meeting on `day` occupies the slot starting at `minute`.
    ///
    /// A meeting covers `start..=end - granularity`; its end slot is free.
    pub fn is_busy(&self, day: Day, minute: Minute) -> bool {
        let minute = i32::from(minute);
        let granularity = i32::from(self.granularity);

        self.sections
            .iter()
            .flat_map(|s| s.meetings())
            .filter(|m| m.meets_on(day))
            .any(|m| {
                minute >= i32::from(m.interval.start)
                    && minute <= i32::from(m.interval.end) - granularity
            })
    }

    /// Busy/free flags for `day`, one per slot from the earliest start up to
    /// the latest end of the whole schedule.
    pub fn busy_slots(&self, day: Day) -> Vec<(Minute, bool)> {
        let (Some(start), Some(end)) = (self.earliest_start(), self.latest_end()) else {
            return Vec::new();
        };

        (start..end)
            .step_by(usize::from(self.granularity))
            .map(|minute| (minute, self.is_busy(day, minute)))
            .collect()
    }
}

impl<P: ConflictPredicate + Clone> ScheduleSet<P> {
    /// Copies the schedule by re-adding every section in order.
    pub fn try_clone(&self) -> Result<Self> {
        let mut copy = Self::with_predicate(self.predicate.clone());
        copy.granularity = self.granularity;
        for section in &self.sections {
            copy.add(section.clone())?;
        }
        Ok(copy)
    }
}

impl<'a, P: ConflictPredicate> IntoIterator for &'a ScheduleSet<P> {
    type Item = &'a CourseSection;
    type IntoIter = std::slice::Iter<'a, CourseSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
