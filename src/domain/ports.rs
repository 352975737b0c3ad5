use crate::domain::model::CourseSection;

/// Decides whether two sections may not be taken together.
///
/// Implementations must be symmetric: `conflicts(a, b) == conflicts(b, a)`.
pub trait ConflictPredicate {
    fn conflicts(&self, a: &CourseSection, b: &CourseSection) -> bool;
}

impl<F> ConflictPredicate for F
where
    F: Fn(&CourseSection, &CourseSection) -> bool,
{
    fn conflicts(&self, a: &CourseSection, b: &CourseSection) -> bool {
        self(a, b)
    }
}
