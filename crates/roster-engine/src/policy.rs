//! When a batch triggers allocation.

use roster_core::rows::BatchMeta;

/// Decides from batch metadata whether allocation runs.
pub trait TriggerPolicy: Send + Sync {
    fn should_allocate(&self, meta: &BatchMeta) -> bool;

    /// Short human-readable form, used in logs.
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

/// Allocate only for uploads of one admission year and semester.
///
/// The default (`1`, `1`) allocates first-year students once, in their first semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstYearFirstSemester {
    pub year: u16,
    pub semester: u8,
}

impl FirstYearFirstSemester {
    #[must_use]
    pub const fn new(year: u16, semester: u8) -> Self {
        Self { year, semester }
    }
}

impl Default for FirstYearFirstSemester {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl TriggerPolicy for FirstYearFirstSemester {
    fn should_allocate(&self, meta: &BatchMeta) -> bool {
        meta.admission_year == Some(self.year) && meta.semester == Some(self.semester)
    }

    fn describe(&self) -> String {
        format!("year {} semester {}", self.year, self.semester)
    }
}

impl<F> TriggerPolicy for F
where
    F: Fn(&BatchMeta) -> bool + Send + Sync,
{
    fn should_allocate(&self, meta: &BatchMeta) -> bool {
        self(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn meta(year: Option<u16>, semester: Option<u8>) -> BatchMeta {
        BatchMeta {
            admission_year: year,
            semester,
            department: None,
        }
    }

    #[rstest]
    #[case(Some(1), Some(1), true)]
    #[case(Some(1), Some(2), false)]
    #[case(Some(2), Some(1), false)]
    #[case(None, Some(1), false)]
    #[case(Some(1), None, false)]
    fn default_policy(
        #[case] year: Option<u16>,
        #[case] semester: Option<u8>,
        #[case] expected: bool,
    ) {
        assert_eq!(
            FirstYearFirstSemester::default().should_allocate(&meta(year, semester)),
            expected
        );
    }

    #[test]
    fn configured_policy() {
        let policy = FirstYearFirstSemester::new(2, 1);
        assert!(policy.should_allocate(&meta(Some(2), Some(1))));
        assert_eq!(policy.describe(), "year 2 semester 1");
    }

    #[test]
    fn closures_are_policies() {
        let always = |_: &BatchMeta| true;
        assert!(always.should_allocate(&BatchMeta::default()));
        assert_eq!(TriggerPolicy::describe(&always), "custom");
    }
}
