use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError, WorkoutWeek};

#[allow(async_fn_in_trait)]
pub trait CycleService {
    async fn get_cycles(&self) -> Result<Vec<WorkoutCycle>, ReadError>;
    async fn create_cycle(
        &self,
        name: Name,
        weeks: Vec<WorkoutWeek>,
        auto_rotate: bool,
    ) -> Result<WorkoutCycle, CreateError>;
    async fn replace_cycle(&self, cycle: WorkoutCycle) -> Result<WorkoutCycle, UpdateError>;
    async fn advance_cycle(&self, id: CycleID) -> Result<Option<WorkoutCycle>, UpdateError>;
    async fn delete_cycle(&self, id: CycleID) -> Result<CycleID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait CycleRepository {
    async fn read_cycles(&self) -> Result<Vec<WorkoutCycle>, ReadError>;
    async fn create_cycle(
        &self,
        name: Name,
        weeks: Vec<WorkoutWeek>,
        auto_rotate: bool,
    ) -> Result<WorkoutCycle, CreateError>;
    async fn replace_cycle(&self, cycle: WorkoutCycle) -> Result<WorkoutCycle, UpdateError>;
    async fn delete_cycle(&self, id: CycleID) -> Result<CycleID, DeleteError>;
}

/// An ordered sequence of workout weeks with a cursor on the active week.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutCycle {
    pub id: CycleID,
    pub name: Name,
    pub description: Option<String>,
    pub weeks: Vec<WorkoutWeek>,
    pub current_week_index: usize,
    pub auto_rotate: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutCycle {
    #[must_use]
    pub fn current_week(&self) -> Option<&WorkoutWeek> {
        self.weeks.get(self.current_week_index)
    }

    /// Moves the cursor to the next week. Wraps around to the first week
    /// when auto-rotation is enabled and stays on the last week otherwise.
    /// The cursor invariant `current_week_index < weeks.len()` is preserved
    /// for non-empty cycles.
    pub fn advance_week(&mut self) {
        if self.weeks.is_empty() {
            self.current_week_index = 0;
            return;
        }
        if self.current_week_index + 1 < self.weeks.len() {
            self.current_week_index += 1;
        } else if self.auto_rotate {
            self.current_week_index = 0;
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CycleID(Uuid);

impl CycleID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for CycleID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for CycleID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn week(id: u128) -> WorkoutWeek {
        WorkoutWeek {
            id: id.into(),
            name: Name::new("Week").unwrap(),
            description: None,
            schedule: BTreeMap::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            is_template: true,
        }
    }

    fn cycle(num_weeks: u128, current_week_index: usize, auto_rotate: bool) -> WorkoutCycle {
        WorkoutCycle {
            id: 1.into(),
            name: Name::new("4-Week Strength Building").unwrap(),
            description: None,
            weeks: (1..=num_weeks).map(week).collect(),
            current_week_index,
            auto_rotate,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            updated_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_cycle_current_week() {
        assert_eq!(cycle(0, 0, false).current_week(), None);
        assert_eq!(cycle(3, 1, false).current_week(), Some(&week(2)));
    }

    #[rstest]
    #[case::advances(3, 0, false, 1)]
    #[case::saturates_without_auto_rotate(3, 2, false, 2)]
    #[case::wraps_with_auto_rotate(3, 2, true, 0)]
    #[case::single_week_with_auto_rotate(1, 0, true, 0)]
    #[case::single_week_without_auto_rotate(1, 0, false, 0)]
    #[case::empty(0, 0, true, 0)]
    fn test_cycle_advance_week(
        #[case] num_weeks: u128,
        #[case] current_week_index: usize,
        #[case] auto_rotate: bool,
        #[case] expected: usize,
    ) {
        let mut cycle = cycle(num_weeks, current_week_index, auto_rotate);
        cycle.advance_week();
        assert_eq!(cycle.current_week_index, expected);
        assert!(cycle.weeks.is_empty() || cycle.current_week_index < cycle.weeks.len());
    }
}
