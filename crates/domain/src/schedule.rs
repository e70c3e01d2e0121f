use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, PlaylistID, ReadError, SetID, UpdateError,
    ValidationError, WorkoutPlaylist,
};

#[allow(async_fn_in_trait)]
pub trait ScheduleService {
    async fn get_scheduled_workouts(&self) -> Result<Vec<ScheduledWorkout>, ReadError>;
    async fn schedule_workout(
        &self,
        playlist_id: PlaylistID,
        date: DateTime<Utc>,
    ) -> Result<ScheduledWorkout, CreateError>;
    async fn get_todays_workout(
        &self,
        today: NaiveDate,
    ) -> Result<Option<ScheduledWorkout>, ReadError>;
    async fn complete_set(
        &self,
        id: ScheduledWorkoutID,
        exercise_id: ExerciseID,
        set_id: SetID,
        now: DateTime<Utc>,
    ) -> Result<Option<ScheduledWorkout>, UpdateError>;
    async fn delete_scheduled_workout(
        &self,
        id: ScheduledWorkoutID,
    ) -> Result<ScheduledWorkoutID, DeleteError>;

    fn validate_schedule_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::Other("Invalid date".into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait ScheduleRepository {
    async fn read_scheduled_workouts(&self) -> Result<Vec<ScheduledWorkout>, ReadError>;
    async fn create_scheduled_workout(
        &self,
        playlist_id: PlaylistID,
        date: DateTime<Utc>,
    ) -> Result<ScheduledWorkout, CreateError>;
    async fn replace_scheduled_workout(
        &self,
        scheduled_workout: ScheduledWorkout,
    ) -> Result<ScheduledWorkout, UpdateError>;
    async fn delete_scheduled_workout(
        &self,
        id: ScheduledWorkoutID,
    ) -> Result<ScheduledWorkoutID, DeleteError>;
}

/// One calendar instance of performing a playlist, with its own completion
/// and progress state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledWorkout {
    pub id: ScheduledWorkoutID,
    pub playlist_id: PlaylistID,
    pub date: DateTime<Utc>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub progress: f32,
}

impl ScheduledWorkout {
    /// Recomputes `progress` and `completed` from the referenced playlist's
    /// current set state. Completion is never inferred from an earlier
    /// progress value. The completion time is stamped when the workout
    /// becomes complete and kept on later recomputations.
    pub fn apply_progress(&mut self, playlist: &WorkoutPlaylist, at: DateTime<Utc>) {
        self.progress = playlist.completion();
        if playlist.is_fully_completed() {
            if !self.completed {
                self.completed = true;
                self.completed_at = Some(at);
            }
        } else {
            self.completed = false;
            self.completed_at = None;
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduledWorkoutID(Uuid);

impl ScheduledWorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ScheduledWorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ScheduledWorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// The first not yet completed entry scheduled for `today`, in input order.
/// Completed entries are treated as already handled.
#[must_use]
pub fn todays_scheduled_workout(
    scheduled_workouts: &[ScheduledWorkout],
    today: NaiveDate,
) -> Option<&ScheduledWorkout> {
    scheduled_workouts
        .iter()
        .find(|s| s.date.date_naive() == today && !s.completed)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{MuscleGroup, Name, PlannedSet, PlaylistExercise};

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn scheduled(id: u128, days_from_now: i64, completed: bool) -> ScheduledWorkout {
        ScheduledWorkout {
            id: id.into(),
            playlist_id: 1.into(),
            date: now() + TimeDelta::days(days_from_now),
            completed,
            completed_at: completed.then(now),
            progress: if completed { 100.0 } else { 0.0 },
        }
    }

    fn playlist(total: u32, completed: u32) -> WorkoutPlaylist {
        WorkoutPlaylist {
            id: 1.into(),
            name: Name::new("Push Day").unwrap(),
            description: None,
            exercises: vec![PlaylistExercise {
                id: 1.into(),
                name: Name::new("Bench Press").unwrap(),
                muscle_group: MuscleGroup::Chest,
                sets: (0..total)
                    .map(|s| PlannedSet {
                        id: u128::from(s + 1).into(),
                        weight: 60.0,
                        reps: 10,
                        completed: s < completed,
                        completed_at: None,
                    })
                    .collect(),
            }],
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_apply_progress_partial() {
        let mut scheduled_workout = scheduled(1, 0, false);
        scheduled_workout.apply_progress(&playlist(4, 1), now());
        assert_eq!(scheduled_workout.progress, 25.0);
        assert!(!scheduled_workout.completed);
        assert_eq!(scheduled_workout.completed_at, None);
    }

    #[test]
    fn test_apply_progress_full() {
        let mut scheduled_workout = scheduled(1, 0, false);
        scheduled_workout.apply_progress(&playlist(3, 3), now());
        assert_eq!(scheduled_workout.progress, 100.0);
        assert!(scheduled_workout.completed);
        assert_eq!(scheduled_workout.completed_at, Some(now()));

        // the completion time is kept on recomputation
        scheduled_workout.apply_progress(&playlist(3, 3), now() + TimeDelta::hours(1));
        assert_eq!(scheduled_workout.completed_at, Some(now()));
    }

    #[test]
    fn test_apply_progress_empty_playlist() {
        let mut scheduled_workout = scheduled(1, 0, false);
        scheduled_workout.apply_progress(&playlist(0, 0), now());
        assert_eq!(scheduled_workout.progress, 0.0);
        assert!(!scheduled_workout.completed);
    }

    #[rstest]
    #[case::empty(&[], None)]
    #[case::single_incomplete(&[scheduled(1, 0, false)], Some(1))]
    #[case::completed_excluded(&[scheduled(1, 0, true)], None)]
    #[case::other_days_excluded(&[scheduled(1, -1, false), scheduled(2, 1, false)], None)]
    #[case::first_in_input_order(
        &[scheduled(2, 0, false), scheduled(1, 0, false)],
        Some(2)
    )]
    #[case::completed_skipped_for_incomplete(
        &[scheduled(1, 0, true), scheduled(2, 0, false)],
        Some(2)
    )]
    fn test_todays_scheduled_workout(
        #[case] scheduled_workouts: &[ScheduledWorkout],
        #[case] expected: Option<u128>,
    ) {
        assert_eq!(
            todays_scheduled_workout(scheduled_workouts, now().date_naive()),
            expected
                .map(|id| scheduled_workouts
                    .iter()
                    .find(|s| s.id == id.into())
                    .unwrap())
        );
    }
}
