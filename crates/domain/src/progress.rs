use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    FitnessLevel, MuscleGroup, ReadError, ScheduledWorkout, UpdateError, WorkoutRecord,
};

#[allow(async_fn_in_trait)]
pub trait ProgressService {
    async fn get_weekly_progress(
        &self,
        muscle_group: MuscleGroup,
        now: DateTime<Utc>,
    ) -> Result<ProgressResult, ReadError>;
    async fn get_progress_summary(&self, now: DateTime<Utc>) -> Result<ProgressSummary, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ProgressRepository {
    async fn read_progress_summary(&self) -> Result<Option<ProgressSummary>, ReadError>;
    async fn replace_progress_summary(
        &self,
        summary: ProgressSummary,
    ) -> Result<ProgressSummary, UpdateError>;
}

/// Weekly set volume for one muscle group compared to the level-dependent
/// target. Derived on every query, never stored as-is.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ProgressResult {
    pub current: u32,
    pub target: u32,
    pub percentage: f32,
}

impl ProgressResult {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(current: u32, target: u32) -> Self {
        Self {
            current,
            target,
            percentage: if target > 0 {
                current as f32 / target as f32 * 100.0
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgressSummary {
    pub total_workouts: u32,
    pub completed_workouts: u32,
    pub streak: u32,
    pub last_workout: Option<DateTime<Utc>>,
    pub muscle_groups: BTreeMap<MuscleGroup, ProgressResult>,
}

/// Optimal sets per week for a muscle group at a given fitness level.
#[must_use]
pub fn weekly_set_target(fitness_level: FitnessLevel, muscle_group: MuscleGroup) -> u32 {
    match fitness_level {
        FitnessLevel::Beginner => match muscle_group {
            MuscleGroup::Abs
            | MuscleGroup::Back
            | MuscleGroup::Calves
            | MuscleGroup::Chest
            | MuscleGroup::Glutes
            | MuscleGroup::Hamstrings
            | MuscleGroup::Quads
            | MuscleGroup::Shoulders => 10,
            MuscleGroup::Biceps
            | MuscleGroup::Forearms
            | MuscleGroup::Neck
            | MuscleGroup::Triceps
            | MuscleGroup::UpperTraps => 6,
        },
        FitnessLevel::Intermediate => match muscle_group {
            MuscleGroup::Abs
            | MuscleGroup::Biceps
            | MuscleGroup::Calves
            | MuscleGroup::Neck
            | MuscleGroup::Triceps
            | MuscleGroup::UpperTraps => 10,
            MuscleGroup::Back | MuscleGroup::Glutes | MuscleGroup::Shoulders => 20,
            MuscleGroup::Chest | MuscleGroup::Quads => 15,
            MuscleGroup::Forearms => 8,
            MuscleGroup::Hamstrings => 12,
        },
        FitnessLevel::Advanced => match muscle_group {
            MuscleGroup::Abs | MuscleGroup::Calves | MuscleGroup::Hamstrings => 15,
            MuscleGroup::Back | MuscleGroup::Glutes => 30,
            MuscleGroup::Biceps
            | MuscleGroup::Chest
            | MuscleGroup::Quads
            | MuscleGroup::Triceps => 20,
            MuscleGroup::Forearms | MuscleGroup::Neck | MuscleGroup::UpperTraps => 10,
            MuscleGroup::Shoulders => 25,
        },
    }
}

/// Sets completed for one muscle group within the rolling week before `now`
/// compared to the fitness-level-dependent target. The window is a 7 x 24 h
/// lookback from `now`, not aligned to calendar weeks. Without a profile
/// (`fitness_level` is `None`) everything defaults to zero.
#[must_use]
pub fn weekly_progress(
    workouts: &[WorkoutRecord],
    muscle_group: MuscleGroup,
    fitness_level: Option<FitnessLevel>,
    now: DateTime<Utc>,
) -> ProgressResult {
    let Some(fitness_level) = fitness_level else {
        return ProgressResult::default();
    };

    let window_start = now - Duration::days(7);
    let current = workouts
        .iter()
        .filter(|w| w.date >= window_start)
        .map(|w| w.sets_for(muscle_group))
        .sum();

    ProgressResult::new(current, weekly_set_target(fitness_level, muscle_group))
}

/// Number of consecutive calendar days with at least one workout, counting
/// back from `today`. A day without a workout so far does not break a streak
/// that ran up to yesterday.
#[must_use]
pub fn streak(workouts: &[WorkoutRecord], today: NaiveDate) -> u32 {
    let days = workouts
        .iter()
        .map(|w| w.date.date_naive())
        .collect::<BTreeSet<_>>();

    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut result = 0;
    while days.contains(&day) {
        result += 1;
        day -= Duration::days(1);
    }
    result
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn progress_summary(
    workouts: &[WorkoutRecord],
    scheduled_workouts: &[ScheduledWorkout],
    fitness_level: Option<FitnessLevel>,
    now: DateTime<Utc>,
) -> ProgressSummary {
    ProgressSummary {
        total_workouts: workouts.len() as u32,
        completed_workouts: scheduled_workouts.iter().filter(|s| s.completed).count() as u32,
        streak: streak(workouts, now.date_naive()),
        last_workout: workouts.iter().map(|w| w.date).max(),
        muscle_groups: MuscleGroup::iter()
            .map(|m| (*m, weekly_progress(workouts, *m, fitness_level, now)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ExerciseEntry, Name, RecordedSet, WorkoutType};

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn workout(days_ago: i64, muscle_group: MuscleGroup, sets: u32) -> WorkoutRecord {
        let date = now() - Duration::days(days_ago);
        WorkoutRecord {
            id: 1.into(),
            user_id: 1.into(),
            workout_type: WorkoutType::Strength,
            date,
            notes: None,
            exercises: vec![ExerciseEntry {
                id: 1.into(),
                name: Name::new("Bench Press").unwrap(),
                muscle_group,
                sets: (0..sets)
                    .map(|s| RecordedSet {
                        id: u128::from(s + 1).into(),
                        weight: 60.0,
                        reps: 10,
                        completed_at: Some(date),
                    })
                    .collect(),
            }],
            cardio: vec![],
            duration_min: 45,
            created_at: date,
            updated_at: date,
        }
    }

    fn scheduled(completed: bool) -> ScheduledWorkout {
        ScheduledWorkout {
            id: 1.into(),
            playlist_id: 1.into(),
            date: now(),
            completed,
            completed_at: completed.then(now),
            progress: if completed { 100.0 } else { 0.0 },
        }
    }

    #[test]
    fn test_weekly_set_target_spot_checks() {
        assert_eq!(
            weekly_set_target(FitnessLevel::Beginner, MuscleGroup::Chest),
            10
        );
        assert_eq!(
            weekly_set_target(FitnessLevel::Intermediate, MuscleGroup::Forearms),
            8
        );
        assert_eq!(
            weekly_set_target(FitnessLevel::Advanced, MuscleGroup::Glutes),
            30
        );
        assert_eq!(
            weekly_set_target(FitnessLevel::Advanced, MuscleGroup::UpperTraps),
            10
        );
    }

    #[test]
    fn test_weekly_set_target_is_positive() {
        for fitness_level in FitnessLevel::iter() {
            for muscle_group in MuscleGroup::iter() {
                assert!(weekly_set_target(*fitness_level, *muscle_group) > 0);
            }
        }
    }

    #[test]
    fn test_weekly_progress_beginner_chest() {
        let workouts = [workout(2, MuscleGroup::Chest, 3)];
        let result = weekly_progress(
            &workouts,
            MuscleGroup::Chest,
            Some(FitnessLevel::Beginner),
            now(),
        );
        assert_eq!(result.current, 3);
        assert_eq!(result.target, 10);
        assert_approx_eq!(result.percentage, 30.0);
    }

    #[test]
    fn test_weekly_progress_without_profile() {
        let workouts = [workout(2, MuscleGroup::Chest, 3)];
        assert_eq!(
            weekly_progress(&workouts, MuscleGroup::Chest, None, now()),
            ProgressResult::default()
        );
    }

    #[rstest]
    #[case::inside_window(6, 3)]
    #[case::outside_window(8, 0)]
    #[case::on_window_boundary(7, 3)]
    fn test_weekly_progress_rolling_window(#[case] days_ago: i64, #[case] expected: u32) {
        let workouts = [workout(days_ago, MuscleGroup::Chest, 3)];
        let result = weekly_progress(
            &workouts,
            MuscleGroup::Chest,
            Some(FitnessLevel::Beginner),
            now(),
        );
        assert_eq!(result.current, expected);
    }

    #[test]
    fn test_weekly_progress_ignores_other_muscle_groups() {
        let workouts = [
            workout(1, MuscleGroup::Chest, 3),
            workout(2, MuscleGroup::Back, 5),
        ];
        let result = weekly_progress(
            &workouts,
            MuscleGroup::Back,
            Some(FitnessLevel::Intermediate),
            now(),
        );
        assert_eq!(result.current, 5);
        assert_eq!(result.target, 20);
        assert_approx_eq!(result.percentage, 25.0);
    }

    #[test]
    fn test_weekly_progress_may_exceed_target() {
        let workouts = [
            workout(1, MuscleGroup::Biceps, 5),
            workout(2, MuscleGroup::Biceps, 4),
        ];
        let result = weekly_progress(
            &workouts,
            MuscleGroup::Biceps,
            Some(FitnessLevel::Beginner),
            now(),
        );
        assert_eq!(result.current, 9);
        assert_eq!(result.target, 6);
        assert_approx_eq!(result.percentage, 150.0);
    }

    #[test]
    fn test_progress_result_zero_target() {
        assert_eq!(ProgressResult::new(5, 0).percentage, 0.0);
        assert_eq!(ProgressResult::new(0, 0), ProgressResult::default());
    }

    #[rstest]
    #[case::no_workouts(&[], 0)]
    #[case::today_only(&[0], 1)]
    #[case::today_and_yesterday(&[0, 1], 2)]
    #[case::untrained_today_keeps_streak(&[1, 2, 3], 3)]
    #[case::gap_breaks_streak(&[0, 2, 3], 1)]
    #[case::old_workouts_only(&[5, 6], 0)]
    fn test_streak(#[case] days_ago: &[i64], #[case] expected: u32) {
        let workouts = days_ago
            .iter()
            .map(|d| workout(*d, MuscleGroup::Chest, 3))
            .collect::<Vec<_>>();
        assert_eq!(streak(&workouts, now().date_naive()), expected);
    }

    #[test]
    fn test_progress_summary() {
        let workouts = [
            workout(0, MuscleGroup::Chest, 3),
            workout(1, MuscleGroup::Back, 5),
        ];
        let scheduled_workouts = [scheduled(true), scheduled(false)];
        let summary = progress_summary(
            &workouts,
            &scheduled_workouts,
            Some(FitnessLevel::Beginner),
            now(),
        );

        assert_eq!(summary.total_workouts, 2);
        assert_eq!(summary.completed_workouts, 1);
        assert_eq!(summary.streak, 2);
        assert_eq!(summary.last_workout, Some(now()));
        assert_eq!(summary.muscle_groups.len(), 13);
        assert_eq!(
            summary.muscle_groups[&MuscleGroup::Chest],
            ProgressResult::new(3, 10)
        );
        assert_eq!(
            summary.muscle_groups[&MuscleGroup::Neck],
            ProgressResult::new(0, 6)
        );
    }

    #[test]
    fn test_progress_summary_without_profile() {
        let workouts = [workout(0, MuscleGroup::Chest, 3)];
        let summary = progress_summary(&workouts, &[], None, now());

        assert_eq!(summary.total_workouts, 1);
        assert_eq!(summary.streak, 1);
        assert!(
            summary
                .muscle_groups
                .values()
                .all(|p| *p == ProgressResult::default())
        );
    }
}
