use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use vigor_domain as domain;

fn created() -> DateTime<Utc> {
    // 2024-01-01T00:00:00Z
    DateTime::from_timestamp(1_704_067_200, 0).unwrap()
}

pub static PROFILE: std::sync::LazyLock<domain::UserProfile> =
    std::sync::LazyLock::new(|| domain::UserProfile {
        id: 1.into(),
        name: domain::Name::new("John Doe").unwrap(),
        fitness_level: domain::FitnessLevel::Intermediate,
        fitness_goal: domain::FitnessGoal::BuildMuscle,
        weight: Some(82.5),
        height: None,
        created_at: created(),
        updated_at: created(),
    });

pub static WORKOUT: std::sync::LazyLock<domain::WorkoutRecord> =
    std::sync::LazyLock::new(|| domain::WorkoutRecord {
        id: 1.into(),
        user_id: 1.into(),
        workout_type: domain::WorkoutType::Strength,
        date: created(),
        notes: Some("felt strong".to_string()),
        exercises: vec![domain::ExerciseEntry {
            id: 1.into(),
            name: domain::Name::new("Bench Press").unwrap(),
            muscle_group: domain::MuscleGroup::Chest,
            sets: (1_u128..=3)
                .map(|s| domain::RecordedSet {
                    id: s.into(),
                    weight: 61.0,
                    reps: 10,
                    completed_at: Some(created()),
                })
                .collect(),
        }],
        cardio: vec![],
        duration_min: 45,
        created_at: created(),
        updated_at: created(),
    });

pub static PLAYLIST: std::sync::LazyLock<domain::WorkoutPlaylist> =
    std::sync::LazyLock::new(|| domain::WorkoutPlaylist {
        id: 1.into(),
        name: domain::Name::new("Push Day").unwrap(),
        description: Some("Chest, Shoulders, and Triceps".to_string()),
        exercises: vec![
            domain::PlaylistExercise {
                id: 1.into(),
                name: domain::Name::new("Bench Press").unwrap(),
                muscle_group: domain::MuscleGroup::Chest,
                sets: (1_u128..=3)
                    .map(|s| domain::PlannedSet {
                        id: s.into(),
                        weight: 61.0,
                        reps: 10,
                        completed: false,
                        completed_at: None,
                    })
                    .collect(),
            },
            domain::PlaylistExercise {
                id: 2.into(),
                name: domain::Name::new("Barbell Shrugs").unwrap(),
                muscle_group: domain::MuscleGroup::UpperTraps,
                sets: (4_u128..=6)
                    .map(|s| domain::PlannedSet {
                        id: s.into(),
                        weight: 80.0,
                        reps: 12,
                        completed: false,
                        completed_at: None,
                    })
                    .collect(),
            },
        ],
        created_at: created(),
        updated_at: created(),
    });

pub static SCHEDULED_WORKOUT: std::sync::LazyLock<domain::ScheduledWorkout> =
    std::sync::LazyLock::new(|| domain::ScheduledWorkout {
        id: 1.into(),
        playlist_id: 1.into(),
        date: created(),
        completed: false,
        completed_at: None,
        progress: 0.0,
    });

pub static WEEK: std::sync::LazyLock<domain::WorkoutWeek> =
    std::sync::LazyLock::new(|| domain::WorkoutWeek {
        id: 1.into(),
        name: domain::Name::new("Push/Pull/Legs Week").unwrap(),
        description: None,
        schedule: BTreeMap::from([
            (domain::DayOfWeek::Monday, domain::PlaylistID::from(1)),
            (domain::DayOfWeek::Wednesday, domain::PlaylistID::from(2)),
            (domain::DayOfWeek::Friday, domain::PlaylistID::from(3)),
        ]),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        is_template: true,
    });

pub static CYCLE: std::sync::LazyLock<domain::WorkoutCycle> =
    std::sync::LazyLock::new(|| domain::WorkoutCycle {
        id: 1.into(),
        name: domain::Name::new("4-Week Strength Building").unwrap(),
        description: Some("Progressive overload focusing on compound movements".to_string()),
        weeks: vec![WEEK.clone()],
        current_week_index: 0,
        auto_rotate: true,
        created_at: created(),
        updated_at: created(),
    });

pub static PROGRESS_SUMMARY: std::sync::LazyLock<domain::ProgressSummary> =
    std::sync::LazyLock::new(|| domain::ProgressSummary {
        total_workouts: 10,
        completed_workouts: 8,
        streak: 3,
        last_workout: Some(created()),
        muscle_groups: BTreeMap::from([
            (
                domain::MuscleGroup::Chest,
                domain::ProgressResult::new(3, 10),
            ),
            (domain::MuscleGroup::Neck, domain::ProgressResult::new(0, 6)),
        ]),
    });
