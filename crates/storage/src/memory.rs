use std::{
    collections::BTreeMap,
    sync::RwLock,
};

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use vigor_domain::{self as domain, StorageError};

use crate::{Collection, DocumentStore, documents};

/// In-memory document store standing in for the external document database.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The store preloaded with a small demo dataset: one profile, three
    /// playlists, a weekly template, a cycle, two scheduled workouts and one
    /// completed workout from yesterday.
    #[must_use]
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        let now = Utc::now();

        let mut collections = store.collections.write().expect("lock poisoned");
        insert(
            &mut collections,
            Collection::UserProfiles,
            &sample_user_id().to_string(),
            &documents::UserProfile::from(&sample_profile(now)),
        );
        for playlist in sample_playlists(now) {
            insert(
                &mut collections,
                Collection::Playlists,
                &playlist.id.to_string(),
                &documents::Playlist::from(&playlist),
            );
        }
        let week = sample_week(now);
        insert(
            &mut collections,
            Collection::WorkoutWeeks,
            &week.id.to_string(),
            &documents::Week::from(&week),
        );
        let cycle = sample_cycle(week, now);
        insert(
            &mut collections,
            Collection::WorkoutCycles,
            &cycle.id.to_string(),
            &documents::Cycle::from(&cycle),
        );
        for scheduled_workout in sample_scheduled_workouts(now) {
            insert(
                &mut collections,
                Collection::ScheduledWorkouts,
                &scheduled_workout.id.to_string(),
                &documents::ScheduledWorkout::from(&scheduled_workout),
            );
        }
        let workout = sample_workout(now);
        insert(
            &mut collections,
            Collection::Workouts,
            &workout.id.to_string(),
            &documents::Workout::from(&workout),
        );
        insert(
            &mut collections,
            Collection::Progress,
            &sample_user_id().to_string(),
            &documents::ProgressSummary::from(&sample_progress(now)),
        );
        drop(collections);

        store
    }
}

fn insert<D: serde::Serialize>(
    collections: &mut BTreeMap<String, BTreeMap<String, Value>>,
    collection: Collection,
    id: &str,
    document: &D,
) {
    collections
        .entry(collection.as_ref().to_string())
        .or_default()
        .insert(
            id.to_string(),
            serde_json::to_value(document).expect("serialization failed"),
        );
}

impl DocumentStore for MemoryStore {
    async fn read_documents(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        Ok(self
            .collections
            .read()
            .expect("lock poisoned")
            .get(collection.as_ref())
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn read_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StorageError> {
        Ok(self
            .collections
            .read()
            .expect("lock poisoned")
            .get(collection.as_ref())
            .and_then(|documents| documents.get(id).cloned()))
    }

    async fn put_document(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StorageError> {
        self.collections
            .write()
            .expect("lock poisoned")
            .entry(collection.as_ref().to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn delete_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<(), StorageError> {
        if let Some(documents) = self
            .collections
            .write()
            .expect("lock poisoned")
            .get_mut(collection.as_ref())
        {
            documents.remove(id);
        }
        Ok(())
    }
}

#[must_use]
pub fn sample_user_id() -> domain::UserID {
    1.into()
}

fn sample_profile(now: DateTime<Utc>) -> domain::UserProfile {
    domain::UserProfile {
        id: sample_user_id(),
        name: name("John Doe"),
        fitness_level: domain::FitnessLevel::Intermediate,
        fitness_goal: domain::FitnessGoal::BuildMuscle,
        weight: None,
        height: None,
        created_at: now,
        updated_at: now,
    }
}

fn name(value: &str) -> domain::Name {
    domain::Name::new(value).expect("invalid sample name")
}

fn planned_sets(first_id: u128, weight: f32, reps: u32) -> Vec<domain::PlannedSet> {
    (0..3)
        .map(|i| domain::PlannedSet {
            id: (first_id + i as u128).into(),
            weight,
            reps,
            completed: false,
            completed_at: None,
        })
        .collect()
}

fn sample_playlists(now: DateTime<Utc>) -> Vec<domain::WorkoutPlaylist> {
    vec![
        domain::WorkoutPlaylist {
            id: 0x11.into(),
            name: name("Push Day"),
            description: Some("Chest, Shoulders, and Triceps".to_string()),
            exercises: vec![
                domain::PlaylistExercise {
                    id: 0x111.into(),
                    name: name("Bench Press"),
                    muscle_group: domain::MuscleGroup::Chest,
                    sets: planned_sets(0x1110, 135.0, 10),
                },
                domain::PlaylistExercise {
                    id: 0x112.into(),
                    name: name("Overhead Press"),
                    muscle_group: domain::MuscleGroup::Shoulders,
                    sets: planned_sets(0x1120, 95.0, 10),
                },
                domain::PlaylistExercise {
                    id: 0x113.into(),
                    name: name("Tricep Extensions"),
                    muscle_group: domain::MuscleGroup::Triceps,
                    sets: planned_sets(0x1130, 45.0, 12),
                },
            ],
            created_at: now,
            updated_at: now,
        },
        domain::WorkoutPlaylist {
            id: 0x12.into(),
            name: name("Pull Day"),
            description: Some("Back and Biceps".to_string()),
            exercises: vec![
                domain::PlaylistExercise {
                    id: 0x121.into(),
                    name: name("Pull-ups"),
                    muscle_group: domain::MuscleGroup::Back,
                    sets: planned_sets(0x1210, 0.0, 10),
                },
                domain::PlaylistExercise {
                    id: 0x122.into(),
                    name: name("Barbell Rows"),
                    muscle_group: domain::MuscleGroup::Back,
                    sets: planned_sets(0x1220, 135.0, 10),
                },
                domain::PlaylistExercise {
                    id: 0x123.into(),
                    name: name("Bicep Curls"),
                    muscle_group: domain::MuscleGroup::Biceps,
                    sets: planned_sets(0x1230, 30.0, 12),
                },
            ],
            created_at: now,
            updated_at: now,
        },
        domain::WorkoutPlaylist {
            id: 0x13.into(),
            name: name("Leg Day"),
            description: Some("Lower Body Focus".to_string()),
            exercises: vec![
                domain::PlaylistExercise {
                    id: 0x131.into(),
                    name: name("Squats"),
                    muscle_group: domain::MuscleGroup::Quads,
                    sets: planned_sets(0x1310, 185.0, 8),
                },
                domain::PlaylistExercise {
                    id: 0x132.into(),
                    name: name("Deadlifts"),
                    muscle_group: domain::MuscleGroup::Hamstrings,
                    sets: planned_sets(0x1320, 225.0, 6),
                },
                domain::PlaylistExercise {
                    id: 0x133.into(),
                    name: name("Leg Press"),
                    muscle_group: domain::MuscleGroup::Quads,
                    sets: planned_sets(0x1330, 270.0, 10),
                },
            ],
            created_at: now,
            updated_at: now,
        },
    ]
}

fn sample_week(now: DateTime<Utc>) -> domain::WorkoutWeek {
    domain::WorkoutWeek {
        id: 0x21.into(),
        name: name("Push/Pull/Legs Week"),
        description: None,
        schedule: BTreeMap::from([
            (domain::DayOfWeek::Monday, domain::PlaylistID::from(0x11)),
            (domain::DayOfWeek::Wednesday, domain::PlaylistID::from(0x12)),
            (domain::DayOfWeek::Friday, domain::PlaylistID::from(0x13)),
        ]),
        start_date: now.date_naive(),
        end_date: now.date_naive() + Duration::days(7),
        is_template: true,
    }
}

fn sample_cycle(week: domain::WorkoutWeek, now: DateTime<Utc>) -> domain::WorkoutCycle {
    domain::WorkoutCycle {
        id: 0x31.into(),
        name: name("4-Week Strength Building"),
        description: Some("Progressive overload focusing on compound movements".to_string()),
        weeks: vec![week],
        current_week_index: 0,
        auto_rotate: true,
        created_at: now,
        updated_at: now,
    }
}

fn sample_scheduled_workouts(now: DateTime<Utc>) -> Vec<domain::ScheduledWorkout> {
    vec![
        domain::ScheduledWorkout {
            id: 0x41.into(),
            playlist_id: 0x11.into(),
            date: now,
            completed: false,
            completed_at: None,
            progress: 0.0,
        },
        domain::ScheduledWorkout {
            id: 0x42.into(),
            playlist_id: 0x12.into(),
            date: now + Duration::days(1),
            completed: false,
            completed_at: None,
            progress: 0.0,
        },
    ]
}

fn sample_workout(now: DateTime<Utc>) -> domain::WorkoutRecord {
    let date = now - Duration::days(1);
    domain::WorkoutRecord {
        id: 0x51.into(),
        user_id: sample_user_id(),
        workout_type: domain::WorkoutType::Strength,
        date,
        notes: None,
        exercises: vec![domain::ExerciseEntry {
            id: 0x511.into(),
            name: name("Bench Press"),
            muscle_group: domain::MuscleGroup::Chest,
            sets: (0..3_u128)
                .map(|i| domain::RecordedSet {
                    id: (0x5110 + i).into(),
                    weight: 135.0,
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

fn sample_progress(now: DateTime<Utc>) -> domain::ProgressSummary {
    domain::ProgressSummary {
        total_workouts: 10,
        completed_workouts: 8,
        streak: 3,
        last_workout: Some(now - Duration::days(1)),
        muscle_groups: domain::MuscleGroup::iter()
            .map(|m| {
                let current = u32::from(*m == domain::MuscleGroup::Chest) * 3;
                (
                    *m,
                    domain::ProgressResult::new(
                        current,
                        domain::weekly_set_target(domain::FitnessLevel::Beginner, *m),
                    ),
                )
            })
            .collect(),
    }
}
