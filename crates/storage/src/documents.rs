//! Serde models for stored documents. Documents are parsed and validated
//! once on read so the domain layer can assume well-typed input.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vigor_domain as domain;

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidMuscleGroup(#[from] domain::MuscleGroupError),
    #[error(transparent)]
    InvalidDayOfWeek(#[from] domain::DayOfWeekError),
    #[error("current week index {0} out of range for {1} weeks")]
    InvalidWeekIndex(usize, usize),
}

impl From<std::convert::Infallible> for DocumentError {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}

impl From<DocumentError> for domain::ReadError {
    fn from(value: DocumentError) -> Self {
        Self::Other(Box::new(value))
    }
}

impl From<DocumentError> for domain::CreateError {
    fn from(value: DocumentError) -> Self {
        Self::Other(Box::new(value))
    }
}

impl From<DocumentError> for domain::UpdateError {
    fn from(value: DocumentError) -> Self {
        Self::Other(Box::new(value))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub fitness_level: String,
    pub fitness_goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&domain::UserProfile> for UserProfile {
    fn from(value: &domain::UserProfile) -> Self {
        Self {
            user_id: *value.id,
            name: value.name.to_string(),
            fitness_level: value.fitness_level.as_str().to_string(),
            fitness_goal: value.fitness_goal.as_str().to_string(),
            weight: value.weight,
            height: value.height,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<UserProfile> for domain::UserProfile {
    type Error = DocumentError;

    fn try_from(value: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.user_id.into(),
            name: domain::Name::new(&value.name)?,
            // unknown levels and goals keep the conservative defaults
            fitness_level: domain::FitnessLevel::from(value.fitness_level.as_str()),
            fitness_goal: domain::FitnessGoal::from(value.fitness_goal.as_str()),
            weight: value.weight,
            height: value.height,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio_exercises: Option<Vec<CardioEntry>>,
    pub duration: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&domain::WorkoutRecord> for Workout {
    fn from(value: &domain::WorkoutRecord) -> Self {
        Self {
            id: *value.id,
            user_id: *value.user_id,
            workout_type: value.workout_type.as_str().to_string(),
            date: value.date,
            notes: value.notes.clone(),
            exercises: value.exercises.iter().map(ExerciseEntry::from).collect(),
            cardio_exercises: if value.cardio.is_empty() {
                None
            } else {
                Some(value.cardio.iter().map(CardioEntry::from).collect())
            },
            duration: value.duration_min,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<Workout> for domain::WorkoutRecord {
    type Error = DocumentError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            user_id: value.user_id.into(),
            workout_type: domain::WorkoutType::from(value.workout_type.as_str()),
            date: value.date,
            notes: value.notes,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            cardio: value
                .cardio_exercises
                .unwrap_or_default()
                .into_iter()
                .map(domain::CardioEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            duration_min: value.duration,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    pub sets: Vec<RecordedSet>,
}

impl From<&domain::ExerciseEntry> for ExerciseEntry {
    fn from(value: &domain::ExerciseEntry) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            muscle_group: value.muscle_group.as_str().to_string(),
            sets: value.sets.iter().map(RecordedSet::from).collect(),
        }
    }
}

impl TryFrom<ExerciseEntry> for domain::ExerciseEntry {
    type Error = DocumentError;

    fn try_from(value: ExerciseEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            muscle_group: domain::MuscleGroup::try_from(value.muscle_group.as_str())?,
            sets: value.sets.into_iter().map(domain::RecordedSet::from).collect(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordedSet {
    pub id: Uuid,
    pub weight: f32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&domain::RecordedSet> for RecordedSet {
    fn from(value: &domain::RecordedSet) -> Self {
        Self {
            id: *value.id,
            weight: value.weight,
            reps: value.reps,
            completed_at: value.completed_at,
        }
    }
}

impl From<RecordedSet> for domain::RecordedSet {
    fn from(value: RecordedSet) -> Self {
        Self {
            id: value.id.into(),
            weight: value.weight,
            reps: value.reps,
            completed_at: value.completed_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardioEntry {
    pub id: Uuid,
    pub name: String,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
}

impl From<&domain::CardioEntry> for CardioEntry {
    fn from(value: &domain::CardioEntry) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            duration: value.duration_min,
            distance: value.distance_km,
            calories_burned: value.calories,
        }
    }
}

impl TryFrom<CardioEntry> for domain::CardioEntry {
    type Error = DocumentError;

    fn try_from(value: CardioEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            duration_min: value.duration,
            distance_km: value.distance,
            calories: value.calories_burned,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub exercises: Vec<PlaylistExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&domain::WorkoutPlaylist> for Playlist {
    fn from(value: &domain::WorkoutPlaylist) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            exercises: value.exercises.iter().map(PlaylistExercise::from).collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<Playlist> for domain::WorkoutPlaylist {
    type Error = DocumentError;

    fn try_from(value: Playlist) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::PlaylistExercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistExercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    pub sets: Vec<PlannedSet>,
}

impl From<&domain::PlaylistExercise> for PlaylistExercise {
    fn from(value: &domain::PlaylistExercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            muscle_group: value.muscle_group.as_str().to_string(),
            sets: value.sets.iter().map(PlannedSet::from).collect(),
        }
    }
}

impl TryFrom<PlaylistExercise> for domain::PlaylistExercise {
    type Error = DocumentError;

    fn try_from(value: PlaylistExercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            muscle_group: domain::MuscleGroup::try_from(value.muscle_group.as_str())?,
            sets: value.sets.into_iter().map(domain::PlannedSet::from).collect(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSet {
    pub id: Uuid,
    pub weight: f32,
    pub reps: u32,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&domain::PlannedSet> for PlannedSet {
    fn from(value: &domain::PlannedSet) -> Self {
        Self {
            id: *value.id,
            weight: value.weight,
            reps: value.reps,
            completed: value.completed,
            completed_at: value.completed_at,
        }
    }
}

impl From<PlannedSet> for domain::PlannedSet {
    fn from(value: PlannedSet) -> Self {
        Self {
            id: value.id.into(),
            weight: value.weight,
            reps: value.reps,
            completed: value.completed,
            completed_at: value.completed_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledWorkout {
    pub id: Uuid,
    pub playlist_id: Uuid,
    pub date: DateTime<Utc>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub progress: f32,
}

impl From<&domain::ScheduledWorkout> for ScheduledWorkout {
    fn from(value: &domain::ScheduledWorkout) -> Self {
        Self {
            id: *value.id,
            playlist_id: *value.playlist_id,
            date: value.date,
            completed: value.completed,
            completed_at: value.completed_at,
            progress: value.progress,
        }
    }
}

impl From<ScheduledWorkout> for domain::ScheduledWorkout {
    fn from(value: ScheduledWorkout) -> Self {
        Self {
            id: value.id.into(),
            playlist_id: value.playlist_id.into(),
            date: value.date,
            completed: value.completed,
            completed_at: value.completed_at,
            progress: value.progress,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schedule: BTreeMap<String, Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_template: bool,
}

impl From<&domain::WorkoutWeek> for Week {
    fn from(value: &domain::WorkoutWeek) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            schedule: value
                .schedule
                .iter()
                .map(|(day, playlist_id)| (day.as_str().to_string(), **playlist_id))
                .collect(),
            start_date: value.start_date,
            end_date: value.end_date,
            is_template: value.is_template,
        }
    }
}

impl TryFrom<Week> for domain::WorkoutWeek {
    type Error = DocumentError;

    fn try_from(value: Week) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            schedule: value
                .schedule
                .into_iter()
                .map(|(day, playlist_id)| {
                    Ok((
                        domain::DayOfWeek::try_from(day.as_str())?,
                        playlist_id.into(),
                    ))
                })
                .collect::<Result<BTreeMap<_, _>, DocumentError>>()?,
            start_date: value.start_date,
            end_date: value.end_date,
            is_template: value.is_template,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub weeks: Vec<Week>,
    pub current_week_index: usize,
    pub auto_rotate: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&domain::WorkoutCycle> for Cycle {
    fn from(value: &domain::WorkoutCycle) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            weeks: value.weeks.iter().map(Week::from).collect(),
            current_week_index: value.current_week_index,
            auto_rotate: value.auto_rotate,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<Cycle> for domain::WorkoutCycle {
    type Error = DocumentError;

    fn try_from(value: Cycle) -> Result<Self, Self::Error> {
        if !value.weeks.is_empty() && value.current_week_index >= value.weeks.len() {
            return Err(DocumentError::InvalidWeekIndex(
                value.current_week_index,
                value.weeks.len(),
            ));
        }
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            weeks: value
                .weeks
                .into_iter()
                .map(domain::WorkoutWeek::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            current_week_index: value.current_week_index,
            auto_rotate: value.auto_rotate,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_workouts: u32,
    pub completed_workouts: u32,
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_workout: Option<DateTime<Utc>>,
    pub muscle_group_progress: BTreeMap<String, ProgressResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ProgressResult {
    pub current: u32,
    pub target: u32,
    pub percentage: f32,
}

impl From<&domain::ProgressSummary> for ProgressSummary {
    fn from(value: &domain::ProgressSummary) -> Self {
        Self {
            total_workouts: value.total_workouts,
            completed_workouts: value.completed_workouts,
            streak: value.streak,
            last_workout: value.last_workout,
            muscle_group_progress: value
                .muscle_groups
                .iter()
                .map(|(muscle_group, progress)| {
                    (
                        muscle_group.as_str().to_string(),
                        ProgressResult {
                            current: progress.current,
                            target: progress.target,
                            percentage: progress.percentage,
                        },
                    )
                })
                .collect(),
        }
    }
}

impl TryFrom<ProgressSummary> for domain::ProgressSummary {
    type Error = DocumentError;

    fn try_from(value: ProgressSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            total_workouts: value.total_workouts,
            completed_workouts: value.completed_workouts,
            streak: value.streak,
            last_workout: value.last_workout,
            muscle_groups: value
                .muscle_group_progress
                .into_iter()
                .map(|(muscle_group, progress)| {
                    Ok((
                        domain::MuscleGroup::try_from(muscle_group.as_str())?,
                        domain::ProgressResult {
                            current: progress.current,
                            target: progress.target,
                            percentage: progress.percentage,
                        },
                    ))
                })
                .collect::<Result<BTreeMap<_, _>, DocumentError>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::tests::data;

    use super::*;

    #[test]
    fn test_user_profile_round_trip() {
        let document = UserProfile::from(&*data::PROFILE);
        let serialized = serde_json::to_value(&document).unwrap();
        let deserialized: UserProfile = serde_json::from_value(serialized).unwrap();
        assert_eq!(
            domain::UserProfile::try_from(deserialized).unwrap(),
            *data::PROFILE
        );
    }

    #[test]
    fn test_user_profile_unknown_fitness_level_defaults_to_beginner() {
        let deserialized: UserProfile = serde_json::from_value(json!({
            "userId": "00000000-0000-0000-0000-000000000001",
            "name": "John Doe",
            "fitnessLevel": "Legendary",
            "fitnessGoal": "build_muscle",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        }))
        .unwrap();
        let profile = domain::UserProfile::try_from(deserialized).unwrap();
        assert_eq!(profile.fitness_level, domain::FitnessLevel::Beginner);
    }

    #[test]
    fn test_workout_round_trip() {
        let document = Workout::from(&*data::WORKOUT);
        let serialized = serde_json::to_value(&document).unwrap();
        assert_eq!(serialized["type"], json!("Strength"));
        let deserialized: Workout = serde_json::from_value(serialized).unwrap();
        assert_eq!(
            domain::WorkoutRecord::try_from(deserialized).unwrap(),
            *data::WORKOUT
        );
    }

    #[test]
    fn test_workout_unknown_muscle_group_is_rejected() {
        let document: ExerciseEntry = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Squats",
            "muscleGroup": "Legs",
            "sets": [],
        }))
        .unwrap();
        assert!(matches!(
            domain::ExerciseEntry::try_from(document),
            Err(DocumentError::InvalidMuscleGroup(
                domain::MuscleGroupError::Unknown(_)
            ))
        ));
    }

    #[test]
    fn test_playlist_round_trip() {
        let document = Playlist::from(&*data::PLAYLIST);
        let serialized = serde_json::to_value(&document).unwrap();
        assert_eq!(
            serialized["exercises"][0]["muscleGroup"],
            json!("Upper traps")
        );
        let deserialized: Playlist = serde_json::from_value(serialized).unwrap();
        assert_eq!(
            domain::WorkoutPlaylist::try_from(deserialized).unwrap(),
            *data::PLAYLIST
        );
    }

    #[test]
    fn test_scheduled_workout_round_trip() {
        let document = ScheduledWorkout::from(&*data::SCHEDULED_WORKOUT);
        let serialized = serde_json::to_value(&document).unwrap();
        let deserialized: ScheduledWorkout = serde_json::from_value(serialized).unwrap();
        assert_eq!(
            domain::ScheduledWorkout::from(deserialized),
            *data::SCHEDULED_WORKOUT
        );
    }

    #[test]
    fn test_week_round_trip() {
        let document = Week::from(&*data::WEEK);
        let serialized = serde_json::to_value(&document).unwrap();
        assert!(serialized["schedule"].get("MONDAY").is_some());
        let deserialized: Week = serde_json::from_value(serialized).unwrap();
        assert_eq!(
            domain::WorkoutWeek::try_from(deserialized).unwrap(),
            *data::WEEK
        );
    }

    #[test]
    fn test_cycle_round_trip() {
        let document = Cycle::from(&*data::CYCLE);
        let serialized = serde_json::to_value(&document).unwrap();
        let deserialized: Cycle = serde_json::from_value(serialized).unwrap();
        assert_eq!(
            domain::WorkoutCycle::try_from(deserialized).unwrap(),
            *data::CYCLE
        );
    }

    #[test]
    fn test_cycle_out_of_range_week_index_is_rejected() {
        let mut document = Cycle::from(&*data::CYCLE);
        document.current_week_index = document.weeks.len();
        assert!(matches!(
            domain::WorkoutCycle::try_from(document),
            Err(DocumentError::InvalidWeekIndex(1, 1))
        ));
    }

    #[test]
    fn test_progress_summary_round_trip() {
        let document = ProgressSummary::from(&*data::PROGRESS_SUMMARY);
        let serialized = serde_json::to_value(&document).unwrap();
        let deserialized: ProgressSummary = serde_json::from_value(serialized).unwrap();
        assert_eq!(
            domain::ProgressSummary::try_from(deserialized).unwrap(),
            *data::PROGRESS_SUMMARY
        );
    }
}
