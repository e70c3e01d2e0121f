use std::slice::Iter;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, MuscleGroup, Name, ReadError, UpdateError, UserID};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn create_workout(
        &self,
        workout_type: WorkoutType,
        date: DateTime<Utc>,
        notes: Option<String>,
        exercises: Vec<ExerciseEntry>,
        cardio: Vec<CardioEntry>,
        duration_min: u32,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn replace_workout(&self, workout: WorkoutRecord) -> Result<WorkoutRecord, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn create_workout(
        &self,
        workout_type: WorkoutType,
        date: DateTime<Utc>,
        notes: Option<String>,
        exercises: Vec<ExerciseEntry>,
        cardio: Vec<CardioEntry>,
        duration_min: u32,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn replace_workout(&self, workout: WorkoutRecord) -> Result<WorkoutRecord, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// A logged workout. Replaced wholesale on edit, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub workout_type: WorkoutType,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseEntry>,
    pub cardio: Vec<CardioEntry>,
    pub duration_min: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutRecord {
    #[must_use]
    pub fn sets_for(&self, muscle_group: MuscleGroup) -> u32 {
        self.exercises
            .iter()
            .filter(|e| e.muscle_group == muscle_group)
            .map(ExerciseEntry::set_count)
            .sum()
    }

    #[must_use]
    pub fn num_exercises(&self) -> usize {
        self.exercises.len() + self.cardio.len()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub sets: Vec<RecordedSet>,
}

impl ExerciseEntry {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_count(&self) -> u32 {
        self.sets.len() as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSet {
    pub id: SetID,
    pub weight: f32,
    pub reps: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardioEntry {
    pub id: ExerciseID,
    pub name: Name,
    pub duration_min: u32,
    pub distance_km: Option<f32>,
    pub calories: Option<u32>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutType {
    #[default]
    Strength,
    Hypertrophy,
    Endurance,
    Cardio,
}

impl WorkoutType {
    pub fn iter() -> Iter<'static, WorkoutType> {
        static WORKOUT_TYPES: [WorkoutType; 4] = [
            WorkoutType::Strength,
            WorkoutType::Hypertrophy,
            WorkoutType::Endurance,
            WorkoutType::Cardio,
        ];
        WORKOUT_TYPES.iter()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Strength => "Strength",
            WorkoutType::Hypertrophy => "Hypertrophy",
            WorkoutType::Endurance => "Endurance",
            WorkoutType::Cardio => "Cardio",
        }
    }
}

impl From<&str> for WorkoutType {
    fn from(value: &str) -> Self {
        match value {
            "Hypertrophy" => WorkoutType::Hypertrophy,
            "Endurance" => WorkoutType::Endurance,
            "Cardio" => WorkoutType::Cardio,
            _ => WorkoutType::Strength,
        }
    }
}
