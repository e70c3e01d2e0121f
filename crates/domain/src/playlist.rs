use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, MuscleGroup, Name, ReadError, SetID, UpdateError,
    ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait PlaylistService {
    async fn get_playlists(&self) -> Result<Vec<WorkoutPlaylist>, ReadError>;
    async fn create_playlist(
        &self,
        name: Name,
        description: Option<String>,
        exercises: Vec<PlaylistExercise>,
    ) -> Result<WorkoutPlaylist, CreateError>;
    async fn replace_playlist(&self, playlist: WorkoutPlaylist)
    -> Result<WorkoutPlaylist, UpdateError>;
    async fn delete_playlist(&self, id: PlaylistID) -> Result<PlaylistID, DeleteError>;

    async fn validate_playlist_name(
        &self,
        name: &str,
        id: PlaylistID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_playlists().await {
                Ok(playlists) => {
                    if playlists.iter().all(|p| p.id == id || p.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait PlaylistRepository {
    async fn read_playlists(&self) -> Result<Vec<WorkoutPlaylist>, ReadError>;
    async fn create_playlist(
        &self,
        name: Name,
        description: Option<String>,
        exercises: Vec<PlaylistExercise>,
    ) -> Result<WorkoutPlaylist, CreateError>;
    async fn replace_playlist(&self, playlist: WorkoutPlaylist)
    -> Result<WorkoutPlaylist, UpdateError>;
    async fn delete_playlist(&self, id: PlaylistID) -> Result<PlaylistID, DeleteError>;
}

/// A named, reusable plan of exercises and target sets, independent of when
/// it is performed.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlaylist {
    pub id: PlaylistID,
    pub name: Name,
    pub description: Option<String>,
    pub exercises: Vec<PlaylistExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutPlaylist {
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(PlaylistExercise::set_count).sum()
    }

    #[must_use]
    pub fn completed_sets(&self) -> u32 {
        self.exercises
            .iter()
            .map(PlaylistExercise::completed_sets)
            .sum()
    }

    /// Overall completion in percent. `0` for a playlist without sets.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion(&self) -> f32 {
        let total = self.total_sets();
        if total > 0 {
            self.completed_sets() as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn is_fully_completed(&self) -> bool {
        let total = self.total_sets();
        total > 0 && self.completed_sets() == total
    }

    /// Marks one planned set as complete. Returns whether the referenced set
    /// exists. Completing an already completed set keeps its original
    /// completion time.
    pub fn complete_set(&mut self, exercise_id: ExerciseID, set_id: SetID, at: DateTime<Utc>) -> bool {
        let Some(set) = self
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
            .and_then(|e| e.sets.iter_mut().find(|s| s.id == set_id))
        else {
            return false;
        };
        if !set.completed {
            set.completed = true;
            set.completed_at = Some(at);
        }
        true
    }

    /// Clears all completion flags, e.g. when a template playlist gets
    /// scheduled again.
    pub fn reset_sets(&mut self) {
        for exercise in &mut self.exercises {
            for set in &mut exercise.sets {
                set.completed = false;
                set.completed_at = None;
            }
        }
    }

    /// Resizes an exercise's planned sets. Additional sets copy the weight
    /// and reps of the first existing set. Returns whether the exercise
    /// exists.
    pub fn set_set_count(&mut self, exercise_id: ExerciseID, count: usize) -> bool {
        let Some(exercise) = self.exercises.iter_mut().find(|e| e.id == exercise_id) else {
            return false;
        };
        let (weight, reps) = exercise
            .sets
            .first()
            .map_or((0.0, 0), |s| (s.weight, s.reps));
        if count < exercise.sets.len() {
            exercise.sets.truncate(count);
        } else {
            exercise.sets.resize_with(count, || PlannedSet {
                id: SetID::new(),
                weight,
                reps,
                completed: false,
                completed_at: None,
            });
        }
        true
    }

    pub fn move_exercise_up(&mut self, exercise_id: ExerciseID) -> bool {
        match self.exercises.iter().position(|e| e.id == exercise_id) {
            Some(i) if i > 0 => {
                self.exercises.swap(i, i - 1);
                true
            }
            _ => false,
        }
    }

    pub fn move_exercise_down(&mut self, exercise_id: ExerciseID) -> bool {
        match self.exercises.iter().position(|e| e.id == exercise_id) {
            Some(i) if i + 1 < self.exercises.len() => {
                self.exercises.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlaylistID(Uuid);

impl PlaylistID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PlaylistID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlaylistID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistExercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub sets: Vec<PlannedSet>,
}

impl PlaylistExercise {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_count(&self) -> u32 {
        self.sets.len() as u32
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn completed_sets(&self) -> u32 {
        self.sets.iter().filter(|s| s.completed).count() as u32
    }

    /// Completion in percent. `0` for an exercise without sets.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion(&self) -> f32 {
        if self.sets.is_empty() {
            0.0
        } else {
            self.completed_sets() as f32 / self.set_count() as f32 * 100.0
        }
    }
}

/// One unit of an exercise (a given weight and reps), individually markable
/// complete.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSet {
    pub id: SetID,
    pub weight: f32,
    pub reps: u32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}
