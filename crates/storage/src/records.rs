use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;
use vigor_domain::{self as domain, CreateError, DeleteError, ReadError, UpdateError};

use crate::{Collection, DocumentStore, documents, documents::DocumentError};

/// Repository implementation on top of a [`DocumentStore`], scoped to one
/// user. Documents are parsed and validated once on read; the domain layer
/// never sees raw documents.
pub struct Records<S> {
    store: S,
    user_id: domain::UserID,
}

fn parse<V, R>(value: Value) -> Result<R, DocumentError>
where
    V: DeserializeOwned,
    R: TryFrom<V>,
    DocumentError: From<<R as TryFrom<V>>::Error>,
{
    Ok(R::try_from(serde_json::from_value::<V>(value)?)?)
}

impl<S: DocumentStore> Records<S> {
    pub fn new(store: S, user_id: domain::UserID) -> Self {
        Self { store, user_id }
    }

    async fn read_all<V, R>(&self, collection: Collection) -> Result<Vec<R>, ReadError>
    where
        V: DeserializeOwned,
        R: TryFrom<V>,
        DocumentError: From<<R as TryFrom<V>>::Error>,
    {
        self.store
            .read_documents(collection)
            .await?
            .into_iter()
            .map(|value| parse::<V, R>(value).map_err(ReadError::from))
            .collect()
    }

    async fn put<D: serde::Serialize>(
        &self,
        collection: Collection,
        id: Uuid,
        document: &D,
    ) -> Result<(), UpdateError> {
        let value = serde_json::to_value(document)
            .map_err(|err| UpdateError::from(DocumentError::from(err)))?;
        Ok(self
            .store
            .put_document(collection, &id.to_string(), value)
            .await?)
    }

    async fn exists(&self, collection: Collection, id: Uuid) -> Result<bool, UpdateError> {
        Ok(self
            .store
            .read_document(collection, &id.to_string())
            .await?
            .is_some())
    }
}

impl<S: DocumentStore> domain::ProfileRepository for Records<S> {
    async fn read_profile(&self) -> Result<Option<domain::UserProfile>, ReadError> {
        Ok(self
            .read_all::<documents::UserProfile, domain::UserProfile>(Collection::UserProfiles)
            .await?
            .into_iter()
            .find(|p| p.id == self.user_id))
    }

    async fn create_profile(
        &self,
        profile: domain::UserProfile,
    ) -> Result<domain::UserProfile, CreateError> {
        let now = Utc::now();
        let profile = domain::UserProfile {
            id: self.user_id,
            created_at: now,
            updated_at: now,
            ..profile
        };
        self.put(
            Collection::UserProfiles,
            *profile.id,
            &documents::UserProfile::from(&profile),
        )
        .await
        .map_err(CreateError::from)?;
        Ok(profile)
    }

    async fn replace_profile(
        &self,
        profile: domain::UserProfile,
    ) -> Result<domain::UserProfile, UpdateError> {
        let existing = self
            .read_profile()
            .await
            .map_err(UpdateError::from)?
            .ok_or(UpdateError::Conflict)?;
        let profile = domain::UserProfile {
            id: self.user_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..profile
        };
        self.put(
            Collection::UserProfiles,
            *profile.id,
            &documents::UserProfile::from(&profile),
        )
        .await?;
        Ok(profile)
    }

    async fn delete_profile(&self, id: domain::UserID) -> Result<domain::UserID, DeleteError> {
        self.store
            .delete_document(Collection::UserProfiles, &id.to_string())
            .await?;
        Ok(id)
    }
}

impl<S: DocumentStore> domain::WorkoutRepository for Records<S> {
    async fn read_workouts(&self) -> Result<Vec<domain::WorkoutRecord>, ReadError> {
        Ok(self
            .read_all::<documents::Workout, domain::WorkoutRecord>(Collection::Workouts)
            .await?
            .into_iter()
            .filter(|w| w.user_id == self.user_id)
            .collect())
    }

    async fn create_workout(
        &self,
        workout_type: domain::WorkoutType,
        date: DateTime<Utc>,
        notes: Option<String>,
        exercises: Vec<domain::ExerciseEntry>,
        cardio: Vec<domain::CardioEntry>,
        duration_min: u32,
    ) -> Result<domain::WorkoutRecord, CreateError> {
        let now = Utc::now();
        let workout = domain::WorkoutRecord {
            id: Uuid::new_v4().into(),
            user_id: self.user_id,
            workout_type,
            date,
            notes,
            exercises,
            cardio,
            duration_min,
            created_at: now,
            updated_at: now,
        };
        self.put(
            Collection::Workouts,
            *workout.id,
            &documents::Workout::from(&workout),
        )
        .await
        .map_err(CreateError::from)?;
        Ok(workout)
    }

    async fn replace_workout(
        &self,
        workout: domain::WorkoutRecord,
    ) -> Result<domain::WorkoutRecord, UpdateError> {
        if !self.exists(Collection::Workouts, *workout.id).await? {
            return Err(UpdateError::Conflict);
        }
        let workout = domain::WorkoutRecord {
            user_id: self.user_id,
            updated_at: Utc::now(),
            ..workout
        };
        self.put(
            Collection::Workouts,
            *workout.id,
            &documents::Workout::from(&workout),
        )
        .await?;
        Ok(workout)
    }

    async fn delete_workout(&self, id: domain::WorkoutID) -> Result<domain::WorkoutID, DeleteError> {
        self.store
            .delete_document(Collection::Workouts, &id.to_string())
            .await?;
        Ok(id)
    }
}

impl<S: DocumentStore> domain::PlaylistRepository for Records<S> {
    async fn read_playlists(&self) -> Result<Vec<domain::WorkoutPlaylist>, ReadError> {
        self.read_all::<documents::Playlist, domain::WorkoutPlaylist>(Collection::Playlists)
            .await
    }

    async fn create_playlist(
        &self,
        name: domain::Name,
        description: Option<String>,
        exercises: Vec<domain::PlaylistExercise>,
    ) -> Result<domain::WorkoutPlaylist, CreateError> {
        let now = Utc::now();
        let playlist = domain::WorkoutPlaylist {
            id: Uuid::new_v4().into(),
            name,
            description,
            exercises,
            created_at: now,
            updated_at: now,
        };
        self.put(
            Collection::Playlists,
            *playlist.id,
            &documents::Playlist::from(&playlist),
        )
        .await
        .map_err(CreateError::from)?;
        Ok(playlist)
    }

    async fn replace_playlist(
        &self,
        playlist: domain::WorkoutPlaylist,
    ) -> Result<domain::WorkoutPlaylist, UpdateError> {
        if !self.exists(Collection::Playlists, *playlist.id).await? {
            return Err(UpdateError::Conflict);
        }
        let playlist = domain::WorkoutPlaylist {
            updated_at: Utc::now(),
            ..playlist
        };
        self.put(
            Collection::Playlists,
            *playlist.id,
            &documents::Playlist::from(&playlist),
        )
        .await?;
        Ok(playlist)
    }

    async fn delete_playlist(
        &self,
        id: domain::PlaylistID,
    ) -> Result<domain::PlaylistID, DeleteError> {
        self.store
            .delete_document(Collection::Playlists, &id.to_string())
            .await?;
        Ok(id)
    }
}

impl<S: DocumentStore> domain::ScheduleRepository for Records<S> {
    async fn read_scheduled_workouts(&self) -> Result<Vec<domain::ScheduledWorkout>, ReadError> {
        self.read_all::<documents::ScheduledWorkout, domain::ScheduledWorkout>(
            Collection::ScheduledWorkouts,
        )
        .await
    }

    async fn create_scheduled_workout(
        &self,
        playlist_id: domain::PlaylistID,
        date: DateTime<Utc>,
    ) -> Result<domain::ScheduledWorkout, CreateError> {
        let scheduled_workout = domain::ScheduledWorkout {
            id: Uuid::new_v4().into(),
            playlist_id,
            date,
            completed: false,
            completed_at: None,
            progress: 0.0,
        };
        self.put(
            Collection::ScheduledWorkouts,
            *scheduled_workout.id,
            &documents::ScheduledWorkout::from(&scheduled_workout),
        )
        .await
        .map_err(CreateError::from)?;
        Ok(scheduled_workout)
    }

    async fn replace_scheduled_workout(
        &self,
        scheduled_workout: domain::ScheduledWorkout,
    ) -> Result<domain::ScheduledWorkout, UpdateError> {
        if !self
            .exists(Collection::ScheduledWorkouts, *scheduled_workout.id)
            .await?
        {
            return Err(UpdateError::Conflict);
        }
        self.put(
            Collection::ScheduledWorkouts,
            *scheduled_workout.id,
            &documents::ScheduledWorkout::from(&scheduled_workout),
        )
        .await?;
        Ok(scheduled_workout)
    }

    async fn delete_scheduled_workout(
        &self,
        id: domain::ScheduledWorkoutID,
    ) -> Result<domain::ScheduledWorkoutID, DeleteError> {
        self.store
            .delete_document(Collection::ScheduledWorkouts, &id.to_string())
            .await?;
        Ok(id)
    }
}

impl<S: DocumentStore> domain::WeekRepository for Records<S> {
    async fn read_weeks(&self) -> Result<Vec<domain::WorkoutWeek>, ReadError> {
        self.read_all::<documents::Week, domain::WorkoutWeek>(Collection::WorkoutWeeks)
            .await
    }

    async fn create_week(
        &self,
        name: domain::Name,
        schedule: BTreeMap<domain::DayOfWeek, domain::PlaylistID>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_template: bool,
    ) -> Result<domain::WorkoutWeek, CreateError> {
        let week = domain::WorkoutWeek {
            id: Uuid::new_v4().into(),
            name,
            description: None,
            schedule,
            start_date,
            end_date,
            is_template,
        };
        self.put(
            Collection::WorkoutWeeks,
            *week.id,
            &documents::Week::from(&week),
        )
        .await
        .map_err(CreateError::from)?;
        Ok(week)
    }

    async fn replace_week(
        &self,
        week: domain::WorkoutWeek,
    ) -> Result<domain::WorkoutWeek, UpdateError> {
        if !self.exists(Collection::WorkoutWeeks, *week.id).await? {
            return Err(UpdateError::Conflict);
        }
        self.put(
            Collection::WorkoutWeeks,
            *week.id,
            &documents::Week::from(&week),
        )
        .await?;
        Ok(week)
    }

    async fn delete_week(&self, id: domain::WeekID) -> Result<domain::WeekID, DeleteError> {
        self.store
            .delete_document(Collection::WorkoutWeeks, &id.to_string())
            .await?;
        Ok(id)
    }
}

impl<S: DocumentStore> domain::CycleRepository for Records<S> {
    async fn read_cycles(&self) -> Result<Vec<domain::WorkoutCycle>, ReadError> {
        self.read_all::<documents::Cycle, domain::WorkoutCycle>(Collection::WorkoutCycles)
            .await
    }

    async fn create_cycle(
        &self,
        name: domain::Name,
        weeks: Vec<domain::WorkoutWeek>,
        auto_rotate: bool,
    ) -> Result<domain::WorkoutCycle, CreateError> {
        let now = Utc::now();
        let cycle = domain::WorkoutCycle {
            id: Uuid::new_v4().into(),
            name,
            description: None,
            weeks,
            current_week_index: 0,
            auto_rotate,
            created_at: now,
            updated_at: now,
        };
        self.put(
            Collection::WorkoutCycles,
            *cycle.id,
            &documents::Cycle::from(&cycle),
        )
        .await
        .map_err(CreateError::from)?;
        Ok(cycle)
    }

    async fn replace_cycle(
        &self,
        cycle: domain::WorkoutCycle,
    ) -> Result<domain::WorkoutCycle, UpdateError> {
        if !self.exists(Collection::WorkoutCycles, *cycle.id).await? {
            return Err(UpdateError::Conflict);
        }
        let cycle = domain::WorkoutCycle {
            updated_at: Utc::now(),
            ..cycle
        };
        self.put(
            Collection::WorkoutCycles,
            *cycle.id,
            &documents::Cycle::from(&cycle),
        )
        .await?;
        Ok(cycle)
    }

    async fn delete_cycle(&self, id: domain::CycleID) -> Result<domain::CycleID, DeleteError> {
        self.store
            .delete_document(Collection::WorkoutCycles, &id.to_string())
            .await?;
        Ok(id)
    }
}

impl<S: DocumentStore> domain::ProgressRepository for Records<S> {
    async fn read_progress_summary(&self) -> Result<Option<domain::ProgressSummary>, ReadError> {
        self.store
            .read_document(Collection::Progress, &self.user_id.to_string())
            .await?
            .map(|value| {
                parse::<documents::ProgressSummary, domain::ProgressSummary>(value)
                    .map_err(ReadError::from)
            })
            .transpose()
    }

    async fn replace_progress_summary(
        &self,
        summary: domain::ProgressSummary,
    ) -> Result<domain::ProgressSummary, UpdateError> {
        self.put(
            Collection::Progress,
            *self.user_id,
            &documents::ProgressSummary::from(&summary),
        )
        .await?;
        Ok(summary)
    }
}
