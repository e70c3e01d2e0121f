use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::{debug, error};

use crate::{
    CardioEntry, CreateError, CycleID, CycleRepository, CycleService, DayOfWeek, DeleteError,
    ExerciseEntry, ExerciseID, MuscleGroup, Name, PlaylistExercise, PlaylistID,
    PlaylistRepository, PlaylistService, ProfileRepository, ProfileService, ProgressRepository,
    ProgressResult, ProgressService, ProgressSummary, ReadError, ScheduleRepository,
    ScheduleService, ScheduledWorkout, ScheduledWorkoutID, SetID, UpdateError, UserID,
    UserProfile, WeekID, WeekRepository, WeekService, WorkoutCycle, WorkoutID, WorkoutPlaylist,
    WorkoutRecord, WorkoutRepository, WorkoutService, WorkoutType, WorkoutWeek, progress_summary,
    todays_scheduled_workout, weekly_progress,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Result<Option<UserProfile>, ReadError> {
        log_on_error!(self.repository.read_profile(), ReadError, "read", "profile")
    }

    async fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, CreateError> {
        let existing =
            log_on_error!(self.repository.read_profile(), ReadError, "read", "profile")?;
        if existing.is_some() {
            Ok(log_on_error!(
                self.repository.replace_profile(profile),
                UpdateError,
                "replace",
                "profile"
            )?)
        } else {
            log_on_error!(
                self.repository.create_profile(profile),
                CreateError,
                "create",
                "profile"
            )
        }
    }

    async fn delete_profile(&self, id: UserID) -> Result<UserID, DeleteError> {
        log_on_error!(
            self.repository.delete_profile(id),
            DeleteError,
            "delete",
            "profile"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<WorkoutRecord>, ReadError> {
        let mut workouts = log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "read",
            "workouts"
        )?;
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workouts)
    }

    async fn create_workout(
        &self,
        workout_type: WorkoutType,
        date: DateTime<Utc>,
        notes: Option<String>,
        exercises: Vec<ExerciseEntry>,
        cardio: Vec<CardioEntry>,
        duration_min: u32,
    ) -> Result<WorkoutRecord, CreateError> {
        log_on_error!(
            self.repository
                .create_workout(workout_type, date, notes, exercises, cardio, duration_min),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: WorkoutRecord) -> Result<WorkoutRecord, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: PlaylistRepository> PlaylistService for Service<R> {
    async fn get_playlists(&self) -> Result<Vec<WorkoutPlaylist>, ReadError> {
        log_on_error!(
            self.repository.read_playlists(),
            ReadError,
            "read",
            "playlists"
        )
    }

    async fn create_playlist(
        &self,
        name: Name,
        description: Option<String>,
        exercises: Vec<PlaylistExercise>,
    ) -> Result<WorkoutPlaylist, CreateError> {
        log_on_error!(
            self.repository.create_playlist(name, description, exercises),
            CreateError,
            "create",
            "playlist"
        )
    }

    async fn replace_playlist(
        &self,
        playlist: WorkoutPlaylist,
    ) -> Result<WorkoutPlaylist, UpdateError> {
        log_on_error!(
            self.repository.replace_playlist(playlist),
            UpdateError,
            "replace",
            "playlist"
        )
    }

    async fn delete_playlist(&self, id: PlaylistID) -> Result<PlaylistID, DeleteError> {
        log_on_error!(
            self.repository.delete_playlist(id),
            DeleteError,
            "delete",
            "playlist"
        )
    }
}

impl<R> ScheduleService for Service<R>
where
    R: ScheduleRepository
        + PlaylistRepository
        + WorkoutRepository
        + ProfileRepository
        + ProgressRepository,
{
    async fn get_scheduled_workouts(&self) -> Result<Vec<ScheduledWorkout>, ReadError> {
        log_on_error!(
            self.repository.read_scheduled_workouts(),
            ReadError,
            "read",
            "scheduled workouts"
        )
    }

    async fn schedule_workout(
        &self,
        playlist_id: PlaylistID,
        date: DateTime<Utc>,
    ) -> Result<ScheduledWorkout, CreateError> {
        log_on_error!(
            self.repository.create_scheduled_workout(playlist_id, date),
            CreateError,
            "create",
            "scheduled workout"
        )
    }

    async fn get_todays_workout(
        &self,
        today: NaiveDate,
    ) -> Result<Option<ScheduledWorkout>, ReadError> {
        let scheduled_workouts = log_on_error!(
            self.repository.read_scheduled_workouts(),
            ReadError,
            "read",
            "scheduled workouts"
        )?;
        Ok(todays_scheduled_workout(&scheduled_workouts, today).cloned())
    }

    /// Marks one set of today's playlist as complete and propagates the
    /// change through three sequential writes: the playlist, the scheduled
    /// workout's recomputed progress, and the stored progress summary. The
    /// writes are individually retriable; a failure in a later write leaves
    /// the earlier ones in place and the whole operation can be re-run.
    /// Unknown ids make the operation a no-op.
    async fn complete_set(
        &self,
        id: ScheduledWorkoutID,
        exercise_id: ExerciseID,
        set_id: SetID,
        now: DateTime<Utc>,
    ) -> Result<Option<ScheduledWorkout>, UpdateError> {
        let scheduled_workouts = log_on_error!(
            self.repository.read_scheduled_workouts(),
            ReadError,
            "read",
            "scheduled workouts"
        )?;
        let Some(mut scheduled_workout) = scheduled_workouts.into_iter().find(|s| s.id == id)
        else {
            debug!("set completion for unknown scheduled workout ignored");
            return Ok(None);
        };

        let playlists = log_on_error!(
            self.repository.read_playlists(),
            ReadError,
            "read",
            "playlists"
        )?;
        let Some(mut playlist) = playlists
            .into_iter()
            .find(|p| p.id == scheduled_workout.playlist_id)
        else {
            debug!("set completion for unknown playlist ignored");
            return Ok(None);
        };

        if !playlist.complete_set(exercise_id, set_id, now) {
            debug!("set completion for unknown exercise or set ignored");
            return Ok(None);
        }

        let playlist = log_on_error!(
            self.repository.replace_playlist(playlist),
            UpdateError,
            "replace",
            "playlist"
        )?;

        scheduled_workout.apply_progress(&playlist, now);
        let scheduled_workout = log_on_error!(
            self.repository.replace_scheduled_workout(scheduled_workout),
            UpdateError,
            "replace",
            "scheduled workout"
        )?;

        let workouts = log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "read",
            "workouts"
        )?;
        let scheduled_workouts = log_on_error!(
            self.repository.read_scheduled_workouts(),
            ReadError,
            "read",
            "scheduled workouts"
        )?;
        let fitness_level =
            log_on_error!(self.repository.read_profile(), ReadError, "read", "profile")?
                .map(|p| p.fitness_level);
        log_on_error!(
            self.repository.replace_progress_summary(progress_summary(
                &workouts,
                &scheduled_workouts,
                fitness_level,
                now
            )),
            UpdateError,
            "replace",
            "progress summary"
        )?;

        Ok(Some(scheduled_workout))
    }

    async fn delete_scheduled_workout(
        &self,
        id: ScheduledWorkoutID,
    ) -> Result<ScheduledWorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_scheduled_workout(id),
            DeleteError,
            "delete",
            "scheduled workout"
        )
    }
}

impl<R: WeekRepository> WeekService for Service<R> {
    async fn get_weeks(&self) -> Result<Vec<WorkoutWeek>, ReadError> {
        log_on_error!(self.repository.read_weeks(), ReadError, "read", "weeks")
    }

    async fn create_week(
        &self,
        name: Name,
        schedule: BTreeMap<DayOfWeek, PlaylistID>,
        start_date: NaiveDate,
    ) -> Result<WorkoutWeek, CreateError> {
        log_on_error!(
            self.repository.create_week(
                name,
                schedule,
                start_date,
                start_date + Duration::days(7),
                true
            ),
            CreateError,
            "create",
            "week"
        )
    }

    async fn replace_week(&self, week: WorkoutWeek) -> Result<WorkoutWeek, UpdateError> {
        log_on_error!(
            self.repository.replace_week(week),
            UpdateError,
            "replace",
            "week"
        )
    }

    async fn delete_week(&self, id: WeekID) -> Result<WeekID, DeleteError> {
        log_on_error!(
            self.repository.delete_week(id),
            DeleteError,
            "delete",
            "week"
        )
    }
}

impl<R: CycleRepository> CycleService for Service<R> {
    async fn get_cycles(&self) -> Result<Vec<WorkoutCycle>, ReadError> {
        log_on_error!(self.repository.read_cycles(), ReadError, "read", "cycles")
    }

    async fn create_cycle(
        &self,
        name: Name,
        weeks: Vec<WorkoutWeek>,
        auto_rotate: bool,
    ) -> Result<WorkoutCycle, CreateError> {
        log_on_error!(
            self.repository.create_cycle(name, weeks, auto_rotate),
            CreateError,
            "create",
            "cycle"
        )
    }

    async fn replace_cycle(&self, cycle: WorkoutCycle) -> Result<WorkoutCycle, UpdateError> {
        log_on_error!(
            self.repository.replace_cycle(cycle),
            UpdateError,
            "replace",
            "cycle"
        )
    }

    async fn advance_cycle(&self, id: CycleID) -> Result<Option<WorkoutCycle>, UpdateError> {
        let cycles = log_on_error!(self.repository.read_cycles(), ReadError, "read", "cycles")?;
        let Some(mut cycle) = cycles.into_iter().find(|c| c.id == id) else {
            debug!("advancing unknown cycle ignored");
            return Ok(None);
        };
        cycle.advance_week();
        Ok(Some(log_on_error!(
            self.repository.replace_cycle(cycle),
            UpdateError,
            "replace",
            "cycle"
        )?))
    }

    async fn delete_cycle(&self, id: CycleID) -> Result<CycleID, DeleteError> {
        log_on_error!(
            self.repository.delete_cycle(id),
            DeleteError,
            "delete",
            "cycle"
        )
    }
}

impl<R> ProgressService for Service<R>
where
    R: WorkoutRepository + ProfileRepository + ScheduleRepository,
{
    async fn get_weekly_progress(
        &self,
        muscle_group: MuscleGroup,
        now: DateTime<Utc>,
    ) -> Result<ProgressResult, ReadError> {
        let fitness_level =
            log_on_error!(self.repository.read_profile(), ReadError, "read", "profile")?
                .map(|p| p.fitness_level);
        let workouts = log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "read",
            "workouts"
        )?;
        Ok(weekly_progress(&workouts, muscle_group, fitness_level, now))
    }

    async fn get_progress_summary(&self, now: DateTime<Utc>) -> Result<ProgressSummary, ReadError> {
        let fitness_level =
            log_on_error!(self.repository.read_profile(), ReadError, "read", "profile")?
                .map(|p| p.fitness_level);
        let workouts = log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "read",
            "workouts"
        )?;
        let scheduled_workouts = log_on_error!(
            self.repository.read_scheduled_workouts(),
            ReadError,
            "read",
            "scheduled workouts"
        )?;
        Ok(progress_summary(
            &workouts,
            &scheduled_workouts,
            fitness_level,
            now,
        ))
    }
}
