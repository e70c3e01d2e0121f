#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod cycle;
mod error;
mod muscle;
mod name;
mod playlist;
mod profile;
mod progress;
mod schedule;
mod service;
mod week;
mod workout;

pub use cycle::{CycleID, CycleRepository, CycleService, WorkoutCycle};
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError};
pub use muscle::{MuscleGroup, MuscleGroupError};
pub use name::{Name, NameError};
pub use playlist::{
    PlannedSet, PlaylistExercise, PlaylistID, PlaylistRepository, PlaylistService, WorkoutPlaylist,
};
pub use profile::{
    FitnessGoal, FitnessLevel, ProfileRepository, ProfileService, UserID, UserProfile,
};
pub use progress::{
    ProgressRepository, ProgressResult, ProgressService, ProgressSummary, progress_summary,
    streak, weekly_progress, weekly_set_target,
};
pub use schedule::{
    ScheduleRepository, ScheduleService, ScheduledWorkout, ScheduledWorkoutID,
    todays_scheduled_workout,
};
pub use service::Service;
pub use week::{DayOfWeek, DayOfWeekError, WeekID, WeekRepository, WeekService, WorkoutWeek};
pub use workout::{
    CardioEntry, ExerciseEntry, ExerciseID, RecordedSet, SetID, WorkoutID, WorkoutRecord,
    WorkoutRepository, WorkoutService, WorkoutType,
};
