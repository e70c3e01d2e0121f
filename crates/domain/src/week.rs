use std::{collections::BTreeMap, slice::Iter};

use chrono::{NaiveDate, Weekday};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, PlaylistID, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait WeekService {
    async fn get_weeks(&self) -> Result<Vec<WorkoutWeek>, ReadError>;
    async fn create_week(
        &self,
        name: Name,
        schedule: BTreeMap<DayOfWeek, PlaylistID>,
        start_date: NaiveDate,
    ) -> Result<WorkoutWeek, CreateError>;
    async fn replace_week(&self, week: WorkoutWeek) -> Result<WorkoutWeek, UpdateError>;
    async fn delete_week(&self, id: WeekID) -> Result<WeekID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WeekRepository {
    async fn read_weeks(&self) -> Result<Vec<WorkoutWeek>, ReadError>;
    async fn create_week(
        &self,
        name: Name,
        schedule: BTreeMap<DayOfWeek, PlaylistID>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_template: bool,
    ) -> Result<WorkoutWeek, CreateError>;
    async fn replace_week(&self, week: WorkoutWeek) -> Result<WorkoutWeek, UpdateError>;
    async fn delete_week(&self, id: WeekID) -> Result<WeekID, DeleteError>;
}

/// A weekly template assigning at most one playlist to each day.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutWeek {
    pub id: WeekID,
    pub name: Name,
    pub description: Option<String>,
    pub schedule: BTreeMap<DayOfWeek, PlaylistID>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_template: bool,
}

impl WorkoutWeek {
    #[must_use]
    pub fn playlist_for(&self, day: DayOfWeek) -> Option<PlaylistID> {
        self.schedule.get(&day).copied()
    }

    #[must_use]
    pub fn rest_days(&self) -> Vec<DayOfWeek> {
        DayOfWeek::iter()
            .filter(|d| !self.schedule.contains_key(d))
            .copied()
            .collect()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeekID(Uuid);

impl WeekID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WeekID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WeekID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn iter() -> Iter<'static, DayOfWeek> {
        static DAYS: [DayOfWeek; 7] = [
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
            DayOfWeek::Saturday,
            DayOfWeek::Sunday,
        ];
        DAYS.iter()
    }

    // Stable string form used by stored documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl TryFrom<&str> for DayOfWeek {
    type Error = DayOfWeekError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        DayOfWeek::iter()
            .find(|d| d.as_str() == value)
            .copied()
            .ok_or_else(|| DayOfWeekError::Unknown(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DayOfWeekError {
    #[error("Unknown day of week: {0}")]
    Unknown(String),
}
