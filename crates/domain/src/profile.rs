use std::{fmt, slice::Iter};

use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<Option<UserProfile>, ReadError>;
    async fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, CreateError>;
    async fn delete_profile(&self, id: UserID) -> Result<UserID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Option<UserProfile>, ReadError>;
    async fn create_profile(&self, profile: UserProfile) -> Result<UserProfile, CreateError>;
    async fn replace_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError>;
    async fn delete_profile(&self, id: UserID) -> Result<UserID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserID,
    pub name: Name,
    pub fitness_level: FitnessLevel,
    pub fitness_goal: FitnessGoal,
    pub weight: Option<f32>,
    pub height: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn iter() -> Iter<'static, FitnessLevel> {
        static FITNESS_LEVELS: [FitnessLevel; 3] = [
            FitnessLevel::Beginner,
            FitnessLevel::Intermediate,
            FitnessLevel::Advanced,
        ];
        FITNESS_LEVELS.iter()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }
}

impl From<&str> for FitnessLevel {
    // Unknown levels deliberately map to the lowest targets.
    fn from(value: &str) -> Self {
        match value {
            "Intermediate" => FitnessLevel::Intermediate,
            "Advanced" => FitnessLevel::Advanced,
            _ => FitnessLevel::Beginner,
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FitnessGoal {
    #[default]
    BuildMuscle,
    LoseWeight,
    Maintain,
    ImproveStrength,
    ImproveEndurance,
}

impl FitnessGoal {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FitnessGoal::BuildMuscle => "build_muscle",
            FitnessGoal::LoseWeight => "lose_weight",
            FitnessGoal::Maintain => "maintain",
            FitnessGoal::ImproveStrength => "improve_strength",
            FitnessGoal::ImproveEndurance => "improve_endurance",
        }
    }
}

impl From<&str> for FitnessGoal {
    fn from(value: &str) -> Self {
        match value {
            "lose_weight" => FitnessGoal::LoseWeight,
            "maintain" => FitnessGoal::Maintain,
            "improve_strength" => FitnessGoal::ImproveStrength,
            "improve_endurance" => FitnessGoal::ImproveEndurance,
            _ => FitnessGoal::BuildMuscle,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_user_id_nil() {
        assert!(UserID::nil().is_nil());
        assert_eq!(UserID::nil(), UserID::default());
    }

    #[rstest]
    #[case("Beginner", FitnessLevel::Beginner)]
    #[case("Intermediate", FitnessLevel::Intermediate)]
    #[case("Advanced", FitnessLevel::Advanced)]
    #[case("Elite", FitnessLevel::Beginner)]
    #[case("", FitnessLevel::Beginner)]
    fn test_fitness_level_from_str(#[case] value: &str, #[case] expected: FitnessLevel) {
        assert_eq!(FitnessLevel::from(value), expected);
    }

    #[test]
    fn test_fitness_level_round_trip() {
        for fitness_level in FitnessLevel::iter() {
            assert_eq!(FitnessLevel::from(fitness_level.as_str()), *fitness_level);
        }
    }

    #[rstest]
    #[case("build_muscle", FitnessGoal::BuildMuscle)]
    #[case("lose_weight", FitnessGoal::LoseWeight)]
    #[case("maintain", FitnessGoal::Maintain)]
    #[case("improve_strength", FitnessGoal::ImproveStrength)]
    #[case("improve_endurance", FitnessGoal::ImproveEndurance)]
    #[case("get_swole", FitnessGoal::BuildMuscle)]
    fn test_fitness_goal_from_str(#[case] value: &str, #[case] expected: FitnessGoal) {
        assert_eq!(FitnessGoal::from(value), expected);
    }
}
