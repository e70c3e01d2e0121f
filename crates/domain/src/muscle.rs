use std::slice::Iter;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MuscleGroup {
    Abs,
    Back,
    Biceps,
    Calves,
    Chest,
    Forearms,
    Glutes,
    Hamstrings,
    Neck,
    Quads,
    Shoulders,
    Triceps,
    UpperTraps,
}

impl MuscleGroup {
    pub fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 13] = [
            MuscleGroup::Abs,
            MuscleGroup::Back,
            MuscleGroup::Biceps,
            MuscleGroup::Calves,
            MuscleGroup::Chest,
            MuscleGroup::Forearms,
            MuscleGroup::Glutes,
            MuscleGroup::Hamstrings,
            MuscleGroup::Neck,
            MuscleGroup::Quads,
            MuscleGroup::Shoulders,
            MuscleGroup::Triceps,
            MuscleGroup::UpperTraps,
        ];
        MUSCLE_GROUPS.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Back => "Back",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Neck => "Neck",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::UpperTraps => "Upper Traps",
        }
    }

    // Stable string form used by stored documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::UpperTraps => "Upper traps",
            _ => self.name(),
        }
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = MuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleGroup::iter()
            .find(|m| m.as_str() == value)
            .copied()
            .ok_or_else(|| MuscleGroupError::Unknown(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Unknown muscle group: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_muscle_group_iter() {
        assert_eq!(MuscleGroup::iter().count(), 13);
    }

    #[test]
    fn test_muscle_group_try_from_str() {
        for muscle_group in MuscleGroup::iter() {
            assert_eq!(
                MuscleGroup::try_from(muscle_group.as_str()),
                Ok(*muscle_group)
            );
        }

        assert_eq!(
            MuscleGroup::try_from("Legs"),
            Err(MuscleGroupError::Unknown("Legs".to_string()))
        );
    }

    #[rstest]
    #[case(MuscleGroup::Chest, "Chest", "Chest")]
    #[case(MuscleGroup::UpperTraps, "Upper Traps", "Upper traps")]
    fn test_muscle_group_names(
        #[case] muscle_group: MuscleGroup,
        #[case] name: &str,
        #[case] stored: &str,
    ) {
        assert_eq!(muscle_group.name(), name);
        assert_eq!(muscle_group.as_str(), stored);
    }
}
