//! Achievement definitions and metadata
//!
//! The fixed catalog of unlockable achievements with their display data.

use crate::models::AchievementCategory;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    /// 10 quests completed
    FirstTen,
    /// 7-day completion streak
    WeekStreak,
    /// Reached level 5
    LevelFive,
    /// Quests across 5 distinct categories
    DiverseQuests,
    /// First level increase
    LevelUp,
}

impl AchievementId {
    /// Get the string id used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTen => "first_10",
            Self::WeekStreak => "week_streak",
            Self::LevelFive => "level_5",
            Self::DiverseQuests => "diverse_quests",
            Self::LevelUp => "level_up",
        }
    }

    /// Parse from a stored string id
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_10" => Some(Self::FirstTen),
            "week_streak" => Some(Self::WeekStreak),
            "level_5" => Some(Self::LevelFive),
            "diverse_quests" => Some(Self::DiverseQuests),
            "level_up" => Some(Self::LevelUp),
            _ => None,
        }
    }

    /// Get all achievement ids
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstTen,
            Self::WeekStreak,
            Self::LevelFive,
            Self::DiverseQuests,
            Self::LevelUp,
        ]
    }
}

/// Achievement definition with all display metadata
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
}

/// All achievement definitions
pub static DEFINITIONS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstTen,
        name: "Quest Novice",
        description: "Complete your first 10 quests!",
        icon: "🎯",
        category: AchievementCategory::Milestone,
    },
    AchievementDef {
        id: AchievementId::WeekStreak,
        name: "Consistency Master",
        description: "Maintain a 7-day quest streak!",
        icon: "🔥",
        category: AchievementCategory::Consistency,
    },
    AchievementDef {
        id: AchievementId::LevelFive,
        name: "Rising Star",
        description: "Reach level 5!",
        icon: "⭐",
        category: AchievementCategory::Milestone,
    },
    AchievementDef {
        id: AchievementId::DiverseQuests,
        name: "Quest Explorer",
        description: "Complete quests in 5 different categories!",
        icon: "🗺️",
        category: AchievementCategory::Productivity,
    },
    AchievementDef {
        id: AchievementId::LevelUp,
        name: "Level Up",
        description: "Level up!",
        icon: "⬆️",
        category: AchievementCategory::Milestone,
    },
];

impl AchievementDef {
    /// Get achievement definition by id
    pub fn get(id: AchievementId) -> &'static AchievementDef {
        DEFINITIONS
            .iter()
            .find(|d| d.id == id)
            .expect("All achievements should be defined")
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        DEFINITIONS.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_a_definition() {
        for id in AchievementId::all() {
            let def = AchievementDef::get(*id);
            assert_eq!(def.id, *id);
            assert!(!def.name.is_empty());
        }
        assert_eq!(AchievementDef::total_count(), AchievementId::all().len());
    }

    #[test]
    fn test_id_roundtrip() {
        for id in AchievementId::all() {
            assert_eq!(AchievementId::from_str(id.as_str()), Some(*id));
        }
        assert_eq!(AchievementId::from_str("unknown"), None);
    }
}
