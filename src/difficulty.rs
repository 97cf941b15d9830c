use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LIVES_ON_EASY: u32 = 20;
pub const LIVES_ON_MEDIUM: u32 = 14;
pub const LIVES_ON_HARD: u32 = 10;
pub const LIVES_ON_EXTREME: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Lives the player starts with, which is also the number of turns the
    /// scorer measures against.
    #[must_use]
    pub fn lives(self) -> u32 {
        match self {
            Difficulty::Easy => LIVES_ON_EASY,
            Difficulty::Medium => LIVES_ON_MEDIUM,
            Difficulty::Hard => LIVES_ON_HARD,
            Difficulty::Extreme => LIVES_ON_EXTREME,
        }
    }

    #[must_use]
    pub fn multiplier(self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Extreme => 4,
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_per_difficulty() {
        assert_eq!(Difficulty::Easy.lives(), 20);
        assert_eq!(Difficulty::Medium.lives(), 14);
        assert_eq!(Difficulty::Hard.lives(), 10);
        assert_eq!(Difficulty::Extreme.lives(), 6);
    }

    #[test]
    fn test_multiplier_increases_with_difficulty() {
        let multipliers: Vec<i32> = Difficulty::ALL.iter().map(|d| d.multiplier()).collect();
        assert_eq!(multipliers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Difficulty::Extreme).unwrap();
        assert_eq!(json, "\"extreme\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
    }
}
