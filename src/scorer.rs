use crate::difficulty::Difficulty;

/// Bonus for solving the word with a single turn.
pub const FIRST_TURN_BONUS: i32 = 15;
/// Points per turn left unused out of the difficulty's lives.
pub const TURNS_LEFT_CONVERSION: i32 = 2;
/// Points per step of the difficulty multiplier.
pub const DIFFICULTY_CONVERSION: i32 = 5;

/// Points earned for winning a game in `turns_used` turns.
///
/// Turns past the difficulty's lives count against the player, so the result
/// can go below the difficulty bonus.
#[must_use]
pub fn score_for(turns_used: u32, difficulty: Difficulty) -> i32 {
    let turns = i32::try_from(turns_used).unwrap_or(i32::MAX);
    let lives = i32::try_from(difficulty.lives()).unwrap_or(i32::MAX);

    let mut score = 0;
    if turns == 1 {
        score += FIRST_TURN_BONUS;
    }
    score += TURNS_LEFT_CONVERSION.saturating_mul(lives.saturating_sub(turns));
    score += DIFFICULTY_CONVERSION * difficulty.multiplier();
    score
}

/// Running point total for a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scorer {
    total: i32,
}

impl Scorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the points for a won game to the total and returns them.
    pub fn record(&mut self, turns_used: u32, difficulty: Difficulty) -> i32 {
        let points = score_for(turns_used, difficulty);
        self.total = self.total.saturating_add(points);
        points
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.total
    }
}
