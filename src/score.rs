//! Score/streak tracker.
//!
//! A plain value: callers pass the current card in and store the returned
//! one. Score and correct count only grow; the streak drops to zero on a
//! wrong answer.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u32,
    pub correct_count: u32,
    pub attempts: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl ScoreCard {
    pub fn on_correct(self, increment: u32) -> Self {
        let streak = self.streak.saturating_add(1);
        Self {
            score: self.score.saturating_add(increment),
            correct_count: self.correct_count.saturating_add(1),
            attempts: self.attempts.saturating_add(1),
            streak,
            best_streak: self.best_streak.max(streak),
        }
    }

    pub fn on_incorrect(self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            streak: 0,
            ..self
        }
    }

    pub fn record(self, correct: bool, increment: u32) -> Self {
        if correct {
            self.on_correct(increment)
        } else {
            self.on_incorrect()
        }
    }

    /// New session / new quiz.
    pub fn reset() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answers_grow_score_and_streak() {
        let card = ScoreCard::default().on_correct(10).on_correct(10);
        assert_eq!(card.score, 20);
        assert_eq!(card.correct_count, 2);
        assert_eq!(card.streak, 2);
        assert_eq!(card.best_streak, 2);
        assert_eq!(card.attempts, 2);
    }

    #[test]
    fn wrong_answer_resets_streak_only() {
        let card = ScoreCard::default().on_correct(5).on_correct(5).on_incorrect();
        assert_eq!(card.score, 10);
        assert_eq!(card.correct_count, 2);
        assert_eq!(card.streak, 0);
        assert_eq!(card.best_streak, 2);
        assert_eq!(card.attempts, 3);
    }

    #[test]
    fn score_is_monotonic_over_any_sequence() {
        let outcomes = [true, false, false, true, true, true, false, true];
        let mut card = ScoreCard::default();
        for ok in outcomes {
            let next = card.record(ok, 10);
            assert!(next.score >= card.score);
            assert!(next.correct_count >= card.correct_count);
            card = next;
        }
        assert_eq!(card.score, 50);
        assert_eq!(card.streak, 1);
        assert_eq!(card.best_streak, 3);
    }

    #[test]
    fn reset_clears_everything() {
        assert_eq!(ScoreCard::reset(), ScoreCard::default());
    }
}
