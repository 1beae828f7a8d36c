//! High score leaderboard
//!
//! Tracks the best runs of the current process. Scores are never written
//! to disk; a restart of the host starts a fresh board.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Frames survived
    pub frames: u64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, score: u64, frames: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, frames };

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::debug!("Leaderboard: score {score} placed #{rank}");

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut board = HighScores::new();
        assert!(!board.qualifies(0));
        assert_eq!(board.add_score(0, 100), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_sorted_insertion_and_rank() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(500, 10), Some(1));
        assert_eq!(board.add_score(900, 20), Some(1));
        assert_eq!(board.add_score(700, 30), Some(2));
        assert_eq!(board.add_score(700, 40), Some(3));
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 700, 700, 500]);
        assert_eq!(board.top_score(), Some(900));
        assert_eq!(board.potential_rank(800), Some(2));
    }

    #[test]
    fn test_board_is_capped() {
        let mut board = HighScores::new();
        for score in 1..=(MAX_HIGH_SCORES as u64 + 5) {
            board.add_score(score * 10, score);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(10));
        assert_eq!(board.potential_rank(10_000), Some(1));
        assert_eq!(board.entries.last().map(|e| e.score), Some(60));
    }
}
