use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{
    agent::Role,
    data_model::{Action, Board, Rank, Reward},
    game_logic::execute_action,
};

/// Placements made on the empty board before the first slide.
pub const OPENING_PLACEMENTS: usize = 9;

/// One game in progress: the board plus what has been played on it.
#[derive(Debug, Clone)]
pub struct Episode {
    board: Board,
    score: Reward,
    steps: usize,
    slides: usize,
    started: Instant,
}

/// What is kept of a finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub tag: String,
    pub score: Reward,
    pub steps: usize,
    pub slides: usize,
    pub max_rank: Rank,
    pub duration: Duration,
}

impl Default for Episode {
    fn default() -> Self {
        Self::new()
    }
}

impl Episode {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            score: 0,
            steps: 0,
            slides: 0,
            started: Instant::now(),
        }
    }

    pub fn state(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Reward {
        self.score
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn slides(&self) -> usize {
        self.slides
    }

    /// The placer opens the game, after that the two roles alternate.
    pub fn take_turns(&self) -> Role {
        if (self.steps + 1).max(OPENING_PLACEMENTS) % 2 == 1 {
            Role::Placer
        } else {
            Role::Slider
        }
    }

    /// Role that made the most recent move.
    pub fn last_turns(&self) -> Role {
        self.take_turns().opponent()
    }

    /// Returns false, leaving the episode untouched, when the board rejects the action.
    pub fn apply_action(&mut self, action: &Action) -> bool {
        let Some(reward) = execute_action(&mut self.board, action) else {
            return false;
        };
        self.score += reward;
        self.steps += 1;
        if matches!(action, Action::Slide(_)) {
            self.slides += 1;
        }
        true
    }

    pub fn finish(&self, tag: &str) -> EpisodeRecord {
        EpisodeRecord {
            tag: tag.to_string(),
            score: self.score,
            steps: self.steps,
            slides: self.slides,
            max_rank: self.board.max_rank(),
            duration: self.started.elapsed(),
        }
    }
}
