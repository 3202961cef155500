use thiserror::Error;

use crate::{data_model::Reward, features::FeatureCodes};

/// Slots per episode, the terminal afterstate included.
pub const TRAJECTORY_CAPACITY: usize = 10000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrajectoryError {
    #[error("trajectory is full ({capacity} slots)")]
    Full { capacity: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryEntry {
    pub codes: FeatureCodes,
    pub reward: Reward,
}

/// Afterstates chosen by the slider during one episode, in play order.
#[derive(Debug, Clone)]
pub struct Trajectory {
    plies: Vec<TrajectoryEntry>,
    terminal: Option<FeatureCodes>,
    capacity: usize,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Trajectory {
    pub fn new() -> Self {
        Self::with_capacity(TRAJECTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            plies: Vec::new(),
            terminal: None,
            capacity,
        }
    }

    /// Appends the afterstate of a legal slide and advances the ply counter.
    /// One slot always stays free for the terminal afterstate.
    pub fn record_ply(&mut self, entry: TrajectoryEntry) -> Result<(), TrajectoryError> {
        if self.plies.len() + 1 >= self.capacity {
            return Err(TrajectoryError::Full {
                capacity: self.capacity,
            });
        }
        self.plies.push(entry);
        Ok(())
    }

    /// Stores the game-over afterstate one slot past the last ply.
    pub fn record_terminal(&mut self, codes: FeatureCodes) {
        self.terminal = Some(codes);
    }

    pub fn plies(&self) -> &[TrajectoryEntry] {
        &self.plies
    }

    pub fn terminal(&self) -> Option<&FeatureCodes> {
        self.terminal.as_ref()
    }

    /// Number of recorded plies; the terminal slot is not counted.
    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }
}
