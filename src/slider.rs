use tracing::trace;

use crate::{
    agent::{Agent, Role},
    config::SliderConfig,
    data_model::{Action, Board, Direction, Reward},
    features::encode,
    game_logic::slide,
    trajectory::{Trajectory, TrajectoryEntry, TrajectoryError},
    value_function::ValueFunction,
};

/// Reward used in the estimate of a slide that leaves the board unchanged.
pub const ILLEGAL_REWARD: f32 = -1.0;

/// Outcome of sliding a private copy of the board in one direction.
#[derive(Debug, Clone)]
pub struct Afterstate {
    pub direction: Direction,
    pub reward: Option<Reward>,
    pub board: Board,
    pub estimate: f32,
}

impl Afterstate {
    pub fn new(board: &Board, direction: Direction, value_function: &ValueFunction) -> Self {
        let mut after = board.clone();
        let reward = slide(&mut after, direction);
        let base = reward.map_or(ILLEGAL_REWARD, |reward| reward as f32);
        let estimate = base + value_function.evaluate(&after);
        Self {
            direction,
            reward,
            board: after,
            estimate,
        }
    }

    pub fn is_legal(&self) -> bool {
        self.reward.is_some()
    }
}

/// One-ply lookahead over the four slides. An estimate of exactly zero is
/// taken immediately, without looking at the remaining directions.
pub fn select_afterstate(board: &Board, value_function: &ValueFunction) -> Afterstate {
    let mut best: Option<Afterstate> = None;
    let mut best_estimate = ILLEGAL_REWARD;
    for direction in Direction::iter() {
        let candidate = Afterstate::new(board, direction, value_function);
        if candidate.estimate == 0.0 {
            return candidate;
        }
        if candidate.estimate > best_estimate {
            best_estimate = candidate.estimate;
            best = Some(candidate);
        }
    }
    best.unwrap_or_else(|| Afterstate::new(board, Direction::Up, value_function))
}

/// Greedy afterstate player driven by the pattern tables.
#[derive(Debug, Clone)]
pub struct TdSlider {
    config: SliderConfig,
}

impl TdSlider {
    pub fn new(config: SliderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Picks a slide, or `None` when the chosen direction cannot move.
    ///
    /// With a trajectory the chosen afterstate is recorded: a legal slide as the
    /// next ply, an illegal one as the terminal afterstate.
    pub fn take_action(
        &mut self,
        board: &Board,
        value_function: &ValueFunction,
        trajectory: Option<&mut Trajectory>,
    ) -> Result<Option<Action>, TrajectoryError> {
        let chosen = select_afterstate(board, value_function);
        trace!(
            direction = chosen.direction.to_string(),
            estimate = chosen.estimate,
            legal = chosen.is_legal(),
            "Slider decision"
        );
        if let Some(trajectory) = trajectory {
            let codes = encode(&chosen.board);
            match chosen.reward {
                Some(reward) => trajectory.record_ply(TrajectoryEntry { codes, reward })?,
                None => trajectory.record_terminal(codes),
            }
        }
        Ok(chosen
            .is_legal()
            .then_some(Action::Slide(chosen.direction)))
    }
}

impl Agent for TdSlider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn role(&self) -> Role {
        Role::Slider
    }
}
