use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    agent::{Agent, Role},
    episode::{Episode, EpisodeRecord},
    game_logic::has_legal_slide,
    learner::{LearnReport, TdLearner},
    placer::RandomPlacer,
    render_board::render_board,
    slider::TdSlider,
    statistics::Statistics,
    trajectory::{Trajectory, TrajectoryError},
    value_function::ValueFunction,
};

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("episode rejected: {0}")]
    Trajectory(#[from] TrajectoryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Record every episode and learn from it.
    Train,
    /// Play with frozen weights.
    Evaluate,
}

/// Plays self-play episodes, learning between them in training mode.
pub struct Trainer {
    pub value_function: ValueFunction,
    pub slider: TdSlider,
    pub placer: RandomPlacer,
    learner: TdLearner,
    mode: Mode,
}

impl Trainer {
    pub fn new(
        value_function: ValueFunction,
        slider: TdSlider,
        placer: RandomPlacer,
        mode: Mode,
    ) -> Self {
        let learner = TdLearner::new(slider.config().alpha);
        Self {
            value_function,
            slider,
            placer,
            learner,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn tag(&self) -> String {
        format!("{}:{}", self.slider.name(), self.placer.name())
    }

    /// Plays one game to the end. In training mode its trajectory is learned
    /// once, after the last move.
    pub fn play_episode(&mut self) -> Result<(Episode, Option<LearnReport>), TrainerError> {
        let mut episode = Episode::new();
        let mut trajectory = match self.mode {
            Mode::Train => Some(Trajectory::new()),
            Mode::Evaluate => None,
        };

        let tag = self.tag();
        self.slider.open_episode(&format!("~:{}", self.placer.name()));
        self.placer.open_episode(&format!("{}:~", self.slider.name()));
        debug!(%tag, "Episode started");

        loop {
            let role = episode.take_turns();
            let action = if role == self.slider.role() {
                self.slider
                    .take_action(episode.state(), &self.value_function, trajectory.as_mut())?
            } else {
                self.placer.take_action(episode.state())
            };
            let Some(action) = action else {
                match role {
                    Role::Placer => {
                        warn!(step = episode.steps(), "Placer found no legal placement")
                    }
                    Role::Slider if has_legal_slide(episode.state()) => {
                        debug!(step = episode.steps(), "Slider stopped with legal slides left")
                    }
                    Role::Slider => {}
                }
                break;
            };
            if !episode.apply_action(&action) {
                warn!(step = episode.steps(), ?action, "Board rejected action");
                break;
            }
            trace!(
                step = episode.steps(),
                %role,
                ?action,
                "\n{}",
                render_board(episode.state())
            );
        }

        let report = trajectory
            .as_ref()
            .map(|trajectory| self.learner.learn(trajectory, &mut self.value_function));

        let winner = if episode.last_turns() == self.slider.role() {
            self.slider.name().to_string()
        } else {
            self.placer.name().to_string()
        };
        self.slider.close_episode(&winner);
        self.placer.close_episode(&winner);
        debug!(
            score = episode.score(),
            slides = episode.slides(),
            "Episode finished\n{}",
            render_board(episode.state())
        );
        Ok((episode, report))
    }

    /// Plays until the statistics report the run as finished.
    pub fn run(&mut self, statistics: &mut Statistics) -> Result<(), TrainerError> {
        while !statistics.is_finished() {
            let tag = self.tag();
            statistics.open_episode(&tag);
            let (episode, _) = self.play_episode()?;
            let record: EpisodeRecord = episode.finish(&tag);
            statistics.close_episode(record);
        }
        Ok(())
    }
}
