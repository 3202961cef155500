use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    agent::{Agent, Role},
    config::PlacerConfig,
    data_model::{Action, BASIC_TILES, Board, CELL_COUNT, Direction, Rank},
};

/// Cells a new tile may appear on, given the slide that preceded it.
pub fn spawn_zone(last_slide: Option<Direction>) -> Vec<usize> {
    match last_slide {
        Some(Direction::Up) => vec![12, 13, 14, 15],
        Some(Direction::Right) => vec![0, 4, 8, 12],
        Some(Direction::Down) => vec![0, 1, 2, 3],
        Some(Direction::Left) => vec![3, 7, 11, 15],
        None => (0..CELL_COUNT).collect(),
    }
}

/// The opponent: drops the hinted tile on a random free cell of the spawn zone.
#[derive(Debug, Clone)]
pub struct RandomPlacer {
    config: PlacerConfig,
    rng: StdRng,
}

impl RandomPlacer {
    pub fn new(config: PlacerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    pub fn take_action(&mut self, board: &Board) -> Option<Action> {
        let mut zone = spawn_zone(board.last_slide());
        zone.shuffle(&mut self.rng);
        let position = zone.into_iter().find(|&position| board.cell(position) == 0)?;

        let mut bag: Vec<Rank> = BASIC_TILES
            .iter()
            .flat_map(|&tile| std::iter::repeat_n(tile, board.bag(tile) as usize))
            .collect();
        bag.shuffle(&mut self.rng);

        let tile = match board.hint() {
            0 => bag.pop()?,
            hint => hint,
        };
        let hint = bag.pop()?;
        Some(Action::Place {
            position,
            tile,
            hint,
        })
    }
}

impl Agent for RandomPlacer {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn role(&self) -> Role {
        Role::Placer
    }
}
