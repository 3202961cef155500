//! Board-line features for the n-tuple value function.
//!
//! Every snapshot yields eight line samples. The first four read the outer
//! ring (the top row and its three 90 degree rotations) and address table A;
//! the last four read the second row and its rotations and address table B.
//! Turning the board clockwise moves each sample one slot forward inside its
//! own group, so both tables share weights across all four orientations.

use crate::data_model::{BOARD_SIZE, Board, MAX_RANK};

pub type FeatureCode = u16;

pub const FEATURE_COUNT: usize = 8;
pub const SAMPLES_PER_GROUP: usize = 4;
/// Number of distinct codes the 4-bit packing can address.
pub const FEATURE_SPACE: usize = 1 << 16;

pub type FeatureCodes = [FeatureCode; FEATURE_COUNT];

type Line = [(usize, usize); BOARD_SIZE];

const SAMPLES: [Line; FEATURE_COUNT] = [
    // Group A: outer ring.
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 3), (1, 3), (2, 3), (3, 3)],
    [(3, 3), (3, 2), (3, 1), (3, 0)],
    [(3, 0), (2, 0), (1, 0), (0, 0)],
    // Group B: second ring line.
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(2, 3), (2, 2), (2, 1), (2, 0)],
    [(3, 1), (2, 1), (1, 1), (0, 1)],
];

/// Packs four ranks into one code, the first rank in the highest nibble.
pub fn pack_line(ranks: [u8; BOARD_SIZE]) -> FeatureCode {
    ranks.iter().fold(0, |code, &rank| {
        assert!(
            rank <= MAX_RANK,
            "tile rank {rank} does not fit the 4-bit feature packing"
        );
        (code << 4) | rank as FeatureCode
    })
}

pub fn encode(board: &Board) -> FeatureCodes {
    SAMPLES.map(|line| pack_line(line.map(|(row, col)| board.rank(row, col))))
}
