//! TD(0) learning over afterstates, replayed from the end of an episode.
//!
//! Each ply moves its value toward `reward + V(next afterstate)`. The last ply
//! bootstraps against the game-over afterstate's own value rather than zero.
//! Plies are visited last to first, so a ply reads the tables after the ply
//! that follows it has already been updated.

use tracing::debug;

use crate::{
    features::{FEATURE_COUNT, FeatureCodes},
    trajectory::Trajectory,
    value_function::ValueFunction,
};

pub const DEFAULT_ALPHA: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdLearner {
    pub alpha: f32,
}

impl Default for TdLearner {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

/// Summary of one backward pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LearnReport {
    pub plies: usize,
    pub mean_abs_error: f32,
}

impl TdLearner {
    pub fn new(alpha: f32) -> Self {
        Self { alpha }
    }

    /// Error for one ply, already scaled by the per-weight step size.
    pub fn ply_error(
        &self,
        value_function: &ValueFunction,
        reward: f32,
        codes: &FeatureCodes,
        next_codes: Option<&FeatureCodes>,
    ) -> f32 {
        let next_value = next_codes.map_or(0.0, |next| value_function.feature_sum(next));
        (reward + next_value - value_function.feature_sum(codes)) * self.alpha
            / FEATURE_COUNT as f32
    }

    pub fn learn(&self, trajectory: &Trajectory, value_function: &mut ValueFunction) -> LearnReport {
        let plies = trajectory.plies();
        let mut total_error = 0.0;
        for i in (0..plies.len()).rev() {
            let next_codes = match plies.get(i + 1) {
                Some(next) => Some(&next.codes),
                None => trajectory.terminal(),
            };
            let error = self.ply_error(
                value_function,
                plies[i].reward as f32,
                &plies[i].codes,
                next_codes,
            );
            value_function.accumulate(&plies[i].codes, error);
            total_error += error.abs();
        }
        let report = LearnReport {
            plies: trajectory.len(),
            mean_abs_error: if trajectory.is_empty() {
                0.0
            } else {
                total_error / trajectory.len() as f32
            },
        };
        debug!(
            plies = report.plies,
            mean_abs_error = report.mean_abs_error,
            "TD(0) backward pass"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::TrajectoryEntry;

    const CODES_0: FeatureCodes = [1, 2, 3, 4, 5, 6, 7, 8];
    const CODES_1: FeatureCodes = [11, 12, 13, 14, 15, 16, 17, 18];
    const CODES_2: FeatureCodes = [21, 22, 23, 24, 25, 26, 27, 28];

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    fn seeded_value_function() -> ValueFunction {
        let mut value_function = ValueFunction::new();
        value_function.accumulate(&CODES_0, 0.25);
        value_function.accumulate(&CODES_1, 1.0);
        value_function.accumulate(&CODES_2, -0.5);
        value_function
    }

    #[test]
    fn empty_trajectory_is_a_no_op() {
        let mut value_function = seeded_value_function();
        let before = value_function.clone();
        let report = TdLearner::default().learn(&Trajectory::new(), &mut value_function);
        assert_eq!(report.plies, 0);
        assert_eq!(value_function, before);
    }

    #[test]
    fn last_ply_bootstraps_from_terminal_afterstate() {
        let mut value_function = seeded_value_function();
        let mut trajectory = Trajectory::new();
        trajectory
            .record_ply(TrajectoryEntry {
                codes: CODES_0,
                reward: 3,
            })
            .unwrap();
        trajectory.record_terminal(CODES_1);

        // sum(CODES_0) = 8 * 0.25, sum(CODES_1) = 8 * 1.0
        let expected = (3.0 + 8.0 - 2.0) * 0.05 / 8.0;
        TdLearner::new(0.05).learn(&trajectory, &mut value_function);

        for &code in &CODES_0[..4] {
            assert!(close(value_function.tables[0].get(code), 0.25 + expected));
        }
        for &code in &CODES_0[4..] {
            assert!(close(value_function.tables[1].get(code), 0.25 + expected));
        }
        // The terminal afterstate itself is never updated.
        assert_eq!(value_function.feature_sum(&CODES_1), 8.0);
    }

    #[test]
    fn every_addressed_weight_moves_by_the_same_error() {
        let mut value_function = seeded_value_function();
        let before = value_function.clone();
        let mut trajectory = Trajectory::new();
        trajectory
            .record_ply(TrajectoryEntry {
                codes: CODES_2,
                reward: 9,
            })
            .unwrap();
        trajectory.record_terminal(CODES_0);
        TdLearner::default().learn(&trajectory, &mut value_function);

        let deltas: Vec<f32> = CODES_2
            .iter()
            .enumerate()
            .map(|(i, &code)| {
                value_function.tables[i / 4].get(code) - before.tables[i / 4].get(code)
            })
            .collect();
        assert!(deltas.iter().all(|&delta| delta == deltas[0]));
        assert!(deltas[0] > 0.0);
    }

    #[test]
    fn earlier_plies_read_updated_successors() {
        let mut value_function = seeded_value_function();
        let mut trajectory = Trajectory::new();
        trajectory
            .record_ply(TrajectoryEntry {
                codes: CODES_0,
                reward: 3,
            })
            .unwrap();
        trajectory
            .record_ply(TrajectoryEntry {
                codes: CODES_1,
                reward: 0,
            })
            .unwrap();
        trajectory.record_terminal(CODES_2);

        let learner = TdLearner::new(0.05);
        // Ply 1 against the terminal afterstate: (0 + (-4) - 8) * 0.05 / 8.
        let error_1 = (0.0 - 4.0 - 8.0) * 0.05 / 8.0;
        let updated_sum_1 = 8.0 + 8.0 * error_1;
        // Ply 0 reads the freshly updated ply-1 sum.
        let error_0 = (3.0 + updated_sum_1 - 2.0) * 0.05 / 8.0;

        learner.learn(&trajectory, &mut value_function);

        assert!(close(value_function.tables[0].get(CODES_1[0]), 1.0 + error_1));
        assert!(close(value_function.tables[1].get(CODES_1[7]), 1.0 + error_1));
        assert!(close(value_function.tables[0].get(CODES_0[0]), 0.25 + error_0));
        assert!(close(value_function.tables[1].get(CODES_0[5]), 0.25 + error_0));
    }

    #[test]
    fn missing_terminal_bootstraps_against_zero() {
        let mut value_function = ValueFunction::new();
        let mut trajectory = Trajectory::new();
        trajectory
            .record_ply(TrajectoryEntry {
                codes: CODES_0,
                reward: 8,
            })
            .unwrap();
        TdLearner::new(0.5).learn(&trajectory, &mut value_function);
        assert!(close(value_function.tables[0].get(CODES_0[0]), 8.0 * 0.5 / 8.0));
    }
}
