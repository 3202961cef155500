use crate::{
    data_model::Board,
    features::{FEATURE_SPACE, FeatureCode, FeatureCodes, SAMPLES_PER_GROUP, encode},
};

/// Entries per pattern table. Larger than the 16-bit code space.
pub const TABLE_CAPACITY: usize = 70000;
pub const TABLE_COUNT: usize = 2;

const _: () = assert!(TABLE_CAPACITY >= FEATURE_SPACE);

#[derive(Debug, Clone, PartialEq)]
pub struct PatternTable {
    weights: Vec<f32>,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternTable {
    pub fn new() -> Self {
        Self {
            weights: vec![0.0; TABLE_CAPACITY],
        }
    }

    pub fn get(&self, code: FeatureCode) -> f32 {
        self.weights[code as usize]
    }

    pub fn add(&mut self, code: FeatureCode, delta: f32) {
        self.weights[code as usize] += delta;
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }
}

/// Linear value function over the two line-pattern tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueFunction {
    pub tables: [PatternTable; TABLE_COUNT],
}

impl ValueFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table addressed by the feature sample at `index`.
    fn table_for(index: usize) -> usize {
        index / SAMPLES_PER_GROUP
    }

    pub fn evaluate(&self, board: &Board) -> f32 {
        self.feature_sum(&encode(board))
    }

    pub fn feature_sum(&self, codes: &FeatureCodes) -> f32 {
        codes
            .iter()
            .enumerate()
            .map(|(index, &code)| self.tables[Self::table_for(index)].get(code))
            .sum()
    }

    pub fn accumulate(&mut self, codes: &FeatureCodes, delta: f32) {
        for (index, &code) in codes.iter().enumerate() {
            self.tables[Self::table_for(index)].add(code, delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;

    fn board() -> Board {
        Board::from_grid([[1, 2, 3, 0], [0, 3, 0, 2], [4, 0, 1, 0], [0, 0, 5, 3]])
    }

    #[test]
    fn fresh_tables_evaluate_to_zero() {
        let value_function = ValueFunction::new();
        assert_eq!(value_function.evaluate(&board()), 0.0);
        assert_eq!(value_function.tables[0].weights().len(), TABLE_CAPACITY);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut value_function = ValueFunction::new();
        let codes = encode(&board());
        value_function.accumulate(&codes, 0.37);
        let first = value_function.evaluate(&board());
        let second = value_function.evaluate(&board());
        assert_eq!(first, second);
    }

    #[test]
    fn accumulate_splits_codes_between_tables() {
        let mut value_function = ValueFunction::new();
        let codes: FeatureCodes = [10, 11, 12, 13, 10, 11, 12, 13];
        value_function.accumulate(&codes, 0.5);
        for code in 10..14 {
            assert_eq!(value_function.tables[0].get(code), 0.5);
            assert_eq!(value_function.tables[1].get(code), 0.5);
        }
        assert_eq!(value_function.feature_sum(&codes), 0.5 * FEATURE_COUNT as f32);
    }

    #[test]
    fn repeated_codes_accumulate_repeatedly() {
        let mut value_function = ValueFunction::new();
        let codes: FeatureCodes = [0; FEATURE_COUNT];
        value_function.accumulate(&codes, 1.0);
        assert_eq!(value_function.tables[0].get(0), 4.0);
        assert_eq!(value_function.tables[1].get(0), 4.0);
        assert_eq!(value_function.feature_sum(&codes), 32.0);
    }
}
