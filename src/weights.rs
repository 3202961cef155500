use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use thiserror::Error;
use tracing::info;

use crate::value_function::{TABLE_CAPACITY, TABLE_COUNT, ValueFunction};

#[derive(Error, Debug)]
pub enum WeightsError {
    #[error("cannot access weight file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("weight file I/O failed: {0}")]
    Stream(#[from] std::io::Error),

    #[error("invalid weight {value:?} at entry {index}")]
    Parse { index: usize, value: String },

    #[error("weight file holds {found} entries, expected {expected}")]
    Truncated { found: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, WeightsError>;

/// Fills every table from a whitespace-separated list, table A first.
pub fn read_from<R: BufRead>(reader: R, value_function: &mut ValueFunction) -> Result<()> {
    let expected = TABLE_COUNT * TABLE_CAPACITY;
    let mut index = 0;
    for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            if index == expected {
                return Ok(());
            }
            let weight = token.parse::<f32>().map_err(|_| WeightsError::Parse {
                index,
                value: token.to_string(),
            })?;
            let table = &mut value_function.tables[index / TABLE_CAPACITY];
            table.weights_mut()[index % TABLE_CAPACITY] = weight;
            index += 1;
        }
    }
    if index < expected {
        return Err(WeightsError::Truncated {
            found: index,
            expected,
        });
    }
    Ok(())
}

pub fn write_to<W: Write>(mut writer: W, value_function: &ValueFunction) -> Result<()> {
    for table in &value_function.tables {
        for weight in table.weights() {
            writeln!(writer, "{weight}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn load(path: &Path) -> Result<ValueFunction> {
    let file = File::open(path).map_err(|source| WeightsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut value_function = ValueFunction::new();
    read_from(BufReader::new(file), &mut value_function)?;
    info!(path = %path.display(), "Loaded weight tables");
    Ok(value_function)
}

pub fn save(path: &Path, value_function: &ValueFunction) -> Result<()> {
    let file = File::create(path).map_err(|source| WeightsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_to(BufWriter::new(file), value_function)?;
    info!(path = %path.display(), "Saved weight tables");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data_model::Board, features::encode};

    fn boards() -> Vec<Board> {
        vec![
            Board::from_grid([[1, 2, 3, 0], [0, 3, 0, 2], [4, 0, 1, 0], [0, 0, 5, 3]]),
            Board::from_grid([[0; 4], [0, 6, 6, 0], [0, 0, 0, 0], [2, 1, 0, 7]]),
            Board::new(),
        ]
    }

    #[test]
    fn round_trip_preserves_evaluation() {
        let mut value_function = ValueFunction::new();
        for (i, board) in boards().iter().enumerate() {
            value_function.accumulate(&encode(board), 0.1 * (i as f32 + 1.0) - 0.2537);
        }
        value_function.tables[1].weights_mut()[TABLE_CAPACITY - 1] = -3.5e-7;

        let mut buffer = Vec::new();
        write_to(&mut buffer, &value_function).unwrap();
        let mut loaded = ValueFunction::new();
        read_from(buffer.as_slice(), &mut loaded).unwrap();

        assert_eq!(loaded, value_function);
        for board in boards() {
            assert_eq!(loaded.evaluate(&board), value_function.evaluate(&board));
        }
    }

    #[test]
    fn writes_one_weight_per_line() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &ValueFunction::new()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), TABLE_COUNT * TABLE_CAPACITY);
        assert!(text.lines().all(|line| line == "0"));
    }

    #[test]
    fn short_file_is_rejected() {
        let mut value_function = ValueFunction::new();
        let result = read_from("1\n2\n3\n".as_bytes(), &mut value_function);
        assert!(matches!(
            result,
            Err(WeightsError::Truncated { found: 3, .. })
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let mut value_function = ValueFunction::new();
        let result = read_from("0.5\nnot-a-number\n".as_bytes(), &mut value_function);
        assert!(matches!(result, Err(WeightsError::Parse { index: 1, .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load(Path::new("/nonexistent/dir/td0.txt"));
        assert!(matches!(result, Err(WeightsError::Io { .. })));
    }
}
