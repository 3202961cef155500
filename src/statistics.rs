use std::{
    collections::VecDeque,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    data_model::{MAX_RANK, Rank, Reward, tile_value},
    episode::EpisodeRecord,
};

#[derive(Error, Debug)]
pub enum StatisticsError {
    #[error("cannot access statistics checkpoint {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed statistics checkpoint: {0}")]
    Json(#[from] serde_json::Error),
}

/// Share of games whose largest tile was exactly, or at least, one rank.
#[derive(Debug, Clone, PartialEq)]
pub struct TileReach {
    pub rank: Rank,
    pub exact: f32,
    pub at_least: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockSummary {
    pub episodes: usize,
    pub average_score: f64,
    pub max_score: Reward,
    pub average_steps: f64,
    pub steps_per_second: f64,
    pub tile_reach: Vec<TileReach>,
}

/// Run bookkeeping: how many games to play and what was seen so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    total: usize,
    block: usize,
    limit: usize,
    finished: usize,
    records: VecDeque<EpisodeRecord>,
}

impl Statistics {
    /// `block == 0` summarises once at the end, `limit == 0` keeps every record.
    pub fn new(total: usize, block: usize, limit: usize) -> Self {
        Self {
            total,
            block: if block == 0 { total } else { block },
            limit,
            finished: 0,
            records: VecDeque::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished >= self.total
    }

    /// Number of episodes closed so far, including ones no longer retained.
    pub fn step(&self) -> usize {
        self.finished
    }

    pub fn records(&self) -> &VecDeque<EpisodeRecord> {
        &self.records
    }

    pub fn open_episode(&self, tag: &str) {
        debug!(episode = self.finished + 1, tag, "Episode opened");
    }

    pub fn close_episode(&mut self, record: EpisodeRecord) -> Option<BlockSummary> {
        self.finished += 1;
        self.records.push_back(record);
        if self.limit > 0 {
            while self.records.len() > self.limit {
                self.records.pop_front();
            }
        }
        if self.block > 0 && self.finished % self.block == 0 {
            let summary = self.summary();
            if let Some(summary) = &summary {
                log_summary(self.finished, summary);
            }
            summary
        } else {
            None
        }
    }

    /// Summary of the most recent block of retained episodes.
    pub fn summary(&self) -> Option<BlockSummary> {
        let count = self.block.max(1).min(self.records.len());
        if count == 0 {
            return None;
        }
        let block: Vec<&EpisodeRecord> = self.records.iter().rev().take(count).collect();

        let total_score: f64 = block.iter().map(|r| r.score as f64).sum();
        let total_steps: usize = block.iter().map(|r| r.steps).sum();
        let elapsed: Duration = block.iter().map(|r| r.duration).sum();
        let max_score = block.iter().map(|r| r.score).max().unwrap_or(0);

        let mut histogram = [0usize; MAX_RANK as usize + 2];
        for record in &block {
            histogram[(record.max_rank as usize).min(histogram.len() - 1)] += 1;
        }
        let mut at_least = count;
        let mut tile_reach = Vec::new();
        for (rank, &games) in histogram.iter().enumerate() {
            if games > 0 {
                tile_reach.push(TileReach {
                    rank: rank as Rank,
                    exact: games as f32 / count as f32,
                    at_least: at_least as f32 / count as f32,
                });
            }
            at_least -= games;
        }

        let seconds = elapsed.as_secs_f64();
        Some(BlockSummary {
            episodes: count,
            average_score: total_score / count as f64,
            max_score,
            average_steps: total_steps as f64 / count as f64,
            steps_per_second: if seconds > 0.0 {
                total_steps as f64 / seconds
            } else {
                0.0
            },
            tile_reach,
        })
    }

    /// Logs the summary of the latest block, if any game was played.
    pub fn report(&self) {
        if let Some(summary) = self.summary() {
            log_summary(self.finished, &summary);
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StatisticsError> {
        let io_error = |source| StatisticsError::Io {
            path: path.display().to_string(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(io_error)?;
        info!(path = %path.display(), games = self.finished, "Statistics saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, StatisticsError> {
        let file = File::open(path).map_err(|source| StatisticsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Continues a checkpointed run under new run limits.
    pub fn resume(&mut self, total: usize, block: usize, limit: usize) {
        let fresh = Self::new(total, block, limit);
        self.total = fresh.total;
        self.block = fresh.block;
        self.limit = fresh.limit;
    }
}

fn log_summary(finished: usize, summary: &BlockSummary) {
    info!(
        episodes = finished,
        avg = %format!("{:.1}", summary.average_score),
        max = summary.max_score,
        steps = %format!("{:.1}", summary.average_steps),
        ops = %format!("{:.0}", summary.steps_per_second),
        "Block summary"
    );
    for reach in &summary.tile_reach {
        info!(
            "\t{}\t{:.1}%\t({:.1}%)",
            tile_value(reach.rank),
            reach.at_least * 100.0,
            reach.exact * 100.0
        );
    }
}
