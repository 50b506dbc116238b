//! Per-player high score table.
//!
//! Persisted as a JSON object mapping player name to `[hits, "difficulty"]`.
//! Each player keeps only their personal best; a session that doesn't beat it
//! leaves the table untouched.

use crate::config::HIGH_SCORES_FILE;
use crate::debug_scores;
use crate::difficulty::Difficulty;
use crate::error::ScoreStoreError;
use crate::stats::SessionSummary;
use directories::{BaseDirs, ProjectDirs};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Best result recorded for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, Difficulty)", into = "(u32, Difficulty)")]
pub struct ScoreRecord {
    pub hits: u32,
    pub difficulty: Difficulty,
}

impl From<(u32, Difficulty)> for ScoreRecord {
    fn from((hits, difficulty): (u32, Difficulty)) -> Self {
        ScoreRecord { hits, difficulty }
    }
}

impl From<ScoreRecord> for (u32, Difficulty) {
    fn from(record: ScoreRecord) -> Self {
        (record.hits, record.difficulty)
    }
}

/// What a merge did to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First score for this player
    Created,
    /// Beat the previous best, which is returned
    Improved { previous: u32 },
    /// Did not beat the stored best
    Kept { best: u32 },
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, MergeOutcome::Kept { .. })
    }
}

/// A row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedScore {
    pub rank: usize, // 1-based
    pub player: String,
    pub record: ScoreRecord,
}

#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    records: BTreeMap<String, ScoreRecord>,
}

impl ScoreStore {
    /// Open the store at `path`, loading whatever is there
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = ScoreStore {
            path: path.into(),
            records: BTreeMap::new(),
        };
        store.load();
        store
    }

    /// Where the table lives when no path is given on the command line.
    ///
    /// Prefers the platform data directory and falls back to the home directory.
    pub fn default_path() -> PathBuf {
        if let Some(proj) = ProjectDirs::from("", "", "aim-trainer") {
            return proj.data_local_dir().join(HIGH_SCORES_FILE);
        }
        if let Some(base) = BaseDirs::new() {
            return base.home_dir().join(HIGH_SCORES_FILE);
        }
        PathBuf::from(HIGH_SCORES_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory table with the persisted one.
    ///
    /// A missing file gives an empty table. An unreadable or malformed file
    /// is skipped with a warning and the table already in memory is kept, so a
    /// later save can't overwrite good scores with an empty table.
    pub fn load(&mut self) {
        self.records = match read_records(&self.path) {
            Ok(Some(records)) => {
                debug_scores!("Loaded {} high scores from {}", records.len(), self.path.display());
                records
            }
            Ok(None) => {
                info!("No high score file at {}, starting fresh", self.path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!(
                    "Ignoring unreadable high score file {}, keeping {} loaded scores: {}",
                    self.path.display(),
                    self.records.len(),
                    e
                );
                return;
            }
        };
    }

    /// Write the whole table, replacing the previous file contents
    pub fn save(&self) -> Result<(), ScoreStoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let data = serde_json::to_vec_pretty(&self.records)?;
        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, data).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug_scores!("Saved {} high scores to {}", self.records.len(), self.path.display());
        Ok(())
    }

    /// Keep the better of the stored best and `hits`. In-memory only, see `record`.
    pub fn merge(&mut self, player: &str, hits: u32, difficulty: Difficulty) -> MergeOutcome {
        let outcome = match self.records.get(player) {
            None => MergeOutcome::Created,
            Some(best) if hits > best.hits => MergeOutcome::Improved {
                previous: best.hits,
            },
            Some(best) => MergeOutcome::Kept { best: best.hits },
        };
        if outcome.changed() {
            self.records
                .insert(player.to_string(), ScoreRecord { hits, difficulty });
        }
        debug_scores!("Merge for '{}' with {} hits: {:?}", player, hits, outcome);
        outcome
    }

    /// Merge a finished session and persist the table.
    ///
    /// If the write fails the merged table is still kept in memory.
    pub fn record(&mut self, summary: &SessionSummary) -> Result<MergeOutcome, ScoreStoreError> {
        let outcome = self.merge(&summary.player, summary.hits, summary.difficulty);
        self.save()?;
        Ok(outcome)
    }

    /// Drop every score and persist the empty table
    pub fn reset(&mut self) -> Result<(), ScoreStoreError> {
        info!("Resetting high scores ({} entries)", self.records.len());
        self.records.clear();
        self.save()
    }

    pub fn get(&self, player: &str) -> Option<&ScoreRecord> {
        self.records.get(player)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The best `n` players by hits, highest first.
    ///
    /// Equal hit counts are ordered by player name ascending.
    pub fn top_n(&self, n: usize) -> Vec<RankedScore> {
        let mut rows: Vec<(&String, &ScoreRecord)> = self.records.iter().collect();
        // BTreeMap iteration is already name-ordered, stable sort keeps that for ties
        rows.sort_by(|a, b| b.1.hits.cmp(&a.1.hits));
        rows.into_iter()
            .take(n)
            .enumerate()
            .map(|(i, (player, record))| RankedScore {
                rank: i + 1,
                player: player.clone(),
                record: *record,
            })
            .collect()
    }
}

// Ok(None) when the file simply doesn't exist yet
fn read_records(path: &Path) -> Result<Option<BTreeMap<String, ScoreRecord>>, ScoreStoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}
