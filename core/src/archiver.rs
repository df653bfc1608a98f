// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable match stores: the append-only history log and the resume slot
//!
//! Both stores are plain files of one JSON object per line. The history log
//! only ever grows, except for `delete`, which rewrites through a temporary
//! file in the same directory and renames it over the original so an
//! interrupted rewrite cannot truncate prior records. The resume slot is a
//! single record overwritten in place; a single session owns it at a time.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::record::{MatchRecord, ResumeRecord};
use crate::{GameState, BOARD_SIZE};

/// Resume files at or below this size are leftovers of a failed write and
/// count as an empty slot
const MIN_RESUME_BYTES: u64 = 4;

/// Upper bound on a resume payload; anything larger is treated as corrupt
const MAX_RESUME_BYTES: u64 = 2_000_000;

/// Append-only log of finished matches
pub struct HistoryStore {
    path: PathBuf,
    board_size: u8,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new("data", BOARD_SIZE)
    }
}

impl HistoryStore {
    /// Store records in `<dir>/records.json`, decoding onto boards of
    /// `board_size`
    pub fn new(dir: impl AsRef<Path>, board_size: u8) -> Self {
        Self {
            path: dir.as_ref().join("records.json"),
            board_size,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(())
    }

    /// Append one finished match as a single line, creating the store and its
    /// directories if absent. Prior lines are never rewritten.
    pub fn append(&self, game: &GameState) -> Result<()> {
        self.ensure_parent()?;

        let record = MatchRecord::from_game(game);
        let line = serde_json::to_string(&record).context("failed to encode match record")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {} for append", self.path.display()))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("failed to write to {}", self.path.display()))?;

        tracing::info!(
            "match appended to {} ({} moves)",
            self.path.display(),
            record.moves.len()
        );
        Ok(())
    }

    /// Number of complete records in the store; 0 when the store is absent.
    /// A non-empty file with no line terminator counts as one record.
    pub fn count(&self) -> usize {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return 0,
        };

        let newlines = contents.bytes().filter(|&b| b == b'\n').count();
        if newlines == 0 && !contents.is_empty() {
            1
        } else {
            newlines
        }
    }

    /// Load the record at `index` (0-based, insertion order) as a finished
    /// match. `None` when the store is absent, the index is out of range, or
    /// the line is malformed.
    pub fn load(&self, index: usize) -> Option<GameState> {
        let file = File::open(&self.path).ok()?;
        let line = BufReader::new(file).lines().nth(index)?.ok()?;

        match serde_json::from_str::<MatchRecord>(&line) {
            Ok(record) => Some(record.into_game(self.board_size)),
            Err(err) => {
                tracing::warn!("malformed history record {}: {}", index, err);
                None
            }
        }
    }

    /// Remove exactly the record at `index`, keeping all others in order.
    ///
    /// The surviving lines go to a temporary file alongside the store, which
    /// replaces the original only after it is fully written and flushed. On
    /// any failure the original file is left as it was.
    pub fn delete(&self, index: usize) -> Result<()> {
        let file = File::open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;

        let tmp_path = self.path.with_extension("tmp");
        let mut removed = false;
        let mut kept = 0usize;
        {
            let mut out = File::create(&tmp_path)
                .with_context(|| format!("failed to create {}", tmp_path.display()))?;
            for (i, line) in BufReader::new(file).lines().enumerate() {
                let line = line.context("failed to read history record")?;
                if i == index {
                    removed = true;
                } else {
                    writeln!(out, "{}", line).context("failed to write surviving record")?;
                    kept += 1;
                }
            }
            out.flush().context("failed to flush rewritten history")?;
        }

        if !removed {
            let _ = fs::remove_file(&tmp_path);
            anyhow::bail!("no history record at index {}", index);
        }

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        tracing::info!("deleted history record {} ({} kept)", index, kept);
        Ok(())
    }

    /// Truncate the store to empty. Idempotent.
    pub fn clear(&self) -> Result<()> {
        self.ensure_parent()?;
        File::create(&self.path)
            .with_context(|| format!("failed to truncate {}", self.path.display()))?;
        Ok(())
    }
}

/// Single-slot snapshot of an interrupted match
pub struct ResumeStore {
    path: PathBuf,
    board_size: u8,
}

impl Default for ResumeStore {
    fn default() -> Self {
        Self::new("data", BOARD_SIZE)
    }
}

impl ResumeStore {
    /// Store the slot at `<dir>/resume.json`, decoding onto boards of
    /// `board_size`
    pub fn new(dir: impl AsRef<Path>, board_size: u8) -> Self {
        Self {
            path: dir.as_ref().join("resume.json"),
            board_size,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a usable snapshot is present (exists and is bigger than an
    /// empty payload)
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.len() > MIN_RESUME_BYTES)
            .unwrap_or(false)
    }

    /// Overwrite the slot with the current match and session metadata
    pub fn save(&self, game: &GameState, mode: i32, elapsed_seconds: i64) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let record = ResumeRecord::from_game(game, mode, elapsed_seconds);
        let line = serde_json::to_string(&record).context("failed to encode resume record")?;
        fs::write(&self.path, format!("{}\n", line))
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        tracing::debug!("resume slot saved ({} moves)", record.moves.len());
        Ok(())
    }

    /// Load the snapshot as an in-progress match plus `(mode, elapsed)`.
    /// `None` when the slot is absent, unreadable, malformed, or outside the
    /// accepted size bound.
    pub fn load(&self) -> Option<(GameState, i32, i64)> {
        let meta = fs::metadata(&self.path).ok()?;
        if meta.len() == 0 || meta.len() > MAX_RESUME_BYTES {
            tracing::warn!(
                "resume slot {} has implausible size {}",
                self.path.display(),
                meta.len()
            );
            return None;
        }

        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<ResumeRecord>(contents.trim()) {
            Ok(record) => Some(record.into_game(self.board_size)),
            Err(err) => {
                tracing::warn!("malformed resume slot: {}", err);
                None
            }
        }
    }

    /// Delete the slot; an already-absent slot counts as success
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to clear {}", self.path.display()))
            }
        }
    }
}
