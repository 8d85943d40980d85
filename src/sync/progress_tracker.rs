//! Progress tracking for a single sync sweep.
//!
//! This module provides the `SyncProgressTracker`, which records what one sweep over a height
//! range actually did: how many blocks were applied, how many transactions were matched, and
//! which heights had to be skipped because their block could not be fetched.
//!
//! Skipped heights are never revisited once the cursor moves past them, so the tracker is also
//! where those permanent gaps get reported.

use tracing::info;

/// How many blocks to process between periodic progress log lines.
const LOG_EVERY_BLOCKS: u64 = 100;

/// Service for tracking sweep progress
///
/// The tracker covers the inclusive range `from_height..=to_height`. An empty sweep (nothing new
/// on chain) has `from_height > to_height`.
#[derive(Debug, Clone)]
pub struct SyncProgressTracker {
    /// First height of the sweep
    from_height: u64,
    /// Last height of the sweep (the head observed at the start of the tick)
    to_height: u64,
    /// Blocks fetched and applied to the index
    blocks_applied: usize,
    /// Appends performed on the index
    transactions_matched: usize,
    /// Heights whose block could not be fetched, ascending
    skipped_heights: Vec<u64>,
    /// Highest height seen so far
    highest_processed_height: Option<u64>,
    /// Height at which progress was last logged
    last_logged_height: u64,
}

impl SyncProgressTracker {
    /// Create a new tracker for the range `from_height..=to_height`.
    pub fn new(from_height: u64, to_height: u64) -> Self {
        Self {
            from_height,
            to_height,
            blocks_applied: 0,
            transactions_matched: 0,
            skipped_heights: Vec::new(),
            highest_processed_height: None,
            last_logged_height: from_height,
        }
    }

    /// Record a block that was fetched and applied, with the number of appends it produced.
    pub fn record_block(&mut self, height: u64, matched: usize) {
        self.blocks_applied += 1;
        self.transactions_matched += matched;
        self.highest_processed_height = Some(height);
    }

    /// Record a height whose block could not be fetched.
    pub fn record_skipped(&mut self, height: u64) {
        self.skipped_heights.push(height);
        self.highest_processed_height = Some(height);
    }

    /// Contiguous ranges of skipped heights as inclusive `(start, end)` pairs.
    pub fn check_for_gaps(&self) -> Vec<(u64, u64)> {
        let mut gaps: Vec<(u64, u64)> = Vec::new();

        for &height in &self.skipped_heights {
            match gaps.last_mut() {
                Some((_, end)) if *end + 1 == height => *end = height,
                _ => gaps.push((height, height)),
            }
        }

        gaps
    }

    /// Log progress at regular intervals or when forced
    pub fn log_progress(&mut self, force: bool) {
        let Some(highest) = self.highest_processed_height else {
            return;
        };

        let blocks_since_last_log = highest.saturating_sub(self.last_logged_height);
        if force || blocks_since_last_log >= LOG_EVERY_BLOCKS {
            info!(
                "Sync progress: block {} of {}, {} transactions matched, {} heights skipped",
                highest,
                self.to_height,
                self.transactions_matched,
                self.skipped_heights.len()
            );
            self.last_logged_height = highest;
        }
    }

    /// Get sweep statistics as a SyncStats struct
    pub fn get_stats(&self) -> SyncStats {
        SyncStats {
            from_height: self.from_height,
            to_height: self.to_height,
            blocks_applied: self.blocks_applied,
            transactions_matched: self.transactions_matched,
            gaps: self.check_for_gaps(),
        }
    }
}

/// Statistics about one sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStats {
    pub from_height: u64,
    pub to_height: u64,
    pub blocks_applied: usize,
    pub transactions_matched: usize,
    pub gaps: Vec<(u64, u64)>,
}

impl SyncStats {
    /// True when the sweep covered no heights.
    pub fn is_empty(&self) -> bool {
        self.from_height > self.to_height
    }

    /// Number of heights skipped across all gaps.
    pub fn skipped(&self) -> u64 {
        self.gaps.iter().map(|(start, end)| end - start + 1).sum()
    }

    /// Get a human-readable summary of the sweep
    pub fn summary(&self) -> String {
        format!(
            "Sync from {} to {}: {} blocks, {} transactions matched{}",
            self.from_height,
            self.to_height,
            self.blocks_applied,
            self.transactions_matched,
            if self.gaps.is_empty() {
                String::new()
            } else {
                format!(" ({} heights skipped)", self.skipped())
            }
        )
    }
}
