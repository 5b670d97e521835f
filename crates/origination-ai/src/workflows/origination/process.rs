//! Ordered stage ledger: the single source of truth for wizard progress.
//! Every status is derived from the target index on each transition, so the
//! completed/current/pending partition can never drift apart.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{OriginationStage, StageStatus};

/// One row of the applicant-visible progress history.
#[derive(Debug, Clone, Serialize)]
pub struct StageHistoryEntry {
    pub stage: OriginationStage,
    pub status: StageStatus,
    pub summary: String,
    pub decision: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Transition requests that violate the fixed stage ordering. The ledger is
/// left untouched when any of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot advance from {from:?} to {to:?}; the target must come later")]
    NotForward {
        from: OriginationStage,
        to: OriginationStage,
    },
    #[error("cannot go back from {from:?} to {to:?}; the target must not come later")]
    NotBackward {
        from: OriginationStage,
        to: OriginationStage,
    },
    #[error("the origination workflow is already complete")]
    AlreadyComplete,
    #[error("the sanction stage must be current before it can be completed")]
    TerminalNotCurrent,
}

/// Fixed-length history with exactly one `current` entry until the terminal
/// stage is confirmed.
#[derive(Debug, Clone)]
pub struct StageLedger {
    entries: Vec<StageHistoryEntry>,
}

impl Default for StageLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl StageLedger {
    pub fn new() -> Self {
        let now = Utc::now();
        let entries = OriginationStage::ordered()
            .iter()
            .enumerate()
            .map(|(index, stage)| StageHistoryEntry {
                stage: *stage,
                status: if index == 0 {
                    StageStatus::Current
                } else {
                    StageStatus::Pending
                },
                summary: stage.intro_summary().to_string(),
                decision: None,
                recorded_at: now,
            })
            .collect();

        let ledger = Self { entries };
        ledger.debug_check();
        ledger
    }

    pub fn entries(&self) -> &[StageHistoryEntry] {
        &self.entries
    }

    /// `None` once the terminal stage has been confirmed.
    pub fn current_stage(&self) -> Option<OriginationStage> {
        self.entries
            .iter()
            .find(|entry| entry.status == StageStatus::Current)
            .map(|entry| entry.stage)
    }

    pub fn status_of(&self, stage: OriginationStage) -> StageStatus {
        self.entries[stage.index()].status
    }

    pub fn is_complete(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.status == StageStatus::Completed)
    }

    pub fn advance_to(&mut self, target: OriginationStage) -> Result<(), TransitionError> {
        let current = self
            .current_stage()
            .ok_or(TransitionError::AlreadyComplete)?;
        if target.index() <= current.index() {
            return Err(TransitionError::NotForward {
                from: current,
                to: target,
            });
        }

        self.apply_target(target.index());
        Ok(())
    }

    pub fn go_back_to(&mut self, target: OriginationStage) -> Result<(), TransitionError> {
        let current = self
            .current_stage()
            .ok_or(TransitionError::AlreadyComplete)?;
        if target.index() > current.index() {
            return Err(TransitionError::NotBackward {
                from: current,
                to: target,
            });
        }

        self.apply_target(target.index());
        Ok(())
    }

    /// Mark the terminal stage completed. Reaching sanction alone never
    /// completes it; the applicant has to confirm the letter explicitly.
    pub fn complete_terminal(&mut self) -> Result<(), TransitionError> {
        let last = self.entries.len() - 1;
        if self.entries[last].status != StageStatus::Current {
            return Err(TransitionError::TerminalNotCurrent);
        }

        self.entries[last].status = StageStatus::Completed;
        self.entries[last].recorded_at = Utc::now();
        self.debug_check();
        Ok(())
    }

    pub(crate) fn annotate(
        &mut self,
        stage: OriginationStage,
        summary: impl Into<String>,
        decision: Option<String>,
    ) {
        let entry = &mut self.entries[stage.index()];
        entry.summary = summary.into();
        entry.decision = decision;
        entry.recorded_at = Utc::now();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn apply_target(&mut self, target_index: usize) {
        let now = Utc::now();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let status = match index.cmp(&target_index) {
                Ordering::Less => StageStatus::Completed,
                Ordering::Equal => StageStatus::Current,
                Ordering::Greater => StageStatus::Pending,
            };

            if entry.status != status {
                entry.status = status;
                entry.recorded_at = now;
                // a reopened stage will be redone, so stale annotations lie
                if status != StageStatus::Completed {
                    entry.summary = entry.stage.intro_summary().to_string();
                    entry.decision = None;
                }
            }
        }

        self.debug_check();
    }

    fn debug_check(&self) {
        debug_assert!(
            self.invariant_holds(),
            "stage ledger lost its completed/current/pending partition"
        );
    }

    fn invariant_holds(&self) -> bool {
        let mut seen_current = false;
        let mut seen_pending = false;
        for entry in &self.entries {
            match entry.status {
                StageStatus::Completed => {
                    if seen_current || seen_pending {
                        return false;
                    }
                }
                StageStatus::Current => {
                    if seen_current || seen_pending {
                        return false;
                    }
                    seen_current = true;
                }
                StageStatus::Pending => seen_pending = true,
            }
        }
        true
    }
}
