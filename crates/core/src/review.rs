// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Review entity and its pure state transitions
//!
//! Votes, reports, and edits are modeled as transitions on the review
//! document itself, so the service layer can apply them inside a single
//! atomic store update. Invariants maintained here:
//! - `helpful_votes + not_helpful_votes` equals the number of ledger entries;
//!   each voter contributes exactly one net vote.
//! - `report_count` equals `reported_by.len()`; `is_hidden` becomes true once
//!   `report_count` reaches the threshold and never auto-reverts.
//! - Counters floor at zero on decrement.

use crate::error::Error;
use crate::id::{CourseId, ReviewId, UserId};
use crate::ledger::Ledger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a helpfulness vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteKind {
    Helpful,
    NotHelpful,
}

/// Why a review was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportReason {
    Spam,
    Inappropriate,
    Fake,
    Other,
}

/// One entry in the vote ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub vote: VoteKind,
    pub created_at: DateTime<Utc>,
}

/// One entry in the report ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub reason: ReportReason,
    pub description: Option<String>,
    pub reported_at: DateTime<Utc>,
}

/// Pre-edit snapshot kept in the append-only edit history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditSnapshot {
    pub comment: String,
    pub rating: u8,
    pub difficulty: u8,
    pub workload: u8,
    pub edited_at: DateTime<Utc>,
}

/// Input for creating a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
    pub difficulty: Option<u8>,
    pub workload: Option<u8>,
    pub semester: String,
    pub year: u16,
    pub professor: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for editing a review. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub difficulty: Option<u8>,
    pub workload: Option<u8>,
    pub professor: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// What a vote transition did to the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// First vote by this voter
    Recorded,
    /// Voter repeated their existing vote; nothing changed
    Unchanged,
    /// Voter switched direction; old counter decremented, new incremented
    Flipped { from: VoteKind },
}

/// What a report transition did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Report recorded; `hidden` is true when this report crossed the threshold
    Recorded { hidden: bool },
    /// Reporter already had an entry; nothing changed
    Duplicate,
}

/// A course review, one per (user, course) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub course: CourseId,
    pub user: UserId,
    pub rating: u8,
    pub comment: String,
    pub difficulty: u8,
    pub workload: u8,
    pub semester: String,
    pub year: u16,
    pub professor: Option<String>,
    pub tags: Vec<String>,
    pub is_anonymous: bool,
    /// Mirrors the author's verified flag at creation time
    pub is_verified: bool,
    pub helpful_votes: u32,
    pub not_helpful_votes: u32,
    pub voted_by: Ledger<VoteEntry>,
    pub is_edited: bool,
    pub edit_history: Vec<EditSnapshot>,
    pub report_count: u32,
    pub reported_by: Ledger<ReportEntry>,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        id: ReviewId,
        course: CourseId,
        user: UserId,
        draft: ReviewDraft,
        author_verified: bool,
    ) -> Self {
        Self {
            id,
            course,
            user,
            rating: draft.rating,
            comment: draft.comment,
            difficulty: draft.difficulty.unwrap_or(3),
            workload: draft.workload.unwrap_or(3),
            semester: draft.semester,
            year: draft.year,
            professor: draft.professor,
            tags: draft.tags,
            is_anonymous: draft.is_anonymous,
            is_verified: author_verified,
            helpful_votes: 0,
            not_helpful_votes: 0,
            voted_by: Ledger::new(),
            is_edited: false,
            edit_history: Vec::new(),
            report_count: 0,
            reported_by: Ledger::new(),
            is_hidden: false,
            created_at: Utc::now(),
        }
    }

    /// Record a vote. Idempotent for repeated votes in the same direction,
    /// flips in place for the opposite direction.
    pub fn cast_vote(&mut self, voter: &UserId, kind: VoteKind) -> Result<VoteOutcome, Error> {
        if voter == &self.user {
            return Err(Error::SelfVote);
        }
        if self.is_hidden {
            return Err(Error::ReviewHidden(self.id.clone()));
        }

        match self.voted_by.get(voter).map(|entry| entry.vote) {
            Some(existing) if existing == kind => Ok(VoteOutcome::Unchanged),
            Some(existing) => {
                self.decrement(existing);
                self.increment(kind);
                if let Some(entry) = self.voted_by.get_mut(voter) {
                    entry.vote = kind;
                }
                Ok(VoteOutcome::Flipped { from: existing })
            }
            None => {
                self.voted_by.insert(
                    voter,
                    VoteEntry {
                        vote: kind,
                        created_at: Utc::now(),
                    },
                );
                self.increment(kind);
                Ok(VoteOutcome::Recorded)
            }
        }
    }

    /// Remove a voter's ledger entry and decrement the matching counter.
    /// Returns the removed vote direction, or None if there was no entry.
    pub fn retract_vote(&mut self, voter: &UserId) -> Option<VoteKind> {
        let removed = self.voted_by.remove(voter)?;
        self.decrement(removed.vote);
        Some(removed.vote)
    }

    /// Record an abuse report. One entry per reporter; crossing the threshold
    /// hides the review permanently (no automatic unhide path exists).
    pub fn report(
        &mut self,
        reporter: &UserId,
        reason: ReportReason,
        description: Option<String>,
        hide_threshold: u32,
    ) -> Result<ReportOutcome, Error> {
        if reporter == &self.user {
            return Err(Error::SelfReport);
        }
        if self.is_hidden {
            return Err(Error::ReviewHidden(self.id.clone()));
        }
        if self.reported_by.contains(reporter) {
            return Ok(ReportOutcome::Duplicate);
        }

        self.reported_by.insert(
            reporter,
            ReportEntry {
                reason,
                description,
                reported_at: Utc::now(),
            },
        );
        self.report_count += 1;

        let hidden = self.report_count >= hide_threshold;
        if hidden {
            self.is_hidden = true;
        }
        Ok(ReportOutcome::Recorded { hidden })
    }

    /// Apply a partial edit: push the pre-edit snapshot, overwrite only the
    /// fields present in `updates`. Returns true when the rating changed.
    pub fn apply_edit(&mut self, updates: ReviewUpdate) -> bool {
        self.edit_history.push(EditSnapshot {
            comment: self.comment.clone(),
            rating: self.rating,
            difficulty: self.difficulty,
            workload: self.workload,
            edited_at: Utc::now(),
        });

        let old_rating = self.rating;
        if let Some(rating) = updates.rating {
            self.rating = rating;
        }
        if let Some(comment) = updates.comment {
            self.comment = comment;
        }
        if let Some(difficulty) = updates.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(workload) = updates.workload {
            self.workload = workload;
        }
        if let Some(professor) = updates.professor {
            self.professor = Some(professor);
        }
        if let Some(tags) = updates.tags {
            self.tags = tags;
        }
        self.is_edited = true;

        self.rating != old_rating
    }

    /// Percentage of votes that found this review helpful; 0.0 with no votes.
    /// Derived on read, never stored.
    pub fn helpful_score(&self) -> f64 {
        let total = self.helpful_votes + self.not_helpful_votes;
        if total == 0 {
            return 0.0;
        }
        f64::from(self.helpful_votes) / f64::from(total) * 100.0
    }

    fn increment(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Helpful => self.helpful_votes += 1,
            VoteKind::NotHelpful => self.not_helpful_votes += 1,
        }
    }

    fn decrement(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Helpful => self.helpful_votes = self.helpful_votes.saturating_sub(1),
            VoteKind::NotHelpful => {
                self.not_helpful_votes = self.not_helpful_votes.saturating_sub(1)
            }
        }
    }
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
