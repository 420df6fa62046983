// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vote ledger operations
//!
//! The vote transition runs inside the store's atomic update; its outcome is
//! carried out of the mutation closure through a shared slot so the service
//! can mirror the change onto the author's helpful counter.

use std::sync::{Arc, Mutex};

use compass_core::{
    Clock, EntityStore, Error, IdGen, Review, ReviewId, UserId, VoteKind, VoteOutcome,
};

use crate::Service;

/// Vote counters of a review after an operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteTally {
    pub helpful_votes: u32,
    pub not_helpful_votes: u32,
    /// Percentage of votes that found the review helpful
    pub helpful_score: f64,
}

impl From<&Review> for VoteTally {
    fn from(review: &Review) -> Self {
        Self {
            helpful_votes: review.helpful_votes,
            not_helpful_votes: review.not_helpful_votes,
            helpful_score: review.helpful_score(),
        }
    }
}

impl<S: EntityStore, C: Clock, G: IdGen> Service<S, C, G> {
    /// Cast or flip a helpfulness vote. Repeating the same vote is a no-op.
    pub async fn cast_vote(
        &self,
        review_id: &ReviewId,
        voter_id: &UserId,
        kind: VoteKind,
    ) -> Result<VoteTally, Error> {
        self.limiter.check(voter_id)?;
        self.require_verified(voter_id).await?;

        let outcome: Arc<Mutex<Option<VoteOutcome>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&outcome);
        let voter = voter_id.clone();
        let updated = self
            .store
            .update_review(
                review_id,
                Box::new(move |review| {
                    let result = review.cast_vote(&voter, kind)?;
                    *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(result);
                    Ok(())
                }),
            )
            .await?;

        let outcome = outcome.lock().unwrap_or_else(|e| e.into_inner()).take();
        let delta = match outcome {
            Some(VoteOutcome::Recorded) if kind == VoteKind::Helpful => 1,
            Some(VoteOutcome::Flipped {
                from: VoteKind::NotHelpful,
            }) => 1,
            Some(VoteOutcome::Flipped {
                from: VoteKind::Helpful,
            }) => -1,
            _ => 0,
        };
        if delta != 0 {
            self.bump_owner_helpful(&updated.user, delta).await;
        }
        if !matches!(outcome, Some(VoteOutcome::Unchanged) | None) {
            self.refresh_course_aggregates(&updated.course).await;
        }
        Ok(VoteTally::from(&updated))
    }

    /// Remove the caller's vote from a review. Succeeds (without change) when
    /// no vote exists, and works on hidden reviews so a voter is never stuck.
    pub async fn retract_vote(
        &self,
        review_id: &ReviewId,
        voter_id: &UserId,
    ) -> Result<VoteTally, Error> {
        self.limiter.check(voter_id)?;
        self.load_user(voter_id).await?;

        let removed: Arc<Mutex<Option<VoteKind>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&removed);
        let voter = voter_id.clone();
        let updated = self
            .store
            .update_review(
                review_id,
                Box::new(move |review| {
                    *slot.lock().unwrap_or_else(|e| e.into_inner()) = review.retract_vote(&voter);
                    Ok(())
                }),
            )
            .await?;

        let removed = removed.lock().unwrap_or_else(|e| e.into_inner()).take();
        if removed == Some(VoteKind::Helpful) {
            self.bump_owner_helpful(&updated.user, -1).await;
        }
        if removed.is_some() {
            self.refresh_course_aggregates(&updated.course).await;
        }
        Ok(VoteTally::from(&updated))
    }
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
