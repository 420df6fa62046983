// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Abuse reports and the auto-hide threshold

use std::sync::{Arc, Mutex};

use compass_core::{
    Clock, EntityStore, Error, IdGen, ReportOutcome, ReportReason, ReviewId, UserId,
};

use crate::Service;

impl<S: EntityStore, C: Clock, G: IdGen> Service<S, C, G> {
    /// Report a review for abuse. One report per reporter counts; crossing
    /// the hide threshold hides the review and drops it from the course
    /// aggregates.
    pub async fn report_review(
        &self,
        review_id: &ReviewId,
        reporter_id: &UserId,
        reason: ReportReason,
        description: Option<String>,
    ) -> Result<ReportOutcome, Error> {
        self.limiter.check(reporter_id)?;
        self.require_verified(reporter_id).await?;

        let threshold = self.policy.report_hide_threshold;
        let outcome: Arc<Mutex<Option<ReportOutcome>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&outcome);
        let reporter = reporter_id.clone();
        let updated = self
            .store
            .update_review(
                review_id,
                Box::new(move |review| {
                    let result = review.report(&reporter, reason, description, threshold)?;
                    *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(result);
                    Ok(())
                }),
            )
            .await?;

        let outcome = outcome
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .unwrap_or(ReportOutcome::Duplicate);
        if matches!(outcome, ReportOutcome::Recorded { hidden: true }) {
            tracing::warn!(
                review = %review_id,
                reports = updated.report_count,
                "review hidden after crossing report threshold"
            );
            self.refresh_course_aggregates(&updated.course).await;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "moderation_tests.rs"]
mod tests;
