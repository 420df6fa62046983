// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Course aggregate maintenance
//!
//! Course rating fields are a cache over the visible reviews. They are always
//! recomputed from scratch so they converge after any sequence of review
//! mutations, including ones whose aggregate refresh previously failed.

use compass_core::{
    aggregate_reviews, Clock, CourseAggregates, CourseId, EntityStore, Error, IdGen,
};

use crate::Service;

impl<S: EntityStore, C: Clock, G: IdGen> Service<S, C, G> {
    /// Recompute a course's cached rating fields from its reviews.
    pub async fn recompute_course(&self, course_id: &CourseId) -> Result<CourseAggregates, Error> {
        let reviews = self.store.course_reviews(course_id).await?;
        let aggregates = aggregate_reviews(&reviews);
        self.store
            .update_course(
                course_id,
                Box::new(move |course| {
                    course.apply_aggregates(aggregates);
                    Ok(())
                }),
            )
            .await?;
        Ok(aggregates)
    }

    /// Best-effort refresh after a review mutation. A failure leaves the
    /// cached aggregates stale until the next recompute, never fails the
    /// caller.
    pub(crate) async fn refresh_course_aggregates(&self, course_id: &CourseId) {
        if let Err(error) = self.recompute_course(course_id).await {
            tracing::warn!(course = %course_id, %error, "course aggregate refresh failed");
        }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
