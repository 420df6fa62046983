// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Review lifecycle: create, edit, delete, and listings

use compass_core::{
    Clock, CourseId, EntityStore, Error, IdGen, Review, ReviewDraft, ReviewId, ReviewQuery,
    ReviewUpdate, UserId,
};

use crate::Service;

impl<S: EntityStore, C: Clock, G: IdGen> Service<S, C, G> {
    /// Create a review for a course. One review per (author, course) pair;
    /// the author must be verified and under quota, the course active.
    pub async fn create_review(
        &self,
        author_id: &UserId,
        course_id: &CourseId,
        draft: ReviewDraft,
    ) -> Result<Review, Error> {
        self.limiter.check(author_id)?;
        let author = self.load_user(author_id).await?;
        self.policy.check_author(&author)?;
        self.policy.validate_draft(&draft)?;
        let course = self.load_active_course(course_id).await?;

        if self.store.review_for(author_id, course_id).await?.is_some() {
            return Err(Error::DuplicateReview {
                user: author_id.clone(),
                course: course_id.clone(),
            });
        }

        let review = Review::new(
            ReviewId::new(self.ids.next()),
            course.id,
            author.id,
            draft,
            author.is_verified,
        );
        self.store.insert_review(review.clone()).await?;
        tracing::debug!(review = %review.id, course = %course_id, user = %author_id, "review created");

        self.refresh_course_aggregates(course_id).await;
        self.bump_review_count(author_id, true).await;
        Ok(review)
    }

    /// Apply a partial edit to the caller's own review. The course aggregates
    /// are only refreshed when the rating actually changed.
    pub async fn edit_review(
        &self,
        review_id: &ReviewId,
        requester: &UserId,
        updates: ReviewUpdate,
    ) -> Result<Review, Error> {
        self.limiter.check(requester)?;
        self.policy.validate_update(&updates)?;

        let existing = self.load_review(review_id).await?;
        if &existing.user != requester {
            return Err(Error::NotOwner {
                user: requester.clone(),
                review: review_id.clone(),
            });
        }

        let updated = self
            .store
            .update_review(
                review_id,
                Box::new(move |review| {
                    review.apply_edit(updates);
                    Ok(())
                }),
            )
            .await?;

        if updated.rating != existing.rating {
            self.refresh_course_aggregates(&updated.course).await;
        }
        Ok(updated)
    }

    /// Delete a review. Allowed for the owner or an admin.
    pub async fn delete_review(&self, review_id: &ReviewId, requester: &UserId) -> Result<(), Error> {
        self.limiter.check(requester)?;
        let review = self.load_review(review_id).await?;
        if &review.user != requester {
            let caller = self.load_user(requester).await?;
            if !caller.is_admin {
                return Err(Error::NotOwner {
                    user: requester.clone(),
                    review: review_id.clone(),
                });
            }
        }

        self.store.delete_review(review_id).await?;
        tracing::debug!(review = %review_id, course = %review.course, "review deleted");

        self.refresh_course_aggregates(&review.course).await;
        self.bump_review_count(&review.user, false).await;
        Ok(())
    }

    /// Visible reviews for an active course, most helpful first. The listing
    /// limit defaults from the policy when the query leaves it unset.
    pub async fn reviews_for_course(
        &self,
        course_id: &CourseId,
        query: ReviewQuery,
    ) -> Result<Vec<Review>, Error> {
        self.load_active_course(course_id).await?;
        let query = ReviewQuery {
            verified_only: query.verified_only,
            limit: Some(query.limit.unwrap_or(self.policy.default_listing_limit)),
        };
        Ok(self.store.visible_course_reviews(course_id, query).await?)
    }

    /// Visible reviews written by a user, most recent first.
    pub async fn reviews_by_user(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<Review>, Error> {
        self.load_user(user_id).await?;
        let limit = Some(limit.unwrap_or(self.policy.default_listing_limit));
        Ok(self.store.visible_user_reviews(user_id, limit).await?)
    }
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
