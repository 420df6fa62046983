// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity store trait: the persistence seam of the core
//!
//! The store is an external collaborator assumed to provide atomic
//! single-document read-modify-write. Updates take a mutation closure that
//! the store applies under per-document serialization; a closure returning
//! an error leaves the document untouched and the error is carried back out
//! through `StoreError::Rejected`. Uniqueness constraints (email, course
//! code, one review per user+course) are enforced on insert.

use crate::course::Course;
use crate::error::Error;
use crate::id::{CourseId, ReviewId, UserId};
use crate::review::Review;
use crate::user::User;
use async_trait::async_trait;
use thiserror::Error;

/// Atomic read-modify-write applied to a single document
pub type Mutation<T> = Box<dyn FnOnce(&mut T) -> Result<(), Error> + Send>;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),
    #[error("review not found: {0}")]
    ReviewNotFound(ReviewId),
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("course code already exists: {0}")]
    DuplicateCode(String),
    #[error("review already exists for user {user} on course {course}")]
    DuplicateReview { user: UserId, course: CourseId },
    #[error("mutation rejected: {0}")]
    Rejected(Box<Error>),
    #[error("backend failure: {0}")]
    Backend(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for visible course-review listings
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewQuery {
    /// Only reviews written by verified users
    pub verified_only: bool,
    /// Maximum number of reviews returned; None means no cap
    pub limit: Option<usize>,
}

/// Persistence for users, courses, and reviews
#[async_trait]
pub trait EntityStore: Clone + Send + Sync + 'static {
    // -- users --

    async fn insert_user(&self, user: User) -> Result<(), StoreError>;

    async fn user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn update_user(&self, id: &UserId, apply: Mutation<User>) -> Result<User, StoreError>;

    async fn delete_user(&self, id: &UserId) -> Result<(), StoreError>;

    // -- courses --

    async fn insert_course(&self, course: Course) -> Result<(), StoreError>;

    async fn course(&self, id: &CourseId) -> Result<Option<Course>, StoreError>;

    async fn course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError>;

    async fn update_course(
        &self,
        id: &CourseId,
        apply: Mutation<Course>,
    ) -> Result<Course, StoreError>;

    /// Active courses matching a case-insensitive substring over
    /// code/name/department/tags, rating descending then total reviews
    /// descending
    async fn search_courses(&self, text: &str) -> Result<Vec<Course>, StoreError>;

    // -- reviews --

    async fn insert_review(&self, review: Review) -> Result<(), StoreError>;

    async fn review(&self, id: &ReviewId) -> Result<Option<Review>, StoreError>;

    /// The unique review for a (user, course) pair, if any
    async fn review_for(
        &self,
        user: &UserId,
        course: &CourseId,
    ) -> Result<Option<Review>, StoreError>;

    /// Every review of a course, hidden included (aggregation input)
    async fn course_reviews(&self, course: &CourseId) -> Result<Vec<Review>, StoreError>;

    /// Every review by a user, hidden included (cascade-delete input)
    async fn user_reviews(&self, user: &UserId) -> Result<Vec<Review>, StoreError>;

    /// Non-hidden course reviews, helpful votes descending then recency
    /// descending, limited
    async fn visible_course_reviews(
        &self,
        course: &CourseId,
        query: ReviewQuery,
    ) -> Result<Vec<Review>, StoreError>;

    /// Non-hidden reviews by a user, most recent first, limited
    async fn visible_user_reviews(
        &self,
        user: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<Review>, StoreError>;

    async fn update_review(
        &self,
        id: &ReviewId,
        apply: Mutation<Review>,
    ) -> Result<Review, StoreError>;

    async fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError>;
}
