// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain error taxonomy
//!
//! Every operation returns a typed `Error`; the routing layer that sits in
//! front of the core maps `Error::kind()` to transport-level responses.

use crate::id::{CourseId, ReviewId, UserId};
use crate::store::StoreError;
use thiserror::Error;

/// Errors produced by core operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),
    #[error("review not found: {0}")]
    ReviewNotFound(ReviewId),
    #[error("course is not active: {0}")]
    CourseInactive(CourseId),
    #[error("user {user} has already reviewed course {course}")]
    DuplicateReview { user: UserId, course: CourseId },
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("course code already exists: {0}")]
    DuplicateCourse(String),
    #[error("account not verified: {0}")]
    NotVerified(UserId),
    #[error("admin access required for {0}")]
    AdminRequired(UserId),
    #[error("user {user} does not own review {review}")]
    NotOwner { user: UserId, review: ReviewId },
    #[error("review quota reached for {user}: {count} of {limit}")]
    QuotaExceeded { user: UserId, count: u32, limit: u32 },
    #[error("cannot vote on your own review")]
    SelfVote,
    #[error("cannot report your own review")]
    SelfReport,
    #[error("review is hidden: {0}")]
    ReviewHidden(ReviewId),
    #[error("email domain not allowed: {email} (expected @{domain})")]
    EmailNotAllowed { email: String, domain: String },
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
    #[error("rate limit exceeded for user {0}")]
    RateLimited(UserId),
    #[error("storage error: {0}")]
    Store(StoreError),
}

/// Coarse classification of an error for the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    PermissionDenied,
    InvalidOperation,
    RateLimited,
    Storage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UserNotFound(_)
            | Error::CourseNotFound(_)
            | Error::ReviewNotFound(_)
            | Error::CourseInactive(_) => ErrorKind::NotFound,
            Error::DuplicateReview { .. }
            | Error::DuplicateEmail(_)
            | Error::DuplicateCourse(_) => ErrorKind::Conflict,
            Error::NotVerified(_)
            | Error::AdminRequired(_)
            | Error::NotOwner { .. }
            | Error::QuotaExceeded { .. } => ErrorKind::PermissionDenied,
            Error::SelfVote
            | Error::SelfReport
            | Error::ReviewHidden(_)
            | Error::EmailNotAllowed { .. }
            | Error::InvalidField { .. } => ErrorKind::InvalidOperation,
            Error::RateLimited(_) => ErrorKind::RateLimited,
            Error::Store(_) => ErrorKind::Storage,
        }
    }
}

// Store-level uniqueness violations surface as domain conflicts; a mutation
// rejected inside an atomic update carries the original domain error back out.
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(inner) => *inner,
            StoreError::DuplicateReview { user, course } => {
                Error::DuplicateReview { user, course }
            }
            StoreError::DuplicateEmail(email) => Error::DuplicateEmail(email),
            StoreError::DuplicateCode(code) => Error::DuplicateCourse(code),
            StoreError::UserNotFound(id) => Error::UserNotFound(id),
            StoreError::CourseNotFound(id) => Error::CourseNotFound(id),
            StoreError::ReviewNotFound(id) => Error::ReviewNotFound(id),
            other => Error::Store(other),
        }
    }
}
