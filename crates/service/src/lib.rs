// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Course Compass operation layer.
//!
//! [`Service`] wires the pure entity transitions from `compass-core` to an
//! [`EntityStore`] backend. Every mutating operation follows the same shape:
//! rate-limit the caller, validate against the policy, apply the change as an
//! atomic store mutation, then refresh the derived aggregates. Aggregate and
//! counter refreshes are best-effort caches and never fail the primary write.

mod aggregate;
mod catalog;
mod moderation;
mod ratelimit;
mod reviews;
mod users;
mod votes;

pub use ratelimit::RateLimiter;
pub use users::UserPurge;
pub use votes::VoteTally;

use compass_core::{
    Clock, Course, CourseId, EntityStore, Error, IdGen, Review, ReviewId, ReviewPolicy,
    ServiceConfig, SystemClock, User, UserId, UuidIdGen,
};

pub struct Service<S: EntityStore, C: Clock = SystemClock, G: IdGen = UuidIdGen> {
    store: S,
    policy: ReviewPolicy,
    limiter: RateLimiter<C>,
    ids: G,
}

impl<S: EntityStore, C: Clock, G: IdGen> Clone for Service<S, C, G> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy.clone(),
            limiter: self.limiter.clone(),
            ids: self.ids.clone(),
        }
    }
}

impl<S: EntityStore> Service<S> {
    pub fn new(store: S, config: &ServiceConfig) -> Self {
        Self::with_parts(store, config, SystemClock, UuidIdGen)
    }
}

impl<S: EntityStore, C: Clock, G: IdGen> Service<S, C, G> {
    /// Build a service with an explicit clock and id generator. Tests use
    /// this with [`compass_core::FakeClock`] and [`compass_core::SequentialIdGen`].
    pub fn with_parts(store: S, config: &ServiceConfig, clock: C, ids: G) -> Self {
        Self {
            store,
            policy: ReviewPolicy::from(config),
            limiter: RateLimiter::new(clock, &config.rate_limit),
            ids,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &ReviewPolicy {
        &self.policy
    }

    pub(crate) async fn load_user(&self, id: &UserId) -> Result<User, Error> {
        self.store
            .user(id)
            .await?
            .ok_or_else(|| Error::UserNotFound(id.clone()))
    }

    pub(crate) async fn load_review(&self, id: &ReviewId) -> Result<Review, Error> {
        self.store
            .review(id)
            .await?
            .ok_or_else(|| Error::ReviewNotFound(id.clone()))
    }

    pub(crate) async fn load_active_course(&self, id: &CourseId) -> Result<Course, Error> {
        let course = self
            .store
            .course(id)
            .await?
            .ok_or_else(|| Error::CourseNotFound(id.clone()))?;
        if !course.is_active {
            return Err(Error::CourseInactive(id.clone()));
        }
        Ok(course)
    }

    pub(crate) async fn require_admin(&self, id: &UserId) -> Result<User, Error> {
        let user = self.load_user(id).await?;
        if !user.is_admin {
            return Err(Error::AdminRequired(id.clone()));
        }
        Ok(user)
    }

    pub(crate) async fn require_verified(&self, id: &UserId) -> Result<User, Error> {
        let user = self.load_user(id).await?;
        if !user.is_verified {
            return Err(Error::NotVerified(user.id));
        }
        Ok(user)
    }

    /// Adjust the author's review counter after a create or delete. The
    /// counter is derived state, so a failed update is logged and the
    /// primary write stands.
    pub(crate) async fn bump_review_count(&self, user: &UserId, added: bool) {
        let result = self
            .store
            .update_user(
                user,
                Box::new(move |u| {
                    if added {
                        u.record_review_added();
                    } else {
                        u.record_review_removed();
                    }
                    Ok(())
                }),
            )
            .await;
        if let Err(error) = result {
            tracing::warn!(user = %user, %error, "review counter update failed; counter stale");
        }
    }

    pub(crate) async fn bump_owner_helpful(&self, owner: &UserId, delta: i64) {
        let result = self
            .store
            .update_user(
                owner,
                Box::new(move |u| {
                    if delta > 0 {
                        u.record_helpful_received();
                    } else {
                        u.record_helpful_lost();
                    }
                    Ok(())
                }),
            )
            .await;
        if let Err(error) = result {
            tracing::warn!(user = %owner, %error, "helpful counter update failed; counter stale");
        }
    }
}
