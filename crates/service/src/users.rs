// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User registration and administration

use compass_core::{Clock, EntityStore, Error, IdGen, NewUser, User, UserId};

use crate::Service;

/// Result of deleting a user and cascading over their reviews
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPurge {
    pub user: UserId,
    pub reviews_deleted: usize,
}

impl<S: EntityStore, C: Clock, G: IdGen> Service<S, C, G> {
    /// Register a user. The email must belong to the allowed domain and be
    /// unused; accounts start unverified.
    pub async fn register_user(&self, new_user: NewUser) -> Result<User, Error> {
        self.policy.check_email(&new_user.email)?;

        let user = User::new(UserId::new(self.ids.next()), new_user);
        self.store.insert_user(user.clone()).await?;
        tracing::debug!(user = %user.id, "user registered");
        Ok(user)
    }

    pub async fn set_user_verified(
        &self,
        requester: &UserId,
        target: &UserId,
        verified: bool,
    ) -> Result<User, Error> {
        self.limiter.check(requester)?;
        self.require_admin(requester).await?;
        Ok(self
            .store
            .update_user(
                target,
                Box::new(move |user| {
                    user.is_verified = verified;
                    Ok(())
                }),
            )
            .await?)
    }

    pub async fn set_user_admin(
        &self,
        requester: &UserId,
        target: &UserId,
        admin: bool,
    ) -> Result<User, Error> {
        self.limiter.check(requester)?;
        self.require_admin(requester).await?;
        Ok(self
            .store
            .update_user(
                target,
                Box::new(move |user| {
                    user.is_admin = admin;
                    Ok(())
                }),
            )
            .await?)
    }

    /// Delete a user and every review they wrote. Each review delete stands
    /// alone: one failure is logged and skipped, the rest proceed, and every
    /// touched course gets its aggregates refreshed.
    pub async fn delete_user(
        &self,
        requester: &UserId,
        target: &UserId,
    ) -> Result<UserPurge, Error> {
        self.limiter.check(requester)?;
        self.require_admin(requester).await?;
        let user = self.load_user(target).await?;

        let reviews = self.store.user_reviews(target).await?;
        let mut deleted = 0;
        for review in &reviews {
            match self.store.delete_review(&review.id).await {
                Ok(()) => {
                    deleted += 1;
                    self.refresh_course_aggregates(&review.course).await;
                }
                Err(error) => {
                    tracing::warn!(review = %review.id, %error, "cascade skipped a review");
                }
            }
        }

        self.store.delete_user(&user.id).await?;
        tracing::debug!(user = %target, reviews = deleted, "user deleted");
        Ok(UserPurge {
            user: user.id,
            reviews_deleted: deleted,
        })
    }
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
