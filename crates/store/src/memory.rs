// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory entity store
//!
//! All documents live behind a single mutex, which serializes every
//! read-modify-write: a mutation closure runs with the lock held, so two
//! concurrent first-time voters can never lose each other's ledger entry.
//! Write operations can be made to fail by name, for tests that need a
//! secondary write to break.

use async_trait::async_trait;
use compass_core::{
    Course, CourseId, EntityStore, Mutation, Review, ReviewId, ReviewQuery, StoreError, User,
    UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    courses: HashMap<String, Course>,
    reviews: HashMap<String, Review>,
    failing_ops: HashSet<String>,
}

/// In-memory store, cheap to clone and share
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent write operation with this name fail until
    /// [`MemoryStore::heal`] is called (e.g. `"update_course"`).
    pub fn fail_on(&self, op: &str) {
        self.lock().failing_ops.insert(op.to_string());
    }

    /// Clear all injected failures
    pub fn heal(&self) {
        self.lock().failing_ops.clear();
    }
}

impl Inner {
    fn check_fail(&self, op: &str) -> Result<(), StoreError> {
        if self.failing_ops.contains(op) {
            Err(StoreError::Backend(format!("injected failure: {}", op)))
        } else {
            Ok(())
        }
    }

    fn mutate<T: Clone>(
        slot: Option<&mut T>,
        apply: Mutation<T>,
        missing: StoreError,
    ) -> Result<T, StoreError> {
        let Some(current) = slot else {
            return Err(missing);
        };
        let mut candidate = current.clone();
        apply(&mut candidate).map_err(|e| StoreError::Rejected(Box::new(e)))?;
        *current = candidate.clone();
        Ok(candidate)
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_fail("insert_user")?;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        inner.users.insert(user.id.0.clone(), user);
        Ok(())
    }

    async fn user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.get(id.as_str()).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.to_lowercase();
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user(&self, id: &UserId, apply: Mutation<User>) -> Result<User, StoreError> {
        let mut inner = self.lock();
        inner.check_fail("update_user")?;
        let missing = StoreError::UserNotFound(id.clone());
        Inner::mutate(inner.users.get_mut(id.as_str()), apply, missing)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_fail("delete_user")?;
        inner
            .users
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))
    }

    async fn insert_course(&self, course: Course) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_fail("insert_course")?;
        if inner.courses.values().any(|c| c.code == course.code) {
            return Err(StoreError::DuplicateCode(course.code));
        }
        inner.courses.insert(course.id.0.clone(), course);
        Ok(())
    }

    async fn course(&self, id: &CourseId) -> Result<Option<Course>, StoreError> {
        Ok(self.lock().courses.get(id.as_str()).cloned())
    }

    async fn course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError> {
        let code = code.to_uppercase();
        Ok(self
            .lock()
            .courses
            .values()
            .find(|c| c.code == code)
            .cloned())
    }

    async fn update_course(
        &self,
        id: &CourseId,
        apply: Mutation<Course>,
    ) -> Result<Course, StoreError> {
        let mut inner = self.lock();
        inner.check_fail("update_course")?;
        let missing = StoreError::CourseNotFound(id.clone());
        Inner::mutate(inner.courses.get_mut(id.as_str()), apply, missing)
    }

    async fn search_courses(&self, text: &str) -> Result<Vec<Course>, StoreError> {
        let inner = self.lock();
        let mut found: Vec<Course> = inner
            .courses
            .values()
            .filter(|c| c.is_active && c.matches(text))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then(b.total_reviews.cmp(&a.total_reviews))
                .then(a.code.cmp(&b.code))
        });
        Ok(found)
    }

    async fn insert_review(&self, review: Review) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_fail("insert_review")?;
        let duplicate = inner
            .reviews
            .values()
            .any(|r| r.user == review.user && r.course == review.course);
        if duplicate {
            return Err(StoreError::DuplicateReview {
                user: review.user,
                course: review.course,
            });
        }
        inner.reviews.insert(review.id.0.clone(), review);
        Ok(())
    }

    async fn review(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        Ok(self.lock().reviews.get(id.as_str()).cloned())
    }

    async fn review_for(
        &self,
        user: &UserId,
        course: &CourseId,
    ) -> Result<Option<Review>, StoreError> {
        Ok(self
            .lock()
            .reviews
            .values()
            .find(|r| &r.user == user && &r.course == course)
            .cloned())
    }

    async fn course_reviews(&self, course: &CourseId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .lock()
            .reviews
            .values()
            .filter(|r| &r.course == course)
            .cloned()
            .collect())
    }

    async fn user_reviews(&self, user: &UserId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .lock()
            .reviews
            .values()
            .filter(|r| &r.user == user)
            .cloned()
            .collect())
    }

    async fn visible_course_reviews(
        &self,
        course: &CourseId,
        query: ReviewQuery,
    ) -> Result<Vec<Review>, StoreError> {
        let mut found: Vec<Review> = self
            .lock()
            .reviews
            .values()
            .filter(|r| &r.course == course && !r.is_hidden)
            .filter(|r| !query.verified_only || r.is_verified)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.helpful_votes
                .cmp(&a.helpful_votes)
                .then(b.created_at.cmp(&a.created_at))
        });
        if let Some(limit) = query.limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn visible_user_reviews(
        &self,
        user: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<Review>, StoreError> {
        let mut found: Vec<Review> = self
            .lock()
            .reviews
            .values()
            .filter(|r| &r.user == user && !r.is_hidden)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn update_review(
        &self,
        id: &ReviewId,
        apply: Mutation<Review>,
    ) -> Result<Review, StoreError> {
        let mut inner = self.lock();
        inner.check_fail("update_review")?;
        let missing = StoreError::ReviewNotFound(id.clone());
        Inner::mutate(inner.reviews.get_mut(id.as_str()), apply, missing)
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_fail("delete_review")?;
        inner
            .reviews
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::ReviewNotFound(id.clone()))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
