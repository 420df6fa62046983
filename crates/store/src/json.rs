// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-based entity store
//!
//! One file per entity under `<base>/{users,courses,reviews}/<id>.json`.
//! A store-wide mutex serializes writes so mutation closures see a
//! consistent document, which is the atomicity the core assumes of its
//! store. Suited to single-process deployments and durable test setups.

use async_trait::async_trait;
use compass_core::{
    Course, CourseId, EntityStore, Mutation, Review, ReviewId, ReviewQuery, StoreError, User,
    UserId,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const USERS: &str = "users";
const COURSES: &str = "courses";
const REVIEWS: &str = "reviews";

/// File-backed store rooted at a base directory
#[derive(Clone)]
pub struct JsonStore {
    base_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    /// Open a store at the given path, creating it if needed
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        for kind in [USERS, COURSES, REVIEWS] {
            fs::create_dir_all(base_path.join(kind))?;
        }
        Ok(Self {
            base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn path_for(&self, kind: &str, id: &str) -> PathBuf {
        self.base_path.join(kind).join(format!("{}.json", id))
    }

    fn save<T: Serialize>(&self, kind: &str, id: &str, data: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.path_for(kind, id), json)?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, kind: &str, id: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(kind, id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn load_all<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>, StoreError> {
        let mut all = Vec::new();
        for entry in fs::read_dir(self.base_path.join(kind))? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                let json = fs::read_to_string(&path)?;
                all.push(serde_json::from_str(&json)?);
            }
        }
        Ok(all)
    }

    fn remove(&self, kind: &str, id: &str) -> Result<bool, StoreError> {
        let path = self.path_for(kind, id);
        if path.exists() {
            fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn mutate<T>(
        &self,
        kind: &str,
        id: &str,
        apply: Mutation<T>,
        missing: StoreError,
    ) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let Some(mut current) = self.load::<T>(kind, id)? else {
            return Err(missing);
        };
        apply(&mut current).map_err(|e| StoreError::Rejected(Box::new(e)))?;
        self.save(kind, id, &current)?;
        Ok(current)
    }
}

#[async_trait]
impl EntityStore for JsonStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let existing: Vec<User> = self.load_all(USERS)?;
        if existing.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        self.save(USERS, user.id.as_str(), &user)
    }

    async fn user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.load(USERS, id.as_str())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.to_lowercase();
        let all: Vec<User> = self.load_all(USERS)?;
        Ok(all.into_iter().find(|u| u.email == email))
    }

    async fn update_user(&self, id: &UserId, apply: Mutation<User>) -> Result<User, StoreError> {
        self.mutate(USERS, id.as_str(), apply, StoreError::UserNotFound(id.clone()))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if self.remove(USERS, id.as_str())? {
            Ok(())
        } else {
            Err(StoreError::UserNotFound(id.clone()))
        }
    }

    async fn insert_course(&self, course: Course) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let existing: Vec<Course> = self.load_all(COURSES)?;
        if existing.iter().any(|c| c.code == course.code) {
            return Err(StoreError::DuplicateCode(course.code));
        }
        self.save(COURSES, course.id.as_str(), &course)
    }

    async fn course(&self, id: &CourseId) -> Result<Option<Course>, StoreError> {
        self.load(COURSES, id.as_str())
    }

    async fn course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError> {
        let code = code.to_uppercase();
        let all: Vec<Course> = self.load_all(COURSES)?;
        Ok(all.into_iter().find(|c| c.code == code))
    }

    async fn update_course(
        &self,
        id: &CourseId,
        apply: Mutation<Course>,
    ) -> Result<Course, StoreError> {
        self.mutate(
            COURSES,
            id.as_str(),
            apply,
            StoreError::CourseNotFound(id.clone()),
        )
    }

    async fn search_courses(&self, text: &str) -> Result<Vec<Course>, StoreError> {
        let all: Vec<Course> = self.load_all(COURSES)?;
        let mut found: Vec<Course> = all
            .into_iter()
            .filter(|c| c.is_active && c.matches(text))
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
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let existing: Vec<Review> = self.load_all(REVIEWS)?;
        let duplicate = existing
            .iter()
            .any(|r| r.user == review.user && r.course == review.course);
        if duplicate {
            return Err(StoreError::DuplicateReview {
                user: review.user,
                course: review.course,
            });
        }
        self.save(REVIEWS, review.id.as_str(), &review)
    }

    async fn review(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        self.load(REVIEWS, id.as_str())
    }

    async fn review_for(
        &self,
        user: &UserId,
        course: &CourseId,
    ) -> Result<Option<Review>, StoreError> {
        let all: Vec<Review> = self.load_all(REVIEWS)?;
        Ok(all
            .into_iter()
            .find(|r| &r.user == user && &r.course == course))
    }

    async fn course_reviews(&self, course: &CourseId) -> Result<Vec<Review>, StoreError> {
        let all: Vec<Review> = self.load_all(REVIEWS)?;
        Ok(all.into_iter().filter(|r| &r.course == course).collect())
    }

    async fn user_reviews(&self, user: &UserId) -> Result<Vec<Review>, StoreError> {
        let all: Vec<Review> = self.load_all(REVIEWS)?;
        Ok(all.into_iter().filter(|r| &r.user == user).collect())
    }

    async fn visible_course_reviews(
        &self,
        course: &CourseId,
        query: ReviewQuery,
    ) -> Result<Vec<Review>, StoreError> {
        let all: Vec<Review> = self.load_all(REVIEWS)?;
        let mut found: Vec<Review> = all
            .into_iter()
            .filter(|r| &r.course == course && !r.is_hidden)
            .filter(|r| !query.verified_only || r.is_verified)
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
        let all: Vec<Review> = self.load_all(REVIEWS)?;
        let mut found: Vec<Review> = all
            .into_iter()
            .filter(|r| &r.user == user && !r.is_hidden)
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
        self.mutate(
            REVIEWS,
            id.as_str(),
            apply,
            StoreError::ReviewNotFound(id.clone()),
        )
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if self.remove(REVIEWS, id.as_str())? {
            Ok(())
        } else {
            Err(StoreError::ReviewNotFound(id.clone()))
        }
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
