// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User entity
//!
//! `review_count` and `helpful_votes` are denormalized counters maintained by
//! the service layer as best-effort secondary writes; they may lag the review
//! set but never go negative.

use crate::id::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered platform user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Lowercased, unique, restricted to the configured university domain
    pub email: String,
    pub department: String,
    pub year_of_study: u8,
    pub is_verified: bool,
    pub is_admin: bool,
    /// Count of this user's non-deleted reviews
    pub review_count: u32,
    /// Lifetime helpful votes received across this user's reviews
    pub helpful_votes: u32,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// Input for registering a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default = "default_year")]
    pub year_of_study: u8,
}

fn default_year() -> u8 {
    1
}

impl User {
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: new_user.name,
            email: new_user.email.trim().to_lowercase(),
            department: new_user.department,
            year_of_study: new_user.year_of_study,
            is_verified: false,
            is_admin: false,
            review_count: 0,
            helpful_votes: 0,
            created_at: now,
            last_login: now,
        }
    }

    pub fn record_review_added(&mut self) {
        self.review_count += 1;
    }

    pub fn record_review_removed(&mut self) {
        self.review_count = self.review_count.saturating_sub(1);
    }

    pub fn record_helpful_received(&mut self) {
        self.helpful_votes += 1;
    }

    pub fn record_helpful_lost(&mut self) {
        self.helpful_votes = self.helpful_votes.saturating_sub(1);
    }

    pub fn touch_login(&mut self) {
        self.last_login = Utc::now();
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
