// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Course entity and aggregate derivation
//!
//! `rating`, `total_reviews`, and `total_helpful_votes` are caches derived
//! from the non-hidden review set, never a source of truth. They are
//! recomputed from scratch after every review mutation that can change the
//! set (create, rating edit, delete, hide transition) rather than maintained
//! incrementally, so a missed trigger leaves them stale but never drifting.

use crate::id::CourseId;
use crate::review::Review;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Uppercased, unique catalog code (e.g. "CS2600")
    pub code: String,
    pub name: String,
    pub department: String,
    pub credits: u8,
    pub semester: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Soft-delete flag; inactive courses are invisible to listings and
    /// reject new reviews
    pub is_active: bool,
    /// Mean of non-hidden review ratings, rounded to 1 decimal; 0.0 if none
    pub rating: f64,
    /// Count of non-hidden reviews
    pub total_reviews: u32,
    /// Sum of helpful votes across non-hidden reviews
    pub total_helpful_votes: u32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a catalog course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub department: String,
    pub credits: u8,
    pub semester: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Derived aggregate fields written back to a course
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseAggregates {
    pub rating: f64,
    pub total_reviews: u32,
    pub total_helpful_votes: u32,
}

impl Course {
    pub fn new(id: CourseId, new_course: NewCourse) -> Self {
        Self {
            id,
            code: new_course.code.trim().to_uppercase(),
            name: new_course.name,
            department: new_course.department,
            credits: new_course.credits,
            semester: new_course.semester,
            description: new_course.description,
            tags: new_course.tags,
            is_active: true,
            rating: 0.0,
            total_reviews: 0,
            total_helpful_votes: 0,
            created_at: Utc::now(),
        }
    }

    pub fn apply_aggregates(&mut self, aggregates: CourseAggregates) {
        self.rating = aggregates.rating;
        self.total_reviews = aggregates.total_reviews;
        self.total_helpful_votes = aggregates.total_helpful_votes;
    }

    /// Case-insensitive substring match over code, name, department, and tags
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.code.to_lowercase().contains(&needle)
            || self.name.to_lowercase().contains(&needle)
            || self.department.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Derive course aggregates from its review set. Hidden reviews are excluded;
/// the mean is rounded to one decimal place.
pub fn aggregate_reviews(reviews: &[Review]) -> CourseAggregates {
    let visible: Vec<&Review> = reviews.iter().filter(|r| !r.is_hidden).collect();
    if visible.is_empty() {
        return CourseAggregates {
            rating: 0.0,
            total_reviews: 0,
            total_helpful_votes: 0,
        };
    }

    let sum: u32 = visible.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / visible.len() as f64;
    CourseAggregates {
        rating: (mean * 10.0).round() / 10.0,
        total_reviews: visible.len() as u32,
        total_helpful_votes: visible.iter().map(|r| r.helpful_votes).sum(),
    }
}

#[cfg(test)]
#[path = "course_tests.rs"]
mod tests;
