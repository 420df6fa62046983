// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Review policy: who may submit, and what a valid submission looks like

use crate::config::ServiceConfig;
use crate::course::NewCourse;
use crate::error::Error;
use crate::review::{ReviewDraft, ReviewUpdate};
use crate::user::User;

/// Semesters a review or course may reference
pub const SEMESTERS: [&str; 10] = [
    "Semester 1",
    "Semester 2",
    "Semester 3",
    "Semester 4",
    "Semester 5",
    "Semester 6",
    "Semester 7",
    "Semester 8",
    "Summer",
    "Winter",
];

const COMMENT_MIN: usize = 10;
const COMMENT_MAX: usize = 2000;
const PROFESSOR_MAX: usize = 100;
const TAG_MAX: usize = 50;
const YEAR_MIN: u16 = 2020;
const YEAR_MAX: u16 = 2030;
const CREDITS_MIN: u8 = 1;
const CREDITS_MAX: u8 = 20;

/// Submission and moderation policy derived from [`ServiceConfig`]
#[derive(Debug, Clone)]
pub struct ReviewPolicy {
    pub email_domain: String,
    pub max_reviews_per_user: u32,
    pub report_hide_threshold: u32,
    pub default_listing_limit: usize,
}

impl From<&ServiceConfig> for ReviewPolicy {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            email_domain: config.email_domain.clone(),
            max_reviews_per_user: config.max_reviews_per_user,
            report_hide_threshold: config.report_hide_threshold,
            default_listing_limit: config.default_listing_limit,
        }
    }
}

impl ReviewPolicy {
    /// Check that an email belongs to the allowed university domain
    pub fn check_email(&self, email: &str) -> Result<(), Error> {
        let suffix = format!("@{}", self.email_domain);
        if email.trim().to_lowercase().ends_with(&suffix) {
            Ok(())
        } else {
            Err(Error::EmailNotAllowed {
                email: email.to_string(),
                domain: self.email_domain.clone(),
            })
        }
    }

    /// Check that a user may submit a new review: verified and under quota
    pub fn check_author(&self, author: &User) -> Result<(), Error> {
        if !author.is_verified {
            return Err(Error::NotVerified(author.id.clone()));
        }
        if author.review_count >= self.max_reviews_per_user {
            return Err(Error::QuotaExceeded {
                user: author.id.clone(),
                count: author.review_count,
                limit: self.max_reviews_per_user,
            });
        }
        Ok(())
    }

    pub fn validate_draft(&self, draft: &ReviewDraft) -> Result<(), Error> {
        scale("rating", draft.rating)?;
        if let Some(difficulty) = draft.difficulty {
            scale("difficulty", difficulty)?;
        }
        if let Some(workload) = draft.workload {
            scale("workload", workload)?;
        }
        comment(&draft.comment)?;
        semester(&draft.semester)?;
        year(draft.year)?;
        if let Some(ref professor) = draft.professor {
            bounded("professor", professor, PROFESSOR_MAX)?;
        }
        tags(&draft.tags)?;
        Ok(())
    }

    pub fn validate_course(&self, new_course: &NewCourse) -> Result<(), Error> {
        if new_course.code.trim().is_empty() {
            return Err(Error::InvalidField {
                field: "code",
                reason: "must not be empty".to_string(),
            });
        }
        if new_course.name.trim().is_empty() {
            return Err(Error::InvalidField {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        if !(CREDITS_MIN..=CREDITS_MAX).contains(&new_course.credits) {
            return Err(Error::InvalidField {
                field: "credits",
                reason: format!(
                    "{} is not between {} and {}",
                    new_course.credits, CREDITS_MIN, CREDITS_MAX
                ),
            });
        }
        semester(&new_course.semester)?;
        tags(&new_course.tags)?;
        Ok(())
    }

    pub fn validate_update(&self, update: &ReviewUpdate) -> Result<(), Error> {
        if let Some(rating) = update.rating {
            scale("rating", rating)?;
        }
        if let Some(difficulty) = update.difficulty {
            scale("difficulty", difficulty)?;
        }
        if let Some(workload) = update.workload {
            scale("workload", workload)?;
        }
        if let Some(ref text) = update.comment {
            comment(text)?;
        }
        if let Some(ref professor) = update.professor {
            bounded("professor", professor, PROFESSOR_MAX)?;
        }
        if let Some(ref new_tags) = update.tags {
            tags(new_tags)?;
        }
        Ok(())
    }
}

fn scale(field: &'static str, value: u8) -> Result<(), Error> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidField {
            field,
            reason: format!("{} is not between 1 and 5", value),
        })
    }
}

fn comment(text: &str) -> Result<(), Error> {
    let len = text.trim().chars().count();
    if (COMMENT_MIN..=COMMENT_MAX).contains(&len) {
        Ok(())
    } else {
        Err(Error::InvalidField {
            field: "comment",
            reason: format!(
                "length {} is not between {} and {} characters",
                len, COMMENT_MIN, COMMENT_MAX
            ),
        })
    }
}

fn semester(value: &str) -> Result<(), Error> {
    if SEMESTERS.contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidField {
            field: "semester",
            reason: format!("unknown semester {:?}", value),
        })
    }
}

fn year(value: u16) -> Result<(), Error> {
    if (YEAR_MIN..=YEAR_MAX).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidField {
            field: "year",
            reason: format!("{} is not between {} and {}", value, YEAR_MIN, YEAR_MAX),
        })
    }
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), Error> {
    if value.chars().count() <= max {
        Ok(())
    } else {
        Err(Error::InvalidField {
            field,
            reason: format!("exceeds {} characters", max),
        })
    }
}

fn tags(values: &[String]) -> Result<(), Error> {
    for tag in values {
        bounded("tag", tag, TAG_MAX)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
