// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! compass-core: Core library for the Compass course-review platform
//!
//! This crate provides:
//! - Domain entities (users, courses, reviews) with pure state transitions
//! - Per-user vote/report ledgers with set semantics
//! - The review/moderation policy and its configuration
//! - The `EntityStore` trait through which the service layer persists entities

pub mod clock;
pub mod id;

pub mod config;
pub mod error;
pub mod ledger;
pub mod policy;
pub mod store;

// Entities (order matters for dependencies)
pub mod user;
pub mod review;
pub mod course;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, RateLimitConfig, ServiceConfig};
pub use course::{aggregate_reviews, Course, CourseAggregates, NewCourse};
pub use error::{Error, ErrorKind};
pub use id::{CourseId, IdGen, ReviewId, SequentialIdGen, UserId, UuidIdGen};
pub use ledger::Ledger;
pub use policy::ReviewPolicy;
pub use review::{
    EditSnapshot, ReportEntry, ReportOutcome, ReportReason, Review, ReviewDraft, ReviewUpdate,
    VoteEntry, VoteKind, VoteOutcome,
};
pub use store::{EntityStore, Mutation, ReviewQuery, StoreError};
pub use user::{NewUser, User};
