// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration
//!
//! Loaded from TOML; every field has a default so a missing or partial file
//! still yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunable knobs of the review/moderation core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// University email domain registrations are restricted to
    pub email_domain: String,
    /// Per-user review quota
    pub max_reviews_per_user: u32,
    /// Reports required before a review is auto-hidden
    pub report_hide_threshold: u32,
    /// Listing limit applied when the caller does not pass one
    pub default_listing_limit: usize,
    pub rate_limit: RateLimitConfig,
}

/// Sliding-window per-user rate limit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    #[serde(with = "humantime_serde")]
    pub window: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            email_domain: "smail.iitm.ac.in".to_string(),
            max_reviews_per_user: 50,
            report_hide_threshold: 5,
            default_listing_limit: 50,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
