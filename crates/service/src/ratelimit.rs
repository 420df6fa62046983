// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user sliding-window rate limiter
//!
//! Each mutating operation records a hit against the calling user. A call is
//! rejected once the user has `max_requests` hits inside the trailing window.
//! Old hits are pruned lazily on each check, so an idle user costs nothing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use compass_core::{Clock, Error, RateLimitConfig, UserId};

pub struct RateLimiter<C: Clock> {
    clock: C,
    max_requests: u32,
    window: Duration,
    hits: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
}

impl<C: Clock> Clone for RateLimiter<C> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            max_requests: self.max_requests,
            window: self.window,
            hits: Arc::clone(&self.hits),
        }
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn new(clock: C, config: &RateLimitConfig) -> Self {
        Self {
            clock,
            max_requests: config.max_requests,
            window: config.window,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record a hit for `user`, or reject if the window is full.
    pub fn check(&self, user: &UserId) -> Result<(), Error> {
        let now = self.clock.now();
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let window = hits.entry(user.as_str().to_owned()).or_default();
        window.retain(|hit| now.duration_since(*hit) < self.window);
        if window.len() >= self.max_requests as usize {
            tracing::warn!(user = %user, hits = window.len(), "rate limit exceeded");
            return Err(Error::RateLimited(user.clone()));
        }
        window.push(now);
        Ok(())
    }
}

#[cfg(test)]
#[path = "ratelimit_tests.rs"]
mod tests;
