// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user ledger backing `voted_by` and `reported_by`
//!
//! A set keyed by the acting user's identifier: O(1) lookup through a hash
//! index, insertion order preserved through a companion order vector.
//! Invariant: `order` holds exactly the keys of `entries`, oldest first.

use crate::id::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered mapping from user id to a ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger<T> {
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.entries.contains_key(user.as_str())
    }

    pub fn get(&self, user: &UserId) -> Option<&T> {
        self.entries.get(user.as_str())
    }

    pub fn get_mut(&mut self, user: &UserId) -> Option<&mut T> {
        self.entries.get_mut(user.as_str())
    }

    /// Insert an entry for a user. Returns false (leaving the existing entry
    /// untouched) if the user already has one.
    pub fn insert(&mut self, user: &UserId, entry: T) -> bool {
        if self.contains(user) {
            return false;
        }
        self.entries.insert(user.0.clone(), entry);
        self.order.push(user.0.clone());
        true
    }

    pub fn remove(&mut self, user: &UserId) -> Option<T> {
        let removed = self.entries.remove(user.as_str())?;
        self.order.retain(|id| id != user.as_str());
        Some(removed)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| (id.as_str(), entry)))
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
