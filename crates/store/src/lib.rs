// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! compass-store: `EntityStore` implementations
//!
//! - [`MemoryStore`]: mutex-held maps; the default test double, with
//!   injectable write failures for exercising secondary-write staleness
//! - [`JsonStore`]: one JSON file per entity under a base directory

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;
