//! # Zerone Scoreboard Library
//!
//! This library holds the state behind a live event scoreboard: team
//! registration, a shared-secret gate on score editing, per-game metrics with
//! a derived total, leaderboards, and the page currently shown. State is owned
//! by a single [`App`] value and mirrored to an injected key-value [`Storage`]
//! after every change.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]
use derive_where::derive_where;
use itertools::Itertools;
use serde::Serialize;

pub mod access;
pub mod app;
pub mod constants;
pub mod leaderboard;
pub mod router;
pub mod scoring;
pub mod storage;
pub mod team_id;
pub mod teams;

pub use access::Role;
pub use app::{App, Options, ScoreUpdate};
pub use scoring::Metric;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use team_id::TeamId;
pub use teams::{Team, TeamRegistry};

/// A list cut to a display limit that still remembers how long it was
///
/// Boards are shown to a fixed depth, but screens also print the full count,
/// e.g. "40 teams" above the top 10 standings.
#[derive(Debug, Clone, Serialize)]
#[derive_where(Default)]
pub struct TruncatedVec<T> {
    /// Length of the list before truncation
    exact_count: usize,
    /// Up to `limit` leading items
    items: Vec<T>,
}

impl<T> TruncatedVec<T> {
    /// Keeps the first `limit` items of `list`, recording `exact_count`
    pub fn new<I: Iterator<Item = T>>(list: I, limit: usize, exact_count: usize) -> Self {
        let items = list.take(limit).collect_vec();
        Self { exact_count, items }
    }

    /// Returns the length of the list before truncation
    pub fn exact_count(&self) -> usize {
        self.exact_count
    }

    /// Returns the kept items
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns whether items were dropped by the limit
    pub fn is_truncated(&self) -> bool {
        self.items.len() < self.exact_count
    }
}
