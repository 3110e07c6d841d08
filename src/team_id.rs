//! Team ID generation and management
//!
//! Team IDs are opaque strings. Freshly generated ones take the form `t_`
//! followed by nine lowercase base-36 characters, but any non-empty string
//! read back from storage is accepted so that previously persisted records
//! keep their identity.

use std::{fmt::Display, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

use crate::constants::team::{ID_LENGTH, ID_PREFIX};

/// Alphabet used for generated IDs
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A unique, immutable identifier for a registered team
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct TeamId(String);

/// Errors that can occur while parsing a team ID
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ID is empty or contains only whitespace
    #[error("team id cannot be empty")]
    Empty,
}

impl TeamId {
    /// Creates a new random team ID
    pub fn new() -> Self {
        let suffix: String = std::iter::repeat_with(|| char::from(BASE36[fastrand::usize(..36)]))
            .take(ID_LENGTH)
            .collect();
        Self(format!("{ID_PREFIX}{suffix}"))
    }

    /// Returns the fixed ID of the `index`th built-in seed team
    pub(crate) fn seeded(index: usize) -> Self {
        Self(format!("{ID_PREFIX}seed{index:05}"))
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TeamId {
    /// Creates a new random team ID (same as `new()`)
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TeamId {
    type Err = Error;

    /// Parses a team ID, accepting any non-blank string
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` if the string is empty or only whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self(s.to_owned()))
    }
}
