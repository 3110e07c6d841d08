//! Configuration constants for the scoreboard
//!
//! This module contains the fixed limits, the shared admin secret and the
//! names of the persisted records used throughout the crate.

/// Access control constants
pub mod access {
    /// Clearance code that unlocks score editing
    ///
    /// This is a plaintext literal compared with exact string equality. It is
    /// not a security boundary.
    pub const ADMIN_SECRET: &str = "ADMIN2026";
}

/// Team registration constants
pub mod team {
    /// Maximum length of a team name in characters
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Maximum number of members listed on a single team
    pub const MAX_MEMBER_COUNT: usize = 50;
    /// Prefix of every generated team id
    pub const ID_PREFIX: &str = "t_";
    /// Number of base-36 characters following the id prefix
    pub const ID_LENGTH: usize = 9;
}

/// Scoring constants
pub mod scoring {
    /// Sell-product earnings are divided by this before joining the total
    pub const EARNINGS_DIVISOR: f64 = 100.0;
}

/// Leaderboard constants
pub mod leaderboard {
    /// Number of standings shown on a board by default
    pub const DISPLAY_LIMIT: usize = 50;
}

/// Persisted record names
pub mod storage {
    /// Default prefix prepended to every record key
    pub const KEY_PREFIX: &str = "zerone_";
    /// Name of the record holding the ordered team list
    pub const TEAMS_KEY: &str = "teams";
    /// Name of the record holding the authorization flag
    pub const ADMIN_AUTH_KEY: &str = "admin_auth";
    /// Maximum length of a record key prefix
    pub const MAX_KEY_PREFIX_LENGTH: usize = 32;
}
