//! Screen selection
//!
//! The router holds the single page currently shown. Navigation overwrites
//! it unconditionally; role checks belong to whoever offers the navigation.

use serde::{Deserialize, Serialize};

use crate::scoring::Metric;

/// The mini-games hosted on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    /// Tech bingo, run outside the scoreboard
    #[display("bingo")]
    Bingo,
    /// Mindclans quiz
    #[display("mindclans")]
    Mindclans,
    /// Sell the Product
    #[display("sell")]
    Sell,
    /// Pitch the Product
    #[display("pitch")]
    Pitch,
    /// Treasure hunt, run outside the scoreboard
    #[display("treasure")]
    Treasure,
}

impl GameId {
    /// All games in dashboard order
    pub const ALL: [GameId; 5] = [
        GameId::Bingo,
        GameId::Mindclans,
        GameId::Sell,
        GameId::Pitch,
        GameId::Treasure,
    ];

    /// Returns the team metric this game's screen edits, if any
    pub fn metric(self) -> Option<Metric> {
        match self {
            GameId::Mindclans => Some(Metric::Mindclans),
            GameId::Sell => Some(Metric::SellProductEarnings),
            GameId::Pitch => Some(Metric::PitchProductMarks),
            GameId::Bingo | GameId::Treasure => None,
        }
    }
}

impl From<Metric> for GameId {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Mindclans => GameId::Mindclans,
            Metric::SellProductEarnings => GameId::Sell,
            Metric::PitchProductMarks => GameId::Pitch,
        }
    }
}

/// Every screen the presentation layer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Landing screen
    #[default]
    Home,
    /// Game hub listing all games
    Dashboard,
    /// Team registry management
    Admin,
    /// One game's screen
    Game(GameId),
}

impl From<GameId> for Page {
    fn from(game: GameId) -> Self {
        Page::Game(game)
    }
}

/// Holds the currently selected page
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Page,
}

impl Router {
    /// Returns the page currently shown
    pub fn current(&self) -> Page {
        self.current
    }

    /// Switches to `page`
    pub fn navigate(&mut self, page: impl Into<Page>) {
        self.current = page.into();
    }
}
