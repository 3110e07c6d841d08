//! Leaderboards derived from the team registry
//!
//! Every scoring game shows its teams ranked by that game's metric, and the
//! dashboard ranks teams by total score. Boards are recomputed from the
//! registry on demand and never stored.

use enum_map::EnumMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    TruncatedVec,
    constants::leaderboard::DISPLAY_LIMIT,
    scoring::Metric,
    team_id::TeamId,
    teams::Team,
};

/// Which value a leaderboard ranks teams by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Board {
    /// Ranked by derived total score
    #[default]
    Total,
    /// Ranked by a single game's metric
    Game(Metric),
}

impl Board {
    /// Reads the value this board ranks by from a team
    pub fn points(self, team: &Team) -> f64 {
        match self {
            Board::Total => team.total_score(),
            Board::Game(metric) => team.metric(metric),
        }
    }
}

impl From<Metric> for Board {
    fn from(metric: Metric) -> Self {
        Board::Game(metric)
    }
}

/// One team's row on a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    /// The ranked team
    pub team_id: TeamId,
    /// The team's display name
    pub name: String,
    /// The value the board ranks by
    pub points: f64,
    /// Position on the board (1-indexed)
    pub position: usize,
}

/// Teams ranked by one board's value, highest first
///
/// Teams with equal points keep their registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Leaderboard {
    board: Board,
    standings: Vec<Standing>,
}

impl Leaderboard {
    /// Ranks `teams` by `board`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zerone::leaderboard::{Board, Leaderboard};
    /// use zerone::teams::TeamRegistry;
    ///
    /// let mut registry = TeamRegistry::default();
    /// registry.add_team("Cyber Phantoms", vec![]).unwrap();
    /// let board = Leaderboard::rank(&registry, Board::Total);
    /// assert_eq!(board.standings()[0].position, 1);
    /// ```
    pub fn rank<'a, I>(teams: I, board: Board) -> Self
    where
        I: IntoIterator<Item = &'a Team>,
    {
        let standings = teams
            .into_iter()
            .map(|team| (team, board.points(team)))
            .sorted_by(|(_, a), (_, b)| b.total_cmp(a))
            .enumerate()
            .map(|(index, (team, points))| Standing {
                team_id: team.id().clone(),
                name: team.name().to_owned(),
                points,
                position: index + 1,
            })
            .collect_vec();

        Self { board, standings }
    }

    /// Ranks `teams` on every per-game board at once
    pub fn per_game<'a, I>(teams: I) -> EnumMap<Metric, Leaderboard>
    where
        I: IntoIterator<Item = &'a Team>,
        I::IntoIter: Clone,
    {
        let teams = teams.into_iter();
        EnumMap::from_fn(|metric| Self::rank(teams.clone(), Board::Game(metric)))
    }

    /// Returns the board this leaderboard ranks by
    pub fn board(&self) -> Board {
        self.board
    }

    /// Returns every standing, highest first
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// Returns the leading standings, keeping the exact team count
    pub fn top(&self, limit: usize) -> TruncatedVec<Standing> {
        TruncatedVec::new(self.standings.iter().cloned(), limit, self.standings.len())
    }

    /// Returns the standings shown on screen
    pub fn display(&self) -> TruncatedVec<Standing> {
        self.top(DISPLAY_LIMIT)
    }

    /// Looks up one team's standing
    pub fn standing(&self, team_id: &TeamId) -> Option<&Standing> {
        self.standings
            .iter()
            .find(|standing| standing.team_id == *team_id)
    }
}
