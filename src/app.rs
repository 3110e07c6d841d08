//! Application state for a running scoreboard
//!
//! This module contains the [`App`] struct, which owns every piece of mutable
//! state the presentation layer works with: the team registry, the access
//! controller, the current page and the injected storage. Every mutation goes
//! through `App`, which writes the affected record back to storage in full
//! before returning.

use std::fmt::Debug;

use enum_map::EnumMap;
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    access::{self, AccessController, Role},
    constants,
    leaderboard::{Board, Leaderboard},
    router::{Page, Router},
    scoring::Metric,
    storage::{self, Storage},
    team_id::TeamId,
    teams::{self, Team, TeamRegistry},
};

/// Errors surfaced by application operations
#[derive(Error, Debug)]
pub enum Error {
    /// The options failed validation
    #[error("invalid options: {0}")]
    Options(#[from] garde::Report),
    /// A team could not be registered
    #[error(transparent)]
    Team(#[from] teams::Error),
    /// Access was refused
    #[error(transparent)]
    Access(#[from] access::Error),
    /// A record could not be read or written
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

/// A team present before anything has been persisted
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SeedTeam {
    /// Stable ID of the seeded team
    #[garde(skip)]
    pub id: TeamId,
    /// Display name
    #[garde(length(chars, min = 1, max = constants::team::MAX_NAME_LENGTH))]
    pub name: String,
    /// Member display names
    #[garde(length(max = constants::team::MAX_MEMBER_COUNT))]
    pub members: Vec<String>,
}

/// Configuration for a scoreboard session
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Options {
    /// Clearance code that unlocks score editing
    #[garde(length(min = 1))]
    pub secret: String,
    /// Prefix prepended to every persisted record key
    #[garde(length(max = constants::storage::MAX_KEY_PREFIX_LENGTH))]
    pub key_prefix: String,
    /// Teams loaded when no team record has been persisted yet
    #[garde(dive)]
    pub seed: Vec<SeedTeam>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            secret: constants::access::ADMIN_SECRET.to_owned(),
            key_prefix: constants::storage::KEY_PREFIX.to_owned(),
            seed: default_seed(),
        }
    }
}

/// The fixed seed list used on first start
fn default_seed() -> Vec<SeedTeam> {
    [
        ("Cyber Phantoms", &["Alice", "Bob"][..]),
        ("Null Pointers", &["Charlie", "Dana"][..]),
        ("Bit Busters", &["Eve", "Frank"][..]),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (name, members))| SeedTeam {
        id: TeamId::seeded(index + 1),
        name: name.to_owned(),
        members: members.iter().map(|m| (*m).to_owned()).collect(),
    })
    .collect()
}

/// Result of a score edit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ScoreUpdate {
    /// The metric was written; carries the team's new total
    Applied {
        /// The recomputed total score
        total: f64,
    },
    /// The value is infinite or NaN and cannot be stored; nothing changed
    NonFinite,
    /// Nobody is logged in; nothing changed and the login prompt is raised
    Denied,
    /// No team has the given ID; nothing changed
    TeamNotFound,
}

/// The whole scoreboard state, backed by `S`
pub struct App<S: Storage> {
    /// Registered teams in registration order
    teams: TeamRegistry,
    /// Authorization flag and login prompt
    access: AccessController,
    /// Currently shown page
    router: Router,
    /// Where records are persisted
    storage: S,
    /// Full key of the team record
    teams_key: String,
    /// Full key of the authorization record
    auth_key: String,
}

impl<S: Storage> Debug for App<S> {
    /// Custom debug implementation that avoids printing the storage
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("teams", &self.teams.len())
            .field("role", &self.access.role())
            .field("page", &self.router.current())
            .finish_non_exhaustive()
    }
}

impl<S: Storage> App<S> {
    /// Restores a session from `storage` using the default options
    ///
    /// # Errors
    ///
    /// See [`App::load`].
    pub fn new(storage: S) -> Result<Self, Error> {
        Self::load(storage, Options::default())
    }

    /// Restores a session from `storage`
    ///
    /// The team record is loaded if present, otherwise the seed list from
    /// `options` is used. The authorization flag is restored so a coordinator
    /// does not need to log in again; anything other than a stored `true`
    /// means guest.
    ///
    /// # Errors
    ///
    /// * `Error::Options` - The options fail validation
    /// * `Error::Storage` - A record cannot be read, or the team record is malformed
    /// * `Error::Team` - A seed team is invalid
    pub fn load(storage: S, options: Options) -> Result<Self, Error> {
        options.validate()?;
        let Options {
            secret,
            key_prefix,
            seed,
        } = options;

        let teams_key = format!("{key_prefix}{}", constants::storage::TEAMS_KEY);
        let auth_key = format!("{key_prefix}{}", constants::storage::ADMIN_AUTH_KEY);

        let teams = match storage::read_json::<TeamRegistry, _>(&storage, &teams_key)? {
            Some(teams) => {
                debug!(count = teams.len(), "restored team registry");
                teams
            }
            None => {
                debug!(count = seed.len(), "no stored teams, using seed list");
                seed.into_iter()
                    .map(|team| Team::with_id(team.id, &team.name, team.members))
                    .collect::<Result<Vec<_>, _>>()?
                    .into()
            }
        };

        let authorized = match storage.get(&auth_key)? {
            Some(text) => serde_json::from_str::<bool>(&text).unwrap_or_else(|_| {
                warn!(key = %auth_key, "unreadable authorization flag, starting as guest");
                false
            }),
            None => false,
        };
        if authorized {
            info!("restored coordinator session");
        }

        Ok(Self {
            teams,
            access: AccessController::new(secret, authorized),
            router: Router::default(),
            storage,
            teams_key,
            auth_key,
        })
    }

    /// Returns the registered teams
    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    /// Registers a team and persists the registry
    ///
    /// # Errors
    ///
    /// * `Error::Team` - The name is blank or a length limit is exceeded
    /// * `Error::Storage` - The registry could not be written
    pub fn add_team(&mut self, name: &str, members: Vec<String>) -> Result<TeamId, Error> {
        let mut teams = self.teams.clone();
        let id = teams.add_team(name, members)?;
        self.commit_teams(teams)?;
        info!(team_id = %id, "team added");
        Ok(id)
    }

    /// Registers a team from the admin form's raw fields
    ///
    /// `members_field` is a comma-separated list; blank entries are dropped.
    ///
    /// # Errors
    ///
    /// Same as [`App::add_team`].
    pub fn add_team_from_form(&mut self, name: &str, members_field: &str) -> Result<TeamId, Error> {
        self.add_team(name, teams::parse_members(members_field))
    }

    /// Removes a team and persists the registry
    ///
    /// Removing an unknown ID is a no-op and writes nothing.
    ///
    /// # Returns
    ///
    /// The removed team, if one matched
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the registry could not be written.
    pub fn remove_team(&mut self, id: &TeamId) -> Result<Option<Team>, Error> {
        let mut teams = self.teams.clone();
        let Some(team) = teams.remove_team(id) else {
            debug!(team_id = %id, "ignoring removal of unknown team");
            return Ok(None);
        };
        self.commit_teams(teams)?;
        info!(team_id = %id, "team removed");
        Ok(Some(team))
    }

    /// Sets one metric on a team, gated on coordinator access
    ///
    /// The team's total is recomputed in the same step as the metric write.
    /// Without access nothing changes and the login prompt is raised.
    /// Infinite and NaN values are refused since they have no JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the registry could not be written; the
    /// in-memory registry is then left as it was.
    pub fn update_score(
        &mut self,
        team_id: &TeamId,
        metric: Metric,
        value: f64,
    ) -> Result<ScoreUpdate, Error> {
        let current = &self.teams;
        let edited = self.access.guard(|| {
            let mut teams = current.clone();
            let total = teams.update_metric(team_id, metric, value)?;
            Some((teams, total))
        });
        match edited {
            Err(e) => {
                debug!(team_id = %team_id, %metric, error = %e, "score edit denied");
                Ok(ScoreUpdate::Denied)
            }
            Ok(_) if !value.is_finite() => {
                warn!(team_id = %team_id, %metric, value, "refusing non-finite score");
                Ok(ScoreUpdate::NonFinite)
            }
            Ok(None) => {
                debug!(team_id = %team_id, "ignoring score edit for unknown team");
                Ok(ScoreUpdate::TeamNotFound)
            }
            Ok(Some((teams, total))) => {
                self.commit_teams(teams)?;
                Ok(ScoreUpdate::Applied { total })
            }
        }
    }

    /// Checks a clearance code and persists the new authorization flag
    ///
    /// On success the login prompt closes, and a coordinator still on the
    /// landing page is taken to the dashboard.
    ///
    /// # Errors
    ///
    /// * `Error::Access` - The code is wrong; nothing changed
    /// * `Error::Storage` - The flag could not be written; the session stays guest
    pub fn attempt_login(&mut self, code: &str) -> Result<(), Error> {
        self.access.verify(code)?;
        self.save_auth(true)?;
        self.access.attempt_login(code)?;
        if self.router.current() == Page::Home {
            self.router.navigate(Page::Dashboard);
        }
        Ok(())
    }

    /// Ends coordinator access and persists the flag
    ///
    /// A coordinator on the team registry page is moved to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the flag could not be written; the
    /// coordinator session is then kept.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.save_auth(false)?;
        self.access.logout();
        if self.router.current() == Page::Admin {
            self.router.navigate(Page::Dashboard);
        }
        Ok(())
    }

    /// Opens the login prompt
    pub fn request_admin_access(&mut self) {
        self.access.request_prompt();
    }

    /// Closes the login prompt without logging in
    pub fn dismiss_prompt(&mut self) {
        self.access.dismiss_prompt();
    }

    /// Returns whether the login prompt should be shown
    pub fn prompt_pending(&self) -> bool {
        self.access.prompt_pending()
    }

    /// Returns the current role
    pub fn role(&self) -> Role {
        self.access.role()
    }

    /// Switches the shown page
    pub fn navigate(&mut self, page: impl Into<Page>) {
        self.router.navigate(page);
    }

    /// Returns the shown page
    pub fn page(&self) -> Page {
        self.router.current()
    }

    /// Ranks the registered teams on one board
    pub fn leaderboard(&self, board: Board) -> Leaderboard {
        Leaderboard::rank(&self.teams, board)
    }

    /// Ranks the registered teams on every per-game board
    pub fn game_leaderboards(&self) -> EnumMap<Metric, Leaderboard> {
        Leaderboard::per_game(&self.teams)
    }

    /// Returns the backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the app and returns its storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Writes `teams` and only then replaces the in-memory registry
    fn commit_teams(&mut self, teams: TeamRegistry) -> Result<(), Error> {
        storage::write_json(&mut self.storage, &self.teams_key, &teams)?;
        self.teams = teams;
        Ok(())
    }

    fn save_auth(&mut self, authorized: bool) -> Result<(), Error> {
        storage::write_json(&mut self.storage, &self.auth_key, &authorized)?;
        Ok(())
    }
}
