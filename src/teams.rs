//! Team records and the ordered team registry
//!
//! This module holds the [`Team`] record with its three score metrics and
//! derived total, and the [`TeamRegistry`] that keeps every registered team in
//! registration order. Persisting the registry is the job of the owning
//! [`App`](crate::app::App); the registry itself never touches storage.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    constants::team::{MAX_MEMBER_COUNT, MAX_NAME_LENGTH},
    scoring::{self, Metric},
    team_id::TeamId,
};

/// Errors that can occur when registering a team
#[derive(Error, Debug)]
pub enum Error {
    /// The team name is empty or contains only whitespace
    #[error("team name cannot be empty")]
    EmptyName,
    /// The registration breaks a length limit
    #[error("invalid team registration: {0}")]
    Invalid(#[from] garde::Report),
}

/// Registration form contents checked before a team is created
#[derive(Debug, Validate)]
struct Registration {
    #[garde(length(chars, min = 1, max = MAX_NAME_LENGTH))]
    name: String,
    #[garde(length(max = MAX_MEMBER_COUNT))]
    members: Vec<String>,
}

/// Serialization helper for Team
///
/// The stored total is ignored on load and recomputed from the metrics.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamSerde {
    id: TeamId,
    name: String,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    mindclans_score: f64,
    #[serde(default)]
    sell_product_earnings: f64,
    #[serde(default)]
    pitch_product_marks: f64,
}

/// A registered competing team
///
/// The total score is derived from the three metrics and can only change
/// through a metric write, which recomputes it in the same call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TeamSerde")]
pub struct Team {
    /// Unique identifier assigned at registration
    id: TeamId,
    /// Display name, trimmed and non-empty
    name: String,
    /// Member display names in entry order
    members: Vec<String>,
    /// Points from the Mindclans quiz
    mindclans_score: f64,
    /// Money earned in the Sell the Product game
    sell_product_earnings: f64,
    /// Judge marks from the Pitch the Product game
    pitch_product_marks: f64,
    /// Derived total of the three metrics
    total_score: f64,
}

impl From<TeamSerde> for Team {
    fn from(serde: TeamSerde) -> Self {
        let mut team = Team {
            id: serde.id,
            name: serde.name,
            members: serde.members,
            mindclans_score: serde.mindclans_score,
            sell_product_earnings: serde.sell_product_earnings,
            pitch_product_marks: serde.pitch_product_marks,
            total_score: 0.,
        };
        team.recompute_total();
        team
    }
}

impl Team {
    /// Creates a team with a fresh ID and all scores zeroed
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// * `Error::EmptyName` - The name is blank after trimming
    /// * `Error::Invalid` - The name or member list exceeds its length limit
    pub fn new(name: &str, members: Vec<String>) -> Result<Self, Error> {
        Self::with_id(TeamId::new(), name, members)
    }

    /// Creates a team with a caller-chosen ID and all scores zeroed
    ///
    /// Used for the fixed seed list, whose IDs are stable across runs.
    ///
    /// # Errors
    ///
    /// Same as [`Team::new`].
    pub fn with_id(id: TeamId, name: &str, members: Vec<String>) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let registration = Registration {
            name: name.to_owned(),
            members,
        };
        registration.validate()?;
        let Registration { name, members } = registration;

        Ok(Self {
            id,
            name,
            members,
            mindclans_score: 0.,
            sell_product_earnings: 0.,
            pitch_product_marks: 0.,
            total_score: 0.,
        })
    }

    /// Returns the team's unique identifier
    pub fn id(&self) -> &TeamId {
        &self.id
    }

    /// Returns the team's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member names in entry order
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns the current value of one metric
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Mindclans => self.mindclans_score,
            Metric::SellProductEarnings => self.sell_product_earnings,
            Metric::PitchProductMarks => self.pitch_product_marks,
        }
    }

    /// Returns the derived total score
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Writes one metric and recomputes the total
    fn set_metric(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Mindclans => self.mindclans_score = value,
            Metric::SellProductEarnings => self.sell_product_earnings = value,
            Metric::PitchProductMarks => self.pitch_product_marks = value,
        }
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_score = scoring::total_score(
            self.mindclans_score,
            self.sell_product_earnings,
            self.pitch_product_marks,
        );
    }
}

/// Splits a comma-separated member field into trimmed, non-empty names
///
/// # Examples
///
/// ```rust
/// use zerone::teams::parse_members;
///
/// assert_eq!(parse_members(" Alice, Bob,,  "), vec!["Alice", "Bob"]);
/// ```
pub fn parse_members(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .map(str::to_owned)
        .collect_vec()
}

/// Ordered collection of every registered team
///
/// Teams are kept in registration order. Duplicate names are allowed; IDs are
/// the only identity.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl From<Vec<Team>> for TeamRegistry {
    fn from(teams: Vec<Team>) -> Self {
        Self { teams }
    }
}

impl TeamRegistry {
    /// Registers a new team at the end of the registry
    ///
    /// # Returns
    ///
    /// The freshly generated ID of the new team
    ///
    /// # Errors
    ///
    /// Same as [`Team::new`].
    pub fn add_team(&mut self, name: &str, members: Vec<String>) -> Result<TeamId, Error> {
        let team = Team::new(name, members)?;
        let id = team.id.clone();
        self.teams.push(team);
        Ok(id)
    }

    /// Removes the team with the given ID
    ///
    /// # Returns
    ///
    /// The removed team, or `None` if no team has that ID
    pub fn remove_team(&mut self, id: &TeamId) -> Option<Team> {
        let position = self.teams.iter().position(|team| team.id == *id)?;
        Some(self.teams.remove(position))
    }

    /// Sets one metric on a team and recomputes its total
    ///
    /// This is ungated; callers outside the crate go through
    /// [`App::update_score`](crate::app::App::update_score).
    ///
    /// # Returns
    ///
    /// The team's new total, or `None` if no team has that ID
    pub(crate) fn update_metric(&mut self, id: &TeamId, metric: Metric, value: f64) -> Option<f64> {
        let team = self.teams.iter_mut().find(|team| team.id == *id)?;
        team.set_metric(metric, value);
        debug!(team_id = %id, %metric, value, total = team.total_score, "metric updated");
        Some(team.total_score)
    }

    /// Looks up a team by ID
    pub fn get(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == *id)
    }

    /// Iterates over teams in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Team> {
        self.teams.iter()
    }

    /// Returns the teams as a slice in registration order
    pub fn as_slice(&self) -> &[Team] {
        &self.teams
    }

    /// Returns the number of registered teams
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Checks whether no team is registered
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl<'a> IntoIterator for &'a TeamRegistry {
    type Item = &'a Team;
    type IntoIter = std::slice::Iter<'a, Team>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn members(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn test_add_team_zeroes_scores() {
        let mut registry = TeamRegistry::default();
        let id = registry
            .add_team("Cyber Phantoms", members(&["Alice", "Bob"]))
            .unwrap();

        let team = registry.get(&id).unwrap();
        assert_eq!(team.name(), "Cyber Phantoms");
        assert_eq!(team.members(), &["Alice", "Bob"]);
        for metric in Metric::ALL {
            assert_eq!(team.metric(metric), 0.);
        }
        assert_eq!(team.total_score(), 0.);
    }

    #[test]
    fn test_add_team_trims_name() {
        let mut registry = TeamRegistry::default();
        let id = registry.add_team("  Byte Me  ", Vec::new()).unwrap();
        assert_eq!(registry.get(&id).unwrap().name(), "Byte Me");
    }

    #[test]
    fn test_add_team_rejects_blank_name() {
        let mut registry = TeamRegistry::default();
        assert!(matches!(
            registry.add_team("   ", Vec::new()),
            Err(Error::EmptyName)
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_team_rejects_long_name() {
        let mut registry = TeamRegistry::default();
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            registry.add_team(&name, Vec::new()),
            Err(Error::Invalid(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_team_max_length_allowed() {
        let mut registry = TeamRegistry::default();
        let name = "x".repeat(MAX_NAME_LENGTH);
        assert!(registry.add_team(&name, Vec::new()).is_ok());
    }

    #[test]
    fn test_name_limit_counts_characters() {
        let mut registry = TeamRegistry::default();
        let wide = "字".repeat(40);
        assert!(wide.len() > MAX_NAME_LENGTH);
        let id = registry.add_team(&wide, Vec::new()).unwrap();
        assert_eq!(registry.get(&id).unwrap().name(), wide);

        let full = "é".repeat(MAX_NAME_LENGTH);
        assert!(registry.add_team(&full, Vec::new()).is_ok());

        let over = "é".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            registry.add_team(&over, Vec::new()),
            Err(Error::Invalid(_))
        ));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_add_team_rejects_too_many_members() {
        let mut registry = TeamRegistry::default();
        let crowd = (0..=MAX_MEMBER_COUNT).map(|i| format!("m{i}")).collect();
        assert!(matches!(
            registry.add_team("Crowd", crowd),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_add_team_allows_duplicate_names() {
        let mut registry = TeamRegistry::default();
        let first = registry.add_team("Twins", Vec::new()).unwrap();
        let second = registry.add_team("Twins", Vec::new()).unwrap();
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_team() {
        let mut registry = TeamRegistry::default();
        let a = registry.add_team("A", Vec::new()).unwrap();
        let b = registry.add_team("B", Vec::new()).unwrap();
        let c = registry.add_team("C", Vec::new()).unwrap();

        let removed = registry.remove_team(&b).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(
            registry.iter().map(|team| team.id().clone()).collect_vec(),
            vec![a, c]
        );
    }

    #[test]
    fn test_remove_missing_team_is_noop() {
        let mut registry = TeamRegistry::default();
        registry.add_team("A", Vec::new()).unwrap();
        let before = registry.clone();

        let missing = TeamId::from_str("nonexistent").unwrap();
        assert!(registry.remove_team(&missing).is_none());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_update_metric_recomputes_total() {
        let mut registry = TeamRegistry::default();
        let id = registry.add_team("A", Vec::new()).unwrap();

        assert_eq!(registry.update_metric(&id, Metric::Mindclans, 10.), Some(10.));
        assert_eq!(
            registry.update_metric(&id, Metric::SellProductEarnings, 500.),
            Some(15.)
        );
        assert_eq!(
            registry.update_metric(&id, Metric::PitchProductMarks, 3.),
            Some(18.)
        );

        let team = registry.get(&id).unwrap();
        assert_eq!(team.metric(Metric::SellProductEarnings), 500.);
        assert_eq!(team.total_score(), 18.);
    }

    #[test]
    fn test_update_metric_overwrites() {
        let mut registry = TeamRegistry::default();
        let id = registry.add_team("A", Vec::new()).unwrap();

        registry.update_metric(&id, Metric::Mindclans, 10.);
        registry.update_metric(&id, Metric::Mindclans, 4.);
        assert_eq!(registry.get(&id).unwrap().total_score(), 4.);
    }

    #[test]
    fn test_update_metric_missing_team() {
        let mut registry = TeamRegistry::default();
        registry.add_team("A", Vec::new()).unwrap();
        let before = registry.clone();

        let missing = TeamId::from_str("nonexistent").unwrap();
        assert_eq!(registry.update_metric(&missing, Metric::Mindclans, 1.), None);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_parse_members() {
        assert_eq!(parse_members("Alice, Bob, Charlie"), members(&["Alice", "Bob", "Charlie"]));
        assert_eq!(parse_members(" , ,"), Vec::<String>::new());
        assert_eq!(parse_members(""), Vec::<String>::new());
    }

    #[test]
    fn test_team_serialization_layout() {
        let team = Team::with_id(
            TeamId::from_str("t_000000001").unwrap(),
            "Alpha",
            members(&["Ann"]),
        )
        .unwrap();
        let value = serde_json::to_value(&team).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": "t_000000001",
                "name": "Alpha",
                "members": ["Ann"],
                "mindclansScore": 0.0,
                "sellProductEarnings": 0.0,
                "pitchProductMarks": 0.0,
                "totalScore": 0.0,
            })
        );
    }

    #[test]
    fn test_team_deserialization_recomputes_total() {
        let json = r#"{
            "id": "t_1",
            "name": "Stale",
            "members": [],
            "mindclansScore": 1,
            "sellProductEarnings": 200,
            "pitchProductMarks": 3,
            "totalScore": 999
        }"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.total_score(), 6.);
    }

    #[test]
    fn test_registry_round_trip() {
        let mut registry = TeamRegistry::default();
        let a = registry.add_team("A", members(&["x", "y"])).unwrap();
        registry.add_team("B", Vec::new()).unwrap();
        registry.update_metric(&a, Metric::SellProductEarnings, 1234.5);
        registry.update_metric(&a, Metric::PitchProductMarks, -2.);

        let json = serde_json::to_string(&registry).unwrap();
        let restored: TeamRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, registry);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[A-Za-z]{1,12}".prop_map(Op::Add),
            (0usize..16).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_registry_keeps_added_minus_removed_in_order(ops in prop::collection::vec(op(), 0..40)) {
            let mut registry = TeamRegistry::default();
            let mut expected: Vec<TeamId> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(name) => {
                        expected.push(registry.add_team(&name, Vec::new()).unwrap());
                    }
                    Op::Remove(index) => {
                        if let Some(id) = expected.get(index).cloned() {
                            expected.remove(index);
                            prop_assert!(registry.remove_team(&id).is_some());
                        }
                    }
                }
            }

            let actual = registry.iter().map(|team| team.id().clone()).collect_vec();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_total_matches_latest_metrics(
            writes in prop::collection::vec((0usize..3, -1.0e6f64..1.0e6), 0..30)
        ) {
            let mut registry = TeamRegistry::default();
            let id = registry.add_team("P", Vec::new()).unwrap();
            let mut latest = [0.; 3];

            for (index, value) in writes {
                registry.update_metric(&id, Metric::ALL[index], value);
                latest[index] = value;
            }

            let team = registry.get(&id).unwrap();
            prop_assert_eq!(team.total_score(), latest[0] + latest[1] / 100. + latest[2]);
        }
    }
}
