//! Per-team event lists and the repositories that hold them.
//!
//! Each team contributes one [EventSet] per [Category]. A [DirectoryRepository] reads them
//! from a base directory laid out as `<team>/EigeneTore<team>.py` (own goals) and
//! `<team>/Gegentore<team>.py` (conceded goals). Loading never fails on bad data: missing
//! folders and unreadable files are logged, recorded as [LoadWarning]s and contribute
//! nothing.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::fmt::Formatter;
use std::path::PathBuf;
use std::str::FromStr;

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::coord::Coordinate;
use crate::extract::Source;

pub const DEFAULT_TEAMS: [&str; 5] = ["U15", "U16", "U18", "JWR", "Profis"];

#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[strum(to_string = "own")]
    Own,

    #[strum(to_string = "conceded")]
    Conceded,
}
impl Category {
    pub fn opposite(&self) -> Self {
        match self {
            Category::Own => Category::Conceded,
            Category::Conceded => Category::Own,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Own => "own goals",
            Category::Conceded => "conceded goals",
        }
    }

    /// Name of the file holding this category's events within a team folder.
    pub fn source_file(&self, team: &str) -> String {
        match self {
            Category::Own => format!("EigeneTore{team}.py"),
            Category::Conceded => format!("Gegentore{team}.py"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}' (expected 'own' or 'conceded')")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "own" | "o" | "own goals" | "eigene tore" => Ok(Category::Own),
            "conceded" | "c" | "conceded goals" | "gegentore" => Ok(Category::Conceded),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[strum(to_string = "goal")]
    Goal,

    #[strum(to_string = "assist")]
    Assist,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown event kind '{0}' (expected 'goal' or 'assist')")]
pub struct ParseKindError(String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goal" | "goals" | "g" => Ok(Kind::Goal),
            "assist" | "assists" | "a" => Ok(Kind::Assist),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Either a single team or the union of every team in a repository.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum TeamSelection {
    All,
    Team(String),
}

impl fmt::Display for TeamSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TeamSelection::All => write!(f, "all teams"),
            TeamSelection::Team(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for TeamSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "all" | "all teams" | "alle teams" => Ok(TeamSelection::All),
            _ => Ok(TeamSelection::Team(trimmed.to_string())),
        }
    }
}

impl Serialize for TeamSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSet {
    pub team: String,
    pub category: Category,
    pub goals: Vec<Coordinate>,
    pub assists: Vec<Coordinate>,
    pub annotation: String,
}
impl EventSet {
    pub fn from_source(team: impl Into<String>, category: Category, source: Source) -> Self {
        Self {
            team: team.into(),
            category,
            goals: source.extraction.goals,
            assists: source.extraction.assists,
            annotation: source.annotation,
        }
    }

    pub fn events(&self, kind: Kind) -> &[Coordinate] {
        match kind {
            Kind::Goal => &self.goals,
            Kind::Assist => &self.assists,
        }
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.team, self.category.label())
    }
}

/// Goal and assist lists gathered for one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub goals: Vec<Coordinate>,
    pub assists: Vec<Coordinate>,
}
impl Events {
    pub fn of(&self, kind: Kind) -> &[Coordinate] {
        match kind {
            Kind::Goal => &self.goals,
            Kind::Assist => &self.assists,
        }
    }

    fn extend_from(&mut self, set: &EventSet) {
        self.goals.extend_from_slice(&set.goals);
        self.assists.extend_from_slice(&set.assists);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown team '{0}'")]
    UnknownTeam(String),
}

pub trait Repository {
    /// Team names in presentation order.
    fn teams(&self) -> Vec<&str>;

    fn event_set(&self, team: &str, category: Category) -> Option<&EventSet>;

    fn contains_team(&self, team: &str) -> bool {
        self.teams().contains(&team)
    }

    /// Events for a single team, or the concatenation across all teams in [Repository::teams]
    /// order. A known team without a set for `category` yields empty lists.
    fn events(&self, selection: &TeamSelection, category: Category) -> Result<Events, SelectionError> {
        let mut events = Events::default();
        match selection {
            TeamSelection::All => {
                for team in self.teams() {
                    if let Some(set) = self.event_set(team, category) {
                        events.extend_from(set);
                    }
                }
            }
            TeamSelection::Team(team) => {
                if !self.contains_team(team) {
                    return Err(SelectionError::UnknownTeam(team.clone()));
                }
                if let Some(set) = self.event_set(team, category) {
                    events.extend_from(set);
                }
            }
        }
        Ok(events)
    }
}

/// An insertion-ordered in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    teams: Vec<String>,
    sets: Vec<EventSet>,
}
impl MemoryRepository {
    /// Adds `set`, replacing any existing set for the same team and category.
    pub fn insert(&mut self, set: EventSet) {
        if !self.teams.contains(&set.team) {
            self.teams.push(set.team.clone());
        }
        match self
            .sets
            .iter_mut()
            .find(|existing| existing.team == set.team && existing.category == set.category)
        {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    pub fn with(mut self, set: EventSet) -> Self {
        self.insert(set);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl Repository for MemoryRepository {
    fn teams(&self) -> Vec<&str> {
        self.teams.iter().map(String::as_str).collect()
    }

    fn event_set(&self, team: &str, category: Category) -> Option<&EventSet> {
        self.sets
            .iter()
            .find(|set| set.team == team && set.category == category)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one team must be configured")]
    NoTeams,

    #[error("invalid team name '{0}'")]
    InvalidTeamName(String),

    #[error("team '{0}' is configured more than once")]
    DuplicateTeam(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_dir: PathBuf,
    pub teams: Vec<String>,
}
impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.teams.is_empty() {
            return Err(ValidationError::NoTeams);
        }
        let mut seen = HashSet::with_capacity(self.teams.len());
        for team in &self.teams {
            if team.trim().is_empty() || team.contains(['/', '\\']) || team == "." || team == ".." {
                return Err(ValidationError::InvalidTeamName(team.clone()));
            }
            if !seen.insert(team.as_str()) {
                return Err(ValidationError::DuplicateTeam(team.clone()));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            teams: DEFAULT_TEAMS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadWarning {
    #[error("team folder {} not found", .0.display())]
    MissingTeamDir(PathBuf),

    #[error("could not read {}: {reason}", .path.display())]
    UnreadableSource { path: PathBuf, reason: String },
}

/// A repository loaded from a directory of team folders.
#[derive(Debug)]
pub struct DirectoryRepository {
    pub config: Config,
    store: MemoryRepository,
    warnings: Vec<LoadWarning>,
}
impl DirectoryRepository {
    pub fn load(config: Config) -> Result<Self, ValidationError> {
        config.validate()?;
        let mut store = MemoryRepository::default();
        let mut warnings = vec![];
        for team in &config.teams {
            let team_dir = config.base_dir.join(team);
            if !team_dir.is_dir() {
                warn!("team folder {} not found", team_dir.display());
                warnings.push(LoadWarning::MissingTeamDir(team_dir));
                continue;
            }
            for category in Category::iter() {
                let path = team_dir.join(category.source_file(team));
                let source = match Source::read(&path) {
                    Ok(source) => source,
                    Err(err) => {
                        warn!("could not read {}: {err}", path.display());
                        warnings.push(LoadWarning::UnreadableSource {
                            path,
                            reason: err.to_string(),
                        });
                        Source::default()
                    }
                };
                let set = EventSet::from_source(team.as_str(), category, source);
                debug!(
                    "loaded {}: {} goals, {} assists",
                    set.title(),
                    set.goals.len(),
                    set.assists.len()
                );
                store.insert(set);
            }
        }
        info!(
            "loaded {} of {} teams from {}",
            store.teams.len(),
            config.teams.len(),
            config.base_dir.display()
        );
        Ok(Self {
            config,
            store,
            warnings,
        })
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl TryFrom<Config> for DirectoryRepository {
    type Error = ValidationError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Self::load(config)
    }
}

impl Repository for DirectoryRepository {
    fn teams(&self) -> Vec<&str> {
        self.store.teams()
    }

    fn event_set(&self, team: &str, category: Category) -> Option<&EventSet> {
        self.store.event_set(team, category)
    }
}
