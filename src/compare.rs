//! Comparisons across teams and between pairs of selections.

use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumIter};
use thiserror::Error;
use tracing::debug;

use crate::dataset::{Category, Events, Kind, Repository, SelectionError, TeamSelection};
use crate::distribution::{aggregate, Distribution, ZoneShare};
use crate::zone::Zone;

/// A team (or all teams) paired with an event category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub team: TeamSelection,
    pub category: Category,
}
impl Selection {
    pub fn new(team: TeamSelection, category: Category) -> Self {
        Self { team, category }
    }

    /// The same team with the opposite category.
    pub fn counterpart(&self) -> Self {
        Self::new(self.team.clone(), self.category.opposite())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.team, self.category.label())
    }
}

/// Settles the pair of selections to compare. The second defaults to the counterpart of the
/// first, and is flipped to the opposite category should it duplicate the first.
pub fn resolve_pair(first: Selection, second: Option<Selection>) -> (Selection, Selection) {
    let second = match second {
        None => first.counterpart(),
        Some(second) if second == first => {
            debug!("second selection duplicates '{first}'; flipping its category");
            first.counterpart()
        }
        Some(second) => second,
    };
    (first, second)
}

/// The zones singled out for headline figures, each measured over its own event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
pub enum ZoneFocus {
    #[strum(to_string = "golden zone")]
    #[serde(rename = "golden zone")]
    GoldenZone,

    #[strum(to_string = "zone 14")]
    #[serde(rename = "zone 14")]
    Zone14,
}
impl ZoneFocus {
    pub fn zone(&self) -> Zone {
        match self {
            ZoneFocus::GoldenZone => Zone::GoldenZone,
            ZoneFocus::Zone14 => Zone::Zone14,
        }
    }

    /// Finishing is judged by where goals land; chance creation by where assists originate.
    pub fn kind(&self) -> Kind {
        match self {
            ZoneFocus::GoldenZone => Kind::Goal,
            ZoneFocus::Zone14 => Kind::Assist,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a focus zone (expected golden zone or zone 14)")]
pub struct ParseFocusError(String);

impl FromStr for ZoneFocus {
    type Err = ParseFocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Zone>() {
            Ok(Zone::GoldenZone) => Ok(ZoneFocus::GoldenZone),
            Ok(Zone::Zone14) => Ok(ZoneFocus::Zone14),
            _ => Err(ParseFocusError(s.to_string())),
        }
    }
}

pub fn zone_share(events: &Events, focus: ZoneFocus) -> ZoneShare {
    ZoneShare::of(events.of(focus.kind()), focus.zone())
}

/// The annotation behind a selection. For all teams, the non-empty annotations are joined
/// with a space in repository order.
pub fn annotation(repository: &dyn Repository, selection: &Selection) -> Result<String, SelectionError> {
    match &selection.team {
        TeamSelection::All => Ok(repository
            .teams()
            .into_iter()
            .filter_map(|team| repository.event_set(team, selection.category))
            .map(|set| set.annotation.as_str())
            .filter(|annotation| !annotation.is_empty())
            .collect::<Vec<_>>()
            .join(" ")),
        TeamSelection::Team(team) => {
            if !repository.contains_team(team) {
                return Err(SelectionError::UnknownTeam(team.clone()));
            }
            Ok(repository
                .event_set(team, selection.category)
                .map(|set| set.annotation.clone())
                .unwrap_or_default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamShare {
    pub team: String,
    #[serde(flatten)]
    pub share: ZoneShare,
}

/// Per team, the events of `kind` that fall into `zone`.
pub fn zone_comparison(repository: &dyn Repository, zone: Zone, category: Category, kind: Kind) -> Vec<TeamShare> {
    repository
        .teams()
        .into_iter()
        .map(|team| {
            let events = repository
                .event_set(team, category)
                .map(|set| set.events(kind))
                .unwrap_or_default();
            TeamShare {
                team: team.to_string(),
                share: ZoneShare::of(events, zone),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDistribution {
    pub team: String,
    pub distribution: Distribution,
}

/// Per team, the full zone distribution of the events of `kind`.
pub fn overview(repository: &dyn Repository, category: Category, kind: Kind) -> Vec<TeamDistribution> {
    repository
        .teams()
        .into_iter()
        .map(|team| {
            let events = repository
                .event_set(team, category)
                .map(|set| set.events(kind))
                .unwrap_or_default();
            TeamDistribution {
                team: team.to_string(),
                distribution: aggregate(events),
            }
        })
        .collect()
}

/// Everything shown for one side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionReport {
    pub selection: Selection,
    pub goals: usize,
    pub assists: usize,
    pub annotation: String,
    pub golden_zone: ZoneShare,
    pub zone_14: ZoneShare,
    pub goal_distribution: Distribution,
    pub assist_distribution: Distribution,
}
impl SelectionReport {
    pub fn build(repository: &dyn Repository, selection: Selection) -> Result<Self, SelectionError> {
        let events = repository.events(&selection.team, selection.category)?;
        let annotation = annotation(repository, &selection)?;
        Ok(Self {
            goals: events.goals.len(),
            assists: events.assists.len(),
            annotation,
            golden_zone: zone_share(&events, ZoneFocus::GoldenZone),
            zone_14: zone_share(&events, ZoneFocus::Zone14),
            goal_distribution: aggregate(&events.goals),
            assist_distribution: aggregate(&events.assists),
            selection,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideBySide {
    pub first: SelectionReport,
    pub second: SelectionReport,
}

pub fn side_by_side(
    repository: &dyn Repository,
    first: Selection,
    second: Option<Selection>,
) -> Result<SideBySide, SelectionError> {
    let (first, second) = resolve_pair(first, second);
    Ok(SideBySide {
        first: SelectionReport::build(repository, first)?,
        second: SelectionReport::build(repository, second)?,
    })
}
