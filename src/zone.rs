//! The fixed partition of the attacking third into tactical zones, and the classifier that
//! assigns a [Coordinate] to exactly one of them.
//!
//! Named zones are only considered at or beyond [ZONE_DEPTH]. They are tested in the order
//! of [Zone::NAMED] and the first match wins; the edge conditions are half-open where two
//! zones share a boundary, so at most one named zone can ever match. Anything left over,
//! including the strips beyond `y = 90` on either wing, is [Zone::Remaining].

use std::fmt;
use std::fmt::Formatter;
use std::ops::Bound::{self, Excluded, Included};
use std::ops::RangeBounds;
use std::str::FromStr;

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;

use crate::coord::{Coordinate, ZONE_DEPTH};


#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize,
)]
pub enum Zone {
    #[strum(to_string = "golden zone")]
    #[serde(rename = "golden zone")]
    GoldenZone,

    #[strum(to_string = "zone 14")]
    #[serde(rename = "zone 14")]
    Zone14,

    #[strum(to_string = "FDl")]
    #[serde(rename = "FDl")]
    FdLeft,

    #[strum(to_string = "FDr")]
    #[serde(rename = "FDr")]
    FdRight,

    #[strum(to_string = "HFAl")]
    #[serde(rename = "HFAl")]
    HfaLeft,

    #[strum(to_string = "HFAr")]
    #[serde(rename = "HFAr")]
    HfaRight,

    #[strum(to_string = "ND2l")]
    #[serde(rename = "ND2l")]
    Nd2Left,

    #[strum(to_string = "ND2r")]
    #[serde(rename = "ND2r")]
    Nd2Right,

    #[strum(to_string = "remaining pitch")]
    #[serde(rename = "remaining pitch")]
    Remaining,
}

impl Zone {
    /// Named zones in classification priority order.
    pub const NAMED: [Zone; 8] = [
        Zone::GoldenZone,
        Zone::Zone14,
        Zone::FdLeft,
        Zone::FdRight,
        Zone::HfaLeft,
        Zone::HfaRight,
        Zone::Nd2Left,
        Zone::Nd2Right,
    ];

    /// The rectangle covered by a named zone. [Zone::Remaining] has no region of its own.
    pub const fn region(&self) -> Option<Region> {
        let region = match self {
            Zone::GoldenZone => Region::new((Included(25), Included(43)), (Included(84), Included(100))),
            Zone::Zone14 => Region::new((Included(25), Included(43)), (Included(75), Excluded(84))),
            Zone::FdLeft => Region::new((Included(14), Excluded(25)), (Included(75), Included(84))),
            Zone::FdRight => Region::new((Excluded(43), Included(54)), (Included(75), Included(84))),
            Zone::HfaLeft => Region::new((Included(0), Excluded(14)), (Included(75), Included(90))),
            Zone::HfaRight => Region::new((Excluded(54), Included(68)), (Included(75), Included(90))),
            Zone::Nd2Left => Region::new((Included(14), Excluded(25)), (Excluded(84), Included(100))),
            Zone::Nd2Right => Region::new((Excluded(43), Included(54)), (Excluded(84), Included(100))),
            Zone::Remaining => return None,
        };
        Some(region)
    }

    pub fn is_named(&self) -> bool {
        !matches!(self, Zone::Remaining)
    }

    /// Whether `coordinate` classifies into this zone.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        classify(coordinate) == *self
    }
}

/// Assigns a coordinate to its zone. Total over all integer coordinates.
pub fn classify(coordinate: &Coordinate) -> Zone {
    if coordinate.y < ZONE_DEPTH {
        return Zone::Remaining;
    }
    Zone::NAMED
        .into_iter()
        .find(|zone| {
            zone.region()
                .is_some_and(|region| region.contains(coordinate))
        })
        .unwrap_or(Zone::Remaining)
}

pub type Span = (Bound<i64>, Bound<i64>);

/// An axis-aligned rectangle with independently open or closed edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: Span,
    pub y: Span,
}
impl Region {
    pub const fn new(x: Span, y: Span) -> Self {
        Self { x, y }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.x.contains(&coordinate.x) && self.y.contains(&coordinate.y)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_span(f, &self.x, 'x')?;
        write!(f, ", ")?;
        write_span(f, &self.y, 'y')
    }
}

fn write_span(f: &mut Formatter<'_>, span: &Span, axis: char) -> fmt::Result {
    match span.0 {
        Included(start) => write!(f, "{start}≤")?,
        Excluded(start) => write!(f, "{start}<")?,
        Bound::Unbounded => {}
    }
    write!(f, "{axis}")?;
    match span.1 {
        Included(end) => write!(f, "≤{end}"),
        Excluded(end) => write!(f, "<{end}"),
        Bound::Unbounded => Ok(()),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown zone '{0}'")]
pub struct ParseZoneError(String);

/// Canonical names are matched case-insensitively, along with the aliases used on the
/// academy's dashboard.
impl FromStr for Zone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let zone = match s.trim().to_lowercase().as_str() {
            "golden zone" | "golden" | "goldene zone" => Zone::GoldenZone,
            "zone 14" | "zone14" | "red zone" | "rote zone" => Zone::Zone14,
            "fdl" | "zone 2" => Zone::FdLeft,
            "fdr" | "zone 3" => Zone::FdRight,
            "hfal" | "zone 4" => Zone::HfaLeft,
            "hfar" | "zone 5" => Zone::HfaRight,
            "nd2l" | "zone 6" => Zone::Nd2Left,
            "nd2r" | "zone 7" => Zone::Nd2Right,
            "remaining pitch" | "remaining" | "restliches spielfeld" => Zone::Remaining,
            _ => return Err(ParseZoneError(s.to_string())),
        };
        Ok(zone)
    }
}
