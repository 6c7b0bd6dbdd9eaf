//! Pitch coordinates and the fixed pitch dimensions they are measured against.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

/// Nominal pitch width, in meters.
pub const PITCH_WIDTH: i64 = 68;

/// Nominal pitch depth, in meters. The attacked goal line sits at this depth.
pub const PITCH_DEPTH: i64 = 100;

/// Depth at which the named zones begin. Anything shallower is remaining pitch.
pub const ZONE_DEPTH: i64 = 75;

/// A point on the pitch, in whole meters from the corner of the defended goal line. Values
/// outside the nominal pitch are permitted.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}
impl Coordinate {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Accepts `x,y` with or without surrounding parentheses.
impl FromStr for Coordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        let (x, y) = inner
            .split_once(',')
            .ok_or(anyhow!("coordinate should be in the form x,y"))?;
        let x = x.trim().parse().with_context(|| format!("invalid x in '{s}'"))?;
        let y = y.trim().parse().with_context(|| format!("invalid y in '{s}'"))?;
        Ok(Self { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!("(34,89)", Coordinate::new(34, 89).to_string());
        assert_eq!("(-3,120)", Coordinate::new(-3, 120).to_string());
    }

    #[test]
    fn parse_bare_and_parenthesised() {
        assert_eq!(Coordinate::new(34, 89), Coordinate::from_str("34,89").unwrap());
        assert_eq!(Coordinate::new(34, 89), Coordinate::from_str("(34, 89)").unwrap());
        assert_eq!(Coordinate::new(-5, 0), Coordinate::from_str(" -5 , 0 ").unwrap());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "coordinate should be in the form x,y",
            Coordinate::from_str("34").unwrap_err().to_string()
        );
        assert_eq!(
            "invalid y in '34,foo'",
            Coordinate::from_str("34,foo").unwrap_err().to_string()
        );
    }
}
