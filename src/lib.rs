//! Classification of goal and assist locations into the tactical zones of the attacking
//! third, with per-zone distributions for individual teams, for all teams together, and for
//! side-by-side comparisons.
//!
//! Event coordinates are recovered from hand-authored plot sources, which declare
//! `goals = [(x, y), ...]` and `assists = [...]` lists and are read tolerantly of typos.

pub mod compare;
pub mod coord;
pub mod dataset;
pub mod display;
pub mod distribution;
pub mod extract;
pub mod print;
pub mod zone;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
