//! Reduction of coordinate lists into per-zone counts and percentages.
//!
//! [ZoneCounts] is the additive form: counts from separate lists can be summed and the result
//! is the same as tallying the concatenated list. [Distribution] is the normalised view, with
//! every percentage taken over the total number of coordinates, including those that land on
//! the remaining pitch.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Index};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use strum::{EnumCount, IntoEnumIterator};

use crate::coord::Coordinate;
use crate::zone::{classify, Zone};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneCounts {
    counts: [usize; Zone::COUNT],
}
impl ZoneCounts {
    pub fn tally<'a>(coordinates: impl IntoIterator<Item = &'a Coordinate>) -> Self {
        let mut counts = Self::default();
        for coordinate in coordinates {
            counts.record(classify(coordinate));
        }
        counts
    }

    pub fn record(&mut self, zone: Zone) {
        self.counts[zone.ordinal()] += 1;
    }

    pub fn count(&self, zone: Zone) -> usize {
        self.counts[zone.ordinal()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, usize)> + '_ {
        Zone::iter().map(|zone| (zone, self.count(zone)))
    }
}

impl AddAssign<&ZoneCounts> for ZoneCounts {
    fn add_assign(&mut self, rhs: &ZoneCounts) {
        for (count, other) in self.counts.iter_mut().zip(rhs.counts) {
            *count += other;
        }
    }
}

impl Add for ZoneCounts {
    type Output = ZoneCounts;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl Sum for ZoneCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ZoneCounts::default(), |sum, counts| sum + counts)
    }
}

/// Per-zone percentages of a coordinate list, alongside the counts they were derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    counts: ZoneCounts,
    percentages: [f64; Zone::COUNT],
}
impl Distribution {
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn count(&self, zone: Zone) -> usize {
        self.counts.count(zone)
    }

    pub fn percentage(&self, zone: Zone) -> f64 {
        self.percentages[zone.ordinal()]
    }

    pub fn counts(&self) -> &ZoneCounts {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The distribution over the union of the lists behind `self` and `other`.
    pub fn merge(&self, other: &Distribution) -> Distribution {
        let mut counts = self.counts.clone();
        counts += &other.counts;
        counts.into()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, f64)> + '_ {
        Zone::iter().map(|zone| (zone, self.percentage(zone)))
    }
}

impl From<ZoneCounts> for Distribution {
    fn from(counts: ZoneCounts) -> Self {
        let total = counts.total();
        let mut percentages = [0.0; Zone::COUNT];
        if total > 0 {
            for (zone, count) in counts.iter() {
                percentages[zone.ordinal()] = count as f64 / total as f64 * 100.0;
            }
        }
        Self {
            counts,
            percentages,
        }
    }
}

impl Index<Zone> for Distribution {
    type Output = f64;

    fn index(&self, zone: Zone) -> &Self::Output {
        &self.percentages[zone.ordinal()]
    }
}

/// Serialises as `{"<zone name>": percentage, ..., "total": count}`.
impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Zone::COUNT + 1))?;
        for (zone, percentage) in self.iter() {
            map.serialize_entry(&zone, &percentage)?;
        }
        map.serialize_entry("total", &self.total())?;
        map.end()
    }
}

pub fn aggregate(coordinates: &[Coordinate]) -> Distribution {
    ZoneCounts::tally(coordinates).into()
}

/// The number of `coordinates` classified into `zone`; equal to `aggregate(..).count(zone)`.
pub fn count_in_zone(coordinates: &[Coordinate], zone: Zone) -> usize {
    coordinates
        .iter()
        .filter(|coordinate| classify(coordinate) == zone)
        .count()
}

/// The distribution over the union of several coordinate lists.
pub fn aggregate_all<'a>(lists: impl IntoIterator<Item = &'a [Coordinate]>) -> Distribution {
    lists
        .into_iter()
        .map(ZoneCounts::tally)
        .sum::<ZoneCounts>()
        .into()
}

/// Share of `coordinates` falling into a single zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneShare {
    pub zone: Zone,
    pub hits: usize,
    pub total: usize,
    pub percentage: f64,
}
impl ZoneShare {
    pub fn of(coordinates: &[Coordinate], zone: Zone) -> Self {
        let hits = count_in_zone(coordinates, zone);
        let total = coordinates.len();
        let percentage = if total > 0 {
            hits as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            zone,
            hits,
            total,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::testing::{assert_percentages, assert_slice_f64_relative, coords};

    fn percentages(distribution: &Distribution) -> Vec<f64> {
        distribution.iter().map(|(_, percentage)| percentage).collect()
    }

    #[test]
    fn empty_is_all_zero() {
        let distribution = aggregate(&[]);
        assert_eq!(0, distribution.total());
        assert!(distribution.is_empty());
        for (zone, percentage) in distribution.iter() {
            assert_eq!(0.0, percentage, "{zone}");
            assert_eq!(0, distribution.count(zone));
        }
    }

    #[test]
    fn all_golden() {
        let distribution = aggregate(&coords(&[(34, 89), (42, 95)]));
        assert_eq!(2, distribution.total());
        assert_percentages(&[(Zone::GoldenZone, 100.0)], &distribution);
    }

    #[test]
    fn shallow_points_count_toward_total() {
        let distribution = aggregate(&coords(&[(34, 89), (34, 50), (10, 10), (30, 80)]));
        assert_eq!(4, distribution.total());
        assert_eq!(25.0, distribution[Zone::GoldenZone]);
        assert_eq!(25.0, distribution[Zone::Zone14]);
        assert_eq!(50.0, distribution[Zone::Remaining]);
        assert_eq!(2, distribution.count(Zone::Remaining));
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let distribution = aggregate(&coords(&[
            (34, 89),
            (20, 80),
            (50, 80),
            (5, 85),
            (60, 85),
            (20, 95),
            (50, 95),
            (34, 80),
            (34, 20),
            (5, 95),
        ]));
        assert_eq!(10, distribution.total());
        assert_float_relative_eq!(100.0, percentages(&distribution).iter().sum::<f64>(), 1e-9);
        for zone in Zone::NAMED {
            assert_eq!(1, distribution.count(zone), "{zone}");
        }
        assert_eq!(2, distribution.count(Zone::Remaining));
    }

    #[test]
    fn count_in_zone_agrees_with_distribution() {
        let points = coords(&[(34, 89), (34, 89), (30, 76), (13, 80), (61, 91), (0, 0), (-4, 200)]);
        let distribution = aggregate(&points);
        for zone in Zone::iter() {
            let count = count_in_zone(&points, zone);
            assert_eq!(distribution.count(zone), count, "{zone}");
            let implied = distribution.total() as f64 * distribution[zone] / 100.0;
            assert_float_absolute_eq!(count as f64, implied, 1e-9);
        }
    }

    #[test]
    fn merge_matches_concatenation() {
        let a = coords(&[(34, 89), (20, 80), (34, 10)]);
        let b = coords(&[(60, 85), (34, 89), (34, 89), (50, 95), (1, 1)]);
        let concatenated = a.iter().chain(b.iter()).copied().collect::<Vec<_>>();

        let merged = aggregate(&a).merge(&aggregate(&b));
        let expected = aggregate(&concatenated);
        assert_eq!(expected.counts(), merged.counts());
        assert_slice_f64_relative(&percentages(&expected), &percentages(&merged), 1e-12);

        let swapped = aggregate(&b).merge(&aggregate(&a));
        assert_eq!(merged, swapped);

        let all = aggregate_all([a.as_slice(), b.as_slice()]);
        assert_eq!(expected, all);
    }

    #[test]
    fn merge_is_weighted_by_totals() {
        let a = coords(&[(34, 89)]);
        let b = coords(&[(34, 10), (34, 10), (34, 10)]);
        let (da, db) = (aggregate(&a), aggregate(&b));
        let merged = da.merge(&db);
        for zone in Zone::iter() {
            let weighted = (da[zone] * da.total() as f64 + db[zone] * db.total() as f64)
                / (da.total() + db.total()) as f64;
            assert_float_absolute_eq!(weighted, merged[zone], 1e-9);
        }
        assert_eq!(25.0, merged[Zone::GoldenZone]);
        assert_eq!(75.0, merged[Zone::Remaining]);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = aggregate(&coords(&[(34, 89), (20, 80)]));
        assert_eq!(a, a.merge(&aggregate(&[])));
        assert_eq!(a, aggregate(&[]).merge(&a));
    }

    #[test]
    fn zone_share() {
        let points = coords(&[(34, 89), (30, 80), (30, 83), (30, 84)]);
        let share = ZoneShare::of(&points, Zone::Zone14);
        assert_eq!(2, share.hits);
        assert_eq!(4, share.total);
        assert_eq!(50.0, share.percentage);

        let empty = ZoneShare::of(&[], Zone::GoldenZone);
        assert_eq!((0, 0, 0.0), (empty.hits, empty.total, empty.percentage));
    }

    #[test]
    fn serialise_as_map() {
        let distribution = aggregate(&coords(&[(34, 89), (34, 10)]));
        let json = serde_json::to_value(&distribution).unwrap();
        assert_eq!(50.0, json["golden zone"]);
        assert_eq!(0.0, json["zone 14"]);
        assert_eq!(50.0, json["remaining pitch"]);
        assert_eq!(2, json["total"]);
        assert_eq!(Zone::COUNT + 1, json.as_object().unwrap().len());
    }
}
