//! Testing helpers.

use std::fs;

use assert_float_eq::*;
use strum::IntoEnumIterator;
use tempfile::TempDir;

use crate::coord::Coordinate;
use crate::distribution::Distribution;
use crate::zone::Zone;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts the listed zone percentages, and zero for every zone not listed.
pub fn assert_percentages(expected: &[(Zone, f64)], actual: &Distribution) {
    for zone in Zone::iter() {
        let expected = expected
            .iter()
            .find(|(expected_zone, _)| *expected_zone == zone)
            .map(|(_, percentage)| *percentage)
            .unwrap_or(0.0);
        let actual = actual.percentage(zone);
        if actual != expected {
            assert_float_absolute_eq!(expected, actual, 1e-9);
        }
    }
}

pub fn coords(pairs: &[(i64, i64)]) -> Vec<Coordinate> {
    pairs.iter().copied().map(Coordinate::from).collect()
}

/// Writes `contents` to `relative` under `dir`, creating parent folders as needed.
pub fn write_file(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
