//! The 27x27 Kamea lattice: bounded coordinates, the nine 9x9 regions, and
//! quadsets (the four cells tied together by the ditrune symmetries).
//!
//! Reflection in the x axis corresponds to reversal, reflection through the
//! origin to conrune, and reflection in the y axis to their composition.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BLOCK_EXTENT, LATTICE_EXTENT};
use crate::error::{KameaError, Result};
use crate::ternary::{Bigram, TernaryString};
use crate::transition::Transform;

/// A lattice cell. Both axes lie in [-13, 13]; (0, 0) is the singularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Result<Self> {
        let axis = -LATTICE_EXTENT..=LATTICE_EXTENT;
        if !axis.contains(&x) || !axis.contains(&y) {
            return Err(KameaError::OutOfBounds {
                x,
                y,
                extent: LATTICE_EXTENT,
            });
        }
        Ok(Self { x, y })
    }

    pub fn is_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// The partner cell whose value is `transform` applied to this cell's value.
    pub fn reflect(self, transform: Transform) -> Self {
        let Self { x, y } = self;
        match transform {
            Transform::Identity => Self { x, y },
            Transform::Reversal => Self { x, y: -y },
            Transform::Conrune => Self { x: -x, y: -y },
            Transform::ComplexTransform => Self { x: -x, y },
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the nine 9x9 blocks of the lattice.
///
/// The bigram's high digit names the column block and its low digit the row
/// block: 0 for the central band [-4, 4], 1 for [5, 13], 2 for [-13, -5].
/// Negating a coordinate therefore swaps 1 and 2 in the region bigram, the
/// same way conrune does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub bigram: Bigram,
    pub x_range: (i32, i32),
    pub y_range: (i32, i32),
}

impl Region {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x_range.0..=self.x_range.1).contains(&x)
            && (self.y_range.0..=self.y_range.1).contains(&y)
    }
}

const CENTRAL: (i32, i32) = (-BLOCK_EXTENT, BLOCK_EXTENT);
const POSITIVE: (i32, i32) = (BLOCK_EXTENT + 1, LATTICE_EXTENT);
const NEGATIVE: (i32, i32) = (-LATTICE_EXTENT, -BLOCK_EXTENT - 1);

const fn region(name: &'static str, hi: u8, lo: u8) -> Region {
    const BANDS: [(i32, i32); 3] = [CENTRAL, POSITIVE, NEGATIVE];
    Region {
        name,
        bigram: Bigram::new(hi, lo),
        x_range: BANDS[hi as usize],
        y_range: BANDS[lo as usize],
    }
}

/// All nine regions, ordered by bigram value.
pub static REGIONS: [Region; 9] = [
    region("Center", 0, 0),
    region("North", 0, 1),
    region("South", 0, 2),
    region("East", 1, 0),
    region("NorthEast", 1, 1),
    region("SouthEast", 1, 2),
    region("West", 2, 0),
    region("NorthWest", 2, 1),
    region("SouthWest", 2, 2),
];

/// Region containing `(x, y)`.
pub fn classify_region(x: i32, y: i32) -> Result<&'static Region> {
    Coordinate::new(x, y)?;
    REGIONS
        .iter()
        .find(|r| r.contains(x, y))
        .ok_or(KameaError::OutOfBounds {
            x,
            y,
            extent: LATTICE_EXTENT,
        })
}

/// One member of a quadset: the transform that produced it, where it sits,
/// and its value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadsetEntry {
    pub transform: Transform,
    pub coordinate: Coordinate,
    pub value: TernaryString,
}

/// The four (coordinate, value) pairs generated from one seed cell, one per
/// transform. On an axis some coordinates coincide; those entries are still
/// listed separately.
pub fn quadset_entries(x: i32, y: i32, self_value: &TernaryString) -> Result<Vec<QuadsetEntry>> {
    let base = Coordinate::new(x, y)?;
    Ok(Transform::ALL
        .iter()
        .map(|&transform| QuadsetEntry {
            transform,
            coordinate: base.reflect(transform),
            value: transform.apply(self_value),
        })
        .collect())
}

/// Values that must appear at `(x, y)` and its three reflections.
///
/// When `x == 0` or `y == 0` reflections collapse onto each other and the map
/// has fewer than four keys; a collapsed cell must receive the same value
/// from every transform that lands on it.
pub fn quadset_values(
    x: i32,
    y: i32,
    self_value: &TernaryString,
) -> Result<BTreeMap<Coordinate, TernaryString>> {
    let mut values = BTreeMap::new();
    for entry in quadset_entries(x, y, self_value)? {
        merge(&mut values, entry.coordinate, entry.value)?;
    }
    Ok(values)
}

/// Check caller-supplied values against the quadset generated from the seed
/// at `(x, y)`. Supplied cells outside the quadset are ignored. Returns the
/// generated quadset on success.
pub fn check_quadset(
    x: i32,
    y: i32,
    self_value: &TernaryString,
    supplied: &BTreeMap<Coordinate, TernaryString>,
) -> Result<BTreeMap<Coordinate, TernaryString>> {
    let mut values = quadset_values(x, y, self_value)?;
    for (coordinate, found) in supplied {
        if values.contains_key(coordinate) {
            merge(&mut values, *coordinate, found.clone())?;
        }
    }
    Ok(values)
}

fn merge(
    values: &mut BTreeMap<Coordinate, TernaryString>,
    coordinate: Coordinate,
    value: TernaryString,
) -> Result<()> {
    match values.get(&coordinate) {
        Some(expected) if *expected != value => Err(KameaError::InconsistentQuadset {
            coordinate,
            expected: expected.to_string(),
            found: value.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            values.insert(coordinate, value);
            Ok(())
        }
    }
}
