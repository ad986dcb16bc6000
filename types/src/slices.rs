//! The wheel's slice map: thirteen angular bands with reserved gaps.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slices on the wheel.
pub const SLICE_COUNT: u8 = 13;

/// Band boundaries in wheel-local degrees, in slice-id order.
///
/// Neighbouring bands are separated by 2-degree gaps so a landing is never
/// ambiguous; the union intentionally does not tile the full circle.
const BANDS: [(f64, f64); SLICE_COUNT as usize] = [
    (-6.0, 12.0),
    (14.0, 32.0),
    (34.0, 62.0),
    (64.0, 93.0),
    (95.0, 123.0),
    (124.0, 152.0),
    (154.0, 182.0),
    (184.0, 212.0),
    (214.0, 242.0),
    (244.0, 272.0),
    (274.0, 302.0),
    (304.0, 333.0),
    (334.0, 352.0),
];

/// Error raised for slice ids outside the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SliceError {
    #[error("slice id {id} is outside the wheel (expected 0..={last})", last = SLICE_COUNT - 1)]
    UnknownSlice { id: u8 },
}

/// Identifier of one wedge of the wheel.
///
/// Construction validates the id range, so holding a `SliceId` proves the
/// slice exists on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceId(u8);

impl SliceId {
    pub fn new(id: u8) -> Result<Self, SliceError> {
        if id < SLICE_COUNT {
            Ok(Self(id))
        } else {
            Err(SliceError::UnknownSlice { id })
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// All slice ids in wheel order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLICE_COUNT).map(Self)
    }
}

impl fmt::Display for SliceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open angular band `[min, max)` in wheel-local degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceBand {
    pub min_degree: f64,
    pub max_degree: f64,
}

impl SliceBand {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_degree - self.min_degree
    }

    #[must_use]
    pub fn contains(&self, degree: f64) -> bool {
        degree >= self.min_degree && degree < self.max_degree
    }
}

/// Fixed lookup table mapping slice ids to angular bands.
///
/// Pure and stateless; the standard map is the only one the game uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceMap;

impl SliceMap {
    #[must_use]
    pub const fn standard() -> Self {
        Self
    }

    /// Band for a validated slice id. Infallible: the id range is checked
    /// at `SliceId` construction.
    #[must_use]
    pub fn band(&self, id: SliceId) -> SliceBand {
        let (min_degree, max_degree) = BANDS[usize::from(id.value())];
        SliceBand {
            min_degree,
            max_degree,
        }
    }

    /// Band lookup from a raw id, validating the range.
    pub fn lookup(&self, id: u8) -> Result<SliceBand, SliceError> {
        SliceId::new(id).map(|id| self.band(id))
    }

    /// Reverse lookup: the slice whose band contains the given wheel-local
    /// degree, or `None` inside a reserved gap.
    ///
    /// The query angle is normalized so that the wrap at 0/360 falls inside
    /// slice 0's band (which starts at -6 degrees) rather than splitting it.
    #[must_use]
    pub fn slice_at(&self, degree: f64) -> Option<SliceId> {
        let wrapped = normalize_from(degree, BANDS[0].0);
        SliceId::all().find(|id| self.band(*id).contains(wrapped))
    }
}

/// Normalize `degree` into the half-open turn `[start, start + 360)`.
fn normalize_from(degree: f64, start: f64) -> f64 {
    (degree - start).rem_euclid(360.0) + start
}
