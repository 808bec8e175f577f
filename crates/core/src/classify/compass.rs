//! Compass labelling of aspect angles.

use serde::Serialize;

/// Compass label for an aspect angle
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    /// Negative aspect: the cell has no facing direction
    Flat,
    /// Angle outside every bucket (≥ 360° or NaN)
    NotAvailable,
}

impl CompassDirection {
    /// The eight principal directions clockwise from north
    pub const PRINCIPAL: [CompassDirection; 8] = [
        CompassDirection::N,
        CompassDirection::NE,
        CompassDirection::E,
        CompassDirection::SE,
        CompassDirection::S,
        CompassDirection::SW,
        CompassDirection::W,
        CompassDirection::NW,
    ];

    /// Short display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::NE => "NE",
            CompassDirection::E => "E",
            CompassDirection::SE => "SE",
            CompassDirection::S => "S",
            CompassDirection::SW => "SW",
            CompassDirection::W => "W",
            CompassDirection::NW => "NW",
            CompassDirection::Flat => "Flat",
            CompassDirection::NotAvailable => "N/A",
        }
    }

    /// Reference bearing in degrees for principal directions
    #[must_use]
    pub const fn bearing(self) -> Option<f32> {
        match self {
            CompassDirection::N => Some(0.0),
            CompassDirection::NE => Some(45.0),
            CompassDirection::E => Some(90.0),
            CompassDirection::SE => Some(135.0),
            CompassDirection::S => Some(180.0),
            CompassDirection::SW => Some(225.0),
            CompassDirection::W => Some(270.0),
            CompassDirection::NW => Some(315.0),
            CompassDirection::Flat | CompassDirection::NotAvailable => None,
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket an aspect angle into a compass direction.
///
/// Buckets are half-open 45° intervals centered on the principal bearings,
/// with north wrapping across 0°: `[337.5, 360) ∪ [0, 22.5)`. Negative input
/// is `Flat`. Every value in `[0, 360)` lands in a principal bucket, so
/// `NotAvailable` only appears for `>= 360` or NaN.
#[must_use]
pub fn direction(degrees: f32) -> CompassDirection {
    if degrees < 0.0 {
        return CompassDirection::Flat;
    }
    if (337.5..360.0).contains(&degrees) || (0.0..22.5).contains(&degrees) {
        return CompassDirection::N;
    }
    const BUCKETS: [(f32, f32, CompassDirection); 7] = [
        (22.5, 67.5, CompassDirection::NE),
        (67.5, 112.5, CompassDirection::E),
        (112.5, 157.5, CompassDirection::SE),
        (157.5, 202.5, CompassDirection::S),
        (202.5, 247.5, CompassDirection::SW),
        (247.5, 292.5, CompassDirection::W),
        (292.5, 337.5, CompassDirection::NW),
    ];
    BUCKETS
        .iter()
        .find(|(lo, hi, _)| (*lo..*hi).contains(&degrees))
        .map_or(CompassDirection::NotAvailable, |&(_, _, dir)| dir)
}

/// One cell of the aspect reference card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompassReference {
    /// Direction shown in this cell, `None` for the blank center
    pub direction: Option<CompassDirection>,
    /// Whether the cell is highlighted (north and the optimal south)
    pub highlighted: bool,
}

/// The 3×3 aspect reference card, row-major from the north-west corner.
#[must_use]
pub fn reference_card() -> [CompassReference; 9] {
    let cell = |direction, highlighted| CompassReference {
        direction: Some(direction),
        highlighted,
    };
    [
        cell(CompassDirection::NW, false),
        cell(CompassDirection::N, true),
        cell(CompassDirection::NE, false),
        cell(CompassDirection::W, false),
        CompassReference {
            direction: None,
            highlighted: false,
        },
        cell(CompassDirection::E, false),
        cell(CompassDirection::SW, false),
        cell(CompassDirection::S, true),
        cell(CompassDirection::SE, false),
    ]
}
