//! Named relationships between pairs of angles.
//!
//! Two fixed diagrams are covered:
//! - a transversal crossing two parallel lines, angles numbered 1-8
//!   (1, 2 above and 3, 4 below the first line; 5-8 likewise at the second);
//! - a triangle `A`, `B`, `C` with the exterior angle `ExtC` at `C`.
//!
//! Lookups canonicalize the pair to `(min, max)` first, so argument order never
//! matters. Pairs without a named relationship resolve to [`NO_RELATIONSHIP`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AngleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Equal measure.
    Congruent,
    /// Measures add up to 180°.
    Supplementary,
    #[serde(rename = "none")]
    Neither,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub name: &'static str,
    pub classification: Classification,
    pub description: &'static str,
}

pub const NO_RELATIONSHIP: Relationship = Relationship {
    name: "No Special Relationship",
    classification: Classification::Neither,
    description: "These two angles do not form a standard named pair.",
};

pub const CORRESPONDING: Relationship = Relationship {
    name: "Corresponding Angles",
    classification: Classification::Congruent,
    description: "They are in the same relative position at each intersection.",
};

pub const ALTERNATE_INTERIOR: Relationship = Relationship {
    name: "Alternate Interior Angles",
    classification: Classification::Congruent,
    description: "They are between the parallel lines on opposite sides of the transversal.",
};

pub const ALTERNATE_EXTERIOR: Relationship = Relationship {
    name: "Alternate Exterior Angles",
    classification: Classification::Congruent,
    description: "They are outside the parallel lines on opposite sides of the transversal.",
};

pub const SAME_SIDE_INTERIOR: Relationship = Relationship {
    name: "Same-Side Interior Angles",
    classification: Classification::Supplementary,
    description: "They are between the parallel lines on the same side of the transversal.",
};

pub const VERTICAL: Relationship = Relationship {
    name: "Vertical Angles",
    classification: Classification::Congruent,
    description: "They are opposite each other at the intersection.",
};

pub const LINEAR_PAIR: Relationship = Relationship {
    name: "Linear Pair",
    classification: Classification::Supplementary,
    description: "They form a straight line.",
};

pub const REMOTE_INTERIOR: Relationship = Relationship {
    name: "Remote Interior Angle",
    classification: Classification::Neither,
    description: "The exterior angle equals the sum of its two remote interior angles.",
};

/// Angle id in the transversal diagram, always in 1..=8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TransversalAngle(u8);

impl TransversalAngle {
    pub const ALL: [TransversalAngle; 8] = [t(1), t(2), t(3), t(4), t(5), t(6), t(7), t(8)];

    pub fn new(id: u8) -> Result<Self, AngleError> {
        if (1..=8).contains(&id) {
            Ok(Self(id))
        } else {
            Err(AngleError::OutOfRange(id))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

const fn t(id: u8) -> TransversalAngle {
    TransversalAngle(id)
}

impl TryFrom<u8> for TransversalAngle {
    type Error = AngleError;
    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<TransversalAngle> for u8 {
    fn from(a: TransversalAngle) -> u8 {
        a.0
    }
}

impl FromStr for TransversalAngle {
    type Err = AngleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u8 = s.trim().parse().map_err(|_| AngleError::UnknownLabel(s.to_string()))?;
        Self::new(id)
    }
}

impl fmt::Display for TransversalAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriangleAngle {
    A,
    B,
    C,
    ExtC,
}

impl TriangleAngle {
    pub const ALL: [TriangleAngle; 4] = [TriangleAngle::A, TriangleAngle::B, TriangleAngle::C, TriangleAngle::ExtC];
}

impl FromStr for TriangleAngle {
    type Err = AngleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(TriangleAngle::A),
            "b" => Ok(TriangleAngle::B),
            "c" => Ok(TriangleAngle::C),
            "ext" | "extc" | "ext_c" => Ok(TriangleAngle::ExtC),
            _ => Err(AngleError::UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for TriangleAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TriangleAngle::A => "A",
            TriangleAngle::B => "B",
            TriangleAngle::C => "C",
            TriangleAngle::ExtC => "ExtC",
        };
        f.write_str(label)
    }
}

type TransversalPairs = &'static [(TransversalAngle, TransversalAngle)];

/// Every named transversal pair, keyed canonically (smaller id first).
static TRANSVERSAL_TABLE: [(Relationship, TransversalPairs); 6] = [
    (CORRESPONDING, &[(t(1), t(5)), (t(2), t(6)), (t(3), t(7)), (t(4), t(8))]),
    (ALTERNATE_INTERIOR, &[(t(3), t(6)), (t(4), t(5))]),
    (ALTERNATE_EXTERIOR, &[(t(1), t(8)), (t(2), t(7))]),
    (SAME_SIDE_INTERIOR, &[(t(3), t(5)), (t(4), t(6))]),
    (VERTICAL, &[(t(1), t(4)), (t(2), t(3)), (t(5), t(8)), (t(6), t(7))]),
    (
        LINEAR_PAIR,
        &[(t(1), t(2)), (t(3), t(4)), (t(1), t(3)), (t(2), t(4)), (t(5), t(6)), (t(7), t(8)), (t(5), t(7)), (t(6), t(8))],
    ),
];

static TRIANGLE_TABLE: [(Relationship, &[(TriangleAngle, TriangleAngle)]); 2] = [
    (LINEAR_PAIR, &[(TriangleAngle::C, TriangleAngle::ExtC)]),
    (
        REMOTE_INTERIOR,
        &[(TriangleAngle::A, TriangleAngle::ExtC), (TriangleAngle::B, TriangleAngle::ExtC)],
    ),
];

fn canonical<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn find<T: Ord + Copy>(table: &[(Relationship, &[(T, T)])], a: T, b: T) -> Relationship {
    let key = canonical(a, b);
    table
        .iter()
        .find(|(_, pairs)| pairs.contains(&key))
        .map(|(rel, _)| *rel)
        .unwrap_or(NO_RELATIONSHIP)
}

pub fn transversal(a: TransversalAngle, b: TransversalAngle) -> Relationship {
    find(&TRANSVERSAL_TABLE, a, b)
}

pub fn triangle(a: TriangleAngle, b: TriangleAngle) -> Relationship {
    find(&TRIANGLE_TABLE, a, b)
}

/// Transversal relationships with the pairs that realize them.
pub fn named_pairs() -> impl Iterator<Item = (Relationship, TransversalPairs)> {
    TRANSVERSAL_TABLE.iter().copied()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagram {
    Transversal,
    Triangle,
}

/// Boundary lookup for string ids coming from the UI.
pub fn lookup(diagram: Diagram, a: &str, b: &str) -> Result<Relationship, AngleError> {
    match diagram {
        Diagram::Transversal => Ok(transversal(a.parse()?, b.parse()?)),
        Diagram::Triangle => Ok(triangle(a.parse()?, b.parse()?)),
    }
}
