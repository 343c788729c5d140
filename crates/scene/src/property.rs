//! Property paths into scene objects.
//!
//! Controls address a single field of a single object through these paths
//! instead of holding references into the scene.

use std::fmt;

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// A numeric field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarProperty {
    /// One component of the object's position
    Position(Axis),
    /// Light intensity
    Intensity,
}

impl ScalarProperty {
    pub fn name(self) -> &'static str {
        match self {
            ScalarProperty::Position(axis) => axis.name(),
            ScalarProperty::Intensity => "intensity",
        }
    }
}

impl fmt::Display for ScalarProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarProperty::Position(axis) => write!(f, "position.{}", axis.name()),
            ScalarProperty::Intensity => f.write_str("intensity"),
        }
    }
}

/// A color field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorProperty {
    /// Light color; the sky color of a hemisphere light
    Color,
    /// Ground color of a hemisphere light
    GroundColor,
}

impl ColorProperty {
    pub fn name(self) -> &'static str {
        match self {
            ColorProperty::Color => "color",
            ColorProperty::GroundColor => "groundColor",
        }
    }
}

impl fmt::Display for ColorProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
