// src/geometry.rs

use std::f64::consts::{PI, TAU};

use glam::DVec2;

pub type Point2 = DVec2;

/// Sweep direction of an arc, in canvas terms (y axis pointing down).
///
/// `Clockwise` sweeps towards increasing angles, `CounterClockwise` towards decreasing ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    /// Sign used by the chaining rules: -1 for clockwise, +1 for counter-clockwise.
    pub fn sign(self) -> f64 {
        match self {
            Orientation::Clockwise => -1.0,
            Orientation::CounterClockwise => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub center: Point2,
    pub radius: f64, // outer extent of the ribbon
    pub start_angle: f64,
    pub end_angle: f64,
    pub orientation: Orientation,
    pub width: f64,
}

impl ArcSegment {
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        orientation: Orientation,
        width: f64,
    ) -> Self {
        Self { center, radius, start_angle, end_angle, orientation, width }
    }

    pub fn body_radius(&self) -> f64 {
        self.radius - self.width / 2.0
    }

    pub fn inner_radius(&self) -> f64 {
        self.radius - self.width
    }

    /// Length as the chain accounts for it (see [`arc_length`]).
    pub fn length(&self) -> f64 {
        arc_length(self.radius, self.start_angle, self.end_angle)
    }

    /// Angle actually painted from start to end, following canvas `arc()` rules.
    pub fn swept_angle(&self) -> f64 {
        swept_angle(self.start_angle, self.end_angle, self.orientation)
    }

    pub fn start_point(&self) -> Point2 {
        polar_offset(self.center, self.start_angle, self.radius)
    }

    pub fn end_point(&self) -> Point2 {
        polar_offset(self.center, self.end_angle, self.radius)
    }
}

/// Degrees to radians. Only values above 360 are wrapped, and only by `% 360`.
pub fn deg_to_rad(deg: f64) -> f64 {
    let deg = if deg > 360.0 { deg % 360.0 } else { deg };
    deg * PI / 180.0
}

/// Radians to degrees. Values above π are wrapped by `% π`, not by a full turn.
///
/// The two moduli differ on purpose: drawings made with these helpers depend on both.
pub fn rad_to_deg(rad: f64) -> f64 {
    let rad = if rad > PI { rad % PI } else { rad };
    180.0 * (rad / PI)
}

/// Arc length accounted for a span: `2π · r · |span°| / 360`, span taken in wrapped degrees.
pub fn arc_length(radius: f64, start_angle: f64, end_angle: f64) -> f64 {
    let span_deg = rad_to_deg(end_angle) - rad_to_deg(start_angle);
    TAU * radius * (span_deg.abs() / 360.0)
}

/// Painted sweep of a canvas-style arc from `start` to `end`.
///
/// A difference of a full turn or more in the sweep direction paints the whole circle,
/// anything else is reduced to `[0, 2π)`.
pub fn swept_angle(start: f64, end: f64, orientation: Orientation) -> f64 {
    let delta = match orientation {
        Orientation::Clockwise => end - start,
        Orientation::CounterClockwise => start - end,
    };
    if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

#[inline(always)]
pub fn polar_offset(origin: Point2, angle: f64, distance: f64) -> Point2 {
    origin + DVec2::from_angle(angle) * distance
}
