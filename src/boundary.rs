// src/boundary.rs

use std::f64::consts::{PI, TAU};

use crate::error::ConfigError;
use crate::geometry::{polar_offset, Point2};
use crate::random::RandomSource;

/// The circular region every segment must stay in.
///
/// `margin` is the rendered thickness of the bowl ring; geometry is kept `margin` inside
/// `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bowl {
    center: Point2,
    radius: f64,
    margin: f64,
}

impl Bowl {
    pub fn new(center: Point2, radius: f64, margin: f64) -> Result<Self, ConfigError> {
        if !center.is_finite() || !radius.is_finite() || !margin.is_finite() {
            return Err(ConfigError::Invalid("bowl geometry must be finite".to_string()));
        }
        if margin <= 0.0 || radius <= margin {
            return Err(ConfigError::Invalid(format!(
                "bowl needs radius > margin > 0, got radius {radius} and margin {margin}"
            )));
        }
        Ok(Self { center, radius, margin })
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Radius of the containment circle.
    pub fn usable_radius(&self) -> f64 {
        self.radius - self.margin
    }

    #[inline(always)]
    pub fn contains(&self, candidate_center: Point2, candidate_radius: f64) -> bool {
        candidate_center.distance(self.center) + candidate_radius <= self.usable_radius()
    }

    /// Picks a random heading θ and the center of a first arc of `initial_segment_radius`
    /// that touches the bowl at θ, half a margin in.
    ///
    /// The first arc spans `[θ − π/2, θ + π/2)`, so it opens towards the bowl center.
    pub fn initial_point_on_boundary<R: RandomSource + ?Sized>(
        &self,
        initial_segment_radius: f64,
        rng: &mut R,
    ) -> (Point2, f64) {
        let heading = rng.next_unit() * TAU;
        let distance = self.radius - initial_segment_radius - self.margin / 2.0;
        (polar_offset(self.center, heading, distance), heading)
    }

    /// Span of the first arc for a heading returned by `initial_point_on_boundary`.
    pub fn initial_span(heading: f64) -> (f64, f64) {
        (heading - PI / 2.0, heading + PI / 2.0)
    }
}
