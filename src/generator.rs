// src/generator.rs

use std::f64::consts::{PI, TAU};

use crate::boundary::Bowl;
use crate::config::{GenerationLimits, NoodleSpec};
use crate::error::{ConfigError, GenerationError};
use crate::geometry::{arc_length, deg_to_rad, polar_offset, ArcSegment, Orientation, Point2};
use crate::random::RandomSource;

/// Largest sweep of a fresh segment, as a fraction of a full turn.
pub const MAX_NEXT_ANGLE_FACTOR: f64 = 0.5;
/// Applied to a candidate radius that does not fit.
pub const RADIUS_SHRINK_FACTOR: f64 = 0.9;
/// How far the current arc is extended once the candidate cannot shrink any further.
pub const ARC_EXTENSION_STEP_DEG: f64 = 10.0;
/// Distinct end angles the extension steps can reach before coming back around.
const EXTENSIONS_PER_TURN: usize = (360.0 / ARC_EXTENSION_STEP_DEG) as usize;

/// The segment being grown, plus the running length bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainState {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub orientation: Orientation,
    pub accumulated_length: f64,
    pub target_length: f64,
}

/// Grows one noodle as a chain of arcs inside a bowl.
///
/// Yields each segment as soon as its successor has been placed. The iterator ends once the
/// accumulated length reaches the target, or right after the first error.
pub struct NoodleGenerator<'a, R: RandomSource + ?Sized> {
    bowl: &'a Bowl,
    spec: &'a NoodleSpec,
    limits: GenerationLimits,
    rng: &'a mut R,
    state: ChainState,
    emitted: usize,
    finished: bool,
}

impl<'a, R: RandomSource + ?Sized> NoodleGenerator<'a, R> {
    pub fn new(
        bowl: &'a Bowl,
        spec: &'a NoodleSpec,
        limits: GenerationLimits,
        rng: &'a mut R,
    ) -> Result<Self, ConfigError> {
        spec.validate_against(bowl)?;
        Ok(Self::from_validated(bowl, spec, limits, rng))
    }

    /// Like [`NoodleGenerator::new`] for a spec already checked with
    /// [`NoodleSpec::validate_against`] on this bowl.
    pub fn from_validated(
        bowl: &'a Bowl,
        spec: &'a NoodleSpec,
        limits: GenerationLimits,
        rng: &'a mut R,
    ) -> Self {
        let target_length = rng.uniform(spec.min_length, spec.max_length);

        // Padding the seed by half a margin makes it touch the containment circle instead of
        // the inner edge of the bowl ring.
        let radius = sample_radius(spec, rng).min(bowl.usable_radius());
        let (center, heading) = bowl.initial_point_on_boundary(radius + bowl.margin() / 2.0, rng);
        let (start_angle, end_angle) = Bowl::initial_span(heading);

        log::debug!(
            "noodle target length {:.2}, seed radius {:.2} at heading {:.3}",
            target_length,
            radius,
            heading
        );

        Self {
            bowl,
            spec,
            limits,
            rng,
            state: ChainState {
                center,
                radius,
                start_angle,
                end_angle,
                orientation: Orientation::Clockwise,
                accumulated_length: 0.0,
                target_length,
            },
            emitted: 0,
            finished: false,
        }
    }

    pub fn accumulated_length(&self) -> f64 {
        self.state.accumulated_length
    }

    pub fn target_length(&self) -> f64 {
        self.state.target_length
    }

    pub fn segments_emitted(&self) -> usize {
        self.emitted
    }

    fn step(&mut self) -> Result<ArcSegment, GenerationError> {
        if self.emitted >= self.limits.max_segments {
            return Err(GenerationError::SegmentBudgetExhausted {
                segments: self.emitted,
                accumulated: self.state.accumulated_length,
                target: self.state.target_length,
            });
        }

        let width = self.spec.width;
        self.state.accumulated_length +=
            arc_length(self.state.radius, self.state.start_angle, self.state.end_angle);

        let candidate_radius = sample_radius(self.spec, self.rng);
        let (next_center, next_radius) = self.place_next(candidate_radius)?;

        let sign = self.state.orientation.sign();
        let next_start = self.state.end_angle + sign * -PI;
        let next_end = next_start + sign * (self.rng.next_unit() * MAX_NEXT_ANGLE_FACTOR * TAU);

        let segment = ArcSegment::new(
            self.state.center,
            self.state.radius,
            self.state.start_angle,
            self.state.end_angle,
            self.state.orientation,
            width,
        );

        self.state.center = next_center;
        self.state.radius = next_radius;
        self.state.start_angle = next_start;
        self.state.end_angle = next_end;
        self.state.orientation = self.state.orientation.flipped();
        self.emitted += 1;

        log::trace!(
            "segment {} r={:.2} c=({:.2}, {:.2}) span=[{:.3}, {:.3}) {:?}, length {:.2}/{:.2}",
            self.emitted,
            segment.radius,
            segment.center.x,
            segment.center.y,
            segment.start_angle,
            segment.end_angle,
            segment.orientation,
            self.state.accumulated_length,
            self.state.target_length
        );

        Ok(segment)
    }

    /// Finds a center and radius for the next arc that stay inside the bowl.
    ///
    /// Shrinks the candidate while it stays above the minimum bend radius, then swings the end
    /// of the current arc in 10° steps until the candidate fits. Gives up once every end angle
    /// of a full turn has been tried, or when the iteration cap is hit first.
    fn place_next(&mut self, mut next_radius: f64) -> Result<(Point2, f64), GenerationError> {
        let width = self.spec.width;
        let mut next_center = self.project(next_radius, width);
        let mut iterations = 0;
        let mut extensions = 0;

        while !self.bowl.contains(next_center, next_radius) {
            if iterations >= self.limits.max_repair_iterations {
                return Err(self.repair_timeout(iterations));
            }

            let shrunk = next_radius * RADIUS_SHRINK_FACTOR;
            if shrunk > self.spec.min_bend_radius {
                next_radius = shrunk;
            } else if extensions + 1 < EXTENSIONS_PER_TURN {
                extensions += 1;
                self.state.end_angle +=
                    self.state.orientation.sign() * deg_to_rad(ARC_EXTENSION_STEP_DEG);
            } else {
                log::debug!(
                    "no end angle fits a radius {:.2} after segment {}",
                    next_radius,
                    self.emitted
                );
                return Err(self.repair_timeout(iterations));
            }
            iterations += 1;
            next_center = self.project(next_radius, width);
        }

        if iterations > 0 {
            log::trace!(
                "segment {} repaired in {} iterations, next radius {:.2}",
                self.emitted + 1,
                iterations,
                next_radius
            );
        }
        Ok((next_center, next_radius))
    }

    fn repair_timeout(&self, iterations: usize) -> GenerationError {
        GenerationError::RepairTimeout { segment: self.emitted, iterations }
    }

    fn project(&self, next_radius: f64, width: f64) -> Point2 {
        polar_offset(
            self.state.center,
            self.state.end_angle,
            self.state.radius + next_radius - width,
        )
    }
}

impl<'a, R: RandomSource + ?Sized> Iterator for NoodleGenerator<'a, R> {
    type Item = Result<ArcSegment, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.step();
        match &result {
            Err(err) => {
                log::warn!("noodle abandoned: {err}");
                self.finished = true;
            }
            Ok(_) if self.state.accumulated_length >= self.state.target_length => {
                log::debug!(
                    "noodle done after {} segments, length {:.2}",
                    self.emitted,
                    self.state.accumulated_length
                );
                self.finished = true;
            }
            Ok(_) => {}
        }
        Some(result)
    }
}

impl<'a, R: RandomSource + ?Sized> std::iter::FusedIterator for NoodleGenerator<'a, R> {}

fn sample_radius<R: RandomSource + ?Sized>(spec: &NoodleSpec, rng: &mut R) -> f64 {
    rng.uniform(spec.min_bend_radius, spec.max_bend_radius()) + spec.width
}
