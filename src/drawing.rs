// src/drawing.rs

use log::{debug, info, warn};

use crate::boundary::Bowl;
use crate::config::{DrawingConfig, Palette};
use crate::error::{ConfigError, GenerationError, NoodleError};
use crate::generator::NoodleGenerator;
use crate::geometry::ArcSegment;
use crate::random::RandomSource;
use crate::rendering_lib::{ArcPainter, NoodleStrokes, StrokeRequest};

/// One finished noodle, kept around for headless use.
#[derive(Clone, Debug, PartialEq)]
pub struct Noodle {
    pub segments: Vec<ArcSegment>,
    pub length: f64,
    pub target_length: f64,
}

impl Noodle {
    pub fn strokes<'a>(&'a self, palette: &'a Palette) -> impl Iterator<Item = NoodleStrokes> + 'a {
        self.segments
            .iter()
            .map(move |segment| NoodleStrokes::from_segment(segment, &palette.noodle, &palette.noodle_border))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingSummary {
    pub noodles_drawn: usize,
    pub noodles_skipped: usize,
    pub segments: usize,
    pub total_length: f64,
}

/// A validated configuration and the bowl it draws into.
#[derive(Clone, Debug)]
pub struct Drawing {
    config: DrawingConfig,
    bowl: Bowl,
}

impl Drawing {
    pub fn new(config: DrawingConfig) -> Result<Self, ConfigError> {
        let bowl = config.validate()?;
        Ok(Self { config, bowl })
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn bowl(&self) -> &Bowl {
        &self.bowl
    }

    pub fn bowl_stroke(&self) -> StrokeRequest {
        StrokeRequest::circle(
            self.bowl.center(),
            self.bowl.radius(),
            &self.config.palette.bowl,
            self.bowl.margin(),
        )
    }

    /// Strokes the bowl, then every noodle segment by segment as it is generated.
    ///
    /// A noodle that fails stays half drawn. It is counted as skipped when the configuration
    /// allows it, otherwise the error ends the drawing.
    pub fn paint<R, P>(&self, rng: &mut R, painter: &mut P) -> Result<DrawingSummary, GenerationError>
    where
        R: RandomSource + ?Sized,
        P: ArcPainter + ?Sized,
    {
        let palette = &self.config.palette;
        painter.stroke_arc(&self.bowl_stroke());

        let mut summary = DrawingSummary::default();
        for index in 0..self.config.noodle_count {
            let mut generator = self.generator(rng);
            let mut failure = None;
            for segment in generator.by_ref() {
                match segment {
                    Ok(segment) => {
                        NoodleStrokes::from_segment(&segment, &palette.noodle, &palette.noodle_border)
                            .paint(painter);
                        summary.segments += 1;
                    }
                    Err(err) => failure = Some(err),
                }
            }

            match failure {
                None => {
                    debug!(
                        "noodle {} painted in {} segments, length {:.2}",
                        index,
                        generator.segments_emitted(),
                        generator.accumulated_length()
                    );
                    summary.noodles_drawn += 1;
                    summary.total_length += generator.accumulated_length();
                }
                Some(err) if self.config.skip_failed_noodles => {
                    warn!("skipping noodle {index}: {err}");
                    summary.noodles_skipped += 1;
                }
                Some(err) => return Err(err),
            }
        }

        info!(
            "painted {} noodles ({} skipped), {} segments",
            summary.noodles_drawn, summary.noodles_skipped, summary.segments
        );
        Ok(summary)
    }

    /// Same run as [`Drawing::paint`] without a painter: returns the segments of every noodle
    /// that was finished.
    ///
    /// A skipped noodle leaves nothing here, while `paint` has already stroked the segments it
    /// produced before failing.
    pub fn generate<R>(&self, rng: &mut R) -> Result<Vec<Noodle>, GenerationError>
    where
        R: RandomSource + ?Sized,
    {
        let mut noodles = Vec::with_capacity(self.config.noodle_count);
        for index in 0..self.config.noodle_count {
            let mut generator = self.generator(rng);
            let segments: Result<Vec<_>, _> = generator.by_ref().collect();
            match segments {
                Ok(segments) => noodles.push(Noodle {
                    segments,
                    length: generator.accumulated_length(),
                    target_length: generator.target_length(),
                }),
                Err(err) if self.config.skip_failed_noodles => warn!("skipping noodle {index}: {err}"),
                Err(err) => return Err(err),
            }
        }
        Ok(noodles)
    }

    fn generator<'a, R: RandomSource + ?Sized>(&'a self, rng: &'a mut R) -> NoodleGenerator<'a, R> {
        NoodleGenerator::from_validated(&self.bowl, &self.config.noodle, self.config.limits, rng)
    }
}

/// Validates `config` and paints it in one go.
pub fn make_drawing<R, P>(config: DrawingConfig, rng: &mut R, painter: &mut P) -> Result<DrawingSummary, NoodleError>
where
    R: RandomSource + ?Sized,
    P: ArcPainter + ?Sized,
{
    let drawing = Drawing::new(config)?;
    Ok(drawing.paint(rng, painter)?)
}
