// src/rendering_lib/painter.rs

use crate::geometry::{ArcSegment, Orientation, Point2};

/// Everything a painter needs to stroke one arc.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeRequest {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub orientation: Orientation,
    pub color: String,
    pub width: f64,
}

impl StrokeRequest {
    /// A closed ring, as used for the bowl.
    pub fn circle(center: Point2, radius: f64, color: &str, width: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
            orientation: Orientation::Clockwise,
            color: color.to_string(),
            width,
        }
    }

    fn along(segment: &ArcSegment, radius: f64, color: &str, width: f64) -> Self {
        Self {
            center: segment.center,
            radius,
            start_angle: segment.start_angle,
            end_angle: segment.end_angle,
            orientation: segment.orientation,
            color: color.to_string(),
            width,
        }
    }
}

/// The stroke capability drawings are rendered through.
pub trait ArcPainter {
    fn stroke_arc(&mut self, request: &StrokeRequest);
}

impl<P: ArcPainter + ?Sized> ArcPainter for &mut P {
    fn stroke_arc(&mut self, request: &StrokeRequest) {
        (**self).stroke_arc(request);
    }
}

pub const BORDER_STROKE_WIDTH: f64 = 1.0;

/// The three concentric strokes a segment is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct NoodleStrokes {
    pub outer_border: StrokeRequest,
    pub body: StrokeRequest,
    pub inner_border: StrokeRequest,
}

impl NoodleStrokes {
    pub fn from_segment(segment: &ArcSegment, body_color: &str, border_color: &str) -> Self {
        Self {
            outer_border: StrokeRequest::along(segment, segment.radius, border_color, BORDER_STROKE_WIDTH),
            body: StrokeRequest::along(segment, segment.body_radius(), body_color, segment.width),
            inner_border: StrokeRequest::along(segment, segment.inner_radius(), border_color, BORDER_STROKE_WIDTH),
        }
    }

    /// Body first, so the borders end up on top of it.
    pub fn paint<P: ArcPainter + ?Sized>(&self, painter: &mut P) {
        painter.stroke_arc(&self.body);
        painter.stroke_arc(&self.outer_border);
        painter.stroke_arc(&self.inner_border);
    }
}

/// Keeps every request, in order. Handy for headless runs and tests.
#[derive(Debug, Default)]
pub struct ArcRecorder {
    strokes: Vec<StrokeRequest>,
}

impl ArcRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[StrokeRequest] {
        &self.strokes
    }

    pub fn into_strokes(self) -> Vec<StrokeRequest> {
        self.strokes
    }
}

impl ArcPainter for ArcRecorder {
    fn stroke_arc(&mut self, request: &StrokeRequest) {
        self.strokes.push(request.clone());
    }
}
