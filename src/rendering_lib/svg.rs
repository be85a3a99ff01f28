// src/rendering_lib/svg.rs

use std::borrow::Cow;
use std::f64::consts::{PI, TAU};
use std::fs;
use std::path::Path;

use super::painter::{ArcPainter, StrokeRequest};
use crate::geometry::{polar_offset, swept_angle, Orientation};

/// Writes strokes into an SVG document, one `<path>` per arc.
pub struct SvgCanvas {
    width: f64,
    height: f64,
    background: Option<String>,
    paths: String,
    path_count: usize,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, background: None, paths: String::new(), path_count: 0 }
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn path_count(&self) -> usize {
        self.path_count
    }

    pub fn finish(&self) -> String {
        let mut document = String::with_capacity(self.paths.len() + 256);
        document.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        ));
        if let Some(background) = &self.background {
            document.push_str(&format!(
                "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
                escape_attr(background)
            ));
        }
        document.push_str(&self.paths);
        document.push_str("</svg>\n");
        document
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.finish())
    }
}

impl ArcPainter for SvgCanvas {
    fn stroke_arc(&mut self, request: &StrokeRequest) {
        let Some(data) = arc_path_data(request) else {
            log::trace!("skipping empty arc at radius {:.2}", request.radius);
            return;
        };
        self.paths.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            data,
            escape_attr(&request.color),
            request.width
        ));
        self.path_count += 1;
    }
}

/// SVG path data for a canvas-style arc, `None` when nothing would be painted.
///
/// The y axis points down, so a clockwise canvas sweep is SVG's positive sweep direction.
pub fn arc_path_data(request: &StrokeRequest) -> Option<String> {
    let sweep = swept_angle(request.start_angle, request.end_angle, request.orientation);
    if request.radius <= 0.0 || sweep <= 0.0 {
        return None;
    }

    let (direction, sweep_flag) = match request.orientation {
        Orientation::Clockwise => (1.0, 1),
        Orientation::CounterClockwise => (-1.0, 0),
    };
    let r = request.radius;
    let start = polar_offset(request.center, request.start_angle, r);

    let mut data = format!("M {:.3} {:.3}", start.x, start.y);
    if sweep >= TAU {
        // A single SVG arc cannot close on itself, so a full turn is two halves.
        let half = polar_offset(request.center, request.start_angle + direction * PI, r);
        data.push_str(&format!(" A {r:.3} {r:.3} 0 1 {sweep_flag} {:.3} {:.3}", half.x, half.y));
        data.push_str(&format!(" A {r:.3} {r:.3} 0 1 {sweep_flag} {:.3} {:.3}", start.x, start.y));
    } else {
        let end = polar_offset(request.center, request.start_angle + direction * sweep, r);
        let large_arc = u8::from(sweep > PI);
        data.push_str(&format!(" A {r:.3} {r:.3} 0 {large_arc} {sweep_flag} {:.3} {:.3}", end.x, end.y));
    }
    Some(data)
}

/// Escapes a value for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
