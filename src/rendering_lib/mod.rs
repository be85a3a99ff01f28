// src/rendering_lib/mod.rs

pub mod painter;
pub mod svg;

pub use painter::{ArcPainter, ArcRecorder, NoodleStrokes, StrokeRequest, BORDER_STROKE_WIDTH};
pub use svg::SvgCanvas;
