// src/lib.rs

pub mod boundary;
pub mod config;
pub mod drawing;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod random;
pub mod rendering_lib;

pub use boundary::Bowl;
pub use config::{DrawingConfig, GenerationLimits, NoodleSpec, Palette};
pub use drawing::{make_drawing, Drawing, DrawingSummary, Noodle};
pub use error::{ConfigError, GenerationError, NoodleError};
pub use generator::NoodleGenerator;
pub use geometry::{ArcSegment, Orientation, Point2};
pub use random::RandomSource;
