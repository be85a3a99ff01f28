// src/config.rs
//
// Drawing parameters. Every field has a default, so a TOML file only needs the values it
// changes, and the command line can override the most common ones on top of that.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::boundary::Bowl;
use crate::error::ConfigError;
use crate::generator::RADIUS_SHRINK_FACTOR;

pub const DEFAULT_CANVAS_SIZE: f64 = 700.0;
pub const DEFAULT_MAX_REPAIR_ITERATIONS: usize = 1000;
pub const DEFAULT_MAX_SEGMENTS: usize = 10_000;

/// Shape parameters of one noodle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoodleSpec {
    pub width: f64,
    pub min_length: f64,
    pub max_length: f64,
    pub min_bend_radius: f64,
    /// Largest bend radius as a multiple of `min_bend_radius`.
    pub bend_radius_factor: f64,
}

impl Default for NoodleSpec {
    fn default() -> Self {
        Self {
            width: 10.0,
            min_length: 200.0,
            max_length: 600.0,
            min_bend_radius: 20.0,
            bend_radius_factor: 3.0,
        }
    }
}

impl NoodleSpec {
    pub fn max_bend_radius(&self) -> f64 {
        self.min_bend_radius * self.bend_radius_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.width,
            self.min_length,
            self.max_length,
            self.min_bend_radius,
            self.bend_radius_factor,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(invalid("noodle parameters must be finite"));
        }
        if self.width <= 0.0 {
            return Err(invalid(format!("noodle width must be positive, got {}", self.width)));
        }
        if self.min_length <= 0.0 {
            return Err(invalid(format!(
                "minimum length must be positive, got {}",
                self.min_length
            )));
        }
        if self.max_length < self.min_length {
            return Err(invalid(format!(
                "maximum length {} is below minimum length {}",
                self.max_length, self.min_length
            )));
        }
        if self.min_bend_radius < self.width {
            return Err(invalid(format!(
                "minimum bend radius {} is smaller than the noodle width {}",
                self.min_bend_radius, self.width
            )));
        }
        if self.bend_radius_factor < 1.0 {
            return Err(invalid(format!(
                "bend radius factor must be at least 1, got {}",
                self.bend_radius_factor
            )));
        }
        Ok(())
    }

    /// Checks the noodle on its own and against the bowl it will be drawn in.
    pub fn validate_against(&self, bowl: &Bowl) -> Result<(), ConfigError> {
        self.validate()?;
        let usable = bowl.usable_radius();
        if self.min_bend_radius + self.width >= usable {
            return Err(invalid(format!(
                "minimum bend radius {} plus width {} does not fit in a bowl with usable radius {}",
                self.min_bend_radius, self.width, usable
            )));
        }
        // Two chained discs of at least min bend radius, centers r1 + r2 - width apart, both
        // inside the usable circle: 4 * min_bend - width < 2 * usable.
        let chain_limit = (2.0 * usable + self.width) / 4.0;
        if self.min_bend_radius >= chain_limit {
            return Err(invalid(format!(
                "minimum bend radius {} leaves no room for a second segment, it must stay below {}",
                self.min_bend_radius, chain_limit
            )));
        }
        // The worst chain: a seed at full size followed by a candidate shrunk to its floor.
        let widest = self.max_bend_radius() + self.width;
        let narrowest = self.min_bend_radius / RADIUS_SHRINK_FACTOR;
        if 2.0 * widest + 2.0 * narrowest - self.width > 2.0 * usable {
            log::warn!(
                "bend radii up to {} crowd a bowl with usable radius {}, some noodles may be abandoned",
                widest,
                usable
            );
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BowlConfig {
    pub radius: f64,
    /// Thickness of the bowl ring, kept clear of noodles.
    pub margin: f64,
}

impl Default for BowlConfig {
    fn default() -> Self {
        Self { radius: 0.95 * DEFAULT_CANVAS_SIZE / 2.0, margin: 10.0 }
    }
}

/// CSS colors for the three kinds of strokes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub bowl: String,
    pub noodle: String,
    pub noodle_border: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bowl: "black".to_string(),
            noodle: "#f2d388".to_string(),
            noodle_border: "blue".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationLimits {
    pub max_repair_iterations: usize,
    pub max_segments: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_repair_iterations: DEFAULT_MAX_REPAIR_ITERATIONS,
            max_segments: DEFAULT_MAX_SEGMENTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub canvas_size: f64,
    pub noodle_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Abandon a failed noodle and keep drawing the rest instead of stopping.
    pub skip_failed_noodles: bool,
    pub bowl: BowlConfig,
    pub noodle: NoodleSpec,
    pub palette: Palette,
    pub limits: GenerationLimits,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            noodle_count: 5,
            seed: None,
            skip_failed_noodles: true,
            bowl: BowlConfig::default(),
            noodle: NoodleSpec::default(),
            palette: Palette::default(),
            limits: GenerationLimits::default(),
        }
    }
}

impl DrawingConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DrawingConfig = toml::from_str(source)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// The bowl sits in the middle of the canvas.
    pub fn build_bowl(&self) -> Result<Bowl, ConfigError> {
        let half = self.canvas_size / 2.0;
        Bowl::new(glam::DVec2::new(half, half), self.bowl.radius, self.bowl.margin)
    }

    /// Validates everything and returns the bowl the drawing will use.
    pub fn validate(&self) -> Result<Bowl, ConfigError> {
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(invalid(format!("canvas size must be positive, got {}", self.canvas_size)));
        }
        if self.limits.max_segments == 0 {
            return Err(invalid("segment budget must allow at least one segment"));
        }
        let bowl = self.build_bowl()?;
        if bowl.radius() > self.canvas_size / 2.0 {
            log::warn!(
                "bowl radius {} overflows the {} canvas, the rim will be clipped",
                bowl.radius(),
                self.canvas_size
            );
        }
        self.noodle.validate_against(&bowl)?;
        Ok(bowl)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Command line of the `noodle-bowl` binary.
#[derive(Debug, Default, Parser)]
#[command(name = "noodle-bowl", version, about = "Draws a bowl of noodles as SVG")]
pub struct CliArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the SVG (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of noodles
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    #[arg(long)]
    pub width: Option<f64>,

    #[arg(long)]
    pub min_length: Option<f64>,

    #[arg(long)]
    pub max_length: Option<f64>,

    #[arg(long)]
    pub min_bend_radius: Option<f64>,

    /// Stop at the first noodle that cannot be finished
    #[arg(long)]
    pub strict: bool,
}

impl CliArgs {
    /// Loads the configuration file (or defaults) and applies the command line on top.
    pub fn load_config(&self) -> Result<DrawingConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                DrawingConfig::from_file(path)?
            }
            None => DrawingConfig::default(),
        };
        Ok(self.apply_to(config))
    }

    pub fn apply_to(&self, mut config: DrawingConfig) -> DrawingConfig {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(count) = self.count {
            config.noodle_count = count;
        }
        if let Some(width) = self.width {
            config.noodle.width = width;
        }
        if let Some(min_length) = self.min_length {
            config.noodle.min_length = min_length;
        }
        if let Some(max_length) = self.max_length {
            config.noodle.max_length = max_length;
        }
        if let Some(min_bend_radius) = self.min_bend_radius {
            config.noodle.min_bend_radius = min_bend_radius;
        }
        if self.strict {
            config.skip_failed_noodles = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_reference_drawing() {
        let config = DrawingConfig::default();
        assert_eq!(config.canvas_size, 700.0);
        assert_eq!(config.bowl.radius, 332.5);
        assert_eq!(config.bowl.margin, 10.0);
        assert_eq!(config.noodle.max_bend_radius(), 60.0);
        assert_eq!(config.palette.bowl, "black");
        assert_eq!(config.limits.max_repair_iterations, 1000);
        let bowl = config.validate().unwrap();
        assert_eq!(bowl.center(), glam::DVec2::new(350.0, 350.0));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DrawingConfig::from_toml_str(
            r#"
            noodle_count = 3
            seed = 9

            [noodle]
            width = 6.0
            max_length = 900.0

            [palette]
            noodle = "tomato"
            "#,
        )
        .unwrap();
        assert_eq!(config.noodle_count, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.noodle.width, 6.0);
        assert_eq!(config.noodle.max_length, 900.0);
        assert_eq!(config.noodle.min_length, 200.0);
        assert_eq!(config.palette.noodle, "tomato");
        assert_eq!(config.palette.noodle_border, "blue");
        assert_eq!(config.bowl, BowlConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DrawingConfig::from_toml_str("noodle_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DrawingConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn rejects_inverted_length_bounds() {
        let mut config = DrawingConfig::default();
        config.noodle.min_length = 300.0;
        config.noodle.max_length = 200.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_bend_radius_that_fills_the_bowl() {
        let mut config = DrawingConfig::default();
        config.noodle.min_bend_radius = config.bowl.radius - config.bowl.margin;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_bend_radius_with_no_room_to_chain() {
        // (2 * 322.5 + 10) / 4
        let bowl = DrawingConfig::default().build_bowl().unwrap();
        let mut spec = NoodleSpec { min_bend_radius: 163.75, ..NoodleSpec::default() };
        assert!(matches!(spec.validate_against(&bowl), Err(ConfigError::Invalid(_))));
        spec.min_bend_radius = 250.0;
        assert!(matches!(spec.validate_against(&bowl), Err(ConfigError::Invalid(_))));
        spec.min_bend_radius = 163.5;
        assert!(spec.validate_against(&bowl).is_ok());
    }

    #[test]
    fn rejects_degenerate_noodles() {
        let cases: [fn(&mut NoodleSpec); 5] = [
            |spec| spec.width = 0.0,
            |spec| spec.min_length = -1.0,
            |spec| spec.min_bend_radius = 5.0,
            |spec| spec.bend_radius_factor = 0.5,
            |spec| spec.max_length = f64::NAN,
        ];
        for mutate in cases {
            let mut spec = NoodleSpec::default();
            mutate(&mut spec);
            assert!(spec.validate().is_err(), "{spec:?} should be rejected");
        }
    }

    #[test]
    fn cli_overrides_file_values() {
        let args = CliArgs {
            seed: Some(3),
            count: Some(12),
            min_bend_radius: Some(25.0),
            strict: true,
            ..CliArgs::default()
        };
        let config = args.apply_to(DrawingConfig::default());
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.noodle_count, 12);
        assert_eq!(config.noodle.min_bend_radius, 25.0);
        assert_eq!(config.noodle.width, 10.0);
        assert!(!config.skip_failed_noodles);
    }

    #[test]
    fn cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "noodle-bowl",
            "--seed",
            "11",
            "-n",
            "4",
            "--max-length",
            "450",
            "--output",
            "bowl.svg",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(11));
        assert_eq!(args.count, Some(4));
        assert_eq!(args.max_length, Some(450.0));
        assert_eq!(args.output, Some(PathBuf::from("bowl.svg")));
        assert!(!args.strict);
    }
}
