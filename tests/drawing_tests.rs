// tests/drawing_tests.rs

use noodle_bowl::config::{CliArgs, DrawingConfig, NoodleSpec};
use noodle_bowl::rendering_lib::{ArcRecorder, SvgCanvas};
use noodle_bowl::{make_drawing, Bowl, ConfigError, Drawing, GenerationLimits, NoodleError, NoodleGenerator, Point2};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f64 = 1e-9;

fn reference_bowl() -> Bowl {
    Bowl::new(Point2::new(350.0, 350.0), 332.5, 10.0).unwrap()
}

fn reference_noodle() -> NoodleSpec {
    NoodleSpec {
        width: 10.0,
        min_length: 200.0,
        max_length: 200.0,
        min_bend_radius: 20.0,
        ..NoodleSpec::default()
    }
}

#[test]
fn reference_scenario_terminates_inside_the_bowl() {
    let bowl = reference_bowl();
    let spec = reference_noodle();
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut generator = NoodleGenerator::new(&bowl, &spec, GenerationLimits::default(), &mut rng).unwrap();
        let mut count = 0;
        for segment in generator.by_ref() {
            let segment = segment.unwrap();
            let reach = segment.center.distance(bowl.center()) + segment.radius;
            assert!(reach <= bowl.usable_radius() + EPS, "seed {seed} leaves the bowl: {reach}");
            count += 1;
        }
        assert!(count > 0);
        assert_eq!(generator.target_length(), 200.0);
        assert!(generator.accumulated_length() >= 200.0);
    }
}

#[test]
fn bend_radius_filling_the_bowl_is_rejected() {
    let bowl = reference_bowl();
    let spec = NoodleSpec { min_bend_radius: 322.5, ..reference_noodle() };
    let mut rng = StdRng::seed_from_u64(0);
    let result = NoodleGenerator::new(&bowl, &spec, GenerationLimits::default(), &mut rng);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn bend_radius_too_large_to_chain_paints_nothing() {
    let mut config = DrawingConfig::default();
    config.noodle.min_bend_radius = 250.0;
    assert!(matches!(Drawing::new(config.clone()), Err(ConfigError::Invalid(_))));

    let mut recorder = ArcRecorder::new();
    let result = make_drawing(config, &mut StdRng::seed_from_u64(0), &mut recorder);
    assert!(matches!(result, Err(NoodleError::Config(ConfigError::Invalid(_)))));
    assert!(recorder.into_strokes().is_empty());
}

#[test]
fn whole_drawings_are_reproducible() {
    let mut config = DrawingConfig::default();
    config.noodle_count = 8;
    config.noodle.max_length = 1000.0;
    let drawing = Drawing::new(config).unwrap();

    let first = drawing.generate(&mut StdRng::seed_from_u64(1234)).unwrap();
    let second = drawing.generate(&mut StdRng::seed_from_u64(1234)).unwrap();
    assert_eq!(first.len(), 8);
    assert_eq!(first, second);

    for noodle in &first {
        for pair in noodle.segments.windows(2) {
            assert_ne!(pair[0].orientation, pair[1].orientation);
        }
        for segment in &noodle.segments {
            assert!(drawing.bowl().contains(segment.center, segment.radius - EPS));
        }
    }
}

#[test]
fn svg_output_has_a_path_per_stroke() {
    let mut config = DrawingConfig::default();
    config.noodle_count = 3;
    let mut canvas = SvgCanvas::new(config.canvas_size, config.canvas_size);
    let mut recorder = ArcRecorder::new();

    let summary = make_drawing(config.clone(), &mut StdRng::seed_from_u64(77), &mut canvas).unwrap();
    make_drawing(config, &mut StdRng::seed_from_u64(77), &mut recorder).unwrap();

    let svg = canvas.finish();
    let painted = recorder.strokes().iter().filter(|stroke| {
        noodle_bowl::geometry::swept_angle(stroke.start_angle, stroke.end_angle, stroke.orientation) > 0.0
    });
    assert_eq!(svg.matches("<path").count(), painted.count());
    assert_eq!(recorder.strokes().len(), 1 + 3 * summary.segments);
    assert!(svg.contains(r#"stroke="black" stroke-width="10""#));
}

#[test]
fn config_file_round_trip_through_the_cli() {
    let path = std::env::temp_dir().join(format!("noodle_bowl_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "noodle_count = 2\nseed = 5\n[noodle]\nwidth = 8.0\nmin_bend_radius = 16.0\n",
    )
    .unwrap();

    let args = CliArgs { config: Some(path.clone()), count: Some(4), ..CliArgs::default() };
    let config = args.load_config().unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.noodle_count, 4);
    assert_eq!(config.seed, Some(5));
    assert_eq!(config.noodle.width, 8.0);
    assert_eq!(config.noodle.max_bend_radius(), 48.0);

    let drawing = Drawing::new(config).unwrap();
    let noodles = drawing.generate(&mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(noodles.len(), 4);
    assert!(noodles.iter().all(|noodle| noodle.segments.iter().all(|segment| segment.width == 8.0)));
}

#[test]
fn invalid_config_is_reported_before_painting() {
    let mut config = DrawingConfig::default();
    config.bowl.margin = 0.0;
    let mut recorder = ArcRecorder::new();
    let err = make_drawing(config, &mut StdRng::seed_from_u64(0), &mut recorder).unwrap_err();
    assert!(matches!(err, NoodleError::Config(_)));
    assert!(recorder.strokes().is_empty());
}
