// src/main.rs

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use noodle_bowl::config::CliArgs;
use noodle_bowl::rendering_lib::SvgCanvas;
use noodle_bowl::Drawing;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let config = args.load_config().context("could not load the drawing configuration")?;
    let drawing = Drawing::new(config).context("invalid drawing configuration")?;

    let seed = drawing.config().seed.unwrap_or_else(rand::random);
    log::info!("drawing {} noodles with seed {}", drawing.config().noodle_count, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let size = drawing.config().canvas_size;
    let mut canvas = SvgCanvas::new(size, size).with_background("white");
    let summary = drawing.paint(&mut rng, &mut canvas)?;

    match &args.output {
        Some(path) => {
            canvas
                .write_to(path)
                .with_context(|| format!("could not write {}", path.display()))?;
            log::info!("wrote {} paths to {}", canvas.path_count(), path.display());
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(canvas.finish().as_bytes())
                .context("could not write the drawing to stdout")?;
        }
    }

    if summary.noodles_skipped > 0 {
        log::warn!("{} of {} noodles could not be finished", summary.noodles_skipped, drawing.config().noodle_count);
    }
    Ok(())
}
