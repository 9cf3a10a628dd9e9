// main.rs - Headless display loop: runs until the power goes

use std::process::ExitCode;

use conway::driver::{self, FramePacer};
use conway::{GenerationEngine, LifeConfig, MonoFramebuffer, seeded_rng};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let config = match LifeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration, not starting");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = match GenerationEngine::new(config.engine(), seeded_rng(config.seed)) {
        Ok(engine) => engine,
        Err(err) => {
            error!(%err, "invalid configuration, not starting");
            return ExitCode::FAILURE;
        }
    };
    let mut display = MonoFramebuffer::new(config.display_width, config.display_height);

    info!(
        cells_w = config.grid_width(),
        cells_h = config.grid_height(),
        fps = config.target_framerate,
        "starting Game of Life"
    );

    match driver::run(&mut engine, &mut display, FramePacer::from(&config)).await {
        Ok(never) | Err(never) => match never {},
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
