// driver.rs - Frame loop: step, draw, sleep off the rest of the frame

use std::convert::Infallible;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

use crate::config::LifeConfig;
use crate::display::{DisplaySink, render_cells};
use crate::engine::GenerationEngine;
use crate::rng::RandomSource;

/// Best-effort frame pacing: sleep whatever is left of the target interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration { self.interval }

    /// Time left to sleep after a frame took `elapsed`; zero once overrun.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }
}

impl From<&LifeConfig> for FramePacer {
    fn from(config: &LifeConfig) -> Self {
        Self::new(config.frame_interval())
    }
}

/// Compute the next generation and draw it.
pub fn run_frame<R, S>(engine: &mut GenerationEngine<R>, sink: &mut S) -> Result<(), S::Error>
where
    R: RandomSource,
    S: DisplaySink,
{
    let cell_size = engine.cell_size();
    render_cells(sink, engine.step(), cell_size)
}

async fn paced_frame<R, S>(
    engine: &mut GenerationEngine<R>,
    sink: &mut S,
    pacer: FramePacer,
) -> Result<(), S::Error>
where
    R: RandomSource,
    S: DisplaySink,
{
    let started = Instant::now();
    run_frame(engine, sink)?;
    let elapsed = started.elapsed();

    debug!(
        frame_ms = elapsed.as_millis() as u64,
        generation = engine.generation(),
        live = engine.live_count(),
        "frame drawn"
    );
    if elapsed > pacer.interval() {
        trace!(over_ms = (elapsed - pacer.interval()).as_millis() as u64, "frame overran target");
    }

    sleep(pacer.remaining(elapsed)).await;
    Ok(())
}

/// Run `frames` paced frames, then return.
pub async fn run_frames<R, S>(
    engine: &mut GenerationEngine<R>,
    sink: &mut S,
    pacer: FramePacer,
    frames: u64,
) -> Result<(), S::Error>
where
    R: RandomSource,
    S: DisplaySink,
{
    for _ in 0..frames {
        paced_frame(engine, sink, pacer).await?;
    }
    Ok(())
}

/// Run forever. Only returns if the display fails.
pub async fn run<R, S>(
    engine: &mut GenerationEngine<R>,
    sink: &mut S,
    pacer: FramePacer,
) -> Result<Infallible, S::Error>
where
    R: RandomSource,
    S: DisplaySink,
{
    loop {
        paced_frame(engine, sink, pacer).await?;
    }
}
