// lib.rs - Conway's Game of Life on a wrap-around grid, drawn to a monochrome display

pub mod config;
pub mod display;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rng;

pub use config::{EngineConfig, LifeConfig};
pub use display::{DisplaySink, MonoFramebuffer, render_cells};
pub use engine::GenerationEngine;
pub use error::ConfigError;
pub use grid::GridSize;
pub use rng::{RandomSource, seeded_rng};
