// error.rs - Startup configuration errors

use thiserror::Error;

/// Reasons the simulation refuses to start.
///
/// Everything here is caught before the first frame; once an engine exists
/// its `step()` cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width must be at least one cell")]
    ZeroWidth,

    #[error("grid height must be at least one cell")]
    ZeroHeight,

    #[error("cell size must be at least one pixel")]
    ZeroCellSize,

    #[error("grid of {width}x{height} cells does not fit in memory")]
    GridTooLarge { width: usize, height: usize },

    #[error("display of {width}x{height} px cannot hold a single {cell_size}px cell")]
    DisplayTooSmall { width: usize, height: usize, cell_size: usize },

    #[error("target frame rate must be at least one frame per second")]
    ZeroFrameRate,

    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },
}
