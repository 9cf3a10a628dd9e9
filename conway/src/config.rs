// config.rs - Display, timing and stability settings

use std::time::Duration;

use crate::error::ConfigError;
use crate::grid::GridSize;

// Compile-time defaults, sized for a 128x64 SSD1306 panel
pub const DISPLAY_WIDTH: usize = 128;
pub const DISPLAY_HEIGHT: usize = 64;
pub const CELL_SIZE: usize = 2;                 // Pixels per cell edge
pub const TARGET_FRAMERATE: u32 = 10;           // Frames per second
pub const STABILITY_LIMIT: u32 = 20;            // Near-static generations before a reseed
pub const STABILITY_DELTA_THRESHOLD: usize = 0; // 0 = population must not change at all

/// Engine-level settings: the grid in cells plus the stagnation detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
    pub stability_limit: u32,
    pub stability_delta_threshold: usize,
}

impl EngineConfig {
    pub fn grid(&self) -> Result<GridSize, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        GridSize::new(self.width, self.height)
    }
}

/// Startup configuration for a whole display loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeConfig {
    pub display_width: usize,
    pub display_height: usize,
    pub cell_size: usize,
    pub target_framerate: u32,
    pub stability_limit: u32,
    pub stability_delta_threshold: usize,
    /// Fixed RNG seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            cell_size: CELL_SIZE,
            target_framerate: TARGET_FRAMERATE,
            stability_limit: STABILITY_LIMIT,
            stability_delta_threshold: STABILITY_DELTA_THRESHOLD,
            seed: None,
        }
    }
}

impl LifeConfig {
    /// Defaults with `CONWAY_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LifeConfig::from_env`] but reading from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = parse_override(&lookup, "CONWAY_CELL_SIZE")? {
            config.cell_size = v;
        }
        if let Some(v) = parse_override(&lookup, "CONWAY_FPS")? {
            config.target_framerate = v;
        }
        if let Some(v) = parse_override(&lookup, "CONWAY_STABILITY_LIMIT")? {
            config.stability_limit = v;
        }
        if let Some(v) = parse_override(&lookup, "CONWAY_STABILITY_DELTA")? {
            config.stability_delta_threshold = v;
        }
        if let Some(v) = parse_override(&lookup, "CONWAY_SEED")? {
            config.seed = Some(v);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_framerate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.grid_width() == 0 || self.grid_height() == 0 {
            return Err(ConfigError::DisplayTooSmall {
                width: self.display_width,
                height: self.display_height,
                cell_size: self.cell_size,
            });
        }
        self.engine().grid().map(|_| ())
    }

    /// Cells per row. Leftover pixels at the right edge stay dark.
    pub fn grid_width(&self) -> usize {
        self.display_width.checked_div(self.cell_size).unwrap_or(0)
    }

    pub fn grid_height(&self) -> usize {
        self.display_height.checked_div(self.cell_size).unwrap_or(0)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_framerate.max(1)
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            width: self.grid_width(),
            height: self.grid_height(),
            cell_size: self.cell_size,
            stability_limit: self.stability_limit,
            stability_delta_threshold: self.stability_delta_threshold,
        }
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidOverride { key, value: raw }),
    }
}
