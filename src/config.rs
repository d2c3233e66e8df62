//! Runtime settings for the host binary.

use std::str::FromStr;

use tracing::warn;

use crate::domain::Initial;
use crate::input::SurfaceGeometry;

/// Largest surface side the host can turn into a texture.
pub const MAX_SURFACE_PIXELS: u32 = u16::MAX as u32;

/// Grid and display settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeConfig {
    pub width: u32,
    pub height: u32,
    /// Cell edge in surface pixels, not counting the 1 pixel border.
    pub cell_size: u32,
    /// `None` picks a fresh seed at startup.
    pub seed: Option<u64>,
    pub start_paused: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            cell_size: 5,
            seed: None,
            start_paused: false,
        }
    }
}

impl LifeConfig {
    /// Defaults overridden by `LIFE_WIDTH`, `LIFE_HEIGHT`, `LIFE_CELL_SIZE`,
    /// `LIFE_SEED` and `LIFE_PAUSED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_with(&lookup, "LIFE_WIDTH", &mut config.width);
        override_with(&lookup, "LIFE_HEIGHT", &mut config.height);
        override_with(&lookup, "LIFE_CELL_SIZE", &mut config.cell_size);
        override_with(&lookup, "LIFE_PAUSED", &mut config.start_paused);

        let mut seed = 0u64;
        if override_with(&lookup, "LIFE_SEED", &mut seed) {
            config.seed = Some(seed);
        }

        let defaults = Self::default();
        if config.width == 0 {
            warn!("LIFE_WIDTH must be positive, using default");
            config.width = defaults.width;
        }
        if config.height == 0 {
            warn!("LIFE_HEIGHT must be positive, using default");
            config.height = defaults.height;
        }
        if config.cell_size == 0 {
            warn!("LIFE_CELL_SIZE must be positive, using default");
            config.cell_size = defaults.cell_size;
        }
        if config.surface_pixels().is_none() {
            warn!(
                width = config.width,
                height = config.height,
                cell_size = config.cell_size,
                max = MAX_SURFACE_PIXELS,
                "surface too large, using default grid"
            );
            config.width = defaults.width;
            config.height = defaults.height;
            config.cell_size = defaults.cell_size;
        }
        config
    }

    /// Starting state for the automaton.
    pub fn initial(&self) -> Initial {
        Initial::Random {
            seed: self.seed.unwrap_or_else(rand::random),
        }
    }

    /// Backing size of the drawing surface, grid lines included. `None` when
    /// a side exceeds [`MAX_SURFACE_PIXELS`].
    pub fn surface_pixels(&self) -> Option<(u32, u32)> {
        SurfaceGeometry::pixels_for_grid(self.width, self.height, self.cell_size)
            .filter(|&(pw, ph)| pw <= MAX_SURFACE_PIXELS && ph <= MAX_SURFACE_PIXELS)
    }
}

/// Parse `key` into `slot` when present. Returns whether it was applied.
fn override_with<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) -> bool {
    let Some(raw) = lookup(key) else {
        return false;
    };
    match raw.trim().parse() {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable setting");
            false
        }
    }
}
