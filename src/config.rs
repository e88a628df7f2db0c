use std::{fs, path::Path, time::Duration};

use log::{info, warn};
use serde::Deserialize;

use crate::error::{Result, SnakeError};
use crate::snake::INITIAL_SNAKE_LENGTH;
use crate::session::INITIAL_FOOD_COUNT;

pub const DEFAULT_CONFIG_PATH: &str = "snake.toml";

const DEFAULT_WIDTH: usize = 25;
const DEFAULT_HEIGHT: usize = 12;
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);
const DEFAULT_BACKGROUND: Color = Color::White;
const DEFAULT_PLAYER: Color = Color::Green;

// Every cell is drawn two columns wide on one terminal line.
pub const MAX_WIDTH: usize = 256;
pub const MAX_HEIGHT: usize = 256;

/// Color tokens accepted in the config file. How each one is drawn is up to
/// the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Brown,
    White,
    Black,
}

/// Validated game settings, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    width: usize,
    height: usize,
    background: Color,
    player: Color,
    tick_interval: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    grid: GridSection,
    colors: ColorsSection,
    speed: SpeedSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSection {
    width: usize,
    height: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorsSection {
    background: Color,
    player: Color,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpeedSection {
    tick_interval: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: DEFAULT_BACKGROUND,
            player: DEFAULT_PLAYER,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl Config {
    /// Validates a set of settings. Matching colors fall back to the
    /// defaults instead of failing.
    pub fn new(width: usize, height: usize, background: Color, player: Color, tick_interval: Duration) -> Result<Self> {
        if tick_interval.is_zero() {
            return Err(SnakeError::InvalidConfig("tick_interval must be positive".into()));
        }

        let (background, player) = resolve_colors(background, player);
        let config = Config { width, height, background, player, tick_interval };
        config.validate()?;
        Ok(config)
    }

    /// Loads the config at `path`, or `snake.toml` in the working directory.
    /// A file that cannot be read is an error either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::read(path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH)))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e| SnakeError::InvalidConfig(e.message().to_string()))?;

        let tick = file.speed.tick_interval;
        let tick_interval = Duration::try_from_secs_f64(tick)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| SnakeError::InvalidConfig(format!(
                "tick_interval must be a positive number of seconds, got {}",
                tick
            )))?;

        Config::new(
            file.grid.width,
            file.grid.height,
            file.colors.background,
            file.colors.player,
            tick_interval,
        )
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn player(&self) -> Color {
        self.player
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Grid rows.
    pub fn rows(&self) -> usize {
        self.height
    }

    /// Grid columns.
    pub fn cols(&self) -> usize {
        self.width
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SnakeError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.width < INITIAL_SNAKE_LENGTH || self.width > MAX_WIDTH {
            return Err(SnakeError::InvalidConfig(format!(
                "grid width must be between {} and {}, got {}",
                INITIAL_SNAKE_LENGTH, MAX_WIDTH, self.width
            )));
        }
        if self.height < 1 || self.height > MAX_HEIGHT {
            return Err(SnakeError::InvalidConfig(format!(
                "grid height must be between 1 and {}, got {}",
                MAX_HEIGHT, self.height
            )));
        }

        let cells = self.width * self.height;
        let needed = INITIAL_SNAKE_LENGTH + INITIAL_FOOD_COUNT;
        if cells < needed {
            return Err(SnakeError::InvalidConfig(format!(
                "grid has {} cells, needs at least {}",
                cells, needed
            )));
        }
        Ok(())
    }
}

// A player drawn in the background color would be invisible.
fn resolve_colors(background: Color, player: Color) -> (Color, Color) {
    if background == player {
        warn!(
            "Background and player share color {:?}, falling back to {:?}/{:?}",
            background, DEFAULT_BACKGROUND, DEFAULT_PLAYER
        );
        (DEFAULT_BACKGROUND, DEFAULT_PLAYER)
    } else {
        (background, player)
    }
}
