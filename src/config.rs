use std::fs;
use std::path::Path;
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Side length of the square board, in cells.
pub const BOARD_SIZE: u16 = 50;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// The fixed square board every session is played on.
    pub const BOARD: Self = Self {
        width: BOARD_SIZE,
        height: BOARD_SIZE,
    };

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Base tick interval in milliseconds (20 ticks per second).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Delay between two food spawn rolls.
pub const FOOD_SPAWN_WAIT_MS: u64 = 750;

/// Lifetime of transient foods once the despawn timer is armed.
pub const FOOD_DESPAWN_WAIT_MS: u64 = 4000;

/// Duration of a food effect window.
pub const FOOD_EFFECT_WAIT_MS: u64 = 6000;

/// Speed factor applied by the Fast and Slow effects.
pub const SPEED_EFFECT_FACTOR: u32 = 3;

/// Upper bound of the Default foods scattered by an Exploder.
pub const EXPLODER_MAX_FOODS: usize = 10;

/// Snake length from which the spawn timer runs.
pub const SPAWN_MIN_SNAKE_LEN: usize = 5;

/// Width and height of the pointer coordinate space.
pub const BOARD_PIXELS: i32 = 1000;

/// Pixel size of one board cell.
pub const CELL_PIXELS: i32 = BOARD_PIXELS / BOARD_SIZE as i32;

/// Number of rainbow shades a Star food cycles through.
pub const STAR_SHADES: usize = 6;

/// Menu button geometry in board-pixel space.
///
/// Edges sit on whole terminal cells (one column is `CELL_PIXELS` wide, one
/// half-block row is two cells tall), so a drawn button is exactly its box.
pub const BUTTON_WIDTH: i32 = 320;
pub const BUTTON_HEIGHT: i32 = 80;
pub const BUTTON_SPACING: i32 = 120;
pub const BUTTON_TOP: i32 = 520;

/// Colors used by the terminal view.
pub mod palette {
    use super::{Color, STAR_SHADES};

    pub const GROUND: Color = Color::Rgb(0x2d, 0x0e, 0x05);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GRAY: Color = Color::Rgb(0xaf, 0xaf, 0xaf);
    pub const BLUE: Color = Color::Rgb(0x3a, 0x7c, 0xef);
    pub const GREEN: Color = Color::Rgb(0x0e, 0xdd, 0x48);
    pub const SNAKE_HEAD: Color = Color::Rgb(0x2c, 0xff, 0x5e);
    pub const SNAKE_BODY: Color = Color::Rgb(0x0e, 0xdd, 0x48);
    pub const SLIME: Color = Color::Rgb(0x0a, 0x8a, 0x30);
    pub const FOOD_DEFAULT: Color = Color::Rgb(234, 234, 234);
    pub const FOOD_DECAPITATOR: Color = Color::Rgb(0xff, 0x3b, 0x4a);
    pub const FOOD_FAST: Color = Color::Rgb(0xff, 0xb4, 0x52);
    pub const FOOD_SLOW: Color = Color::Rgb(0xad, 0x7e, 0xff);
    pub const FOOD_EXPLODER: Color = Color::Rgb(0x3a, 0x7c, 0xef);
    pub const FOOD_SLIMER: Color = Color::Rgb(0x79, 0xff, 0x83);
    pub const FOOD_REVERSE: Color = Color::Rgb(0xff, 0xff, 0x52);

    /// Shades cycled through by Star food.
    pub const RAINBOW: [Color; STAR_SHADES] = [
        Color::Rgb(0xff, 0x3e, 0x3e),
        Color::Rgb(0xff, 0xa8, 0x3e),
        Color::Rgb(0xf8, 0xff, 0x3e),
        Color::Rgb(0x3e, 0xff, 0x6c),
        Color::Rgb(0x3e, 0x89, 0xff),
        Color::Rgb(0xb1, 0x3e, 0xff),
    ];
}

/// Upper half-block glyph for compositing two board rows in one terminal row.
pub const GLYPH_HALF_UPPER: &str = "▀";

/// Full block glyph, used when both halves share a color.
pub const GLYPH_FULL: &str = "█";

/// Runtime timing knobs; defaults reproduce the constants above.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tick_interval_ms: u64,
    pub food_spawn_wait_ms: u64,
    pub food_despawn_wait_ms: u64,
    pub food_effect_wait_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_spawn_wait_ms: FOOD_SPAWN_WAIT_MS,
            food_despawn_wait_ms: FOOD_DESPAWN_WAIT_MS,
            food_effect_wait_ms: FOOD_EFFECT_WAIT_MS,
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&raw)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn spawn_wait(&self) -> Duration {
        Duration::from_millis(self.food_spawn_wait_ms)
    }

    #[must_use]
    pub fn despawn_wait(&self) -> Duration {
        Duration::from_millis(self.food_despawn_wait_ms)
    }

    #[must_use]
    pub fn effect_wait(&self) -> Duration {
        Duration::from_millis(self.food_effect_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{GameConfig, GridSize, BOARD_SIZE, CELL_PIXELS};

    #[test]
    fn default_config_matches_constants() {
        let config = GameConfig::default();

        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.food_spawn_wait_ms, 750);
        assert_eq!(config.food_despawn_wait_ms, 4000);
        assert_eq!(config.food_effect_wait_ms, 6000);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "food_despawn_wait_ms": 7000 }"#).expect("valid json");

        assert_eq!(config.food_despawn_wait_ms, 7000);
        assert_eq!(config.food_effect_wait_ms, 6000);
    }

    #[test]
    fn board_is_square_and_cells_tile_the_pixel_space() {
        assert_eq!(GridSize::BOARD.total_cells(), 2500);
        assert_eq!(CELL_PIXELS * i32::from(BOARD_SIZE), 1000);
    }
}
