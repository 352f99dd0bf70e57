//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::compute::{BALLOON_HEIGHT, BALLOON_WIDTH, BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::entities::Bounds;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Pop the rising balloons by typing their letters")]
pub struct Config {
    /// Ticks per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Logical window width in pixels (7 px per terminal column).
    #[arg(long, default_value_t = 350)]
    pub width: i32,

    /// Logical window height in pixels (15 px per terminal row).
    #[arg(long, default_value_t = 600)]
    pub height: i32,

    /// Sprite manifest to use instead of the built-in one.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Seed for the balloon RNG.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "balloon_pop.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("window {width}x{height} is too small (need at least {min_width}x{min_height})")]
    WindowTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_width = BALLOON_WIDTH.max(BUTTON_WIDTH);
        // the replay button sits a third of the way up from the bottom
        let min_height = (BALLOON_HEIGHT * 2).max(BUTTON_HEIGHT * 3);
        if self.width < min_width || self.height < min_height {
            return Err(ConfigError::WindowTooSmall {
                width: self.width,
                height: self.height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width,
            height: self.height,
        }
    }

    /// Wall-clock time allotted to one tick.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }
}
