//! Balloon-Pop: balloons carrying letters rise up the screen and the
//! player types the letter to pop them before they escape.
//!
//! Core modules (no terminal I/O):
//! - `entities`: plain game data
//! - `compute`: tuning constants and the per-tick update functions
//! - `input`: key-down table and pointer events handed in by the platform
//! - `clock`: monotonic time source and per-tick elapsed time
//! - `ui`: buttons and the menu/playing screen machine
//! - `render`: the `Renderer` seam and the render pass
//! - `assets`: sprite bundle loaded once at startup
//! - `config`: command-line configuration

pub mod assets;
pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod render;
pub mod ui;

pub use assets::{AssetBundle, AssetError, Sprite};
pub use config::{Config, ConfigError};
pub use ui::Game;
