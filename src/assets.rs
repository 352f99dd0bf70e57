//! Sprite bundle loaded once at startup.
//!
//! Sprites are character art listed in a TOML manifest:
//!
//! ```toml
//! [sprites.balloon1]
//! color = "red"
//! rows = [" ,--. ", "(    )", " `..' ", "   )  "]
//! ```
//!
//! Loading checks that every sprite the game needs is present and
//! non-empty, so lookups afterwards cannot fail.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::compute::{BALLOON_VARIANTS, POP_FRAMES};
use crate::entities::SpriteId;
use crate::render::Color;

const BUILTIN_MANIFEST: &str = include_str!("../assets/sprites.toml");

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset manifest {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed asset manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("sprite '{0}' is missing from the manifest")]
    Missing(String),

    #[error("sprite '{name}' is unusable: {reason}")]
    Malformed { name: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct Manifest {
    sprites: HashMap<String, SpriteDef>,
}

#[derive(Debug, Deserialize)]
struct SpriteDef {
    color: Color,
    rows: Vec<String>,
}

/// A decoded image: a grid of characters in one colour. Spaces are
/// transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub color: Color,
    pub rows: Vec<Vec<char>>,
}

impl Sprite {
    /// Width in characters (longest row).
    pub fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Character at (`row`, `col`); short rows are padded with spaces.
    pub fn glyph(&self, row: usize, col: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(' ')
    }
}

#[derive(Clone, Debug)]
pub struct AssetBundle {
    menu_background: Sprite,
    game_background: Sprite,
    play_button: Sprite,
    replay_button: Sprite,
    balloons: Vec<Sprite>,
    pop_frames: Vec<Sprite>,
}

impl AssetBundle {
    /// The sprites compiled into the binary.
    pub fn builtin() -> Result<Self, AssetError> {
        Self::from_toml(BUILTIN_MANIFEST)
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let src = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&src)
    }

    pub fn from_toml(src: &str) -> Result<Self, AssetError> {
        let mut manifest: Manifest = toml::from_str(src)?;
        let mut take = |name: &str| -> Result<Sprite, AssetError> {
            let def = manifest
                .sprites
                .remove(name)
                .ok_or_else(|| AssetError::Missing(name.to_string()))?;
            decode(name, def)
        };

        let menu_background = take("menu_background")?;
        let game_background = take("game_background")?;
        let play_button = take("play_button")?;
        let replay_button = take("replay_button")?;
        let balloons = (1..=BALLOON_VARIANTS)
            .map(|i| take(&format!("balloon{}", i)))
            .collect::<Result<Vec<_>, _>>()?;
        let pop_frames = (1..=POP_FRAMES)
            .map(|i| take(&format!("pop{}", i)))
            .collect::<Result<Vec<_>, _>>()?;

        for extra in manifest.sprites.keys() {
            log::debug!("ignoring unused sprite '{}'", extra);
        }

        Ok(Self {
            menu_background,
            game_background,
            play_button,
            replay_button,
            balloons,
            pop_frames,
        })
    }

    pub fn sprite(&self, id: SpriteId) -> &Sprite {
        match id {
            SpriteId::MenuBackground => &self.menu_background,
            SpriteId::GameBackground => &self.game_background,
            SpriteId::PlayButton => &self.play_button,
            SpriteId::ReplayButton => &self.replay_button,
            SpriteId::Balloon(i) => &self.balloons[i % self.balloons.len()],
            SpriteId::Pop(i) => &self.pop_frames[i.min(self.pop_frames.len() - 1)],
        }
    }
}

fn decode(name: &str, def: SpriteDef) -> Result<Sprite, AssetError> {
    let rows: Vec<Vec<char>> = def.rows.iter().map(|r| r.chars().collect()).collect();
    let sprite = Sprite {
        name: name.to_string(),
        color: def.color,
        rows,
    };
    if sprite.rows.is_empty() || sprite.columns() == 0 {
        return Err(AssetError::Malformed {
            name: name.to_string(),
            reason: "no visible rows".to_string(),
        });
    }
    Ok(sprite)
}
