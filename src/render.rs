//! The render pass: turns a `Screen` into draw calls on a `Renderer`.
//!
//! No terminal code lives here. The platform layer implements `Renderer`;
//! tests use a recording implementation.

use std::io;

use serde::Deserialize;

use crate::assets::{AssetBundle, Sprite};
use crate::compute::{BALLOON_HEIGHT, BALLOON_WIDTH, POP_SIZE};
use crate::entities::{Balloon, Button, GameState, MenuState, Point, Rect, Screen, SpriteId};

// ── Renderer seam ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    DarkGrey,
    Grey,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

/// Text size hint (20, 30 and 40 pt in the window the game was laid out for).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Small,
    Medium,
    Large,
}

/// Drawing primitives supplied by the platform. Coordinates are logical
/// window pixels.
pub trait Renderer {
    fn clear(&mut self) -> io::Result<()>;

    /// Draw `sprite` scaled into `dest`.
    fn draw_image(&mut self, sprite: &Sprite, dest: Rect) -> io::Result<()>;

    /// Draw `text` with its left edge at `at`, or centred on `at`.
    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        centered: bool,
        color: Color,
        font: Font,
    ) -> io::Result<()>;

    fn present(&mut self) -> io::Result<()>;
}

// ── Palette ───────────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_LETTER: Color = Color::White;
const C_COUNTERS: Color = Color::Yellow;
const C_LOST: Color = Color::Red;
const C_FINAL_SCORE: Color = Color::White;
const C_TAUNT: Color = Color::Grey;

/// Hovered buttons grow by this many percent.
const HOVER_GROWTH_PCT: i32 = 10;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render_screen<R: Renderer>(
    out: &mut R,
    screen: &Screen,
    assets: &AssetBundle,
) -> io::Result<()> {
    out.clear()?;
    match screen {
        Screen::Menu(menu) => render_menu(out, menu, assets)?,
        Screen::Playing(state) => render_game(out, state, assets)?,
    }
    out.present()
}

fn full_window(width: i32, height: i32) -> Rect {
    Rect::new(0, 0, width, height)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn render_menu<R: Renderer>(out: &mut R, menu: &MenuState, assets: &AssetBundle) -> io::Result<()> {
    let window = full_window(menu.bounds.width, menu.bounds.height);
    out.draw_image(assets.sprite(SpriteId::MenuBackground), window)?;

    out.draw_text(
        "Balloon-Pop",
        Point::new(menu.bounds.width / 2, 200),
        true,
        C_TITLE,
        Font::Medium,
    )?;

    for button in &menu.buttons {
        render_button(out, button, assets)?;
    }
    Ok(())
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn render_game<R: Renderer>(out: &mut R, state: &GameState, assets: &AssetBundle) -> io::Result<()> {
    let (w, h) = (state.bounds.width, state.bounds.height);
    out.draw_image(assets.sprite(SpriteId::GameBackground), full_window(w, h))?;

    for balloon in &state.balloons {
        render_balloon(out, balloon, assets)?;
    }
    for button in &state.buttons {
        render_button(out, button, assets)?;
    }

    if state.is_lost() {
        out.draw_text(
            &format!("Score : {}", state.score),
            Point::new(w / 2, h / 2 - 100),
            true,
            C_FINAL_SCORE,
            Font::Large,
        )?;
        out.draw_text("YOU LOST!", Point::new(w / 2, h / 2), true, C_LOST, Font::Large)?;
        out.draw_text(
            "Can't you Type? Slow Hands -_-",
            Point::new(w / 2, h / 2 + 40),
            true,
            C_TAUNT,
            Font::Small,
        )?;
        return Ok(());
    }

    out.draw_text(
        &format!("Fail: {}", state.fails),
        Point::new(w / 2, 50),
        true,
        C_COUNTERS,
        Font::Medium,
    )?;
    out.draw_text(
        &format!("Score: {}", state.score),
        Point::new(w / 2, 100),
        true,
        C_COUNTERS,
        Font::Medium,
    )
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Resolved balloons draw nothing; popped ones draw their current pop
/// frame; live ones draw their sprite with the letter over it.
pub fn render_balloon<R: Renderer>(
    out: &mut R,
    balloon: &Balloon,
    assets: &AssetBundle,
) -> io::Result<()> {
    if balloon.is_resolved() {
        return Ok(());
    }
    if balloon.popped {
        if let Some(frame) = balloon.pop_animation.current_frame() {
            let dest = Rect::new(balloon.x, balloon.y, POP_SIZE, POP_SIZE);
            out.draw_image(assets.sprite(frame), dest)?;
        }
        return Ok(());
    }

    let dest = Rect::new(balloon.x, balloon.y, BALLOON_WIDTH, BALLOON_HEIGHT);
    out.draw_image(assets.sprite(SpriteId::Balloon(balloon.variant)), dest)?;
    out.draw_text(
        &balloon.letter.to_string(),
        Point::new(balloon.x + BALLOON_WIDTH / 2, balloon.y + BALLOON_HEIGHT * 2 / 5),
        true,
        C_LETTER,
        Font::Medium,
    )
}

/// Hovered buttons are drawn larger, anchored at the same top-left corner.
pub fn render_button<R: Renderer>(
    out: &mut R,
    button: &Button,
    assets: &AssetBundle,
) -> io::Result<()> {
    let b = button.bounds;
    let dest = if button.hovering {
        Rect::new(
            b.x,
            b.y,
            b.width + b.width * HOVER_GROWTH_PCT / 100,
            b.height + b.height * HOVER_GROWTH_PCT / 100,
        )
    } else {
        b
    };
    out.draw_image(assets.sprite(button.sprite), dest)
}
