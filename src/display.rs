//! Rendering layer. All terminal output lives here.
//!
//! Implements `Renderer` on top of crossterm: logical window pixels are
//! mapped onto terminal cells, sprites are scaled nearest-neighbour into
//! their destination rectangle, and anything off-terminal is clipped.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use balloon_pop::entities::{Point, Rect};
use balloon_pop::render::{self, Font, Renderer};
use balloon_pop::Sprite;

/// Logical pixels per terminal column / row.
pub const CELL_WIDTH: i32 = 7;
pub const CELL_HEIGHT: i32 = 15;

/// Pixel position → (column, row), rounding towards negative infinity so
/// sprites partly above or left of the screen clip cleanly.
pub fn to_cell(p: Point) -> (i32, i32) {
    (p.x.div_euclid(CELL_WIDTH), p.y.div_euclid(CELL_HEIGHT))
}

/// Centre of a terminal cell in logical pixels.
pub fn cell_center(column: u16, row: u16) -> Point {
    Point::new(
        i32::from(column) * CELL_WIDTH + CELL_WIDTH / 2,
        i32::from(row) * CELL_HEIGHT + CELL_HEIGHT / 2,
    )
}

/// Number of cells covering `px` pixels, at least one.
fn cells(px: i32, cell: i32) -> i32 {
    ((px + cell / 2) / cell).max(1)
}

fn term_color(color: render::Color) -> Color {
    match color {
        render::Color::Black => Color::Black,
        render::Color::DarkGrey => Color::DarkGrey,
        render::Color::Grey => Color::Grey,
        render::Color::White => Color::White,
        render::Color::Red => Color::Red,
        render::Color::Green => Color::Green,
        render::Color::Blue => Color::Blue,
        render::Color::Yellow => Color::Yellow,
        render::Color::Magenta => Color::Magenta,
        render::Color::Cyan => Color::Cyan,
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    columns: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, columns: u16, rows: u16) -> Self {
        Self { out, columns, rows }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }

    fn on_screen(&self, column: i32, row: i32) -> bool {
        column >= 0 && row >= 0 && column < i32::from(self.columns) && row < i32::from(self.rows)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_image(&mut self, sprite: &Sprite, dest: Rect) -> std::io::Result<()> {
        let (left, top) = to_cell(Point::new(dest.x, dest.y));
        let width = cells(dest.width, CELL_WIDTH);
        let height = cells(dest.height, CELL_HEIGHT);
        let src_rows = sprite.rows.len() as i32;
        let src_cols = sprite.columns() as i32;

        self.out.queue(style::SetForegroundColor(term_color(sprite.color)))?;
        for r in 0..height {
            let src_r = (r * src_rows / height) as usize;
            for c in 0..width {
                let (column, row) = (left + c, top + r);
                if !self.on_screen(column, row) {
                    continue;
                }
                let glyph = sprite.glyph(src_r, (c * src_cols / width) as usize);
                if glyph == ' ' {
                    continue;
                }
                self.out.queue(cursor::MoveTo(column as u16, row as u16))?;
                self.out.queue(Print(glyph))?;
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        centered: bool,
        color: render::Color,
        font: Font,
    ) -> std::io::Result<()> {
        let (mut column, row) = to_cell(at);
        if centered {
            column -= text.chars().count() as i32 / 2;
        }

        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        if font == Font::Large {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = column + i as i32;
            if self.on_screen(c, row) {
                self.out.queue(cursor::MoveTo(c as u16, row as u16))?;
                self.out.queue(Print(ch))?;
            }
        }
        if font == Font::Large {
            self.out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
