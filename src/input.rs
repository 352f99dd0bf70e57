//! Input as the core sees it: a key-down table and pointer state sampled
//! once per tick by the platform layer.

use crate::entities::Point;

/// Key-down table indexed by ASCII code. Letters are stored uppercase so
/// `'a'` and `'A'` address the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyTable {
    keys: [bool; 256],
}

impl Default for KeyTable {
    fn default() -> Self {
        Self { keys: [false; 256] }
    }
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(key: char) -> Option<usize> {
        if key.is_ascii() {
            Some(key.to_ascii_uppercase() as usize)
        } else {
            None
        }
    }

    pub fn press(&mut self, key: char) {
        if let Some(i) = Self::slot(key) {
            self.keys[i] = true;
        }
    }

    pub fn release(&mut self, key: char) {
        if let Some(i) = Self::slot(key) {
            self.keys[i] = false;
        }
    }

    pub fn is_down(&self, key: char) -> bool {
        Self::slot(key).map(|i| self.keys[i]).unwrap_or(false)
    }
}

/// Everything the simulation reads from the platform on a tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub keys: KeyTable,
    /// Last known pointer position in logical pixels.
    pub pointer: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Discrete pointer events delivered to the active screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Moved(Point),
    Released(PointerButton, Point),
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Moved(p) | PointerEvent::Released(_, p) => p,
        }
    }
}
