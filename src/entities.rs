//! All game entity types: plain data plus a couple of accessors.
//!
//! Update logic lives in `compute` (balloons, animation, session) and
//! `ui` (buttons, screens).

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A position in logical window pixels (origin top-left, y grows down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. Contains points on its left/top edges but not
/// on its right/bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Size of the logical window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

// ── Asset handles ─────────────────────────────────────────────────────────────

/// Handle into the `AssetBundle`. Entities refer to sprites by id only;
/// the bundle itself is passed to the render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    MenuBackground,
    GameBackground,
    PlayButton,
    ReplayButton,
    /// Balloon colour variant, `0..BALLOON_VARIANTS`.
    Balloon(usize),
    /// Pop effect frame, `0..POP_FRAMES`.
    Pop(usize),
}

// ── Animation ─────────────────────────────────────────────────────────────────

/// A fixed frame sequence played once.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub frames: Vec<SpriteId>,
    /// Current frame. Equals `frames.len()` once complete.
    pub index: usize,
    /// Milliseconds accumulated since the last frame step.
    pub timer_ms: u64,
    pub frame_ms: u64,
    pub complete: bool,
}

impl Animation {
    pub fn new(frames: Vec<SpriteId>, frame_ms: u64) -> Self {
        Self {
            frames,
            index: 0,
            timer_ms: 0,
            frame_ms,
            complete: false,
        }
    }

    /// The frame to draw, or `None` once the sequence has finished.
    pub fn current_frame(&self) -> Option<SpriteId> {
        if self.complete {
            return None;
        }
        self.frames.get(self.index).copied()
    }
}

// ── Balloon ───────────────────────────────────────────────────────────────────

/// How a balloon left play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Its letter was typed and the pop animation ran to completion.
    Popped,
    /// It rose past the top edge unpopped.
    Escaped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Balloon {
    /// Uppercase `'A'..='Z'`.
    pub letter: char,
    pub x: i32,
    pub y: i32,
    /// Pixels risen per tick, `1..=difficulty level at spawn`.
    pub speed: i32,
    /// Cosmetic colour variant.
    pub variant: usize,
    pub popped: bool,
    pub resolution: Option<Resolution>,
    pub pop_animation: Animation,
}

impl Balloon {
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn is_escaped(&self) -> bool {
        self.resolution == Some(Resolution::Escaped)
    }
}

// ── Buttons ───────────────────────────────────────────────────────────────────

/// What a button does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    /// Discard whatever is on screen and start a fresh session.
    NewGame,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub bounds: Rect,
    pub sprite: SpriteId,
    pub hovering: bool,
    pub action: ButtonAction,
}

// ── Screens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// More than `LOSS_THRESHOLD` balloons escaped. Set once per session.
    Lost,
}

/// One play session.  Cloneable so the pure `compute::tick` can return a
/// new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub balloons: Vec<Balloon>,
    /// Empty until the session is lost; then holds the Replay button.
    pub buttons: Vec<Button>,
    pub score: u32,
    pub fails: u32,
    /// Difficulty level, starts at 1 and only grows.
    pub level: u32,
    pub spawn_timer_ms: u64,
    pub difficulty_timer_ms: u64,
    pub status: GameStatus,
    pub bounds: Bounds,
}

impl GameState {
    pub fn is_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuState {
    pub buttons: Vec<Button>,
    pub bounds: Bounds,
}

/// The active top-level mode.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Menu(MenuState),
    Playing(GameState),
}
