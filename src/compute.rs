//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! value (and, where needed, an RNG handle) and returns a brand-new value.
//! Side effects are limited to the injected RNG and log output.

use rand::Rng;

use crate::entities::{
    Animation, Balloon, Bounds, Button, ButtonAction, GameState, GameStatus, Rect, Resolution,
    SpriteId,
};
use crate::input::{InputSnapshot, KeyTable};

// ── Tuning ───────────────────────────────────────────────────────────────────

/// A new balloon every second.
pub const SPAWN_INTERVAL_MS: u64 = 1_000;
/// Difficulty level goes up every ten seconds, without cap.
pub const DIFFICULTY_INTERVAL_MS: u64 = 10_000;
/// The session is lost once more than this many balloons escape.
pub const LOSS_THRESHOLD: u32 = 10;

pub const POP_FRAME_MS: u64 = 50;
pub const POP_FRAMES: usize = 4;
pub const BALLOON_VARIANTS: usize = 5;

pub const BALLOON_WIDTH: i32 = 42;
pub const BALLOON_HEIGHT: i32 = 60;
pub const POP_SIZE: i32 = 60;

pub const BUTTON_WIDTH: i32 = 140;
pub const BUTTON_HEIGHT: i32 = 60;

// ── Animation ────────────────────────────────────────────────────────────────

/// Advance by at most one frame per call, however much time has passed.
pub fn advance_animation(anim: &Animation, elapsed_ms: u64) -> Animation {
    if anim.complete {
        return anim.clone();
    }
    let timer_ms = anim.timer_ms + elapsed_ms;
    if timer_ms < anim.frame_ms {
        return Animation {
            timer_ms,
            ..anim.clone()
        };
    }
    let index = anim.index + 1;
    Animation {
        index: index.min(anim.frames.len()),
        timer_ms: 0,
        complete: index >= anim.frames.len(),
        ..anim.clone()
    }
}

pub fn pop_animation() -> Animation {
    Animation::new((0..POP_FRAMES).map(SpriteId::Pop).collect(), POP_FRAME_MS)
}

// ── Balloons ─────────────────────────────────────────────────────────────────

/// Build a balloon resting on the bottom edge. Everything not given is
/// fresh: unpopped, unresolved, animation at frame 0.
pub fn new_balloon(letter: char, x: i32, y: i32, speed: i32, variant: usize) -> Balloon {
    Balloon {
        letter: letter.to_ascii_uppercase(),
        x,
        y,
        speed,
        variant,
        popped: false,
        resolution: None,
        pop_animation: pop_animation(),
    }
}

/// Spawn a balloon for the given difficulty level.  Speed is uniform in
/// `1..=level`, x keeps the sprite inside the window.
pub fn spawn_balloon(level: u32, bounds: Bounds, rng: &mut impl Rng) -> Balloon {
    let speed = rng.gen_range(1..=level.max(1)) as i32;
    let max_x = bounds.width - BALLOON_WIDTH;
    let x = if max_x > 0 { rng.gen_range(0..max_x) } else { 0 };
    let letter = (b'A' + rng.gen_range(0..26u8)) as char;
    let variant = rng.gen_range(0..BALLOON_VARIANTS);
    new_balloon(letter, x, bounds.height, speed, variant)
}

/// Advance one balloon by one tick.
///
/// A popped balloon stops rising and plays its pop animation; it resolves
/// as `Popped` when the animation completes. An unpopped balloon rises by
/// its speed and resolves as `Escaped` once fully above the top edge.
/// Resolved balloons are returned unchanged.
pub fn tick_balloon(
    balloon: &Balloon,
    elapsed_ms: u64,
    keys: &KeyTable,
    session_lost: bool,
) -> Balloon {
    if balloon.is_resolved() {
        return balloon.clone();
    }

    let popped = balloon.popped || (!session_lost && keys.is_down(balloon.letter));

    if popped {
        let pop_animation = advance_animation(&balloon.pop_animation, elapsed_ms);
        let resolution = pop_animation.complete.then_some(Resolution::Popped);
        return Balloon {
            popped,
            resolution,
            pop_animation,
            ..balloon.clone()
        };
    }

    let y = balloon.y - balloon.speed;
    let resolution = (y <= -BALLOON_HEIGHT).then_some(Resolution::Escaped);
    Balloon {
        y,
        resolution,
        ..balloon.clone()
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session state for a window of the given size.
pub fn init_state(bounds: Bounds) -> GameState {
    GameState {
        balloons: Vec::new(),
        buttons: Vec::new(),
        score: 0,
        fails: 0,
        level: 1,
        spawn_timer_ms: 0,
        difficulty_timer_ms: 0,
        status: GameStatus::Playing,
        bounds,
    }
}

/// The button shown once a session is lost, two thirds down the window.
pub fn replay_button(bounds: Bounds) -> Button {
    Button {
        bounds: Rect::new(
            bounds.width / 2 - BUTTON_WIDTH / 2,
            bounds.height - bounds.height / 3,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        ),
        sprite: SpriteId::ReplayButton,
        hovering: false,
        action: ButtonAction::NewGame,
    }
}

// ── Per-frame tick (RNG is injected) ───────────────────────────────────

/// Advance the session by one tick of `elapsed_ms` real milliseconds.
/// All randomness comes through `rng` so callers control determinism.
pub fn tick(
    state: &GameState,
    elapsed_ms: u64,
    input: &InputSnapshot,
    rng: &mut impl Rng,
) -> GameState {
    let lost = state.is_lost();

    // ── 1. Spawn and difficulty timers ───────────────────────────────────────
    let mut balloons = state.balloons.clone();
    let mut spawn_timer_ms = state.spawn_timer_ms + elapsed_ms;
    let mut difficulty_timer_ms = state.difficulty_timer_ms + elapsed_ms;
    let mut level = state.level;

    if spawn_timer_ms >= SPAWN_INTERVAL_MS {
        let balloon = spawn_balloon(level, state.bounds, rng);
        log::debug!(
            "spawned '{}' at x={} speed={} (level {})",
            balloon.letter,
            balloon.x,
            balloon.speed,
            level
        );
        balloons.push(balloon);
        // remainder is dropped, not carried over
        spawn_timer_ms = 0;
    }
    if difficulty_timer_ms >= DIFFICULTY_INTERVAL_MS {
        level += 1;
        difficulty_timer_ms = 0;
        log::debug!("difficulty level {}", level);
    }

    // ── 2. Tick every balloon ────────────────────────────────────────────────
    let ticked: Vec<Balloon> = balloons
        .iter()
        .map(|b| tick_balloon(b, elapsed_ms, &input.keys, lost))
        .collect();

    // ── 3. Account for resolutions, then keep only live balloons ────────────
    let mut popped = 0;
    let mut escaped = 0;
    for b in ticked.iter().filter(|b| b.is_resolved()) {
        if b.is_escaped() {
            escaped += 1;
            log::debug!("'{}' escaped", b.letter);
        } else {
            popped += 1;
            log::debug!("popped '{}'", b.letter);
        }
    }
    let (score, fails) = if lost {
        (state.score, state.fails)
    } else {
        (state.score + popped, state.fails + escaped)
    };

    let balloons: Vec<Balloon> = ticked.into_iter().filter(|b| !b.is_resolved()).collect();

    // ── 4. Loss transition, at most once per session ────────────────────────
    let mut buttons = state.buttons.clone();
    let status = if !lost && fails > LOSS_THRESHOLD {
        log::info!("session lost with score {}", score);
        buttons.push(replay_button(state.bounds));
        GameStatus::Lost
    } else {
        state.status
    };

    // ── 5. Button hover from the latest pointer position ─────────────────────
    for button in &mut buttons {
        button.update_hover(input.pointer);
    }

    GameState {
        balloons,
        buttons,
        score,
        fails,
        level,
        spawn_timer_ms,
        difficulty_timer_ms,
        status,
        ..state.clone()
    }
}
