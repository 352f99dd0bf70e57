mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use balloon_pop::clock::{SystemClock, TickTimer};
use balloon_pop::entities::Point;
use balloon_pop::input::{InputSnapshot, KeyTable, PointerButton, PointerEvent};
use balloon_pop::{AssetBundle, Config, Game};

use display::{cell_center, TerminalRenderer, CELL_HEIGHT, CELL_WIDTH};

// ── Key-hold tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate keeps a held key refreshed inside the window.
const HOLD_WINDOW: u64 = 4;

/// Maps each held letter → the tick it was last seen (press or repeat).
#[derive(Default)]
struct KeyTracker {
    last_seen: HashMap<char, u64>,
}

impl KeyTracker {
    fn press(&mut self, key: char, tick: u64) {
        self.last_seen.insert(key.to_ascii_uppercase(), tick);
    }

    fn release(&mut self, key: char) {
        self.last_seen.remove(&key.to_ascii_uppercase());
    }

    /// Forget keys that have gone quiet and build this tick's table.
    fn snapshot(&mut self, tick: u64) -> KeyTable {
        self.last_seen
            .retain(|_, &mut last| tick.saturating_sub(last) <= HOLD_WINDOW);
        let mut keys = KeyTable::new();
        for &key in self.last_seen.keys() {
            keys.press(key);
        }
        keys
    }
}

// ── Event translation ─────────────────────────────────────────────────────────

fn pointer_event(mouse: &MouseEvent) -> Option<PointerEvent> {
    let at = cell_center(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::Moved(at)),
        MouseEventKind::Up(button) => {
            let button = match button {
                MouseButton::Left => PointerButton::Left,
                MouseButton::Right => PointerButton::Right,
                MouseButton::Middle => PointerButton::Middle,
            };
            Some(PointerEvent::Released(button, at))
        }
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. Each iteration drains pending input,
/// ticks once, renders once, then sleeps out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut TerminalRenderer<W>,
    game: &mut Game,
    assets: &AssetBundle,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
) -> Result<()> {
    let frame_budget = config.frame_budget();
    let mut timer = TickTimer::new(SystemClock::new());
    let mut keys = KeyTracker::default();
    let mut pointer = Point::default();
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        tick += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if is_quit(code, modifiers) {
                            return Ok(());
                        }
                        if let KeyCode::Char(c) = code {
                            keys.press(c, tick);
                        }
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        if let KeyCode::Char(c) = code {
                            keys.release(c);
                        }
                    }
                },
                Event::Mouse(mouse) => {
                    if let Some(pe) = pointer_event(&mouse) {
                        pointer = pe.position();
                        game.on_pointer(&pe);
                    }
                }
                Event::Resize(columns, rows) => out.resize(columns, rows),
                _ => {}
            }
        }

        let input = InputSnapshot {
            keys: keys.snapshot(tick),
            pointer,
        };
        game.tick(timer.elapsed_ms(), &input);
        game.render(out, assets).context("render frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("create log file {:?}", config.log_file))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_assets(config: &Config) -> Result<AssetBundle> {
    match &config.assets {
        Some(path) => {
            log::info!("loading sprites from {:?}", path);
            AssetBundle::load(path).with_context(|| format!("load assets from {:?}", path))
        }
        None => {
            log::info!("using built-in sprites");
            AssetBundle::builtin().context("load built-in assets")
        }
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config)?;
    log::info!("Balloon-Pop starting: {:?}", config);

    // Assets are loaded before the terminal is touched: failure is fatal.
    let assets = load_assets(&config)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &assets, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("exiting on error: {:#}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    assets: &AssetBundle,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
) -> Result<()> {
    let (columns, rows) = terminal::size()?;
    let bounds = config.bounds();
    if i32::from(columns) * CELL_WIDTH < bounds.width || i32::from(rows) * CELL_HEIGHT < bounds.height {
        log::warn!(
            "terminal {}x{} cells is smaller than the {}x{} px window; output will be clipped",
            columns,
            rows,
            bounds.width,
            bounds.height
        );
    }

    let mut renderer = TerminalRenderer::new(out, columns, rows);
    let mut game = Game::new(bounds, config.seed);
    game_loop(&mut renderer, &mut game, assets, rx, config)?;
    log::info!("quit");
    Ok(())
}
