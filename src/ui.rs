//! Buttons and the menu → playing screen machine.

use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::AssetBundle;
use crate::compute::{self, BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::entities::{
    Bounds, Button, ButtonAction, GameState, MenuState, Point, Rect, Screen, SpriteId,
};
use crate::input::{InputSnapshot, PointerEvent};
use crate::render::{self, Renderer};

// ── Button ────────────────────────────────────────────────────────────────────

impl Button {
    pub fn new(bounds: Rect, sprite: SpriteId, action: ButtonAction) -> Self {
        Self {
            bounds,
            sprite,
            hovering: false,
            action,
        }
    }

    pub fn update_hover(&mut self, pointer: Point) {
        self.hovering = self.bounds.contains(pointer);
    }

    /// Returns the bound action if the release lands on the button.
    pub fn on_release(&mut self, pointer: Point) -> Option<ButtonAction> {
        self.update_hover(pointer);
        self.hovering.then_some(self.action)
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

/// Pointer dispatch shared by every screen: each button sees every event.
pub trait UiState {
    fn buttons_mut(&mut self) -> &mut Vec<Button>;

    fn on_pointer_moved(&mut self, pointer: Point) {
        for button in self.buttons_mut() {
            button.update_hover(pointer);
        }
    }

    /// Every hovering button fires; overlapping buttons all fire.
    fn on_pointer_released(&mut self, pointer: Point) -> Vec<ButtonAction> {
        self.buttons_mut()
            .iter_mut()
            .filter_map(|b| b.on_release(pointer))
            .collect()
    }
}

impl UiState for MenuState {
    fn buttons_mut(&mut self) -> &mut Vec<Button> {
        &mut self.buttons
    }
}

impl UiState for GameState {
    fn buttons_mut(&mut self) -> &mut Vec<Button> {
        &mut self.buttons
    }
}

impl MenuState {
    /// Title screen with a single Play button at mid-height.
    pub fn new(bounds: Bounds) -> Self {
        let play = Button::new(
            Rect::new(
                bounds.width / 2 - BUTTON_WIDTH / 2,
                bounds.height / 2,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            SpriteId::PlayButton,
            ButtonAction::NewGame,
        );
        Self {
            buttons: vec![play],
            bounds,
        }
    }
}

impl Screen {
    fn state_mut(&mut self) -> &mut dyn UiState {
        match self {
            Screen::Menu(menu) => menu,
            Screen::Playing(game) => game,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        match self {
            Screen::Menu(menu) => &menu.buttons,
            Screen::Playing(game) => &game.buttons,
        }
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

/// Top-level driver: owns the active screen and the session RNG.
pub struct Game {
    screen: Screen,
    bounds: Bounds,
    rng: StdRng,
}

impl Game {
    /// Start on the menu. A seed makes every session reproducible.
    pub fn new(bounds: Bounds, seed: Option<u64>) -> Self {
        Self::with_screen(bounds, Screen::Menu(MenuState::new(bounds)), seed)
    }

    /// Resume from an arbitrary screen, e.g. a scripted session.
    pub fn with_screen(bounds: Bounds, screen: Screen, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { screen, bounds, rng }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replace whatever is running with a fresh session.
    pub fn new_game(&mut self) {
        log::info!("starting new session");
        self.screen = Screen::Playing(compute::init_state(self.bounds));
    }

    fn apply(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::NewGame => self.new_game(),
        }
    }

    /// Deliver one pointer event to the active screen and carry out any
    /// actions it fires.
    pub fn on_pointer(&mut self, event: &PointerEvent) {
        let actions = match *event {
            PointerEvent::Moved(p) => {
                self.screen.state_mut().on_pointer_moved(p);
                Vec::new()
            }
            PointerEvent::Released(_, p) => self.screen.state_mut().on_pointer_released(p),
        };
        for action in actions {
            self.apply(action);
        }
    }

    pub fn tick(&mut self, elapsed_ms: u64, input: &InputSnapshot) {
        match &mut self.screen {
            Screen::Menu(menu) => menu.on_pointer_moved(input.pointer),
            Screen::Playing(state) => {
                *state = compute::tick(state, elapsed_ms, input, &mut self.rng);
            }
        }
    }

    pub fn render<R: Renderer>(&self, out: &mut R, assets: &AssetBundle) -> io::Result<()> {
        render::render_screen(out, &self.screen, assets)
    }
}
