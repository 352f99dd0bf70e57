use balloon_pop::compute::{new_balloon, BALLOON_HEIGHT};
use balloon_pop::entities::*;
use balloon_pop::input::{InputSnapshot, PointerButton, PointerEvent};
use balloon_pop::ui::UiState;
use balloon_pop::Game;

const BOUNDS: Bounds = Bounds { width: 350, height: 600 };

fn button() -> Button {
    Button::new(Rect::new(100, 100, 50, 20), SpriteId::PlayButton, ButtonAction::NewGame)
}

fn release(p: Point) -> PointerEvent {
    PointerEvent::Released(PointerButton::Left, p)
}

fn first_button_center(game: &Game) -> Point {
    game.screen().buttons()[0].bounds.center()
}

fn playing(game: &Game) -> &GameState {
    match game.screen() {
        Screen::Playing(state) => state,
        other => panic!("expected Playing, got {:?}", other),
    }
}

/// Push the session over the fail threshold: ten fails already, one
/// balloon about to escape.
fn lose(game: &mut Game) {
    let mut state = playing(game).clone();
    state.fails = 10;
    state.balloons.push(new_balloon('Q', 0, -BALLOON_HEIGHT + 1, 1, 0));
    *game = Game::with_screen(BOUNDS, Screen::Playing(state), Some(7));
    game.tick(0, &InputSnapshot::default());
}

// ── Button ────────────────────────────────────────────────────────────────────

#[test]
fn hover_follows_pointer() {
    let mut b = button();
    b.update_hover(Point::new(120, 110));
    assert!(b.hovering);
    b.update_hover(Point::new(10, 10));
    assert!(!b.hovering);
}

#[test]
fn release_inside_fires_once() {
    let mut b = button();
    b.update_hover(Point::new(120, 110));
    assert_eq!(b.on_release(Point::new(120, 110)), Some(ButtonAction::NewGame));
}

#[test]
fn release_outside_fires_nothing() {
    let mut b = button();
    b.update_hover(Point::new(120, 110));
    assert_eq!(b.on_release(Point::new(5, 5)), None);
    assert!(!b.hovering);
}

#[test]
fn overlapping_buttons_all_fire() {
    let mut menu = MenuState {
        buttons: vec![button(), button()],
        bounds: BOUNDS,
    };
    menu.on_pointer_moved(Point::new(110, 105));
    let fired = menu.on_pointer_released(Point::new(110, 105));
    assert_eq!(fired, vec![ButtonAction::NewGame, ButtonAction::NewGame]);
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn menu_has_centered_play_button() {
    let menu = MenuState::new(BOUNDS);
    assert_eq!(menu.buttons.len(), 1);
    let b = &menu.buttons[0];
    assert_eq!(b.sprite, SpriteId::PlayButton);
    assert_eq!(b.bounds.y, BOUNDS.height / 2);
    assert_eq!(b.bounds.center().x, BOUNDS.width / 2);
}

#[test]
fn game_starts_on_menu() {
    let game = Game::new(BOUNDS, Some(1));
    assert!(matches!(game.screen(), Screen::Menu(_)));
    assert_eq!(game.bounds(), BOUNDS);
}

#[test]
fn menu_tick_tracks_hover() {
    let mut game = Game::new(BOUNDS, Some(1));
    let input = InputSnapshot {
        pointer: first_button_center(&game),
        ..InputSnapshot::default()
    };
    game.tick(16, &input);
    assert!(game.screen().buttons()[0].hovering);
}

#[test]
fn menu_pointer_move_sets_hover() {
    let mut game = Game::new(BOUNDS, Some(1));
    let p = first_button_center(&game);
    game.on_pointer(&PointerEvent::Moved(p));
    assert!(game.screen().buttons()[0].hovering);
    game.on_pointer(&PointerEvent::Moved(Point::new(0, 0)));
    assert!(!game.screen().buttons()[0].hovering);
}

#[test]
fn clicking_play_starts_session() {
    let mut game = Game::new(BOUNDS, Some(1));
    let p = first_button_center(&game);
    game.on_pointer(&PointerEvent::Moved(p));
    game.on_pointer(&release(p));
    let state = playing(&game);
    assert_eq!(state.score, 0);
    assert_eq!(state.level, 1);
    assert!(state.buttons.is_empty());
}

#[test]
fn release_elsewhere_stays_on_menu() {
    let mut game = Game::new(BOUNDS, Some(1));
    game.on_pointer(&release(Point::new(1, 1)));
    assert!(matches!(game.screen(), Screen::Menu(_)));
}

#[test]
fn any_pointer_button_clicks() {
    let mut game = Game::new(BOUNDS, Some(1));
    let p = first_button_center(&game);
    game.on_pointer(&PointerEvent::Released(PointerButton::Right, p));
    assert!(matches!(game.screen(), Screen::Playing(_)));
}

// ── Playing / replay ─────────────────────────────────────────────────────────

#[test]
fn playing_tick_spawns_balloons() {
    let mut game = Game::new(BOUNDS, Some(3));
    game.new_game();
    for _ in 0..10 {
        game.tick(100, &InputSnapshot::default());
    }
    assert_eq!(playing(&game).balloons.len(), 1);
}

#[test]
fn losing_shows_replay_button() {
    let mut game = Game::new(BOUNDS, Some(3));
    game.new_game();
    lose(&mut game);
    let state = playing(&game);
    assert!(state.is_lost());
    assert_eq!(state.fails, 11);
    assert_eq!(state.buttons.len(), 1);
    assert_eq!(state.buttons[0].sprite, SpriteId::ReplayButton);
}

#[test]
fn replay_discards_everything() {
    let mut game = Game::new(BOUNDS, Some(3));
    game.new_game();
    // build up some state first
    for _ in 0..120 {
        game.tick(100, &InputSnapshot::default());
    }
    assert!(playing(&game).level > 1);
    lose(&mut game);
    assert!(playing(&game).is_lost());

    let p = first_button_center(&game);
    game.on_pointer(&PointerEvent::Moved(p));
    game.on_pointer(&release(p));

    let state = playing(&game);
    assert!(!state.is_lost());
    assert!(state.balloons.is_empty());
    assert!(state.buttons.is_empty());
    assert_eq!((state.score, state.fails, state.level), (0, 0, 1));
}

#[test]
fn release_before_loss_does_nothing() {
    let mut game = Game::new(BOUNDS, Some(3));
    game.new_game();
    game.tick(16, &InputSnapshot::default());
    let before = playing(&game).clone();
    game.on_pointer(&release(Point::new(175, 430)));
    assert_eq!(playing(&game), &before);
}
