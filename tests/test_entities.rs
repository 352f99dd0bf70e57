use std::cell::Cell;
use std::time::Duration;

use balloon_pop::clock::{Clock, TickTimer};
use balloon_pop::compute::{init_state, new_balloon, tick, BALLOON_HEIGHT};
use balloon_pop::entities::*;
use balloon_pop::input::{InputSnapshot, KeyTable, PointerButton, PointerEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn rect_contains_edges() {
    let r = Rect::new(10, 20, 30, 40);
    assert!(r.contains(Point::new(10, 20))); // top-left is inside
    assert!(r.contains(Point::new(39, 59)));
    assert!(!r.contains(Point::new(40, 30))); // right edge is outside
    assert!(!r.contains(Point::new(20, 60))); // bottom edge is outside
    assert!(!r.contains(Point::new(9, 30)));
    assert!(!r.contains(Point::new(20, 19)));
}

#[test]
fn rect_center() {
    assert_eq!(Rect::new(0, 0, 10, 20).center(), Point::new(5, 10));
}

#[test]
fn key_table_is_case_insensitive() {
    let mut keys = KeyTable::new();
    assert!(!keys.is_down('A'));
    keys.press('a');
    assert!(keys.is_down('A'));
    assert!(keys.is_down('a'));
    keys.release('A');
    assert!(!keys.is_down('a'));
}

#[test]
fn key_table_ignores_non_ascii() {
    let mut keys = KeyTable::new();
    keys.press('é');
    assert!(!keys.is_down('é'));
    assert_eq!(keys, KeyTable::new());
}

#[test]
fn pointer_event_position() {
    let p = Point::new(3, 4);
    assert_eq!(PointerEvent::Moved(p).position(), p);
    assert_eq!(PointerEvent::Released(PointerButton::Right, p).position(), p);
}

#[test]
fn new_balloon_normalises_letter() {
    let b = new_balloon('q', 0, 0, 1, 0);
    assert_eq!(b.letter, 'Q');
    assert!(!b.is_escaped());
    assert!(!b.is_resolved());
}

#[test]
fn balloon_resolution_accessors() {
    let mut b = new_balloon('Q', 0, -BALLOON_HEIGHT, 1, 0);
    b.resolution = Some(Resolution::Escaped);
    assert!(b.is_resolved());
    assert!(b.is_escaped());
    b.resolution = Some(Resolution::Popped);
    assert!(b.is_resolved());
    assert!(!b.is_escaped());
}

#[test]
fn complete_animation_has_no_frame() {
    let mut a = Animation::new(vec![SpriteId::Pop(0), SpriteId::Pop(1)], 50);
    assert_eq!(a.current_frame(), Some(SpriteId::Pop(0)));
    a.complete = true;
    assert_eq!(a.current_frame(), None);
}

#[test]
fn game_state_clone_is_independent() {
    let original = balloon_pop::compute::init_state(Bounds { width: 350, height: 600 });
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.score = 999;
    cloned.balloons.push(new_balloon('A', 5, 5, 1, 0));

    assert_eq!(original.score, 0);
    assert!(original.balloons.is_empty());
}

// ── clock ─────────────────────────────────────────────────────────────────────

struct FakeClock<'a> {
    now: &'a Cell<Duration>,
}

impl Clock for FakeClock<'_> {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[test]
fn tick_timer_reports_time_since_last_call() {
    let now = Cell::new(Duration::from_millis(1_000));
    let mut timer = TickTimer::new(FakeClock { now: &now });

    now.set(Duration::from_millis(1_016));
    assert_eq!(timer.elapsed_ms(), 16);
    now.set(Duration::from_millis(1_050));
    assert_eq!(timer.elapsed_ms(), 34);
    assert_eq!(timer.elapsed_ms(), 0);
}

#[test]
fn tick_timer_carries_sub_millisecond_remainder() {
    let now = Cell::new(Duration::ZERO);
    let mut timer = TickTimer::new(FakeClock { now: &now });
    let step = Duration::from_nanos(16_666_667);

    let mut total = 0;
    for _ in 0..600 {
        now.set(now.get() + step);
        total += timer.elapsed_ms();
    }
    // 600 steps is 10_000.0002 ms of real time
    assert_eq!(total, 10_000);
}

#[test]
fn tick_timer_drives_difficulty_on_schedule() {
    let now = Cell::new(Duration::ZERO);
    let mut timer = TickTimer::new(FakeClock { now: &now });
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = init_state(Bounds { width: 350, height: 600 });

    for _ in 0..600 {
        now.set(now.get() + Duration::from_nanos(16_666_667));
        state = tick(&state, timer.elapsed_ms(), &InputSnapshot::default(), &mut rng);
    }
    assert_eq!(state.level, 2);
}

#[test]
fn tick_timer_never_goes_negative() {
    let now = Cell::new(Duration::from_millis(500));
    let mut timer = TickTimer::new(FakeClock { now: &now });
    now.set(Duration::from_millis(400));
    assert_eq!(timer.elapsed_ms(), 0);
}
