use asteroids_autopilot::clock::TickClock;
use asteroids_autopilot::pilot::DemoPilot;
use asteroids_autopilot::session::{Session, DEMO_IDLE_MS};
use asteroids_core::input::KeyState;
use asteroids_core::LiveGame;

const SEED: u32 = 0xA57E_0001;

fn new_session(clock: TickClock) -> Session<LiveGame, TickClock> {
    Session::new(SEED, Box::new(DemoPilot::new()), clock)
}

fn idle() -> KeyState {
    KeyState::default()
}

fn thrust() -> KeyState {
    KeyState {
        thrust: true,
        ..KeyState::default()
    }
}

#[test]
fn idle_session_enters_demo_strictly_after_the_threshold() {
    let clock = TickClock::new();
    let mut session = new_session(clock.clone());

    clock.set(DEMO_IDLE_MS);
    let snapshot = session.tick(idle());
    assert!(!snapshot.demo);

    clock.set(DEMO_IDLE_MS + 1);
    let snapshot = session.tick(idle());
    assert!(snapshot.demo);
    assert!(session.is_demo());
}

#[test]
fn held_keys_defer_demo_activation() {
    let clock = TickClock::new();
    let mut session = new_session(clock.clone());

    clock.set(3_000);
    session.tick(thrust());

    clock.set(3_000 + DEMO_IDLE_MS);
    assert!(!session.tick(idle()).demo);

    clock.set(3_000 + DEMO_IDLE_MS + 1);
    assert!(session.tick(idle()).demo);
}

#[test]
fn human_input_cancels_demo_and_resets_the_game() {
    let clock = TickClock::new();
    let mut session = new_session(clock.clone());

    clock.set(DEMO_IDLE_MS + 1);
    session.tick(idle());
    assert!(session.is_demo());

    // Let the pilot play for a while.
    for _ in 0..200 {
        clock.advance_tick();
        session.tick(idle());
    }

    clock.advance_tick();
    let snapshot = session.tick(thrust());
    assert!(!snapshot.demo);
    assert_eq!(snapshot.world.score, 0);
    assert_eq!(snapshot.world.lives, 3);
    // The cancelling tick already runs under human control.
    assert!(snapshot.keys.thrust);
}
