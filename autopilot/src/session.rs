use serde::Serialize;

use asteroids_core::input::{KeyState, TickInput};
use asteroids_core::{LiveGame, WorldSnapshot};

use crate::clock::Clock;
use crate::pilot::Pilot;

/// Idle time with no held human key before attract mode starts.
pub const DEMO_IDLE_MS: u64 = 5_000;
/// Delay between a demo game-over and its automatic restart.
pub const DEMO_RESTART_DELAY_MS: u64 = 2_000;

/// The slice of the game the session drives. Split out so the state machine
/// can be exercised against a scripted game in tests.
pub trait GameLoop {
    fn step(&mut self, keys: KeyState) -> TickInput;
    fn reset(&mut self);
    fn snapshot(&self) -> WorldSnapshot;
    fn is_game_over(&self) -> bool;
}

impl GameLoop for LiveGame {
    fn step(&mut self, keys: KeyState) -> TickInput {
        LiveGame::step(self, keys)
    }

    fn reset(&mut self) {
        LiveGame::reset(self);
    }

    fn snapshot(&self) -> WorldSnapshot {
        LiveGame::snapshot(self)
    }

    fn is_game_over(&self) -> bool {
        LiveGame::is_game_over(self)
    }
}

/// Post-tick view handed to render and scoreboard sinks: the world, the
/// demo flag, and the key map that actually drove the tick.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub demo: bool,
    pub keys: KeyState,
    pub world: WorldSnapshot,
}

/// Owns one game plus everything around it that is not simulation: demo
/// activation and cancellation, the game-over restart paths, and the choice
/// of who is holding the keys this tick. The game cannot tell a pilot from
/// a human; both feed the same key map through the same edge tracking.
pub struct Session<G: GameLoop, C: Clock> {
    game: G,
    pilot: Box<dyn Pilot>,
    clock: C,
    seed: u32,
    demo: bool,
    last_human_input_ms: u64,
    restart_at_ms: Option<u64>,
    last_lives: i32,
}

impl<C: Clock> Session<LiveGame, C> {
    /// An interactive session: human keys drive it until idleness brings
    /// the demo pilot in.
    pub fn new(seed: u32, pilot: Box<dyn Pilot>, clock: C) -> Self {
        Self::with_game(LiveGame::new(seed), seed, pilot, clock, false)
    }

    /// A session born in attract mode, for headless runs. No reset happens
    /// on the way in, so the run stays byte-for-byte replayable from the
    /// seed.
    pub fn new_demo(seed: u32, pilot: Box<dyn Pilot>, clock: C) -> Self {
        Self::with_game(LiveGame::new(seed), seed, pilot, clock, true)
    }
}

impl<G: GameLoop, C: Clock> Session<G, C> {
    fn with_game(game: G, seed: u32, mut pilot: Box<dyn Pilot>, clock: C, demo: bool) -> Self {
        let now_ms = clock.now_ms();
        let last_lives = game.snapshot().lives;
        if demo {
            pilot.reset(seed);
        }
        Self {
            game,
            pilot,
            clock,
            seed,
            demo,
            last_human_input_ms: now_ms,
            restart_at_ms: None,
            last_lives,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Advances the session by one tick. The clock is sampled exactly once.
    pub fn tick(&mut self, human: KeyState) -> SessionSnapshot {
        let now_ms = self.clock.now_ms();

        if human.any_held() {
            self.last_human_input_ms = now_ms;
            if self.demo {
                // A pending demo restart survives this; it re-enters demo
                // when it fires.
                self.demo = false;
                self.game.reset();
                self.last_lives = self.game.snapshot().lives;
                tracing::info!(now_ms, "demo cancelled by player input");
            }
        }

        if let Some(deadline) = self.restart_at_ms {
            if now_ms >= deadline {
                self.restart_at_ms = None;
                self.enter_demo(now_ms);
            }
        }

        if !self.demo
            && !self.game.is_game_over()
            && now_ms - self.last_human_input_ms > DEMO_IDLE_MS
        {
            self.enter_demo(now_ms);
        }

        if self.game.is_game_over() {
            // The simulation is frozen; the tracker still advances so a
            // fire press registers as an edge, not a hold.
            let input = self.game.step(human);
            if self.demo {
                if self.restart_at_ms.is_none() {
                    let deadline = now_ms + DEMO_RESTART_DELAY_MS;
                    self.restart_at_ms = Some(deadline);
                    tracing::info!(deadline, "demo restart scheduled");
                }
            } else if input.fire_pressed {
                self.game.reset();
                self.last_human_input_ms = now_ms;
                self.last_lives = self.game.snapshot().lives;
                tracing::info!(now_ms, "player restart");
            }
            return SessionSnapshot {
                demo: self.demo,
                keys: human,
                world: self.game.snapshot(),
            };
        }

        let keys = if self.demo {
            self.pilot.next_keys(&self.game.snapshot(), now_ms)
        } else {
            human
        };
        self.game.step(keys);

        let world = self.game.snapshot();
        if world.lives < self.last_lives {
            tracing::debug!(lives = world.lives, demo = self.demo, "ship destroyed");
        }
        if world.is_game_over && self.last_lives > 0 {
            tracing::info!(score = world.score, demo = self.demo, "game over");
        }
        self.last_lives = world.lives;

        SessionSnapshot {
            demo: self.demo,
            keys,
            world,
        }
    }

    fn enter_demo(&mut self, now_ms: u64) {
        self.demo = true;
        self.game.reset();
        self.pilot.reset(self.seed);
        self.last_lives = self.game.snapshot().lives;
        tracing::info!(now_ms, "demo started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TickClock;
    use asteroids_core::input::InputTracker;
    use asteroids_core::sim::ShipSnapshot;

    /// Scripted stand-in for the real game: game-over is set by hand and
    /// every key map handed to `step` is recorded.
    struct StubGame {
        game_over: bool,
        resets: u32,
        steps: Vec<KeyState>,
        tracker: InputTracker,
    }

    impl StubGame {
        fn new() -> Self {
            Self {
                game_over: false,
                resets: 0,
                steps: Vec::new(),
                tracker: InputTracker::new(),
            }
        }
    }

    impl GameLoop for StubGame {
        fn step(&mut self, keys: KeyState) -> TickInput {
            self.steps.push(keys);
            self.tracker.track(keys)
        }

        fn reset(&mut self) {
            self.resets += 1;
            self.game_over = false;
        }

        fn snapshot(&self) -> WorldSnapshot {
            WorldSnapshot {
                tick_count: self.steps.len() as u32,
                score: 0,
                lives: if self.game_over { 0 } else { 3 },
                invulnerable_ticks: 0,
                is_game_over: self.game_over,
                rng_state: 1,
                ship: ShipSnapshot {
                    x: 400.0,
                    y: 300.0,
                    vx: 0.0,
                    vy: 0.0,
                    angle: 0.0,
                    radius: 8.0,
                    blink_hidden: false,
                },
                bullets: Vec::new(),
                asteroids: Vec::new(),
            }
        }

        fn is_game_over(&self) -> bool {
            self.game_over
        }
    }

    struct ScriptedPilot {
        keys: KeyState,
    }

    impl Pilot for ScriptedPilot {
        fn id(&self) -> &str {
            "scripted"
        }

        fn description(&self) -> &str {
            "constant key map"
        }

        fn reset(&mut self, _seed: u32) {}

        fn next_keys(&mut self, _world: &WorldSnapshot, _now_ms: u64) -> KeyState {
            self.keys
        }
    }

    fn pilot(keys: KeyState) -> Box<dyn Pilot> {
        Box::new(ScriptedPilot { keys })
    }

    const FIRE: KeyState = KeyState {
        left: false,
        right: false,
        thrust: false,
        fire: true,
    };

    const LEFT: KeyState = KeyState {
        left: true,
        right: false,
        thrust: false,
        fire: false,
    };

    fn stub_session(
        game_over: bool,
        demo: bool,
        clock: TickClock,
    ) -> Session<StubGame, TickClock> {
        let mut game = StubGame::new();
        game.game_over = game_over;
        Session::with_game(game, 1, pilot(KeyState::default()), clock, demo)
    }

    #[test]
    fn fire_edge_restarts_after_game_over() {
        let clock = TickClock::new();
        let mut session = stub_session(true, false, clock.clone());

        clock.advance_tick();
        session.tick(FIRE);
        assert_eq!(session.game.resets, 1);

        // Game over again while fire is still held: no edge, no restart.
        session.game.game_over = true;
        clock.advance_tick();
        session.tick(FIRE);
        assert_eq!(session.game.resets, 1);

        // Release then press again: a fresh edge restarts.
        clock.advance_tick();
        session.tick(KeyState::default());
        clock.advance_tick();
        session.tick(FIRE);
        assert_eq!(session.game.resets, 2);
    }

    #[test]
    fn non_fire_keys_are_ignored_during_game_over() {
        let clock = TickClock::new();
        let mut session = stub_session(true, false, clock.clone());

        for _ in 0..5 {
            clock.advance_tick();
            let snapshot = session.tick(LEFT);
            assert!(snapshot.world.is_game_over);
        }
        assert_eq!(session.game.resets, 0);
    }

    #[test]
    fn demo_game_over_restarts_once_after_the_delay() {
        let clock = TickClock::new();
        let mut session = stub_session(true, true, clock.clone());

        clock.set(100);
        session.tick(KeyState::default());
        assert_eq!(session.restart_at_ms, Some(100 + DEMO_RESTART_DELAY_MS));
        assert_eq!(session.game.resets, 0);

        // Re-ticking before the deadline does not reschedule.
        clock.set(1_000);
        session.tick(KeyState::default());
        assert_eq!(session.restart_at_ms, Some(100 + DEMO_RESTART_DELAY_MS));

        clock.set(100 + DEMO_RESTART_DELAY_MS);
        session.tick(KeyState::default());
        assert_eq!(session.game.resets, 1);
        assert!(session.is_demo());
        assert_eq!(session.restart_at_ms, None);
    }

    #[test]
    fn scheduled_restart_fires_even_after_a_human_cancel() {
        let clock = TickClock::new();
        let mut session = stub_session(true, true, clock.clone());

        clock.set(100);
        session.tick(KeyState::default());
        assert!(session.restart_at_ms.is_some());

        // Human takes over during the delay: demo cancels with a reset,
        // but the pending restart stays armed.
        clock.set(1_000);
        session.tick(LEFT);
        assert!(!session.is_demo());
        assert_eq!(session.game.resets, 1);
        assert!(session.restart_at_ms.is_some());

        clock.set(100 + DEMO_RESTART_DELAY_MS);
        session.tick(KeyState::default());
        assert!(session.is_demo());
        assert_eq!(session.game.resets, 2);
    }

    #[test]
    fn demo_activates_strictly_after_the_idle_threshold() {
        let clock = TickClock::new();
        let mut session = stub_session(false, false, clock.clone());

        clock.set(DEMO_IDLE_MS);
        session.tick(KeyState::default());
        assert!(!session.is_demo());

        clock.set(DEMO_IDLE_MS + 1);
        let snapshot = session.tick(KeyState::default());
        assert!(session.is_demo());
        assert!(snapshot.demo);
        assert_eq!(session.game.resets, 1);
    }

    #[test]
    fn held_keys_keep_the_idle_clock_fresh() {
        let clock = TickClock::new();
        let mut session = stub_session(false, false, clock.clone());

        clock.set(4_000);
        session.tick(LEFT);

        clock.set(4_000 + DEMO_IDLE_MS);
        session.tick(KeyState::default());
        assert!(!session.is_demo());

        clock.set(4_000 + DEMO_IDLE_MS + 1);
        session.tick(KeyState::default());
        assert!(session.is_demo());
    }

    #[test]
    fn human_input_cancels_demo_with_a_full_reset() {
        let clock = TickClock::new();
        let mut session = stub_session(false, true, clock.clone());

        clock.advance_tick();
        let snapshot = session.tick(LEFT);
        assert!(!snapshot.demo);
        assert_eq!(session.game.resets, 1);
        // The cancelling tick is already driven by the human keys.
        assert_eq!(session.game.steps.last(), Some(&LEFT));
    }

    #[test]
    fn pilot_keys_drive_the_game_while_demo_is_active() {
        let clock = TickClock::new();
        let mut game = StubGame::new();
        game.game_over = false;
        let mut session = Session::with_game(game, 1, pilot(FIRE), clock.clone(), true);

        clock.advance_tick();
        let snapshot = session.tick(KeyState::default());
        assert_eq!(session.game.steps, vec![FIRE]);
        assert_eq!(snapshot.keys, FIRE);
    }
}
