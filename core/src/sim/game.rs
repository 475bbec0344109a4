use super::*;

#[derive(Clone)]
pub(super) struct Game {
    score: u32,
    lives: i32,
    invulnerable_ticks: i32,
    game_over: bool,
    tick_count: u32,
    ship: Ship,
    bullets: Vec<Bullet>,
    asteroids: Vec<Asteroid>,
    prune_mask: u8,
    rng: SeededRng,
}

const PRUNE_BULLETS: u8 = 1 << 0;
const PRUNE_ASTEROIDS: u8 = 1 << 1;

impl Game {
    pub(super) fn new(seed: u32) -> Self {
        let mut game = Self {
            score: 0,
            lives: STARTING_LIVES,
            invulnerable_ticks: 0,
            game_over: false,
            tick_count: 0,
            ship: centered_ship(),
            bullets: Vec::new(),
            asteroids: Vec::with_capacity(32),
            prune_mask: 0,
            rng: SeededRng::new(seed),
        };

        game.spawn_field(INITIAL_ASTEROID_COUNT);
        game
    }

    pub(super) fn reset(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.invulnerable_ticks = 0;
        self.game_over = false;
        self.ship = centered_ship();
        self.bullets.clear();
        self.asteroids.clear();
        self.prune_mask = 0;
        self.spawn_field(INITIAL_ASTEROID_COUNT);
    }

    pub(super) fn step(&mut self, input: TickInput) {
        if self.game_over {
            // The simulation freezes here and control inputs are ignored.
            // The session layer owns the fire-edge restart path.
            return;
        }

        self.tick_count += 1;

        if self.invulnerable_ticks > 0 {
            self.invulnerable_ticks -= 1;
        }

        self.update_ship(input);
        self.update_bullets();
        self.update_asteroids();

        self.handle_bullet_hits();
        self.handle_ship_hit();
        self.prune_dead_entities();
        self.repopulate_if_cleared();
    }

    fn update_ship(&mut self, input: TickInput) {
        if input.left {
            self.ship.angle -= SHIP_TURN_RATE;
        }
        if input.right {
            self.ship.angle += SHIP_TURN_RATE;
        }
        if input.thrust {
            self.ship.vx += self.ship.angle.cos() * SHIP_THRUST;
            self.ship.vy += self.ship.angle.sin() * SHIP_THRUST;
        }
        if input.fire_pressed {
            self.spawn_bullet();
        }

        self.ship.vx *= SHIP_DRAG;
        self.ship.vy *= SHIP_DRAG;
        (self.ship.vx, self.ship.vy) =
            clamp_speed(self.ship.vx, self.ship.vy, SHIP_MAX_SPEED);

        self.ship.x = wrap_x(self.ship.x + self.ship.vx);
        self.ship.y = wrap_y(self.ship.y + self.ship.vy);
    }

    fn spawn_bullet(&mut self) {
        let dir_x = self.ship.angle.cos();
        let dir_y = self.ship.angle.sin();

        // Muzzle velocity inherits the ship's own motion.
        self.bullets.push(Bullet {
            x: self.ship.x + dir_x * self.ship.radius,
            y: self.ship.y + dir_y * self.ship.radius,
            vx: dir_x * BULLET_SPEED + self.ship.vx,
            vy: dir_y * BULLET_SPEED + self.ship.vy,
            life: BULLET_LIFETIME_TICKS,
            alive: true,
        });
    }

    fn update_bullets(&mut self) {
        debug_assert!(self.bullets.iter().all(|entry| entry.alive));
        let mut expired_any = false;
        for bullet in &mut self.bullets {
            bullet.x = wrap_x(bullet.x + bullet.vx);
            bullet.y = wrap_y(bullet.y + bullet.vy);
            bullet.life -= 1;
            if bullet.life <= 0 {
                bullet.alive = false;
                expired_any = true;
            }
        }

        if expired_any {
            self.prune_mask |= PRUNE_BULLETS;
        }
    }

    fn update_asteroids(&mut self) {
        debug_assert!(self.asteroids.iter().all(|entry| entry.alive));
        for asteroid in &mut self.asteroids {
            asteroid.x = wrap_x(asteroid.x + asteroid.vx);
            asteroid.y = wrap_y(asteroid.y + asteroid.vy);
            asteroid.angle += asteroid.spin;
        }
    }

    /// Bullet-asteroid resolution. Both collections are scanned in reverse
    /// insertion order and the first hit wins; a bullet destroys at most one
    /// asteroid per tick. Children split off during one bullet's scan sit
    /// past its candidate range and only become targets for bullets scanned
    /// after it.
    fn handle_bullet_hits(&mut self) {
        for bullet_index in (0..self.bullets.len()).rev() {
            if !self.bullets[bullet_index].alive {
                continue;
            }

            let (bx, by) = {
                let bullet = self.bullets[bullet_index];
                (bullet.x, bullet.y)
            };

            let candidate_count = self.asteroids.len();
            for asteroid_index in (0..candidate_count).rev() {
                if !self.asteroids[asteroid_index].alive {
                    continue;
                }

                let (ax, ay, radius) = {
                    let asteroid = &self.asteroids[asteroid_index];
                    (asteroid.x, asteroid.y, asteroid.radius)
                };
                if distance(bx, by, ax, ay) < radius {
                    self.bullets[bullet_index].alive = false;
                    self.prune_mask |= PRUNE_BULLETS;
                    self.shatter_asteroid(asteroid_index);
                    break;
                }
            }
        }
    }

    fn shatter_asteroid(&mut self, asteroid_index: usize) {
        let parent = self.asteroids[asteroid_index];
        debug_assert!(parent.alive);
        self.asteroids[asteroid_index].alive = false;
        self.prune_mask |= PRUNE_ASTEROIDS;

        // Smaller rocks are worth more: floor(100 / (radius / 10)).
        let points = (100.0 / (parent.radius / 10.0)).floor() as u32;
        self.score = self.score.saturating_add(points);

        if parent.radius > ASTEROID_SPLIT_MIN_RADIUS {
            for _ in 0..2 {
                let child = self.create_asteroid(parent.x, parent.y, parent.radius / 2.0);
                self.asteroids.push(child);
            }
        }
    }

    /// Ship-asteroid resolution, skipped entirely while invulnerable. The
    /// asteroid survives the hit; only the ship is repositioned.
    fn handle_ship_hit(&mut self) {
        if self.invulnerable_ticks > 0 {
            return;
        }

        let hit = self.asteroids.iter().any(|asteroid| {
            asteroid.alive
                && distance(self.ship.x, self.ship.y, asteroid.x, asteroid.y)
                    < asteroid.radius + self.ship.radius
        });
        if hit {
            self.damage_ship();
        }
    }

    fn damage_ship(&mut self) {
        self.lives -= 1;
        self.invulnerable_ticks = INVULNERABLE_TICKS;
        self.ship = centered_ship();

        if self.lives <= 0 {
            self.game_over = true;
        }
    }

    fn prune_dead_entities(&mut self) {
        if self.prune_mask == 0 {
            return;
        }

        if (self.prune_mask & PRUNE_BULLETS) != 0 {
            self.bullets.retain(|entry| entry.alive);
        }
        if (self.prune_mask & PRUNE_ASTEROIDS) != 0 {
            self.asteroids.retain(|entry| entry.alive);
        }

        self.prune_mask = 0;
    }

    /// Escalating difficulty: a cleared field refills with more rocks the
    /// higher the score, capped at ten.
    fn repopulate_if_cleared(&mut self) {
        if !self.asteroids.is_empty() {
            return;
        }

        let count = core::cmp::min(
            REPOPULATE_MAX_COUNT,
            REPOPULATE_BASE_COUNT + self.score / REPOPULATE_SCORE_STEP,
        );
        self.spawn_field(count);
    }

    fn spawn_field(&mut self, count: u32) {
        for _ in 0..count {
            let x = self.rng.next_range_f64(0.0, FIELD_WIDTH);
            let y = self.rng.next_range_f64(0.0, FIELD_HEIGHT);
            let asteroid = self.create_asteroid(x, y, ASTEROID_START_RADIUS);
            self.asteroids.push(asteroid);
        }
    }

    fn create_asteroid(&mut self, x: f64, y: f64, radius: f64) -> Asteroid {
        assert!(radius > 0.0, "asteroid radius must be positive: {radius}");
        Asteroid {
            x,
            y,
            vx: self
                .rng
                .next_range_f64(-ASTEROID_MAX_AXIS_SPEED, ASTEROID_MAX_AXIS_SPEED),
            vy: self
                .rng
                .next_range_f64(-ASTEROID_MAX_AXIS_SPEED, ASTEROID_MAX_AXIS_SPEED),
            radius,
            angle: 0.0,
            spin: self.rng.next_range_f64(-ASTEROID_MAX_SPIN, ASTEROID_MAX_SPIN),
            alive: true,
        }
    }

    pub(super) fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick_count: self.tick_count,
            score: self.score,
            lives: self.lives,
            invulnerable_ticks: self.invulnerable_ticks,
            is_game_over: self.game_over,
            rng_state: self.rng.state(),
            ship: ShipSnapshot {
                x: self.ship.x,
                y: self.ship.y,
                vx: self.ship.vx,
                vy: self.ship.vy,
                angle: self.ship.angle,
                radius: self.ship.radius,
                blink_hidden: self.invulnerable_ticks > 0
                    && (self.invulnerable_ticks / BLINK_PERIOD_TICKS) % 2 == 1,
            },
            bullets: self
                .bullets
                .iter()
                .map(|entry| BulletSnapshot {
                    x: entry.x,
                    y: entry.y,
                    vx: entry.vx,
                    vy: entry.vy,
                    life: entry.life,
                })
                .collect(),
            asteroids: self
                .asteroids
                .iter()
                .map(|entry| AsteroidSnapshot {
                    x: entry.x,
                    y: entry.y,
                    vx: entry.vx,
                    vy: entry.vy,
                    radius: entry.radius,
                    angle: entry.angle,
                    spin: entry.spin,
                })
                .collect(),
        }
    }

    #[inline]
    pub(super) fn result(&self) -> ReplayResult {
        ReplayResult {
            final_score: self.score,
            final_rng_state: self.rng.state(),
            tick_count: self.tick_count,
        }
    }

    #[inline]
    pub(super) fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub(super) fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub(super) fn lives(&self) -> i32 {
        self.lives
    }

    pub(super) fn validate_invariants(&self) -> Result<(), InvariantViolation> {
        if self.invulnerable_ticks < 0 {
            return Err(InvariantViolation::InvulnerabilityRange {
                ticks: self.invulnerable_ticks,
            });
        }

        if !(0..=STARTING_LIVES).contains(&self.lives) {
            return Err(InvariantViolation::LivesRange { lives: self.lives });
        }

        if self.game_over != (self.lives <= 0) {
            return Err(InvariantViolation::GameOverConsistency { lives: self.lives });
        }

        if !in_field(self.ship.x, self.ship.y) {
            return Err(InvariantViolation::ShipBounds {
                x: self.ship.x,
                y: self.ship.y,
            });
        }

        debug_assert!(self.bullets.iter().all(|entry| entry.alive));
        debug_assert!(self.asteroids.iter().all(|entry| entry.alive));

        for (index, bullet) in self.bullets.iter().enumerate() {
            if bullet.life <= 0 {
                return Err(InvariantViolation::BulletLifetime {
                    index,
                    life: bullet.life,
                });
            }
            if !in_field(bullet.x, bullet.y) {
                return Err(InvariantViolation::BulletBounds {
                    index,
                    x: bullet.x,
                    y: bullet.y,
                });
            }
        }

        for (index, asteroid) in self.asteroids.iter().enumerate() {
            if asteroid.radius <= 0.0 {
                return Err(InvariantViolation::AsteroidRadius {
                    index,
                    radius: asteroid.radius,
                });
            }
            if !in_field(asteroid.x, asteroid.y) {
                return Err(InvariantViolation::AsteroidBounds {
                    index,
                    x: asteroid.x,
                    y: asteroid.y,
                });
            }
        }

        Ok(())
    }
}

fn centered_ship() -> Ship {
    Ship {
        x: FIELD_WIDTH / 2.0,
        y: FIELD_HEIGHT / 2.0,
        vx: 0.0,
        vy: 0.0,
        angle: 0.0,
        radius: SHIP_RADIUS,
    }
}

#[inline]
fn in_field(x: f64, y: f64) -> bool {
    (0.0..=FIELD_WIDTH).contains(&x) && (0.0..=FIELD_HEIGHT).contains(&y)
}
