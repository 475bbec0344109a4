use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use asteroids_core::input::{encode_key_byte, KeyState};
use asteroids_core::replay;

use crate::clock::TickClock;
use crate::pilot::DemoPilot;
use crate::session::Session;
use crate::util::seed_to_hex;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub pilot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub max_ticks: u32,
    pub final_score: u32,
    pub final_lives: i32,
    pub final_rng_state: u32,
    pub game_overs: u32,
    pub action_ticks: u32,
    pub turn_ticks: u32,
    pub thrust_ticks: u32,
    pub fire_ticks: u32,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    /// One encoded key byte per tick, replayable through the core.
    pub inputs: Vec<u8>,
}

/// Headless attract-mode run: a demo session driven for a fixed number of
/// ticks on the deterministic tick clock, with no human input.
pub fn run_demo(seed: u32, max_ticks: u32) -> Result<RunArtifact> {
    if max_ticks == 0 {
        return Err(anyhow!("max_ticks must be > 0"));
    }

    let clock = TickClock::new();
    let mut session = Session::new_demo(seed, Box::new(DemoPilot::new()), clock.clone());

    let mut inputs = Vec::with_capacity(max_ticks as usize);
    let mut game_overs = 0u32;
    let mut was_over = false;
    let mut final_world = session.game().snapshot();

    for _ in 0..max_ticks {
        clock.advance_tick();
        let snapshot = session.tick(KeyState::default());
        inputs.push(encode_key_byte(snapshot.keys));
        if snapshot.world.is_game_over && !was_over {
            game_overs += 1;
        }
        was_over = snapshot.world.is_game_over;
        final_world = snapshot.world;
    }

    // Until the first session reset the run is a pure replay of its own
    // input bytes; check that the core agrees.
    if game_overs == 0 {
        let replayed = replay(seed, &inputs);
        if replayed.final_score != final_world.score
            || replayed.final_rng_state != final_world.rng_state
        {
            return Err(anyhow!(
                "demo run diverged from its own replay: score {} vs {}, rng {:#010x} vs {:#010x}",
                final_world.score,
                replayed.final_score,
                final_world.rng_state,
                replayed.final_rng_state
            ));
        }
    }

    let mut action_ticks = 0u32;
    let mut turn_ticks = 0u32;
    let mut thrust_ticks = 0u32;
    let mut fire_ticks = 0u32;
    for byte in &inputs {
        if *byte != 0 {
            action_ticks += 1;
        }
        if (*byte & 0x03) != 0 {
            turn_ticks += 1;
        }
        if (*byte & 0x04) != 0 {
            thrust_ticks += 1;
        }
        if (*byte & 0x08) != 0 {
            fire_ticks += 1;
        }
    }

    Ok(RunArtifact {
        metrics: RunMetrics {
            pilot_id: "demo".to_string(),
            seed,
            seed_hex: seed_to_hex(seed),
            max_ticks,
            final_score: final_world.score,
            final_lives: final_world.lives,
            final_rng_state: final_world.rng_state,
            game_overs,
            action_ticks,
            turn_ticks,
            thrust_ticks,
            fire_ticks,
        },
        inputs,
    })
}

pub fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating {}", parent.display()))?;
    }
    let encoded = serde_json::to_vec_pretty(report).context("failed to serialize report")?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn write_inputs(path: &Path, inputs: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating {}", parent.display()))?;
    }
    fs::write(path, inputs).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}
