use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::runner::{self, RunMetrics};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub seed: u32,
    pub seed_hex: String,
    pub final_score: u32,
    pub final_lives: i32,
    pub game_overs: u32,
    pub action_ticks: u32,
    pub fire_ticks: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_ticks: u32,
    pub seed_count: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub avg_game_overs: f64,
    pub clean_rate: f64,
    pub runs: Vec<RunRecord>,
}

pub struct BenchmarkConfig {
    pub seeds: Vec<u32>,
    pub max_ticks: u32,
    pub out_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
}

/// Runs the demo pilot over every seed in parallel and aggregates the
/// per-seed metrics into one report, optionally written as summary.json.
pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }

    let run_one = |seed: &u32| -> Result<RunMetrics> {
        let artifact = runner::run_demo(*seed, config.max_ticks)
            .with_context(|| format!("benchmark run failed for seed={seed:#x}"))?;
        Ok(artifact.metrics)
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.seeds.par_iter().map(run_one).collect())
    } else {
        config.seeds.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let total_runs = runs.len();
    let sum_score: u64 = runs.iter().map(|r| r.final_score as u64).sum();
    let max_score = runs.iter().map(|r| r.final_score).max().unwrap_or(0);
    let sum_game_overs: u64 = runs.iter().map(|r| r.game_overs as u64).sum();
    let clean = runs.iter().filter(|r| r.game_overs == 0).count();

    let mut run_records: Vec<RunRecord> = runs
        .iter()
        .map(|r| RunRecord {
            seed: r.seed,
            seed_hex: r.seed_hex.clone(),
            final_score: r.final_score,
            final_lives: r.final_lives,
            game_overs: r.game_overs,
            action_ticks: r.action_ticks,
            fire_ticks: r.fire_ticks,
        })
        .collect();
    run_records.sort_by(|a, b| b.final_score.cmp(&a.final_score));

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_ticks: config.max_ticks,
        seed_count: total_runs,
        avg_score: sum_score as f64 / total_runs as f64,
        max_score,
        avg_game_overs: sum_game_overs as f64 / total_runs as f64,
        clean_rate: clean as f64 / total_runs as f64,
        runs: run_records,
    };

    if let Some(out_dir) = &config.out_dir {
        runner::write_report(&out_dir.join("summary.json"), &report)?;
    }

    Ok(report)
}
