use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::{Parser, Subcommand};

use asteroids_autopilot::benchmark::{run_benchmark, BenchmarkConfig};
use asteroids_autopilot::runner::{run_demo, write_inputs, write_report};
use asteroids_autopilot::util::{parse_seed, parse_seed_csv, seed_to_hex};

#[derive(Parser, Debug)]
#[command(name = "asteroids-autopilot")]
#[command(about = "Headless attract-mode runs and benchmarks for the deterministic Asteroids core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one seeded attract-mode game and report its metrics
    Demo {
        #[arg(long, default_value = "0xA57E0001")]
        seed: String,
        #[arg(long, default_value_t = 18_000)]
        ticks: u32,
        /// Write the metrics JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also save the per-tick key bytes for replay
        #[arg(long)]
        inputs_out: Option<PathBuf>,
    },
    /// Run the demo pilot across many seeds and aggregate the results
    Benchmark {
        /// Comma-separated seed list; overrides --seed-start/--seed-count
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 18_000)]
        ticks: u32,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match Cli::parse().command {
        Commands::Demo {
            seed,
            ticks,
            output,
            inputs_out,
        } => {
            let seed = parse_seed(&seed)?;
            let artifact = run_demo(seed, ticks)?;

            if let Some(path) = inputs_out {
                write_inputs(&path, &artifact.inputs)?;
                println!("inputs={}", path.display());
            }

            if let Some(path) = output {
                write_report(&path, &artifact.metrics)?;
                println!("output={}", path.display());
            } else {
                println!("{}", serde_json::to_string_pretty(&artifact.metrics)?);
            }

            println!("seed={}", seed_to_hex(seed));
            println!("ticks={}", artifact.metrics.max_ticks);
            println!("score={}", artifact.metrics.final_score);
            println!("lives={}", artifact.metrics.final_lives);
            println!("game_overs={}", artifact.metrics.game_overs);
            println!("rng={:#010x}", artifact.metrics.final_rng_state);
        }
        Commands::Benchmark {
            seeds,
            seed_start,
            seed_count,
            ticks,
            jobs,
            out_dir,
        } => {
            let seeds = resolve_seeds(seeds.as_deref(), seed_start.as_deref(), seed_count)?;
            let out_dir =
                out_dir.unwrap_or_else(|| PathBuf::from(format!("benchmarks/{}", timestamp_suffix())));

            let report = run_benchmark(BenchmarkConfig {
                seeds,
                max_ticks: ticks,
                out_dir: Some(out_dir.clone()),
                jobs,
            })?;

            println!("runs={}", report.seed_count);
            println!("avg_score={:.1}", report.avg_score);
            println!("max_score={}", report.max_score);
            println!("avg_game_overs={:.2}", report.avg_game_overs);
            println!("clean_rate={:.0}%", report.clean_rate * 100.0);
            println!("out_dir={}", out_dir.display());
            println!("top seeds:");
            for (idx, run) in report.runs.iter().take(5).enumerate() {
                println!(
                    "  {}. {} score={} lives={} game_overs={} fire_ticks={}",
                    idx + 1,
                    run.seed_hex,
                    run.final_score,
                    run.final_lives,
                    run.game_overs,
                    run.fire_ticks,
                );
            }
        }
    }

    Ok(())
}

fn resolve_seeds(seeds: Option<&str>, seed_start: Option<&str>, seed_count: u32) -> Result<Vec<u32>> {
    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }

    let start = if let Some(start) = seed_start {
        parse_seed(start)?
    } else {
        0xA57E_0001
    };

    let mut out = Vec::with_capacity(seed_count as usize);
    let mut cur = start;
    for _ in 0..seed_count {
        out.push(cur);
        cur = cur.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }
    Ok(out)
}

fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
