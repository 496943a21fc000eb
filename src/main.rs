use std::io;

use anyhow::{ensure, Context};
use clap::Parser;
use crossterm::tty::IsTty;
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use turntable::input::read_instance;
use turntable::render::{write_demo, write_solution};
use turntable::{solve, SearchLimits};

#[derive(Parser, Debug)]
#[command(name = "turntable")]
#[command(about = "Optimal solutions for the turntable sliding-disk puzzle")]
struct Cli {
    /// Number of disks in each ring
    n: usize,

    /// Give up after expanding this many search nodes
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Apply this many random legal moves to the input before solving
    #[arg(long, default_value_t = 0)]
    scramble: usize,

    /// Seed for --scramble
    #[arg(long)]
    seed: Option<u64>,

    /// Show every step with its children instead of the plain solution
    #[arg(long)]
    demo: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turntable=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    ensure!(cli.n > 0, "n must be positive");

    let mut start = read_instance(io::stdin().lock(), cli.n).context("invalid instance")?;
    if cli.scramble > 0 {
        start = match cli.seed {
            Some(seed) => start.scramble(cli.scramble, &mut StdRng::seed_from_u64(seed)),
            None => start.scramble(cli.scramble, &mut thread_rng()),
        };
        tracing::info!(steps = cli.scramble, start = %start, "scrambled instance");
    }

    let limits = SearchLimits {
        max_expansions: cli.max_expansions,
    };
    let result = solve(&start, limits);

    let stdout = io::stdout();
    let styled = stdout.is_tty();
    let mut out = stdout.lock();
    if cli.demo {
        write_demo(&mut out, &result, styled).context("writing solution")?;
    } else {
        write_solution(&mut out, &result).context("writing solution")?;
    }

    Ok(())
}
