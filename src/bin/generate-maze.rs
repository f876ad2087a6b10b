//! CLI for maze generation

use clap::Parser;
use maze_search::MazeGenerator;
use tracing_subscriber::{fmt, EnvFilter};

/// Perfect maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze size in logical cells per side
    #[arg(short, long, default_value_t = 15)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate maze, print it as emojis
fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let maze = MazeGenerator::new(args.seed).generate(args.size)?;
    println!("{}", maze.render(None));
    Ok(())
}
