//! CLI for maze generation and route finding

use std::time::Instant;

use clap::Parser;
use maze_search::{build_graph, AStar, DepthFirst, MazeGenerator, PathFinder, SearchResult};
use tracing_subscriber::{fmt, EnvFilter};

/// Generate a perfect maze and compare A* with depth-first search
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze size in logical cells per side
    #[arg(short, long, default_value_t = 15)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the maze with the found path
    #[arg(long)]
    print: bool,

    /// Animate the found path on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 100)]
    frame_length: u64,
}

/// Generate maze, run both searches, print comparison
fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let maze = MazeGenerator::new(args.seed).generate(args.size)?;
    let graph = build_graph(&maze);
    let (start, goal) = (maze.entry(), maze.exit());
    tracing::info!(size = args.size, nodes = graph.len(), ?start, ?goal, "maze_ready");

    let finders: [&dyn PathFinder; 2] = [&AStar, &DepthFirst];
    let results: Vec<SearchResult> = finders
        .iter()
        .map(|finder| {
            let started = Instant::now();
            let result = finder.search(&graph, start, goal);
            let elapsed = started.elapsed();

            let steps = result
                .path_len()
                .map_or_else(|| "-".to_string(), |n| n.to_string());
            println!(
                "{:<3}  Time = {:.5}s | Visited = {} | Path length = {}",
                finder.name(),
                elapsed.as_secs_f64(),
                result.visited,
                steps
            );
            result
        })
        .collect();

    // Prefer the A* path, fall back to the DFS one
    let Some(path) = results.iter().find_map(|r| r.path.as_deref()) else {
        println!("No path found by either algorithm");
        return Ok(());
    };

    if args.playback {
        maze.playback(path, args.frame_length)?;
    } else if args.print {
        println!("{}", maze.render(Some(path)));
    }
    Ok(())
}
