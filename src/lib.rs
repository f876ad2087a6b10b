//! Generate a perfect maze and find the way through it
//!
//! The maze is carved with a randomized depth-first backtracker, turned
//! into an adjacency graph over its passages, and then searched with
//! either A* or a plain depth-first search.
//!
//! # Examples
//! ## Generate and solve
//! ```
//! use maze_search::{build_graph, AStar, DepthFirst, MazeGenerator, PathFinder};
//!
//! let maze = MazeGenerator::new(Some(7)).generate(10).unwrap();
//! let graph = build_graph(&maze);
//!
//! let best = AStar.search(&graph, maze.entry(), maze.exit());
//! let deep = DepthFirst.search(&graph, maze.entry(), maze.exit());
//! assert!(best.path_len().unwrap() <= deep.path_len().unwrap());
//! println!("{}", maze.render(best.path.as_deref()));
//! ```
//!
//! ## Hand-written maze
//! ```
//! use maze_search::{build_graph, AStar, Maze, PathFinder, Point};
//!
//! let emojis = "
//! 🟫🟩🟫🟫🟫
//! 🟫🟩🟩🟩🟫
//! 🟫🟫🟫🟩🟫
//! 🟫🟩🟩🟩🟫
//! 🟫🟫🟫🟩🟫";
//! let maze = Maze::parse_emojis(emojis.trim()).unwrap();
//! let result = AStar.search(&build_graph(&maze), maze.entry(), maze.exit());
//! assert_eq!(result.path_len(), Some(6));
//! assert_eq!(result.path.unwrap().last(), Some(&Point { y: 4, x: 3 }));
//! ```

pub mod graph;
pub mod maze_generator;
pub mod search;

use std::collections::HashSet;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use itertools::Itertools;
use thiserror::Error;

pub use graph::{build_graph, Graph};
pub use maze_generator::{generate, MazeGenerator};
pub use search::{AStar, DepthFirst, PathFinder, SearchResult};

/// Location in the maze, row first
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub y: usize,
    pub x: usize,
}

impl Point {
    pub const fn new(y: usize, x: usize) -> Self {
        Point { y, x }
    }

    /// Manhattan distance to `other`
    pub fn manhattan(&self, other: &Point) -> usize {
        self.y.abs_diff(other.y) + self.x.abs_diff(other.x)
    }
}

impl From<(usize, usize)> for Point {
    fn from((y, x): (usize, usize)) -> Self {
        Point { y, x }
    }
}

/// Content of a single grid square
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Block {
    Wall,
    Passage,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze size {0}, expected a positive size")]
    InvalidSize(usize),
    #[error("unexpected character `{symbol}` at y={y}, x={x}")]
    UnexpectedSymbol { symbol: char, y: usize, x: usize },
    #[error("maze is not square: {rows} rows, but a row has {cols} columns")]
    NotSquare { rows: usize, cols: usize },
}

/// Square grid of walls and passages
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Maze {
    squares: Vec<Vec<Block>>,
}

impl Maze {
    const S_WALL: char = '🟫';
    const S_VALID: char = '🟩';
    const S_PATH: char = '🟥';

    /// Wrap a finished grid. Callers guarantee that the grid is square.
    pub(crate) fn from_squares(squares: Vec<Vec<Block>>) -> Self {
        Maze { squares }
    }

    /// Parse maze representation from string
    ///
    /// - `emojis`: one row per line, `🟫` for walls and `🟩` for passages.
    ///   Path markers `🟥` are read back as passages.
    ///
    /// Returns error, if maze contains unknown characters or is not square.
    pub fn parse_emojis(emojis: &str) -> Result<Self, MazeError> {
        let squares = emojis
            .split('\n')
            .enumerate()
            .map(|(y, row)| {
                row.trim()
                    .chars()
                    .enumerate()
                    .map(|(x, c)| match c {
                        Self::S_WALL => Ok(Block::Wall),
                        Self::S_VALID | Self::S_PATH => Ok(Block::Passage),
                        symbol => Err(MazeError::UnexpectedSymbol { symbol, y, x }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = squares.len();
        if let Some(row) = squares.iter().find(|row| row.len() != rows) {
            return Err(MazeError::NotSquare {
                rows,
                cols: row.len(),
            });
        }
        Ok(Maze { squares })
    }

    /// Side length of the square grid
    pub fn dim(&self) -> usize {
        self.squares.len()
    }

    pub fn get(&self, p: Point) -> Option<Block> {
        self.squares.get(p.y).and_then(|row| row.get(p.x)).copied()
    }

    pub fn is_passage(&self, p: Point) -> bool {
        self.get(p) == Some(Block::Passage)
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> &[Vec<Block>] {
        &self.squares
    }

    /// North entry, right above the first logical cell
    pub fn entry(&self) -> Point {
        Point::new(0, 1)
    }

    /// South exit, right below the last logical cell
    pub fn exit(&self) -> Point {
        let d = self.dim();
        Point::new(d.saturating_sub(1), d.saturating_sub(2))
    }

    /// Render maze as emojis, marking the squares of `path`
    pub fn render(&self, path: Option<&[Point]>) -> String {
        let marked: HashSet<Point> = path.unwrap_or_default().iter().copied().collect();
        self.render_marked(&marked)
    }

    fn render_marked(&self, marked: &HashSet<Point>) -> String {
        self.squares
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, block)| match block {
                        _ if marked.contains(&Point { y, x }) => Self::S_PATH,
                        Block::Passage => Self::S_VALID,
                        Block::Wall => Self::S_WALL,
                    })
                    .join("")
            })
            .join("\n")
    }

    /// Draw the path on the terminal one square at a time
    ///
    /// ## Arguments
    /// - `path`: Path to reveal, start first.
    /// - `step_ms`: Time step for each frame, milliseconds.
    pub fn playback(&self, path: &[Point], step_ms: u64) -> io::Result<()> {
        fn print_frame(frame: &str) -> io::Result<()> {
            let mut out = io::stdout().lock();
            write!(out, "\x1B[2J\x1B[1;1H")?;
            writeln!(out, "{}", frame)?;
            out.flush()
        }

        let mut revealed = HashSet::with_capacity(path.len());
        print_frame(&self.render_marked(&revealed))?;
        for &p in path {
            thread::sleep(Duration::from_millis(step_ms));
            revealed.insert(p);
            print_frame(&self.render_marked(&revealed))?;
        }
        Ok(())
    }
}
