//! Map generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::{Block, Maze, MazeError, Point};

/// Generate a perfect maze of `size` × `size` logical cells from entropy.
pub fn generate(size: usize) -> Result<Maze, MazeError> {
    MazeGenerator::new(None).generate(size)
}

/// Maze generator carving perfect mazes.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Offsets to the logical neighbors: up, down, left, right
    const DIRECTIONS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

    pub fn from_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a perfect maze (spanning tree, no loops)
    ///
    /// The grid has dimension `2 * size + 1`: logical cells sit on odd
    /// rows and columns, and the squares between them are the walls that
    /// carving may knock down. The north entry `(0, 1)` and the south exit
    /// `(dim - 1, dim - 2)` are opened last.
    ///
    /// Returns [MazeError::InvalidSize] for `size == 0`, or when the
    /// `dim * dim` grid could never be allocated.
    pub fn generate(&mut self, size: usize) -> Result<Maze, MazeError> {
        let dim = size
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .filter(|_| size > 0)
            .filter(|&d| d.checked_mul(d).is_some_and(|cells| cells <= isize::MAX as usize))
            .ok_or(MazeError::InvalidSize(size))?;

        let mut grid = vec![vec![Block::Wall; dim]; dim];
        let carved = self.carve(&mut grid, Point::new(1, 1));

        grid[0][1] = Block::Passage;
        grid[dim - 1][dim - 2] = Block::Passage;

        debug!(size, dim, carved, "maze_generated");
        Ok(Maze::from_squares(grid))
    }

    /// Carve passages from `origin` with an explicit backtracking stack
    ///
    /// Returns the number of squares turned into passages.
    fn carve(&mut self, grid: &mut [Vec<Block>], origin: Point) -> usize {
        grid[origin.y][origin.x] = Block::Passage;
        let mut carved = 1;
        let mut stack = vec![origin];

        while let Some(&current) = stack.last() {
            let neighbors = Self::unvisited_neighbors(grid, current);
            if let Some(&next) = neighbors.choose(&mut self.random) {
                let mid = Point::new((current.y + next.y) / 2, (current.x + next.x) / 2);
                grid[mid.y][mid.x] = Block::Passage;
                grid[next.y][next.x] = Block::Passage;
                carved += 2;
                stack.push(next);
            } else {
                stack.pop();
            }
        }
        carved
    }

    /// Logical cells two steps away that are still walls
    fn unvisited_neighbors(grid: &[Vec<Block>], p: Point) -> Vec<Point> {
        let dim = grid.len();
        Self::DIRECTIONS
            .iter()
            .filter_map(|&(dy, dx)| {
                let y = p.y.checked_add_signed(dy)?;
                let x = p.x.checked_add_signed(dx)?;
                (y < dim && x < dim && grid[y][x] == Block::Wall).then_some(Point::new(y, x))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use itertools::Itertools;
    use rand::rngs::mock::StepRng;

    use crate::maze_generator::{generate, MazeGenerator};
    use crate::{Block, Maze, MazeError, Point};

    /// Logical cells reachable from (1, 1) through carved midpoints
    fn reachable_logical_cells(maze: &Maze) -> HashSet<Point> {
        let dim = maze.dim();
        let mut seen = HashSet::from([Point::new(1, 1)]);
        let mut queue = VecDeque::from([Point::new(1, 1)]);
        while let Some(p) = queue.pop_front() {
            for (dy, dx) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
                let (Some(my), Some(mx)) =
                    (p.y.checked_add_signed(dy), p.x.checked_add_signed(dx))
                else {
                    continue;
                };
                let next = Point::new(
                    p.y.wrapping_add_signed(2 * dy),
                    p.x.wrapping_add_signed(2 * dx),
                );
                if next.y < dim
                    && next.x < dim
                    && maze.is_passage(Point::new(my, mx))
                    && seen.insert(next)
                {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Passages between two logical cells
    fn carved_connections(maze: &Maze) -> usize {
        let dim = maze.dim();
        (1..dim - 1)
            .cartesian_product(1..dim - 1)
            .filter(|&(y, x)| (y + x) % 2 == 1)
            .filter(|&(y, x)| maze.is_passage(Point::new(y, x)))
            .count()
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(generate(0), Err(MazeError::InvalidSize(0)));
        for size in [usize::MAX, usize::MAX / 2, usize::MAX / 4, 1 << (usize::BITS / 2)] {
            assert_eq!(
                MazeGenerator::new(Some(0)).generate(size),
                Err(MazeError::InvalidSize(size))
            );
        }
    }

    #[test]
    fn smallest_maze() {
        let maze = MazeGenerator::new(Some(0)).generate(1).unwrap();
        assert_eq!(
            maze.render(None),
            "🟫🟩🟫
🟫🟩🟫
🟫🟩🟫"
        );
    }

    #[test]
    fn dimension_and_openings() {
        for size in 1..=12 {
            let maze = generate(size).unwrap();
            assert_eq!(maze.dim(), 2 * size + 1);
            assert!(maze.is_passage(Point::new(0, 1)));
            assert!(maze.is_passage(Point::new(2 * size, 2 * size - 1)));
            assert_eq!(maze.entry(), Point::new(0, 1));
            assert_eq!(maze.exit(), Point::new(2 * size, 2 * size - 1));
        }
    }

    #[test]
    fn logical_cells_form_spanning_tree() {
        for size in 1..=12 {
            for seed in 0..5 {
                let maze = MazeGenerator::new(Some(seed)).generate(size).unwrap();

                let reached = reachable_logical_cells(&maze);
                assert_eq!(reached.len(), size * size, "size={size} seed={seed}");
                assert_eq!(carved_connections(&maze), size * size - 1);
            }
        }
    }

    #[test]
    fn only_cells_and_carved_walls_are_open() {
        let maze = MazeGenerator::new(Some(3)).generate(9).unwrap();
        let dim = maze.dim();
        let border_openings = [maze.entry(), maze.exit()];

        for (y, row) in maze.rows().iter().enumerate() {
            for (x, block) in row.iter().enumerate() {
                let p = Point::new(y, x);
                if y % 2 == 1 && x % 2 == 1 {
                    assert_eq!(*block, Block::Passage, "logical cell {p:?}");
                } else if y % 2 == 0 && x % 2 == 0 {
                    assert_eq!(*block, Block::Wall, "corner {p:?}");
                } else if y == 0 || x == 0 || y == dim - 1 || x == dim - 1 {
                    assert_eq!(*block == Block::Passage, border_openings.contains(&p));
                }
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(Some(42)).generate(15).unwrap();
        let b = MazeGenerator::new(Some(42)).generate(15).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn perfect_for_degenerate_random_source() {
        // Always picks the first candidate
        let mut gen = MazeGenerator::from_rng(StepRng::new(0, 0));
        let maze = gen.generate(6).unwrap();
        assert_eq!(reachable_logical_cells(&maze).len(), 36);
        assert_eq!(carved_connections(&maze), 35);
    }

    #[test]
    fn generate_parseable_emoji_maze() {
        let maze = MazeGenerator::new(Some(0)).generate(7).unwrap();
        let parsed = Maze::parse_emojis(&maze.render(None)).unwrap();
        assert_eq!(parsed, maze);
    }
}
