//! ASCII grid maze
//!
//! Parses rectangular maze maps of the form:
//!
//! ```text
//! #########
//! #S..#...#
//! #.#.#.#.#
//! #.#...#G#
//! #########
//! ```
//!
//! Tiles: `#` wall, `.` or space open, `S` start (exactly one),
//! `G` goal (any number, including none). Open cells are assigned
//! node identifiers in row-major order; adjacency is 4-directional.

use crate::error::MazeError;
use crate::maze::{Maze, NodeId};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A rectangular maze parsed from an ASCII map
#[derive(Debug, Clone)]
pub struct GridMaze {
    width: usize,
    height: usize,

    /// Node id per cell; `None` for walls. Indexed `row * width + col`.
    cells: Vec<Option<NodeId>>,

    /// Cell coordinates per node, indexed by `NodeId`
    coords: Vec<(usize, usize)>,

    start: NodeId,
    goals: HashSet<NodeId>,
}

impl GridMaze {
    /// Parse a maze from map text
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(MazeError::EmptyMap);
        }

        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut cells = vec![None; width * height];
        let mut coords = Vec::new();
        let mut start: Option<NodeId> = None;
        let mut goals = HashSet::new();

        for (row, line) in lines.iter().enumerate() {
            for (col, tile) in line.chars().enumerate() {
                let open = match tile {
                    '#' => false,
                    '.' | ' ' => true,
                    'S' | 'G' => true,
                    other => {
                        return Err(MazeError::UnknownTile {
                            row,
                            col,
                            tile: other,
                        })
                    }
                };
                if !open {
                    continue;
                }

                let node = NodeId(coords.len() as u32);
                cells[row * width + col] = Some(node);
                coords.push((row, col));

                if tile == 'S' {
                    if let Some(prev) = start {
                        let (first_row, _) = coords[prev.index()];
                        return Err(MazeError::MultipleStarts {
                            first: first_row,
                            second: row,
                        });
                    }
                    start = Some(node);
                } else if tile == 'G' {
                    goals.insert(node);
                }
            }
        }

        if coords.is_empty() {
            return Err(MazeError::EmptyMap);
        }
        let start = start.ok_or(MazeError::MissingStart)?;

        Ok(Self {
            width,
            height,
            cells,
            coords,
            start,
            goals,
        })
    }

    /// Load and parse a maze map file
    pub fn from_file(path: &Path) -> Result<Self, crate::error::SolverError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    /// The maze's start node
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Number of goal cells in the map
    pub fn goal_count(&self) -> usize {
        self.goals.len()
    }

    /// Map width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Render the map with a solved path overlaid as `*`
    /// (start and goal markers are preserved).
    pub fn render_path(&self, path: &[NodeId]) -> String {
        let on_path: HashSet<NodeId> = path.iter().copied().collect();
        let mut out = String::with_capacity((self.width + 1) * self.height);

        for row in 0..self.height {
            for col in 0..self.width {
                let tile = match self.cells[row * self.width + col] {
                    None => '#',
                    Some(node) if node == self.start => 'S',
                    Some(node) if self.goals.contains(&node) => 'G',
                    Some(node) if on_path.contains(&node) => '*',
                    Some(_) => '.',
                };
                out.push(tile);
            }
            out.push('\n');
        }
        out
    }

    fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[row * self.width + col]
    }
}

impl Maze for GridMaze {
    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let Some(&(row, col)) = self.coords.get(node.index()) else {
            return Vec::new();
        };
        let mut neighbors = Vec::with_capacity(4);

        if row > 0 {
            if let Some(n) = self.node_at(row - 1, col) {
                neighbors.push(n);
            }
        }
        if let Some(n) = self.node_at(row + 1, col) {
            neighbors.push(n);
        }
        if col > 0 {
            if let Some(n) = self.node_at(row, col - 1) {
                neighbors.push(n);
            }
        }
        if let Some(n) = self.node_at(row, col + 1) {
            neighbors.push(n);
        }

        neighbors
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.goals.contains(&node)
    }

    fn node_count(&self) -> usize {
        self.coords.len()
    }
}
