//! Adjacency-list maze
//!
//! The simplest [`Maze`] implementation: an explicit undirected graph
//! over a fixed node range, with an arbitrary set of goal nodes. Used
//! directly by tests and by callers that already have a graph in hand.

use crate::error::MazeError;
use crate::maze::{Maze, NodeId};
use std::collections::HashSet;

/// A maze described by an explicit edge list
#[derive(Debug, Clone)]
pub struct GraphMaze {
    /// Per-node neighbor lists, in insertion order
    adjacency: Vec<Vec<NodeId>>,

    /// Goal nodes
    goals: HashSet<NodeId>,
}

impl GraphMaze {
    /// Create a maze with `node_count` isolated nodes and no goals
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            goals: HashSet::new(),
        }
    }

    /// Build a maze from an undirected edge list and a goal set
    pub fn from_edges(
        node_count: usize,
        edges: &[(u32, u32)],
        goals: &[u32],
    ) -> Result<Self, MazeError> {
        let mut maze = Self::new(node_count);
        for &(a, b) in edges {
            maze.add_edge(NodeId(a), NodeId(b))?;
        }
        for &g in goals {
            maze.add_goal(NodeId(g))?;
        }
        Ok(maze)
    }

    /// Add an undirected edge between `a` and `b`
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), MazeError> {
        self.check_range(a)?;
        self.check_range(b)?;
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
        Ok(())
    }

    /// Mark `node` as a goal
    pub fn add_goal(&mut self, node: NodeId) -> Result<(), MazeError> {
        self.check_range(node)?;
        self.goals.insert(node);
        Ok(())
    }

    fn check_range(&self, node: NodeId) -> Result<(), MazeError> {
        if node.index() >= self.adjacency.len() {
            return Err(MazeError::NodeOutOfRange {
                node,
                node_count: self.adjacency.len(),
            });
        }
        Ok(())
    }
}

impl Maze for GraphMaze {
    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.adjacency
            .get(node.index())
            .cloned()
            .unwrap_or_default()
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.goals.contains(&node)
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_undirected() {
        let maze = GraphMaze::from_edges(3, &[(0, 1), (1, 2)], &[2]).unwrap();
        assert_eq!(maze.neighbors(NodeId(1)), vec![NodeId(0), NodeId(2)]);
        assert_eq!(maze.neighbors(NodeId(2)), vec![NodeId(1)]);
        assert!(maze.is_goal(NodeId(2)));
        assert!(!maze.is_goal(NodeId(0)));
    }

    #[test]
    fn test_neighbor_order_is_insertion_order() {
        let maze = GraphMaze::from_edges(5, &[(0, 1), (0, 2), (0, 3)], &[]).unwrap();
        assert_eq!(
            maze.neighbors(NodeId(0)),
            vec![NodeId(1), NodeId(2), NodeId(3)]
        );
    }

    #[test]
    fn test_out_of_range_edge_rejected() {
        let mut maze = GraphMaze::new(2);
        let err = maze.add_edge(NodeId(0), NodeId(5)).unwrap_err();
        assert_eq!(
            err,
            MazeError::NodeOutOfRange {
                node: NodeId(5),
                node_count: 2
            }
        );
    }
}
