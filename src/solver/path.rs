//! Path reconstruction over the shared predecessor map

use crate::error::{Result, SolverError};
use crate::maze::NodeId;
use crate::solver::shared::SharedSearchState;

/// Reconstruct the discovered path from `from` to `to`, inclusive.
///
/// Walks the predecessor chain backwards from `to` and reverses it.
/// The walk is bounded: a valid chain can never contain more nodes
/// than the predecessor map has entries (plus the start), so running
/// past that bound means the map is inconsistent and the search must
/// abort rather than return a wrong path.
pub fn reconstruct(
    shared: &SharedSearchState,
    from: NodeId,
    to: NodeId,
) -> Result<Vec<NodeId>> {
    let limit = shared.predecessor_count() + 1;
    let mut path = vec![to];
    let mut current = to;

    while current != from {
        if path.len() >= limit + 1 {
            return Err(SolverError::InconsistentPredecessors {
                node: to,
                steps: path.len(),
            });
        }
        current = shared
            .predecessor(current)
            .ok_or(SolverError::MissingPredecessor { node: current })?;
        path.push(current);
    }

    path.reverse();
    Ok(path)
}
