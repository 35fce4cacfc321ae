/*!
# Node Representation

Nodes are identified by caller-assigned integers (`NodeId = i64`). Ids are unique within one
snapshot and stable for its lifetime, but they are neither dense nor zero-based: an editor may
delete node `3` and keep `4`, so algorithms key their state by id rather than index into arrays.

The value `-1` is reserved as the [`NO_PREDECESSOR`] sentinel which marks the starting node of
an algorithm in edge payloads.
*/

/// Nodes can be any integer except [`NO_PREDECESSOR`]
pub type NodeId = i64;

/// Edge weights. Unweighted graphs use `1.0` for every edge.
pub type Weight = f64;

/// Predecessor-Value meaning "this is the algorithm's own starting node"
pub const NO_PREDECESSOR: NodeId = -1;

/// Weight assigned to edges of graphs drawn without explicit weights
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// Returns `Some(u)` if `u` is a real node and `None` for the [`NO_PREDECESSOR`] sentinel
pub const fn predecessor(u: NodeId) -> Option<NodeId> {
    if u == NO_PREDECESSOR { None } else { Some(u) }
}
