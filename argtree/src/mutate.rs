//! Structural mutation collaborator.

use crate::error::MoveError;
use crate::node::NodeId;

/// Performs the actual reparenting/reordering on the host tree.
///
/// The controllers never touch parent/child links themselves; a successful
/// drop is turned into exactly one `move_nodes` call.
pub trait TreeMutator {
    /// Move `nodes` (in the given order) so that they become consecutive
    /// children of `destination_parent` (`None` = root level), starting at
    /// `destination_index`.
    ///
    /// `destination_index` counts positions in the destination's child list
    /// as it is *before* the moved nodes are detached, which is what the user
    /// pointed at. Implementations adjust for moved nodes that already live
    /// in front of that position.
    fn move_nodes(
        &mut self,
        nodes: &[NodeId],
        destination_parent: Option<NodeId>,
        destination_index: usize,
    ) -> Result<(), MoveError>;
}

/// Where a drop puts the dragged nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    /// New parent, `None` for the root level.
    pub parent: Option<NodeId>,
    /// Insertion index in the parent's children before detaching.
    pub index: usize,
}
