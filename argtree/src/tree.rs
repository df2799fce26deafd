//! Arena-backed reference host tree.
//!
//! `NodeTree` owns its nodes in a flat `Vec`; parent links are plain ids, so
//! the child list is the only owning relationship. It implements every
//! collaborator the controllers need: [`NodeView`], [`TreeMutator`] and
//! [`InlineEditor`].

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::edit::InlineEditor;
use crate::error::MoveError;
use crate::mutate::TreeMutator;
use crate::node::{Node, NodeId};
use crate::view::NodeView;

/// A hierarchical list of argument items.
///
/// # Example
///
/// ```
/// use argtree::{Node, NodeTree};
///
/// let mut tree = NodeTree::new();
/// let project = tree.add_root(Node::container("project"));
/// let arg = tree.add_child(project, Node::leaf("--verbose")).unwrap();
/// assert_eq!(tree.node(arg).unwrap().label, "--verbose");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    /// In-progress edit text, keyed by the node being edited.
    drafts: HashMap<NodeId, String>,
}

impl NodeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a root-level node.
    pub fn add_root(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        self.roots.push(id);
        id
    }

    /// Append a child to a container.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, MoveError> {
        match self.nodes.get(parent.0) {
            None => return Err(MoveError::UnknownNode(parent)),
            Some(p) if !p.kind.is_container() => return Err(MoveError::InvalidDestination(parent)),
            Some(_) => {}
        }
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Find the first node (in tree order) with the given label.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.label == label)
            .map(NodeId)
    }

    /// Labels of the given nodes, skipping unknown ids.
    pub fn labels(&self, ids: &[NodeId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.node(*id))
            .map(|n| n.label.as_str())
            .collect()
    }

    /// Current draft text of an edit in progress.
    pub fn draft(&self, id: NodeId) -> Option<&str> {
        self.drafts.get(&id).map(String::as_str)
    }

    /// Replace the draft text of an edit in progress.
    pub fn set_draft(&mut self, id: NodeId, text: impl Into<String>) {
        if self.is_in_edit_mode(id) {
            self.drafts.insert(id, text.into());
        }
    }

    /// Leave edit mode without writing the draft back.
    pub fn cancel_edit(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.is_in_edit_mode = false;
        }
        self.drafts.remove(&id);
    }

    fn siblings_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(p) => &mut self.nodes[p.0].children,
            None => &mut self.roots,
        }
    }

    fn siblings(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(p) => &self.nodes[p.0].children,
            None => &self.roots,
        }
    }
}

impl NodeView for NodeTree {
    fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn is_container(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.kind.is_container())
    }

    fn is_expanded(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_expanded)
    }

    fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if let Some(node) = self.node_mut(id)
            && node.kind.is_container()
        {
            node.is_expanded = expanded;
        }
    }

    fn is_selected(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_selected)
    }

    fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(node) = self.node_mut(id) {
            node.is_selected = selected;
        }
    }

    fn is_editable(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_editable)
    }

    fn is_in_edit_mode(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_in_edit_mode)
    }

    fn is_checked(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_checked)
    }

    fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(node) = self.node_mut(id) {
            node.is_checked = checked;
        }
    }
}

impl TreeMutator for NodeTree {
    fn move_nodes(
        &mut self,
        nodes: &[NodeId],
        destination_parent: Option<NodeId>,
        destination_index: usize,
    ) -> Result<(), MoveError> {
        if nodes.is_empty() {
            return Err(MoveError::Empty);
        }
        if let Some(&unknown) = nodes.iter().find(|id| !self.contains(**id)) {
            return Err(MoveError::UnknownNode(unknown));
        }
        if let Some(parent) = destination_parent {
            if !self.contains(parent) {
                return Err(MoveError::UnknownNode(parent));
            }
            if !self.is_container(parent) {
                return Err(MoveError::InvalidDestination(parent));
            }
            if let Some(&moved) = nodes
                .iter()
                .find(|&&id| id == parent || self.is_ancestor_of(id, parent))
            {
                return Err(MoveError::WouldCreateCycle(moved));
            }
        }

        let len = self.siblings(destination_parent).len();
        if destination_index > len {
            return Err(MoveError::IndexOutOfRange {
                index: destination_index,
                len,
            });
        }

        // Descendants of other moved nodes travel with their ancestor.
        let requested: HashSet<NodeId> = nodes.iter().copied().collect();
        let mut seen = HashSet::new();
        let moving: Vec<NodeId> = nodes
            .iter()
            .copied()
            .filter(|&id| seen.insert(id))
            .filter(|&id| {
                !requested
                    .iter()
                    .any(|&other| other != id && self.is_ancestor_of(other, id))
            })
            .collect();

        let shift = self
            .siblings(destination_parent)
            .iter()
            .take(destination_index)
            .filter(|id| moving.contains(id))
            .count();
        let insert_at = destination_index - shift;

        for &id in &moving {
            let old_parent = self.nodes[id.0].parent;
            self.siblings_mut(old_parent).retain(|&sibling| sibling != id);
        }

        let siblings = self.siblings_mut(destination_parent);
        for (offset, &id) in moving.iter().enumerate() {
            siblings.insert(insert_at + offset, id);
        }
        for &id in &moving {
            self.nodes[id.0].parent = destination_parent;
        }

        debug!(
            "Moved {} node(s) to {:?} at index {}",
            moving.len(),
            destination_parent,
            insert_at
        );
        Ok(())
    }
}

impl InlineEditor for NodeTree {
    fn begin_edit(&mut self, id: NodeId, initial_text: Option<&str>) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            warn!("begin_edit on unknown node {}", id);
            return;
        };
        if !node.is_editable {
            return;
        }
        node.is_in_edit_mode = true;
        let text = initial_text.map_or_else(|| node.label.clone(), str::to_string);
        self.drafts.insert(id, text);
    }

    fn commit_edit(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        if !node.is_in_edit_mode {
            return;
        }
        if let Some(text) = self.drafts.remove(&id) {
            node.label = text;
        }
        node.is_in_edit_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::FlattenedView;

    fn sample() -> (NodeTree, [NodeId; 5]) {
        // A, B[C, D], E
        let mut tree = NodeTree::new();
        let a = tree.add_root(Node::leaf("A"));
        let b = tree.add_root(Node::container("B"));
        let c = tree.add_child(b, Node::leaf("C")).unwrap();
        let d = tree.add_child(b, Node::leaf("D")).unwrap();
        let e = tree.add_root(Node::leaf("E"));
        (tree, [a, b, c, d, e])
    }

    fn order(tree: &NodeTree) -> Vec<&str> {
        let all = FlattenedView::all(tree);
        tree.labels(all.as_slice())
    }

    #[test]
    fn test_add_child_to_leaf_fails() {
        let (mut tree, [a, ..]) = sample();
        assert_eq!(
            tree.add_child(a, Node::leaf("x")),
            Err(MoveError::InvalidDestination(a))
        );
    }

    #[test]
    fn test_level() {
        let (tree, [a, b, c, ..]) = sample();
        assert_eq!(tree.level(a), 0);
        assert_eq!(tree.level(b), 0);
        assert_eq!(tree.level(c), 1);
    }

    #[test]
    fn test_move_within_same_parent_forward() {
        let (mut tree, [a, ..]) = sample();
        // Put A after E: index 3 in the root list before detaching.
        tree.move_nodes(&[a], None, 3).unwrap();
        assert_eq!(order(&tree), vec!["B", "C", "D", "E", "A"]);
    }

    #[test]
    fn test_move_into_container_keeps_order() {
        let (mut tree, [a, b, _, _, e]) = sample();
        tree.move_nodes(&[a, e], Some(b), 1).unwrap();
        assert_eq!(order(&tree), vec!["B", "C", "A", "E", "D"]);
        assert_eq!(tree.parent(a), Some(b));
        assert_eq!(tree.level(e), 1);
    }

    #[test]
    fn test_move_out_of_container() {
        let (mut tree, [_, _, c, d, _]) = sample();
        tree.move_nodes(&[c, d], None, 0).unwrap();
        assert_eq!(order(&tree), vec!["C", "D", "A", "B", "E"]);
        assert_eq!(tree.parent(c), None);
    }

    #[test]
    fn test_move_into_own_subtree_fails() {
        let mut tree = NodeTree::new();
        let outer = tree.add_root(Node::container("outer"));
        let inner = tree.add_child(outer, Node::container("inner")).unwrap();
        assert_eq!(
            tree.move_nodes(&[outer], Some(inner), 0),
            Err(MoveError::WouldCreateCycle(outer))
        );
        assert_eq!(tree.parent(inner), Some(outer));
    }

    #[test]
    fn test_move_rejects_bad_index() {
        let (mut tree, [a, b, ..]) = sample();
        assert_eq!(
            tree.move_nodes(&[a], Some(b), 5),
            Err(MoveError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_edit_round_trip() {
        let (mut tree, [a, ..]) = sample();
        tree.begin_edit(a, None);
        assert!(tree.is_in_edit_mode(a));
        assert_eq!(tree.draft(a), Some("A"));
        tree.set_draft(a, "--flag");
        tree.commit_edit(a);
        assert!(!tree.is_in_edit_mode(a));
        assert_eq!(tree.node(a).unwrap().label, "--flag");
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let (mut tree, [a, ..]) = sample();
        tree.begin_edit(a, Some("x"));
        tree.cancel_edit(a);
        assert!(!tree.is_in_edit_mode(a));
        assert_eq!(tree.node(a).unwrap().label, "A");
    }
}
