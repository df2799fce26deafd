//! Read-side tree capability used by the controllers.
//!
//! Controllers never see the host's storage. They walk the tree and flip
//! per-node flags through [`NodeView`], and linearize it with
//! [`FlattenedView`].

use crate::node::NodeId;

/// Capability interface over a host tree.
///
/// Implemented per host; [`NodeTree`](crate::tree::NodeTree) is the
/// reference implementation. Lookups on ids the host does not know must be
/// harmless: queries return `false`/empty and setters do nothing.
pub trait NodeView {
    /// Root-level nodes in display order.
    fn roots(&self) -> &[NodeId];

    /// Parent of a node, `None` for root-level nodes.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Ordered children of a node.
    fn children(&self, id: NodeId) -> &[NodeId];

    /// Whether the host knows this id.
    fn contains(&self, id: NodeId) -> bool;

    /// Whether the node is a container (may hold children, accepts
    /// drops inside).
    fn is_container(&self, id: NodeId) -> bool;

    fn is_expanded(&self, id: NodeId) -> bool;
    fn set_expanded(&mut self, id: NodeId, expanded: bool);

    fn is_selected(&self, id: NodeId) -> bool;
    fn set_selected(&mut self, id: NodeId, selected: bool);

    fn is_editable(&self, id: NodeId) -> bool;
    fn is_in_edit_mode(&self, id: NodeId) -> bool;

    fn is_checked(&self, id: NodeId) -> bool;
    fn set_checked(&mut self, id: NodeId, checked: bool);

    /// Depth of a node, 0 for root-level nodes.
    fn level(&self, id: NodeId) -> usize {
        let mut level = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            level += 1;
            current = self.parent(parent);
        }
        level
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Position of a node among its siblings.
    fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let siblings = match self.parent(id) {
            Some(parent) => self.children(parent),
            None => self.roots(),
        };
        siblings.iter().position(|&sibling| sibling == id)
    }
}

/// Depth-first, pre-order linearization of a tree.
///
/// Recomputed on demand so it always reflects the live expand/collapse
/// state. With `include_collapsed = false` only nodes whose whole ancestor
/// chain is expanded are kept; the relative order of any two nodes is the
/// same in both variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedView {
    nodes: Vec<NodeId>,
    include_collapsed: bool,
}

impl FlattenedView {
    /// Walk `view` and collect its nodes.
    pub fn collect<V: NodeView + ?Sized>(view: &V, include_collapsed: bool) -> Self {
        let mut nodes = Vec::new();
        Self::collect_into(view, view.roots(), include_collapsed, &mut nodes);
        Self {
            nodes,
            include_collapsed,
        }
    }

    /// Every node, regardless of expansion.
    pub fn all<V: NodeView + ?Sized>(view: &V) -> Self {
        Self::collect(view, true)
    }

    /// Only rows that are currently shown.
    pub fn visible<V: NodeView + ?Sized>(view: &V) -> Self {
        Self::collect(view, false)
    }

    fn collect_into<V: NodeView + ?Sized>(
        view: &V,
        items: &[NodeId],
        include_collapsed: bool,
        out: &mut Vec<NodeId>,
    ) {
        for &id in items {
            out.push(id);
            if include_collapsed || view.is_expanded(id) {
                Self::collect_into(view, view.children(id), include_collapsed, out);
            }
        }
    }

    pub fn includes_collapsed(&self) -> bool {
        self.include_collapsed
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// Index of a node, `None` if it is not part of this view.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl IntoIterator for FlattenedView {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// Selected nodes that have no selected ancestor, in tree order.
///
/// Moving a node moves its subtree, so a selected descendant of a selected
/// node is already covered and must not be moved on its own.
pub fn topmost_selected<V: NodeView + ?Sized>(view: &V) -> Vec<NodeId> {
    FlattenedView::all(view)
        .iter()
        .filter(|&id| view.is_selected(id))
        .filter(|&id| {
            let mut current = view.parent(id);
            while let Some(parent) = current {
                if view.is_selected(parent) {
                    return false;
                }
                current = view.parent(parent);
            }
            true
        })
        .collect()
}
