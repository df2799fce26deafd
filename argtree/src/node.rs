//! Node identity and per-row state.

use std::fmt;

/// Stable identifier for a node in a tree.
///
/// Ids are handed out by the host tree and never reused while the tree
/// lives, so controllers may hold them across events (anchor, press target,
/// dragged items) without keeping the nodes alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Create an id from a raw index.
    ///
    /// Hosts implementing [`NodeView`](crate::view::NodeView) on their own
    /// storage use this to mint ids.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two kinds of rows a tree shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeKind {
    /// A single argument. Never has children.
    #[default]
    Leaf,
    /// A group of arguments (project, folder). May be expanded or collapsed
    /// and accepts drops "inside".
    Container,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Container)
    }
}

/// A row in a [`NodeTree`](crate::tree::NodeTree).
#[derive(Debug, Clone)]
pub struct Node {
    /// Leaf or container.
    pub kind: NodeKind,
    /// Display text, and the committed value of an inline edit.
    pub label: String,
    /// Selection flag, owned by the selection controller.
    pub is_selected: bool,
    /// Whether children are shown. Always false for leaves.
    pub is_expanded: bool,
    /// Whether the label may be edited inline.
    pub is_editable: bool,
    /// Whether an inline edit is in progress.
    pub is_in_edit_mode: bool,
    /// Whether the argument is enabled (the row checkbox).
    pub is_checked: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Create an editable leaf.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Leaf, label)
    }

    /// Create an editable, expanded container.
    pub fn container(label: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Container, label);
        node.is_expanded = true;
        node
    }

    fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            is_selected: false,
            is_expanded: false,
            is_editable: true,
            is_in_edit_mode: false,
            is_checked: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builder: set the expanded flag (ignored for leaves).
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.is_expanded = expanded && self.kind.is_container();
        self
    }

    /// Builder: set the editable flag.
    pub fn editable(mut self, editable: bool) -> Self {
        self.is_editable = editable;
        self
    }

    /// Builder: set the checked flag.
    pub fn checked(mut self, checked: bool) -> Self {
        self.is_checked = checked;
        self
    }

    /// The parent node, if this is not a root-level node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
