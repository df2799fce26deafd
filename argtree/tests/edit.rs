use argtree::{
    EventResult, InlineEditor, InteractionConfig, Key, Modifiers, MouseButton, MoveError, Node,
    NodeId, NodeTree, NodeView, TreeController, TreeMutator,
};

/// Host that logs structural calls in the order they arrive.
#[derive(Default)]
struct RecordingHost {
    tree: NodeTree,
    events: Vec<String>,
}

impl RecordingHost {
    fn label(&self, id: NodeId) -> String {
        self.tree
            .node(id)
            .map(|n| n.label.clone())
            .unwrap_or_default()
    }
}

impl NodeView for RecordingHost {
    fn roots(&self) -> &[NodeId] {
        self.tree.roots()
    }
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }
    fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }
    fn contains(&self, id: NodeId) -> bool {
        self.tree.contains(id)
    }
    fn is_container(&self, id: NodeId) -> bool {
        self.tree.is_container(id)
    }
    fn is_expanded(&self, id: NodeId) -> bool {
        self.tree.is_expanded(id)
    }
    fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        let event = format!("expanded {} = {}", self.label(id), expanded);
        self.events.push(event);
        self.tree.set_expanded(id, expanded)
    }
    fn is_selected(&self, id: NodeId) -> bool {
        self.tree.is_selected(id)
    }
    fn set_selected(&mut self, id: NodeId, selected: bool) {
        self.tree.set_selected(id, selected)
    }
    fn is_editable(&self, id: NodeId) -> bool {
        self.tree.is_editable(id)
    }
    fn is_in_edit_mode(&self, id: NodeId) -> bool {
        self.tree.is_in_edit_mode(id)
    }
    fn is_checked(&self, id: NodeId) -> bool {
        self.tree.is_checked(id)
    }
    fn set_checked(&mut self, id: NodeId, checked: bool) {
        self.tree.set_checked(id, checked)
    }
}

impl TreeMutator for RecordingHost {
    fn move_nodes(
        &mut self,
        nodes: &[NodeId],
        destination_parent: Option<NodeId>,
        destination_index: usize,
    ) -> Result<(), MoveError> {
        self.events.push(format!("move {}", nodes.len()));
        self.tree.move_nodes(nodes, destination_parent, destination_index)
    }
}

impl InlineEditor for RecordingHost {
    fn begin_edit(&mut self, id: NodeId, initial_text: Option<&str>) {
        let event = format!("begin {}", self.label(id));
        self.events.push(event);
        self.tree.begin_edit(id, initial_text)
    }

    fn commit_edit(&mut self, id: NodeId) {
        let event = format!("commit {}", self.label(id));
        self.events.push(event);
        self.tree.commit_edit(id)
    }
}

/// A, B[C, D], E
fn sample() -> (RecordingHost, [NodeId; 5]) {
    let mut host = RecordingHost::default();
    let tree = &mut host.tree;
    let a = tree.add_root(Node::leaf("A"));
    let b = tree.add_root(Node::container("B"));
    let c = tree.add_child(b, Node::leaf("C")).unwrap();
    let d = tree.add_child(b, Node::leaf("D")).unwrap();
    let e = tree.add_root(Node::leaf("E"));
    (host, [a, b, c, d, e])
}

// ============================================================================
// Structural boundaries
// ============================================================================

#[test]
fn test_collapse_commits_before_state_change() {
    let (mut host, [_, b, ..]) = sample();
    let mut ctrl = TreeController::default();
    host.tree.begin_edit(b, None);
    host.tree.set_draft(b, "Group");

    assert!(ctrl.set_expanded(&mut host, b, false));
    assert_eq!(host.events, vec!["commit B", "expanded Group = false"]);
    assert!(!host.is_in_edit_mode(b));
}

#[test]
fn test_expand_commits_before_state_change() {
    let (mut host, [_, b, ..]) = sample();
    let mut ctrl = TreeController::default();
    host.tree.set_expanded(b, false);
    host.tree.begin_edit(b, Some("X"));

    assert!(ctrl.set_expanded(&mut host, b, true));
    assert_eq!(host.events, vec!["commit B", "expanded X = true"]);
}

#[test]
fn test_no_commit_when_not_editing() {
    let (mut host, [_, b, ..]) = sample();
    let mut ctrl = TreeController::default();

    ctrl.set_expanded(&mut host, b, false);
    assert_eq!(host.events, vec!["expanded B = false"]);
}

#[test]
fn test_unchanged_expansion_is_a_no_op() {
    let (mut host, [a, b, ..]) = sample();
    let mut ctrl = TreeController::default();
    host.tree.begin_edit(b, None);

    assert!(!ctrl.set_expanded(&mut host, b, true));
    assert!(!ctrl.set_expanded(&mut host, a, false));
    assert!(host.events.is_empty());
    assert!(host.is_in_edit_mode(b));
}

#[test]
fn test_double_click_collapse_commits_first() {
    let (mut host, [_, b, ..]) = sample();
    let mut ctrl = TreeController::default();
    host.tree.begin_edit(b, None);

    ctrl.on_mouse_down(&mut host, b, MouseButton::Left, Modifiers::NONE, 2);
    assert_eq!(host.events, vec!["commit B", "expanded B = false"]);
}

#[test]
fn test_background_click_commits_visible_only() {
    let (mut host, [a, b, c, ..]) = sample();
    let mut ctrl = TreeController::default();
    host.tree.begin_edit(a, None);
    host.tree.begin_edit(c, None);
    host.tree.set_expanded(b, false);

    assert_eq!(
        ctrl.on_mouse_up(&mut host, None, Modifiers::NONE),
        EventResult::Consumed
    );
    assert_eq!(host.events, vec!["commit A"]);
    assert!(host.is_in_edit_mode(c));
}

#[test]
fn test_background_commit_can_be_disabled() {
    let (mut host, [a, ..]) = sample();
    let config = InteractionConfig {
        commit_edits_on_background_click: false,
        ..InteractionConfig::default()
    };
    let mut ctrl = TreeController::new(config);
    host.tree.begin_edit(a, None);

    assert_eq!(
        ctrl.on_mouse_up(&mut host, None, Modifiers::NONE),
        EventResult::Ignored
    );
    assert!(host.is_in_edit_mode(a));
}

// ============================================================================
// Starting edits
// ============================================================================

#[test]
fn test_text_input_starts_edit_with_text() {
    let (mut host, [a, ..]) = sample();
    let mut ctrl = TreeController::default();
    ctrl.focus(a);

    assert!(ctrl.on_text_input(&mut host, "x").is_consumed());
    assert_eq!(host.tree.draft(a), Some("x"));
    // Already editing.
    assert_eq!(ctrl.on_text_input(&mut host, "y"), EventResult::Ignored);
}

#[test]
fn test_control_text_does_not_start_edit() {
    let (mut host, [a, ..]) = sample();
    let mut ctrl = TreeController::default();
    ctrl.focus(a);

    assert_eq!(ctrl.on_text_input(&mut host, "\u{7}"), EventResult::Ignored);
    assert_eq!(ctrl.on_text_input(&mut host, ""), EventResult::Ignored);
    assert!(host.events.is_empty());
}

#[test]
fn test_read_only_node_never_edits() {
    let mut host = RecordingHost::default();
    let fixed = host.tree.add_root(Node::leaf("fixed").editable(false));
    let mut ctrl = TreeController::default();
    ctrl.focus(fixed);

    assert_eq!(
        ctrl.on_key(&mut host, Key::F(2), Modifiers::NONE),
        EventResult::Ignored
    );
    assert_eq!(ctrl.on_text_input(&mut host, "a"), EventResult::Ignored);
    assert!(host.events.is_empty());
}

#[test]
fn test_click_edit_needs_single_selection() {
    let (mut host, [a, _, _, _, e]) = sample();
    let mut ctrl = TreeController::default();
    ctrl.on_mouse_down(&mut host, a, MouseButton::Left, Modifiers::NONE, 1);
    ctrl.on_mouse_up(&mut host, Some(a), Modifiers::NONE);
    ctrl.on_mouse_down(&mut host, e, MouseButton::Left, Modifiers::CTRL, 1);
    ctrl.on_mouse_up(&mut host, Some(e), Modifiers::CTRL);

    // e is focused but two rows are selected.
    ctrl.on_mouse_down(&mut host, e, MouseButton::Left, Modifiers::NONE, 1);
    assert!(!host.is_in_edit_mode(e));

    // Release collapses to e; the next click edits.
    ctrl.on_mouse_up(&mut host, Some(e), Modifiers::NONE);
    ctrl.on_mouse_down(&mut host, e, MouseButton::Left, Modifiers::NONE, 1);
    assert!(host.is_in_edit_mode(e));
}

#[test]
fn test_ctrl_click_on_focused_row_does_not_edit() {
    let (mut host, [a, ..]) = sample();
    let mut ctrl = TreeController::default();
    ctrl.on_mouse_down(&mut host, a, MouseButton::Left, Modifiers::NONE, 1);
    ctrl.on_mouse_up(&mut host, Some(a), Modifiers::NONE);

    ctrl.on_mouse_down(&mut host, a, MouseButton::Left, Modifiers::CTRL, 1);
    assert!(!host.is_in_edit_mode(a));
}

#[test]
fn test_select_all_works_while_editing() {
    let (mut host, [a, ..]) = sample();
    let mut ctrl = TreeController::default();
    ctrl.focus(a);
    ctrl.on_key(&mut host, Key::Enter, Modifiers::NONE);
    assert!(host.is_in_edit_mode(a));

    assert!(ctrl.on_key(&mut host, Key::Char('a'), Modifiers::CTRL).is_consumed());
    assert_eq!(ctrl.selected_nodes(&host).len(), 5);
    assert!(host.is_in_edit_mode(a));

    // Other keys still belong to the editor.
    assert_eq!(
        ctrl.on_key(&mut host, Key::Space, Modifiers::NONE),
        EventResult::Ignored
    );
    assert!(!host.is_checked(a));
}
