//! Multi-selection state for a whole tree.
//!
//! Selection lives on the nodes (`is_selected`), so collapsed subtrees and
//! the renderer see the same flags. The controller itself only remembers the
//! anchor for range selection and the target of the last press.
//!
//! A press on a row that is already part of a multi-selection does not
//! collapse the selection right away: the user may be about to drag the
//! whole set. The collapse to a single row happens on release, and only if
//! the release lands on the pressed row without a drag in between.

use log::debug;

use crate::input::{Key, Modifiers};
use crate::node::NodeId;
use crate::view::{FlattenedView, NodeView};

/// Translates clicks and navigation into selection changes.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    /// Endpoint for Shift range selection.
    anchor: Option<NodeId>,
    /// Row that received the last activate-press.
    press_target: Option<NodeId>,
}

impl SelectionController {
    /// Create a controller with no anchor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the anchor for range selection.
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    /// Get the row of the pending press, if any.
    pub fn press_target(&self) -> Option<NodeId> {
        self.press_target
    }

    /// Forget the anchor and pending press (the tree was rebuilt).
    pub fn reset(&mut self) {
        self.anchor = None;
        self.press_target = None;
    }

    /// Forget the pending press. Called when a drag starts so the matching
    /// release does not collapse the selection that is being dragged.
    pub fn cancel_press(&mut self) {
        self.press_target = None;
    }

    /// Selected nodes in tree order, collapsed ones included.
    pub fn selected_nodes<V: NodeView + ?Sized>(&self, view: &V) -> Vec<NodeId> {
        FlattenedView::all(view)
            .iter()
            .filter(|&id| view.is_selected(id))
            .collect()
    }

    /// Number of selected nodes, stopping at `limit`.
    fn selected_count<V: NodeView + ?Sized>(view: &V, limit: usize) -> usize {
        FlattenedView::all(view)
            .iter()
            .filter(|&id| view.is_selected(id))
            .take(limit)
            .count()
    }

    /// Core click semantics.
    ///
    /// Without Ctrl every node is cleared first, including nodes inside
    /// collapsed subtrees. With Shift and an anchor, the visible range between
    /// anchor and target is added and the anchor stays where it was.
    /// Otherwise the target is toggled and becomes the new anchor.
    pub fn handle_primary_activate<V: NodeView + ?Sized>(
        &mut self,
        view: &mut V,
        target: NodeId,
        modifiers: Modifiers,
    ) {
        if !modifiers.ctrl {
            for id in FlattenedView::all(&*view) {
                view.set_selected(id, false);
            }
        }

        match self.anchor {
            Some(anchor) if modifiers.shift => {
                let range = Self::visible_range(&*view, anchor, target);
                debug!(
                    "Range select {} -> {}: {} node(s)",
                    anchor,
                    target,
                    range.len()
                );
                for id in range {
                    view.set_selected(id, true);
                }
            }
            _ => {
                let selected = !modifiers.ctrl || !view.is_selected(target);
                view.set_selected(target, selected);
                self.anchor = Some(target);
                debug!("Select {} = {} (anchor updated)", target, selected);
            }
        }
    }

    /// Inclusive range between `anchor` and `target` over the shown rows.
    ///
    /// Degrades instead of failing: when only one endpoint is shown the range
    /// is that endpoint alone, when neither is shown it is empty.
    fn visible_range<V: NodeView + ?Sized>(
        view: &V,
        anchor: NodeId,
        target: NodeId,
    ) -> Vec<NodeId> {
        let visible = FlattenedView::visible(view);
        let (start, end) = match (visible.position(anchor), visible.position(target)) {
            (Some(a), Some(t)) => (a.min(t), a.max(t)),
            (Some(a), None) => (a, a),
            (None, Some(t)) => (t, t),
            (None, None) => return Vec::new(),
        };
        visible.as_slice()[start..=end].to_vec()
    }

    /// Button-down half of the two-phase click.
    ///
    /// The selection is only changed right away when a modifier is held,
    /// when there is no multi-selection to preserve, or when the pressed row
    /// is not part of it.
    pub fn handle_activate_press<V: NodeView + ?Sized>(
        &mut self,
        view: &mut V,
        target: NodeId,
        modifiers: Modifiers,
    ) {
        self.press_target = Some(target);
        if modifiers.extends_selection()
            || Self::selected_count(&*view, 2) < 2
            || !view.is_selected(target)
        {
            self.handle_primary_activate(view, target, modifiers);
        } else {
            debug!("Press on {} keeps multi-selection", target);
        }
    }

    /// Button-up half of the two-phase click.
    ///
    /// Collapses a multi-selection to `target` when the press landed on the
    /// same row and no modifier is held.
    pub fn handle_activate_release<V: NodeView + ?Sized>(
        &mut self,
        view: &mut V,
        target: NodeId,
        modifiers: Modifiers,
    ) {
        let pressed = self.press_target.take();
        if modifiers.extends_selection() || Self::selected_count(&*view, 2) < 2 {
            return;
        }
        if pressed != Some(target) {
            return;
        }
        debug!("Release on {} collapses multi-selection", target);
        self.handle_primary_activate(view, target, Modifiers::NONE);
    }

    /// Ctrl+A: select every node, including collapsed-away ones.
    pub fn handle_select_all<V: NodeView + ?Sized>(&mut self, view: &mut V) {
        let all = FlattenedView::all(&*view);
        debug!("Select all: {} node(s)", all.len());
        for id in all {
            view.set_selected(id, true);
        }
    }

    /// Keyboard focus moved to `target` because of `key`.
    ///
    /// Navigation keys behave like a plain (or Shift) click on the new row.
    /// Any other focus change, notably Tab, leaves the selection alone.
    pub fn handle_focus_navigated<V: NodeView + ?Sized>(
        &mut self,
        view: &mut V,
        target: NodeId,
        key: Key,
        modifiers: Modifiers,
    ) {
        if !key.is_navigation() {
            return;
        }
        let modifiers = Modifiers {
            ctrl: false,
            shift: modifiers.shift,
            alt: false,
        };
        self.handle_primary_activate(view, target, modifiers);
    }
}
