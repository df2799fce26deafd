//! Widget-level coordinator.
//!
//! `TreeController` is what a host wires its raw event dispatch to. It owns
//! one [`SelectionController`] and one [`DragReorderController`], tracks
//! keyboard focus, and decides which of them (and which inline-edit boundary)
//! an event belongs to. The host tree is passed in on every call.

use log::debug;

use crate::config::InteractionConfig;
use crate::drag::{
    DragPayload, DragReorderController, DropEffect, DropIndicator, DropOutcome, DropProbe,
};
use crate::edit::{self, InlineEditor};
use crate::input::{DragAction, Key, Modifiers, MouseButton};
use crate::mutate::TreeMutator;
use crate::node::NodeId;
use crate::selection::SelectionController;
use crate::view::{FlattenedView, NodeView};

/// Everything the controller needs from the host tree.
pub trait TreeHost: NodeView + TreeMutator + InlineEditor {}

impl<T: NodeView + TreeMutator + InlineEditor + ?Sized> TreeHost for T {}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled, stop propagation
    Consumed,
    /// Event was not handled, continue propagation
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// Interaction state for one tree instance.
#[derive(Debug, Clone)]
pub struct TreeController {
    selection: SelectionController,
    drag: DragReorderController,
    focused: Option<NodeId>,
    config: InteractionConfig,
    /// Set whenever something the renderer shows changed.
    dirty: bool,
}

impl Default for TreeController {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl TreeController {
    pub fn new(config: InteractionConfig) -> Self {
        let drag = DragReorderController::new(config.drag_format.clone(), config.drop_edge_ratio);
        Self {
            selection: SelectionController::new(),
            drag,
            focused: None,
            config,
            dirty: false,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn drag(&self) -> &DragReorderController {
        &self.drag
    }

    /// Row with keyboard focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus without touching the selection (programmatic or Tab
    /// focus).
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.focused == Some(id) {
            return false;
        }
        self.focused = Some(id);
        self.dirty = true;
        true
    }

    /// The tree was replaced: drop the anchor, the pending press, any drag
    /// and the focus.
    pub fn rebuild(&mut self) {
        self.selection.reset();
        self.drag.cancel();
        self.focused = None;
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Selected nodes in tree order.
    pub fn selected_nodes<V: NodeView + ?Sized>(&self, view: &V) -> Vec<NodeId> {
        self.selection.selected_nodes(view)
    }

    /// Drop target and position to decorate while dragging.
    pub fn current_drop_indicator(&self) -> Option<DropIndicator> {
        self.drag.current_drop_indicator()
    }

    /// Node shown on a given row.
    pub fn node_at_row<V: NodeView + ?Sized>(&self, view: &V, row: usize) -> Option<NodeId> {
        FlattenedView::visible(view).get(row)
    }

    /// Row a node is shown on, `None` if collapsed away.
    pub fn row_of<V: NodeView + ?Sized>(&self, view: &V, id: NodeId) -> Option<usize> {
        FlattenedView::visible(view).position(id)
    }

    /// Check if anything shown changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // -------------------------------------------------------------------------
    // Mouse
    // -------------------------------------------------------------------------

    /// Mouse button pressed on a row. Only the primary button is handled.
    ///
    /// Runs the press half of the selection protocol, then either starts an
    /// inline edit (click on the already focused, only selected row) or
    /// focuses the row, toggling a container on double click.
    pub fn on_mouse_down<H: TreeHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: NodeId,
        button: MouseButton,
        modifiers: Modifiers,
        click_count: u8,
    ) -> EventResult {
        if button != MouseButton::Left || !host.contains(target) {
            return EventResult::Ignored;
        }
        let had_focus = self.focused == Some(target);
        self.selection.handle_activate_press(host, target, modifiers);

        let single_selected = self.selection.selected_nodes(&*host).len() == 1;
        let odd_click = click_count % 2 == 1;
        if self.config.edit_on_click
            && had_focus
            && !modifiers.ctrl
            && single_selected
            && (odd_click || !host.is_container(target))
            && edit::begin_edit(host, target)
        {
            debug!("Click on focused {} started an edit", target);
        } else {
            if !odd_click && host.is_container(target) {
                let expanded = host.is_expanded(target);
                self.set_expanded(host, target, !expanded);
            }
            self.focused = Some(target);
        }
        self.dirty = true;
        EventResult::Consumed
    }

    /// Primary button released, over a row or over the tree background.
    pub fn on_mouse_up<H: TreeHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: Option<NodeId>,
        modifiers: Modifiers,
    ) -> EventResult {
        match target {
            Some(target) => {
                self.selection.handle_activate_release(host, target, modifiers);
                self.dirty = true;
                EventResult::Consumed
            }
            None => {
                self.selection.cancel_press();
                if self.config.commit_edits_on_background_click
                    && edit::commit_visible_edits(host) > 0
                {
                    self.dirty = true;
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    /// Pointer moved over `target` with `button` held. Starts a drag of the
    /// selection when the primary button is held on a selected row.
    pub fn on_mouse_drag<V: NodeView + ?Sized>(
        &mut self,
        view: &V,
        target: NodeId,
        button: MouseButton,
    ) -> Option<DragPayload> {
        let primary_held = button == MouseButton::Left;
        let payload = self.drag.begin_drag(view, target, primary_held)?;
        self.selection.cancel_press();
        self.dirty = true;
        Some(payload)
    }

    // -------------------------------------------------------------------------
    // Drag and drop
    // -------------------------------------------------------------------------

    pub fn on_drag_enter<V: NodeView + ?Sized>(
        &mut self,
        view: &V,
        target: NodeId,
        payload: &DragPayload,
        probe: DropProbe,
    ) -> DropEffect {
        let effect = self.drag.drag_enter(view, target, payload, probe);
        if effect == DropEffect::Move {
            self.dirty = true;
        }
        effect
    }

    pub fn on_drag_over<V: NodeView + ?Sized>(
        &mut self,
        view: &V,
        target: NodeId,
        payload: &DragPayload,
        probe: DropProbe,
    ) -> DropEffect {
        let effect = self.drag.drag_over(view, target, payload, probe);
        if effect == DropEffect::Move {
            self.dirty = true;
        }
        effect
    }

    pub fn on_drag_leave(&mut self, target: NodeId) {
        self.drag.drag_leave(target);
        self.dirty = true;
    }

    pub fn on_drop<H: TreeHost + ?Sized>(&mut self, host: &mut H, target: NodeId) -> DropOutcome {
        let outcome = self.drag.drop_on(host, target);
        self.dirty = true;
        outcome
    }

    pub fn on_query_continue(&mut self, escape_pressed: bool, action: DragAction) -> DragAction {
        let action = self.drag.query_continue(escape_pressed, action);
        if action == DragAction::Cancel {
            self.dirty = true;
        }
        action
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Key pressed while the tree has focus.
    pub fn on_key<H: TreeHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        if key == Key::Escape && self.drag.cancel() {
            self.dirty = true;
            return EventResult::Consumed;
        }
        if modifiers.ctrl && matches!(key, Key::Char('a') | Key::Char('A')) {
            self.selection.handle_select_all(host);
            self.dirty = true;
            return EventResult::Consumed;
        }
        // Past this point the inline editor owns the keyboard while it is open.
        if self.focused.is_some_and(|f| host.is_in_edit_mode(f)) {
            return EventResult::Ignored;
        }

        match key {
            Key::Space if !modifiers.ctrl && !modifiers.alt => self.toggle_checked(host),
            Key::Enter | Key::F(2) => match self.focused {
                Some(focused) if edit::begin_edit(host, focused) => {
                    self.dirty = true;
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            key if key.is_navigation() && !modifiers.ctrl && !modifiers.alt => {
                self.navigate(host, key, modifiers)
            }
            _ => EventResult::Ignored,
        }
    }

    /// Typed text while the tree has focus.
    pub fn on_text_input<H: TreeHost + ?Sized>(&mut self, host: &mut H, text: &str) -> EventResult {
        match self.focused {
            Some(focused) if edit::begin_edit_from_text(host, focused, text) => {
                self.dirty = true;
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Keyboard focus arrived on `target`. Only navigation keys change the
    /// selection.
    pub fn on_focus_changed<H: TreeHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: NodeId,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        if !host.contains(target) {
            return EventResult::Ignored;
        }
        self.focused = Some(target);
        self.selection.handle_focus_navigated(host, target, key, modifiers);
        self.dirty = true;
        EventResult::Consumed
    }

    /// Move focus over the shown rows, expanding/collapsing on Left/Right.
    fn navigate<H: TreeHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        let visible = FlattenedView::visible(&*host);
        if visible.is_empty() {
            return EventResult::Ignored;
        }
        let last = visible.len() - 1;
        let page = self.config.page_size;
        let current = self.focused.and_then(|f| visible.position(f));

        let new_index = match (key, current) {
            (Key::Home, _) => 0,
            (Key::End, _) => last,
            (Key::Up, Some(i)) => i.saturating_sub(1),
            (Key::Down, Some(i)) => (i + 1).min(last),
            (Key::PageUp, Some(i)) => i.saturating_sub(page),
            (Key::PageDown, Some(i)) => (i + page).min(last),
            (Key::Left, Some(i)) => {
                let Some(node) = visible.get(i) else {
                    return EventResult::Ignored;
                };
                if host.is_container(node) && host.is_expanded(node) {
                    self.set_expanded(host, node, false);
                    return EventResult::Consumed;
                }
                match host.parent(node).and_then(|p| visible.position(p)) {
                    Some(parent) => parent,
                    None => return EventResult::Ignored,
                }
            }
            (Key::Right, Some(i)) => {
                let Some(node) = visible.get(i) else {
                    return EventResult::Ignored;
                };
                if !host.is_container(node) || host.children(node).is_empty() {
                    return EventResult::Ignored;
                }
                if !host.is_expanded(node) {
                    self.set_expanded(host, node, true);
                    return EventResult::Consumed;
                }
                i + 1
            }
            (_, None) => 0,
            _ => return EventResult::Ignored,
        };

        if current == Some(new_index) {
            return EventResult::Ignored;
        }
        let Some(target) = visible.get(new_index) else {
            return EventResult::Ignored;
        };
        self.on_focus_changed(host, target, key, modifiers)
    }

    /// Space on a focused row: check or uncheck every selected node. All are
    /// checked if none was, otherwise all are unchecked.
    fn toggle_checked<H: TreeHost + ?Sized>(&mut self, host: &mut H) -> EventResult {
        if self.focused.is_none() {
            return EventResult::Ignored;
        }
        let selected = self.selection.selected_nodes(&*host);
        if selected.is_empty() || selected.iter().any(|&id| host.is_in_edit_mode(id)) {
            return EventResult::Ignored;
        }
        let check = selected.iter().all(|&id| !host.is_checked(id));
        for &id in &selected {
            host.set_checked(id, check);
        }
        debug!("Set checked = {} on {} node(s)", check, selected.len());
        self.dirty = true;
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Expand / collapse
    // -------------------------------------------------------------------------

    /// Expand or collapse a container, committing a pending edit on it first.
    ///
    /// Collapsing moves selection out of the hidden subtree: selected
    /// descendants are cleared and, if nothing else stays selected, the
    /// container itself is selected. Returns true if the state changed.
    pub fn set_expanded<H: TreeHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: NodeId,
        expanded: bool,
    ) -> bool {
        if !edit::set_expanded_committing(host, id, expanded) {
            return false;
        }
        self.dirty = true;
        if !expanded {
            self.after_collapse(host, id);
        }
        true
    }

    fn after_collapse<H: TreeHost + ?Sized>(&mut self, host: &mut H, id: NodeId) {
        let mut cleared = false;
        let mut stack: Vec<NodeId> = host.children(id).to_vec();
        while let Some(child) = stack.pop() {
            if host.is_selected(child) {
                host.set_selected(child, false);
                cleared = true;
            }
            stack.extend_from_slice(host.children(child));
        }
        let focus_hidden = self.focused.is_some_and(|f| host.is_ancestor_of(id, f));

        let selected = self.selection.selected_nodes(&*host);
        if cleared && selected.is_empty() {
            debug!("Collapse of {} moved selection to it", id);
            host.set_selected(id, true);
            if focus_hidden {
                self.focused = Some(id);
            }
        } else if let Some(&first) = selected.first() {
            self.focused = Some(first);
        } else if focus_hidden {
            self.focused = Some(id);
        }
    }
}
