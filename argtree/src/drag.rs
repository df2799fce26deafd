//! Drag-and-drop reordering of selected rows.
//!
//! State machine: `Idle -> Dragging -> {Dropped | Cancelled} -> Idle`. A
//! [`DragSession`] exists only while dragging and is torn down exactly once
//! per gesture, whatever the outcome.
//!
//! The payload handed to the platform only carries a format tag. The set of
//! dragged nodes is read from the controller, never from the payload.

use log::{debug, trace, warn};

use crate::error::MoveError;
use crate::input::DragAction;
use crate::mutate::{Destination, TreeMutator};
use crate::node::NodeId;
use crate::view::{NodeView, topmost_selected};

/// Format tag identifying an internal tree reorder.
pub const INTERNAL_REORDER_FORMAT: &str = "argtree/internal-reorder";

/// Where the dragged nodes land relative to the row under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Sibling, in front of the target.
    Before,
    /// Sibling, right after the target.
    After,
    /// Last child of the target. Only for containers.
    Inside,
}

/// Drop feedback for the host (cursor shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    /// The drag is accepted as a move.
    Move,
    /// Not ours; the host shows the "no drop" cursor.
    None,
}

/// Opaque data put on the platform drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub format: String,
}

impl DragPayload {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

/// Pointer position inside the candidate row's header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropProbe {
    /// Vertical offset from the top of the header.
    pub offset: f32,
    /// Height of the header.
    pub height: f32,
}

impl DropProbe {
    pub fn new(offset: f32, height: f32) -> Self {
        Self { offset, height }
    }

    /// Offset as a fraction of the height, clamped to `0.0..=1.0`.
    fn fraction(&self) -> f32 {
        if self.height <= 0.0 || !self.height.is_finite() || !self.offset.is_finite() {
            return 0.5;
        }
        (self.offset / self.height).clamp(0.0, 1.0)
    }
}

/// What the renderer draws while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropIndicator {
    pub target: NodeId,
    pub position: DropPosition,
}

/// State of an active drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    dragged_items: Vec<NodeId>,
    indicator: Option<DropIndicator>,
}

impl DragSession {
    /// Topmost selected nodes, in source-tree order.
    pub fn dragged_items(&self) -> &[NodeId] {
        &self.dragged_items
    }

    pub fn indicator(&self) -> Option<DropIndicator> {
        self.indicator
    }
}

/// Why a drop did not move anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// No drag was in progress.
    NotDragging,
    /// The drop target is one of the dragged nodes.
    OntoSelf,
    /// The drop target lies inside a dragged subtree.
    IntoOwnSubtree,
    /// No drag-over feedback was computed for this target.
    NoIndicator,
    /// The target is no longer in the tree.
    UnknownTarget,
}

/// Result of terminating a drag with a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The mutator moved the nodes.
    Moved {
        nodes: Vec<NodeId>,
        destination: Destination,
    },
    /// The drop was refused before reaching the mutator.
    Rejected(DropRejection),
    /// The mutator refused the move.
    Failed(MoveError),
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }
}

/// Owns the drag gesture for one tree.
#[derive(Debug, Clone)]
pub struct DragReorderController {
    session: Option<DragSession>,
    format: String,
    edge_ratio: f32,
}

impl Default for DragReorderController {
    fn default() -> Self {
        Self::new(INTERNAL_REORDER_FORMAT, 1.0 / 3.0)
    }
}

impl DragReorderController {
    /// Create a controller tagging its drags with `format`. `edge_ratio` is
    /// the share of the row height that counts as Before (top) and After
    /// (bottom); the rest is Inside.
    pub fn new(format: impl Into<String>, edge_ratio: f32) -> Self {
        Self {
            session: None,
            format: format.into(),
            edge_ratio: edge_ratio.clamp(f32::EPSILON, 0.5),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Dragged nodes, empty when idle.
    pub fn dragged_items(&self) -> &[NodeId] {
        self.session
            .as_ref()
            .map(|s| s.dragged_items.as_slice())
            .unwrap_or(&[])
    }

    /// Target and position the renderer should decorate.
    pub fn current_drop_indicator(&self) -> Option<DropIndicator> {
        self.session.as_ref().and_then(|s| s.indicator)
    }

    /// Idle -> Dragging.
    ///
    /// Starts only while the primary button is held over a selected row.
    /// Returns the payload to hand to the platform drag.
    pub fn begin_drag<V: NodeView + ?Sized>(
        &mut self,
        view: &V,
        origin: NodeId,
        primary_held: bool,
    ) -> Option<DragPayload> {
        if !primary_held || self.session.is_some() || !view.is_selected(origin) {
            return None;
        }
        let dragged_items = topmost_selected(view);
        if dragged_items.is_empty() {
            return None;
        }
        debug!(
            "Drag started from {} with {} node(s)",
            origin,
            dragged_items.len()
        );
        self.session = Some(DragSession {
            dragged_items,
            indicator: None,
        });
        Some(DragPayload::new(self.format.clone()))
    }

    /// Pointer entered a candidate row.
    pub fn drag_enter<V: NodeView + ?Sized>(
        &mut self,
        view: &V,
        candidate: NodeId,
        payload: &DragPayload,
        probe: DropProbe,
    ) -> DropEffect {
        self.update_target(view, candidate, payload, probe)
    }

    /// Pointer moved over a candidate row.
    pub fn drag_over<V: NodeView + ?Sized>(
        &mut self,
        view: &V,
        candidate: NodeId,
        payload: &DragPayload,
        probe: DropProbe,
    ) -> DropEffect {
        self.update_target(view, candidate, payload, probe)
    }

    fn update_target<V: NodeView + ?Sized>(
        &mut self,
        view: &V,
        candidate: NodeId,
        payload: &DragPayload,
        probe: DropProbe,
    ) -> DropEffect {
        if payload.format != self.format {
            return DropEffect::None;
        }
        let edge_ratio = self.edge_ratio;
        let Some(session) = self.session.as_mut() else {
            return DropEffect::None;
        };
        let position = Self::position_for(view.is_container(candidate), probe, edge_ratio);
        trace!("Drag over {}: {:?}", candidate, position);
        session.indicator = Some(DropIndicator {
            target: candidate,
            position,
        });
        DropEffect::Move
    }

    fn position_for(is_container: bool, probe: DropProbe, edge_ratio: f32) -> DropPosition {
        let fraction = probe.fraction();
        if fraction < edge_ratio {
            DropPosition::Before
        } else if fraction > 1.0 - edge_ratio {
            DropPosition::After
        } else if is_container {
            DropPosition::Inside
        } else if fraction < 0.5 {
            DropPosition::Before
        } else {
            DropPosition::After
        }
    }

    /// Pointer left a candidate row. The session stays alive.
    pub fn drag_leave(&mut self, candidate: NodeId) {
        if let Some(session) = self.session.as_mut()
            && session.indicator.is_some_and(|i| i.target == candidate)
        {
            session.indicator = None;
        }
    }

    /// Escape or platform cancel: discard the session without touching the
    /// tree. Returns true if a drag was active.
    pub fn cancel(&mut self) -> bool {
        if self.session.take().is_some() {
            debug!("Drag cancelled");
            true
        } else {
            false
        }
    }

    /// Platform poll while dragging. Escape or a cancel action ends the
    /// gesture.
    pub fn query_continue(&mut self, escape_pressed: bool, action: DragAction) -> DragAction {
        if escape_pressed || action == DragAction::Cancel {
            self.cancel();
            return DragAction::Cancel;
        }
        action
    }

    /// Dragging -> Idle via drop on `target`.
    ///
    /// Self-drops and drops into a dragged subtree are refused so no cycle
    /// can form. A valid drop turns into a single `move_nodes` call with the
    /// dragged nodes in source order.
    pub fn drop_on<H>(&mut self, host: &mut H, target: NodeId) -> DropOutcome
    where
        H: NodeView + TreeMutator + ?Sized,
    {
        let Some(session) = self.session.take() else {
            return DropOutcome::Rejected(DropRejection::NotDragging);
        };

        let outcome = match Self::validate(&*host, &session, target) {
            Err(rejection) => DropOutcome::Rejected(rejection),
            Ok(destination) => {
                let moved = host.move_nodes(
                    &session.dragged_items,
                    destination.parent,
                    destination.index,
                );
                match moved {
                    Ok(()) => DropOutcome::Moved {
                        nodes: session.dragged_items,
                        destination,
                    },
                    Err(err) => {
                        warn!("Move of dragged nodes failed: {}", err);
                        DropOutcome::Failed(err)
                    }
                }
            }
        };
        debug!("Drop on {}: {:?}", target, outcome);
        outcome
    }

    fn validate<V: NodeView + ?Sized>(
        view: &V,
        session: &DragSession,
        target: NodeId,
    ) -> Result<Destination, DropRejection> {
        if !view.contains(target) {
            return Err(DropRejection::UnknownTarget);
        }
        if session.dragged_items.contains(&target) {
            return Err(DropRejection::OntoSelf);
        }
        if session
            .dragged_items
            .iter()
            .any(|&dragged| view.is_ancestor_of(dragged, target))
        {
            return Err(DropRejection::IntoOwnSubtree);
        }
        let indicator = session
            .indicator
            .filter(|i| i.target == target)
            .ok_or(DropRejection::NoIndicator)?;
        Self::destination(view, indicator).ok_or(DropRejection::UnknownTarget)
    }

    /// Parent and insertion index implied by an indicator.
    pub fn destination<V: NodeView + ?Sized>(
        view: &V,
        indicator: DropIndicator,
    ) -> Option<Destination> {
        let target = indicator.target;
        match indicator.position {
            DropPosition::Inside if view.is_container(target) => Some(Destination {
                parent: Some(target),
                index: view.children(target).len(),
            }),
            DropPosition::Before | DropPosition::Inside => Some(Destination {
                parent: view.parent(target),
                index: view.index_in_parent(target)?,
            }),
            DropPosition::After => Some(Destination {
                parent: view.parent(target),
                index: view.index_in_parent(target)? + 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_thirds_on_container() {
        let ratio = 1.0 / 3.0;
        let pos = |offset| {
            DragReorderController::position_for(true, DropProbe::new(offset, 30.0), ratio)
        };
        assert_eq!(pos(0.0), DropPosition::Before);
        assert_eq!(pos(9.0), DropPosition::Before);
        assert_eq!(pos(15.0), DropPosition::Inside);
        assert_eq!(pos(21.0), DropPosition::After);
        assert_eq!(pos(30.0), DropPosition::After);
    }

    #[test]
    fn test_leaf_middle_falls_back_to_halves() {
        let ratio = 1.0 / 3.0;
        let pos = |offset| {
            DragReorderController::position_for(false, DropProbe::new(offset, 30.0), ratio)
        };
        assert_eq!(pos(12.0), DropPosition::Before);
        assert_eq!(pos(18.0), DropPosition::After);
    }

    #[test]
    fn test_degenerate_probe_is_middle() {
        assert_eq!(DropProbe::new(3.0, 0.0).fraction(), 0.5);
        assert_eq!(DropProbe::new(f32::NAN, 10.0).fraction(), 0.5);
        assert_eq!(DropProbe::new(-4.0, 10.0).fraction(), 0.0);
    }

    #[test]
    fn test_query_continue_cancel_without_session() {
        let mut drag = DragReorderController::default();
        assert_eq!(drag.query_continue(false, DragAction::Continue), DragAction::Continue);
        assert_eq!(drag.query_continue(true, DragAction::Continue), DragAction::Cancel);
        assert!(!drag.is_dragging());
    }
}
