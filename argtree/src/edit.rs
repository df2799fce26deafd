//! Inline-edit collaborator and the structural boundaries that flush it.
//!
//! Text editing itself belongs to the host. The tree only decides *when* an
//! edit starts (typing, Enter/F2, click on the focused row) and makes sure an
//! edit in progress is committed before anything structural happens to its
//! row, so an edit is never silently lost.

use log::debug;

use crate::node::NodeId;
use crate::view::{FlattenedView, NodeView};

/// Begins and commits inline edits on behalf of the tree.
pub trait InlineEditor {
    /// Enter edit mode on `id`. `initial_text` replaces the current text
    /// when the edit was started by typing.
    fn begin_edit(&mut self, id: NodeId, initial_text: Option<&str>);

    /// Flush the in-progress text to the item and leave edit mode.
    fn commit_edit(&mut self, id: NodeId);
}

/// Commit the edit on `id` if one is in progress. Returns true if a commit
/// happened.
pub fn commit_if_editing<H>(host: &mut H, id: NodeId) -> bool
where
    H: NodeView + InlineEditor + ?Sized,
{
    if host.is_editable(id) && host.is_in_edit_mode(id) {
        debug!("Committing edit on {} before structural change", id);
        host.commit_edit(id);
        true
    } else {
        false
    }
}

/// Expand or collapse `id`, committing a pending edit on it first.
/// Returns true if the expansion state changed.
pub fn set_expanded_committing<H>(host: &mut H, id: NodeId, expanded: bool) -> bool
where
    H: NodeView + InlineEditor + ?Sized,
{
    if !host.is_container(id) || host.is_expanded(id) == expanded {
        return false;
    }
    commit_if_editing(host, id);
    host.set_expanded(id, expanded);
    true
}

/// Start an edit from typed text.
///
/// Only printable input starts an edit; the typed text becomes the initial
/// value so the keystroke is not lost.
pub fn begin_edit_from_text<H>(host: &mut H, id: NodeId, text: &str) -> bool
where
    H: NodeView + InlineEditor + ?Sized,
{
    let Some(first) = text.chars().next() else {
        return false;
    };
    if first.is_control() || !host.is_editable(id) || host.is_in_edit_mode(id) {
        return false;
    }
    debug!("Beginning edit on {} from text input", id);
    host.begin_edit(id, Some(text));
    true
}

/// Start an edit keeping the current text (Enter, F2, click).
pub fn begin_edit<H>(host: &mut H, id: NodeId) -> bool
where
    H: NodeView + InlineEditor + ?Sized,
{
    if !host.is_editable(id) || host.is_in_edit_mode(id) {
        return false;
    }
    debug!("Beginning edit on {}", id);
    host.begin_edit(id, None);
    true
}

/// Commit every edit in progress among the shown rows. Returns the number
/// of committed edits.
pub fn commit_visible_edits<H>(host: &mut H) -> usize
where
    H: NodeView + InlineEditor + ?Sized,
{
    let visible = FlattenedView::visible(&*host);
    visible
        .iter()
        .filter(|&id| commit_if_editing(host, id))
        .count()
}
