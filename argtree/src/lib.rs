//! Interaction engine for a hierarchical, multi-selectable, reorderable tree
//! widget.
//!
//! The crate owns no rendering and no storage. Hosts expose their tree
//! through [`NodeView`], [`TreeMutator`] and [`InlineEditor`], forward input
//! events to a [`TreeController`], and redraw when it reports itself dirty.

pub mod config;
pub mod controller;
pub mod drag;
pub mod edit;
pub mod error;
pub mod input;
pub mod logging;
pub mod mutate;
pub mod node;
pub mod paths;
pub mod selection;
pub mod tree;
pub mod view;

pub use config::{InteractionConfig, LogConfig};
pub use controller::{EventResult, TreeController, TreeHost};
pub use drag::{
    DragPayload, DragReorderController, DragSession, DropEffect, DropIndicator, DropOutcome,
    DropPosition, DropProbe, DropRejection, INTERNAL_REORDER_FORMAT,
};
pub use edit::InlineEditor;
pub use error::{ConfigError, LoggingError, MoveError};
pub use input::{DragAction, Key, Modifiers, MouseButton};
pub use mutate::{Destination, TreeMutator};
pub use node::{Node, NodeId, NodeKind};
pub use selection::SelectionController;
pub use tree::NodeTree;
pub use view::{FlattenedView, NodeView, topmost_selected};
