//! Terminal playground for the tree controller.
//!
//! Each node takes two screen lines: its label and a gap below it. Dragging
//! over a label drops inside (containers) or next to the row, dragging over
//! the gap drops after the row.
//!
//! Keys: arrows/Home/End/PgUp/PgDn navigate, Shift extends, Ctrl+A selects
//! all, Space toggles the checkbox, Enter/F2 or typing edits, q quits.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use argtree::{
    DragAction, DragPayload, DropPosition, DropProbe, EventResult, FlattenedView, InlineEditor,
    InteractionConfig, Key, Modifiers, MouseButton, Node, NodeId, NodeTree, NodeView,
    TreeController, logging,
};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};

const TOP: u16 = 2;
const ROW_PITCH: u16 = 2;
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        Ok(Self { stdout })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Pointer state the platform would normally track for us.
#[derive(Default)]
struct Pointer {
    pressed: Option<NodeId>,
    last_click: Option<(NodeId, Instant)>,
    click_count: u8,
    payload: Option<DragPayload>,
    hovered: Option<NodeId>,
}

struct App {
    tree: NodeTree,
    controller: TreeController,
    pointer: Pointer,
    status: String,
}

fn sample_tree() -> NodeTree {
    let mut tree = NodeTree::new();
    let build = tree.add_root(Node::container("Build"));
    let _ = tree.add_child(build, Node::leaf("--release"));
    let _ = tree.add_child(build, Node::leaf("--target x86_64-unknown-linux-gnu").checked(true));
    let run = tree.add_root(Node::container("Run"));
    let _ = tree.add_child(run, Node::leaf("--config app.toml").checked(true));
    let _ = tree.add_child(run, Node::leaf("--verbose"));
    if let Ok(debug) = tree.add_child(run, Node::container("Debug").expanded(false)) {
        let _ = tree.add_child(debug, Node::leaf("--trace"));
        let _ = tree.add_child(debug, Node::leaf("--dump-ast"));
    }
    tree.add_root(Node::leaf("--color=always"));
    tree.add_root(Node::leaf("--locked").editable(false));
    tree
}

impl App {
    fn new(config: InteractionConfig) -> Self {
        Self {
            tree: sample_tree(),
            controller: TreeController::new(config),
            pointer: Pointer::default(),
            status: String::new(),
        }
    }

    /// Node and drop probe under a screen line.
    fn hit(&self, y: u16) -> Option<(NodeId, DropProbe)> {
        let offset = y.checked_sub(TOP)?;
        let node = self
            .controller
            .node_at_row(&self.tree, usize::from(offset / ROW_PITCH))?;
        let probe = if offset % ROW_PITCH == 0 {
            DropProbe::new(1.5, 3.0)
        } else {
            DropProbe::new(3.0, 3.0)
        };
        Some((node, probe))
    }

    fn editing(&self) -> Option<NodeId> {
        self.controller
            .focused()
            .filter(|&id| self.tree.is_in_edit_mode(id))
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        if let Some(id) = self.editing() {
            self.handle_edit_key(id, key);
            return true;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Char('q') || (ctrl && key.code == KeyCode::Char('c')) {
            return false;
        }

        let result = self
            .controller
            .on_key(&mut self.tree, Key::from(key.code), Modifiers::from(key.modifiers));
        if !self.controller.drag().is_dragging() {
            self.pointer.payload = None;
            self.pointer.hovered = None;
        }
        if result == EventResult::Ignored
            && !ctrl
            && let KeyCode::Char(c) = key.code
        {
            self.controller
                .on_text_input(&mut self.tree, c.encode_utf8(&mut [0; 4]));
        }
        true
    }

    fn handle_edit_key(&mut self, id: NodeId, key: KeyEvent) {
        let mut draft = self.tree.draft(id).unwrap_or_default().to_string();
        match key.code {
            KeyCode::Enter => {
                self.tree.commit_edit(id);
                self.status = "Edit committed".into();
            }
            KeyCode::Esc => {
                self.tree.cancel_edit(id);
                self.status = "Edit cancelled".into();
            }
            KeyCode::Backspace => {
                draft.pop();
                self.tree.set_draft(id, draft);
            }
            KeyCode::Char(c) => {
                draft.push(c);
                self.tree.set_draft(id, draft);
            }
            _ => {}
        }
        self.controller.focus(id);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let modifiers = Modifiers::from(mouse.modifiers);
        let hit = self.hit(mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                let Some((node, _)) = hit else {
                    return;
                };
                let button = MouseButton::from(button);
                if button == MouseButton::Left {
                    let now = Instant::now();
                    self.pointer.click_count = match self.pointer.last_click {
                        Some((last, at)) if last == node && now - at < DOUBLE_CLICK => {
                            self.pointer.click_count.saturating_add(1)
                        }
                        _ => 1,
                    };
                    self.pointer.last_click = Some((node, now));
                    self.pointer.pressed = Some(node);
                }
                self.controller.on_mouse_down(
                    &mut self.tree,
                    node,
                    button,
                    modifiers,
                    self.pointer.click_count,
                );
            }
            MouseEventKind::Drag(button) => self.handle_drag(hit, MouseButton::from(button)),
            MouseEventKind::Up(event::MouseButton::Left) => {
                self.pointer.pressed = None;
                if self.pointer.payload.take().is_some() {
                    self.pointer.hovered = None;
                    match hit {
                        Some((node, _)) => {
                            let outcome = self.controller.on_drop(&mut self.tree, node);
                            self.status = format!("{:?}", outcome);
                        }
                        None => {
                            self.controller.on_query_continue(false, DragAction::Cancel);
                            self.status = "Drag cancelled".into();
                        }
                    }
                    return;
                }
                self.controller
                    .on_mouse_up(&mut self.tree, hit.map(|(node, _)| node), modifiers);
            }
            _ => {}
        }
    }

    fn handle_drag(&mut self, hit: Option<(NodeId, DropProbe)>, button: MouseButton) {
        let payload = match &self.pointer.payload {
            Some(payload) => payload.clone(),
            None => {
                let Some(origin) = self.pointer.pressed else {
                    return;
                };
                let Some(payload) = self.controller.on_mouse_drag(&self.tree, origin, button)
                else {
                    return;
                };
                self.pointer.payload = Some(payload.clone());
                payload
            }
        };

        let Some((node, probe)) = hit else {
            if let Some(previous) = self.pointer.hovered.take() {
                self.controller.on_drag_leave(previous);
            }
            return;
        };
        if self.pointer.hovered == Some(node) {
            self.controller
                .on_drag_over(&self.tree, node, &payload, probe);
        } else {
            if let Some(previous) = self.pointer.hovered.replace(node) {
                self.controller.on_drag_leave(previous);
            }
            self.controller
                .on_drag_enter(&self.tree, node, &payload, probe);
        }
    }

    fn render(&self, out: &mut Stdout) -> io::Result<()> {
        queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        queue!(
            out,
            Print("argtree demo  (q quits, drag rows to reorder)"),
            cursor::MoveTo(0, TOP - 1),
            Print(&self.status)
        )?;

        let indicator = self.controller.current_drop_indicator();
        let visible = FlattenedView::visible(&self.tree);
        for (row, id) in visible.iter().enumerate() {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            let y = TOP + row as u16 * ROW_PITCH;
            let focus = if self.controller.focused() == Some(id) { '>' } else { ' ' };
            let expander = match (node.kind.is_container(), node.is_expanded) {
                (false, _) => ' ',
                (true, true) => '-',
                (true, false) => '+',
            };
            let check = if node.is_checked { 'x' } else { ' ' };
            let text = match self.tree.draft(id) {
                Some(draft) if node.is_in_edit_mode => format!("{}_", draft),
                _ => node.label.clone(),
            };
            let marker = match indicator {
                Some(i) if i.target == id && i.position == DropPosition::Inside => "  <- inside",
                _ => "",
            };
            let indent = "  ".repeat(self.tree.level(id));

            let prefix = format!("{focus}{indent}{expander} [{check}] ");
            queue!(out, cursor::MoveTo(0, y), Print(prefix))?;
            if node.is_selected {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(out, Print(text), SetAttribute(Attribute::Reset), Print(marker))?;

            match indicator {
                Some(i) if i.target == id && i.position == DropPosition::Before => {
                    queue!(out, cursor::MoveTo(0, y.saturating_sub(1)), Print("-".repeat(30)))?;
                }
                Some(i) if i.target == id && i.position == DropPosition::After => {
                    queue!(out, cursor::MoveTo(0, y + 1), Print("-".repeat(30)))?;
                }
                _ => {}
            }
        }
        out.flush()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = InteractionConfig::load_default()?;
    if let Err(err) = logging::init(&config.log) {
        eprintln!("Logging disabled: {}", err);
    }

    let mut term = Terminal::new()?;
    let mut app = App::new(config);
    app.render(&mut term.stdout)?;

    loop {
        let redraw = match event::read()? {
            Event::Key(key) => {
                if !app.handle_key(key) {
                    break;
                }
                true
            }
            Event::Mouse(mouse) => {
                app.handle_mouse(mouse);
                app.controller.is_dirty()
            }
            Event::Resize(..) => true,
            _ => false,
        };
        if redraw {
            app.render(&mut term.stdout)?;
            app.controller.clear_dirty();
        }
    }
    log::info!("Bye");
    Ok(())
}
