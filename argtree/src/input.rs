//! Input vocabulary shared by the controllers.

/// Key codes the tree reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
    /// Anything the tree has no use for.
    Other,
}

impl Key {
    /// Keys that move keyboard focus between rows and therefore drive
    /// selection. Tab-driven focus changes are deliberately not included.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Key::Up
                | Key::Down
                | Key::Left
                | Key::Right
                | Key::PageUp
                | Key::PageDown
                | Key::Home
                | Key::End
        )
    }
}

/// Modifier keys state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Only Ctrl held
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };

    /// Only Shift held
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
    };

    /// Check if any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }

    /// Whether Ctrl or Shift is held, i.e. the gesture edits an existing
    /// selection instead of replacing it.
    pub fn extends_selection(&self) -> bool {
        self.ctrl || self.shift
    }
}

/// Mouse button. Only `Left` starts selection and drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// What the platform asks a drag source while a drag is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    /// Keep dragging.
    Continue,
    /// The platform (or the user) aborted the drag.
    Cancel,
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            shift: mods.contains(KeyModifiers::SHIFT),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_navigation_keys() {
        for key in [
            Key::Up,
            Key::Down,
            Key::Left,
            Key::Right,
            Key::PageUp,
            Key::PageDown,
            Key::Home,
            Key::End,
        ] {
            assert!(key.is_navigation(), "{:?}", key);
        }
        assert!(!Key::Tab.is_navigation());
        assert!(!Key::BackTab.is_navigation());
        assert!(!Key::Char('a').is_navigation());
    }

    #[test]
    fn test_space_maps_to_space() {
        assert_eq!(Key::from(KeyCode::Char(' ')), Key::Space);
        assert_eq!(Key::from(KeyCode::Char('x')), Key::Char('x'));
        assert_eq!(Key::from(KeyCode::Esc), Key::Escape);
    }

    #[test]
    fn test_mouse_button_from_crossterm() {
        use crossterm::event::MouseButton as CtBtn;
        assert_eq!(MouseButton::from(CtBtn::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(CtBtn::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(CtBtn::Middle), MouseButton::Middle);
    }

    #[test]
    fn test_modifiers_from_crossterm() {
        let mods = Modifiers::from(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(mods.ctrl);
        assert!(mods.shift);
        assert!(!mods.alt);
        assert!(mods.extends_selection());
        assert!(!Modifiers::from(KeyModifiers::NONE).any());
    }
}
