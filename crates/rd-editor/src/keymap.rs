//! Keyboard binding table for transform editing.
//!
//! Movement is expressed in room semantics (forward/back/left/right),
//! not raw screen axes: forward is −Z, right is +X, matching the
//! reference camera framing. Each key event is one discrete step; key
//! repeat and its timing belong to the host.

use rd_scene::KeyInput;

/// Actions the transform keys can trigger while an instance is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Translate −Z.
    MoveForward,
    /// Translate +Z.
    MoveBack,
    /// Translate −X.
    MoveLeft,
    /// Translate +X.
    MoveRight,
    /// Translate +Y.
    MoveUp,
    /// Translate −Y.
    MoveDown,
    /// Rotate +45° about Y.
    RotateLeft,
    /// Rotate −45° about Y.
    RotateRight,
    /// End the editing session (selection cleared, transforms kept).
    Deselect,
    /// Remove the selected instance.
    Delete,
}

/// Resolves key events into editor actions.
pub struct Keymap;

impl Keymap {
    /// Resolve a key event to an action.
    ///
    /// Returns `None` for unbound keys and for any modifier combo —
    /// modified keys are reserved for the surrounding application.
    pub fn resolve(input: &KeyInput) -> Option<EditorAction> {
        if input.has_modifier() {
            return None;
        }
        match input.key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(EditorAction::MoveForward),
            "s" | "arrowdown" => Some(EditorAction::MoveBack),
            "a" | "arrowleft" => Some(EditorAction::MoveLeft),
            "d" | "arrowright" => Some(EditorAction::MoveRight),
            "q" => Some(EditorAction::MoveUp),
            "e" => Some(EditorAction::MoveDown),
            "r" => Some(EditorAction::RotateLeft),
            "f" => Some(EditorAction::RotateRight),
            "escape" => Some(EditorAction::Deselect),
            "delete" | "backspace" => Some(EditorAction::Delete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_are_synonyms() {
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("w")),
            Some(EditorAction::MoveForward)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("ArrowUp")),
            Some(EditorAction::MoveForward)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("a")),
            Some(EditorAction::MoveLeft)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("ArrowRight")),
            Some(EditorAction::MoveRight)
        );
    }

    #[test]
    fn vertical_and_rotation_bindings() {
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("q")),
            Some(EditorAction::MoveUp)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("e")),
            Some(EditorAction::MoveDown)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("R")),
            Some(EditorAction::RotateLeft)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("f")),
            Some(EditorAction::RotateRight)
        );
    }

    #[test]
    fn escape_and_delete() {
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("Escape")),
            Some(EditorAction::Deselect)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("Delete")),
            Some(EditorAction::Delete)
        );
        assert_eq!(
            Keymap::resolve(&KeyInput::bare("Backspace")),
            Some(EditorAction::Delete)
        );
    }

    #[test]
    fn modifier_combos_are_reserved() {
        let mut input = KeyInput::bare("w");
        input.ctrl = true;
        assert_eq!(Keymap::resolve(&input), None);

        let mut input = KeyInput::bare("Delete");
        input.meta = true;
        assert_eq!(Keymap::resolve(&input), None);
    }

    #[test]
    fn unbound_keys_resolve_to_nothing() {
        assert_eq!(Keymap::resolve(&KeyInput::bare("x")), None);
        assert_eq!(Keymap::resolve(&KeyInput::bare("7")), None);
        assert_eq!(Keymap::resolve(&KeyInput::bare("Tab")), None);
    }
}
