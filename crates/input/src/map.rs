//! Key mapping from terminal events to commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::handler::CursorMove;
use crate::types::GameAction;

/// What a key press asks for
///
/// Most keys map straight to a [`GameAction`]. Cursor keys and the mark key
/// need the [`CardCursor`](crate::CardCursor) to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Action(GameAction),
    Move(CursorMove),
    MarkUnderCursor,
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(KeyCommand::Move(CursorMove::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(KeyCommand::Move(CursorMove::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(KeyCommand::Move(CursorMove::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(KeyCommand::Move(CursorMove::Down))
        }

        KeyCode::Enter | KeyCode::Char(' ') => Some(KeyCommand::MarkUnderCursor),

        // Session
        KeyCode::Char('b') | KeyCode::Char('B') => Some(KeyCommand::Action(GameAction::Claim)),
        KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(KeyCommand::Action(GameAction::TogglePause))
        }
        KeyCode::Char('n') | KeyCode::Char('N') => Some(KeyCommand::Action(GameAction::Start)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
