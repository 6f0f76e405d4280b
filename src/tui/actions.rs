use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};

#[derive(Debug, Clone, Copy)]
pub enum TuiAction {
    MoveUp,
    MoveDown,
    ToTop,
    ToBottom,
    Delete,
    ShowList,
    ShowChart,
    FilterDay,
    FilterMonth,
    FilterAll,
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub enum EditingAction {
    InsertChar(char),
    MoveLeft,
    MoveRight,
    DeleteLeft,
    DeleteRight,
    CancelEditing,
    StopEditing,
}

pub fn key_pressed() -> Option<KeyCode> {
    if poll(Duration::from_millis(50)).ok()? {
        if let Event::Key(key) = read().ok()? {
            if key.kind == KeyEventKind::Press {
                return Some(key.code);
            }
        }
    }
    None
}

pub fn widget_action() -> Option<TuiAction> {
    match key_pressed()? {
        KeyCode::Char(c) => match c {
            'k' => Some(TuiAction::MoveUp),
            'j' => Some(TuiAction::MoveDown),
            'g' => Some(TuiAction::ToTop),
            'G' => Some(TuiAction::ToBottom),
            'd' => Some(TuiAction::Delete),
            'e' => Some(TuiAction::ShowList),
            'c' => Some(TuiAction::ShowChart),
            'f' => Some(TuiAction::FilterDay),
            'm' => Some(TuiAction::FilterMonth),
            'a' => Some(TuiAction::FilterAll),
            'q' => Some(TuiAction::Exit),
            _ => None,
        },
        KeyCode::Up => Some(TuiAction::MoveUp),
        KeyCode::Down => Some(TuiAction::MoveDown),
        KeyCode::Esc => Some(TuiAction::Exit),
        _ => None,
    }
}

pub fn widget_editing_action() -> Option<EditingAction> {
    match key_pressed()? {
        KeyCode::Char(c) => {
            if c.is_ascii_digit() || c == '-' {
                Some(EditingAction::InsertChar(c))
            } else {
                None
            }
        }
        KeyCode::Left => Some(EditingAction::MoveLeft),
        KeyCode::Right => Some(EditingAction::MoveRight),
        KeyCode::Enter => Some(EditingAction::StopEditing),
        KeyCode::Esc => Some(EditingAction::CancelEditing),
        KeyCode::Backspace => Some(EditingAction::DeleteLeft),
        KeyCode::Delete => Some(EditingAction::DeleteRight),
        _ => None,
    }
}
