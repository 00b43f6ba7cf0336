//! # Listing Commands
//!
//! Browse-mode bindings of the directory listing: selection, paging,
//! row actions, logout and quit.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{typed_char, Command, CommandContext, CommandEvent};
use crate::tui::events::ListingMode;
use crate::tui::models::PageStep;

fn browsing(context: &CommandContext) -> bool {
    context.in_listing_mode(ListingMode::Browse)
}

/// Move the selection (j/k, Up/Down)
pub struct SelectionMoveCommand;

impl SelectionMoveCommand {
    fn delta(event: &KeyEvent) -> Option<isize> {
        match (event.code, typed_char(event)) {
            (KeyCode::Down, _) | (_, Some('j')) => Some(1),
            (KeyCode::Up, _) | (_, Some('k')) => Some(-1),
            _ => None,
        }
    }
}

impl Command for SelectionMoveCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        browsing(context) && Self::delta(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(Self::delta(&event)
            .map(|delta| vec![CommandEvent::SelectionMoveRequested { delta }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "SelectionMove"
    }
}

/// Next or previous page (n/p, Right/Left)
pub struct PageChangeCommand;

impl PageChangeCommand {
    fn step(event: &KeyEvent) -> Option<PageStep> {
        match (event.code, typed_char(event)) {
            (KeyCode::Right, _) | (_, Some('n')) => Some(PageStep::Next),
            (KeyCode::Left, _) | (_, Some('p')) => Some(PageStep::Previous),
            _ => None,
        }
    }
}

impl Command for PageChangeCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        browsing(context) && Self::step(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(Self::step(&event)
            .map(|step| vec![CommandEvent::PageChangeRequested { step }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "PageChange"
    }
}

/// Focus the search bar (/)
pub struct SearchStartCommand;

impl Command for SearchStartCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        browsing(context) && typed_char(event) == Some('/')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchStartRequested])
    }

    fn name(&self) -> &'static str {
        "SearchStart"
    }
}

/// Edit the selected record (e, Enter)
pub struct EditStartCommand;

impl Command for EditStartCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        browsing(context)
            && context.state.selected_user_id.is_some()
            && (event.code == KeyCode::Enter || typed_char(event) == Some('e'))
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(context
            .state
            .selected_user_id
            .map(|user_id| vec![CommandEvent::EditStartRequested { user_id }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "EditStart"
    }
}

/// Delete the selected record (d)
pub struct DeleteCommand;

impl Command for DeleteCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        browsing(context)
            && context.state.selected_user_id.is_some()
            && typed_char(event) == Some('d')
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(context
            .state
            .selected_user_id
            .map(|user_id| vec![CommandEvent::DeleteRequested { user_id }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "Delete"
    }
}

/// Log out (L)
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        browsing(context) && typed_char(event) == Some('L')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::LogoutRequested])
    }

    fn name(&self) -> &'static str {
        "Logout"
    }
}

/// Quit from the listing (q)
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        browsing(context) && typed_char(event) == Some('q')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}
