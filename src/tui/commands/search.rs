//! # Search Bar Commands

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{typed_char, Command, CommandContext, CommandEvent};
use crate::tui::events::ListingMode;

fn searching(context: &CommandContext) -> bool {
    context.in_listing_mode(ListingMode::Search)
}

/// Append to the query
pub struct SearchInputCommand;

impl Command for SearchInputCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        searching(context) && typed_char(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(typed_char(&event)
            .map(|ch| vec![CommandEvent::SearchCharRequested { ch }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "SearchInput"
    }
}

/// Remove the last query character
pub struct SearchBackspaceCommand;

impl Command for SearchBackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        searching(context) && event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchBackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "SearchBackspace"
    }
}

/// Keep the query and return to browsing (Enter)
pub struct SearchFinishCommand;

impl Command for SearchFinishCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        searching(context) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchFinishRequested])
    }

    fn name(&self) -> &'static str {
        "SearchFinish"
    }
}

/// Drop the query and return to browsing (Esc)
pub struct SearchClearCommand;

impl Command for SearchClearCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        searching(context) && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchClearRequested])
    }

    fn name(&self) -> &'static str {
        "SearchClear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::commands::ViewModelSnapshot;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn search_context() -> CommandContext {
        CommandContext::new(ViewModelSnapshot::listing_screen(ListingMode::Search))
    }

    #[test]
    fn typed_characters_should_extend_query() {
        let events = SearchInputCommand
            .execute(key(KeyCode::Char('q')), &search_context())
            .unwrap();
        assert_eq!(events, vec![CommandEvent::SearchCharRequested { ch: 'q' }]);
    }

    #[test]
    fn enter_and_esc_should_leave_search() {
        let context = search_context();
        assert!(SearchFinishCommand.is_relevant(&context, &key(KeyCode::Enter)));
        assert!(SearchClearCommand.is_relevant(&context, &key(KeyCode::Esc)));
        assert!(SearchBackspaceCommand.is_relevant(&context, &key(KeyCode::Backspace)));
    }

    #[test]
    fn search_commands_should_ignore_browse_mode() {
        let context = CommandContext::new(ViewModelSnapshot::listing_screen(ListingMode::Browse));
        assert!(!SearchInputCommand.is_relevant(&context, &key(KeyCode::Char('a'))));
        assert!(!SearchClearCommand.is_relevant(&context, &key(KeyCode::Esc)));
    }
}
