//! # Login Form Commands

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{typed_char, Command, CommandContext, CommandEvent};

/// Type into the focused login input
pub struct LoginInputCommand;

impl Command for LoginInputCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.on_login() && typed_char(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(typed_char(&event)
            .map(|ch| vec![CommandEvent::LoginCharRequested { ch }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "LoginInput"
    }
}

/// Delete the last character of the focused login input
pub struct LoginBackspaceCommand;

impl Command for LoginBackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.on_login() && event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::LoginBackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "LoginBackspace"
    }
}

/// Switch between email and password (Tab, BackTab, Up, Down)
pub struct LoginFocusCommand;

impl Command for LoginFocusCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.on_login()
            && matches!(
                event.code,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down
            )
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::LoginFocusToggleRequested])
    }

    fn name(&self) -> &'static str {
        "LoginFocus"
    }
}

/// Submit the form (Enter)
pub struct LoginSubmitCommand;

impl Command for LoginSubmitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.on_login() && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::LoginSubmitRequested])
    }

    fn name(&self) -> &'static str {
        "LoginSubmit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::commands::ViewModelSnapshot;
    use crate::tui::events::ListingMode;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn login_context() -> CommandContext {
        CommandContext::new(ViewModelSnapshot::login_screen())
    }

    #[test]
    fn login_commands_should_ignore_listing_screen() {
        let context = CommandContext::new(ViewModelSnapshot::listing_screen(ListingMode::Browse));
        assert!(!LoginInputCommand.is_relevant(&context, &key(KeyCode::Char('a'))));
        assert!(!LoginSubmitCommand.is_relevant(&context, &key(KeyCode::Enter)));
    }

    #[test]
    fn input_should_carry_typed_character() {
        let events = LoginInputCommand
            .execute(key(KeyCode::Char('@')), &login_context())
            .unwrap();
        assert_eq!(events, vec![CommandEvent::LoginCharRequested { ch: '@' }]);
    }

    #[test]
    fn tab_should_toggle_focus() {
        let context = login_context();
        assert!(LoginFocusCommand.is_relevant(&context, &key(KeyCode::Tab)));
        assert_eq!(
            LoginFocusCommand.execute(key(KeyCode::Tab), &context).unwrap(),
            vec![CommandEvent::LoginFocusToggleRequested]
        );
    }

    #[test]
    fn enter_should_submit() {
        let context = login_context();
        assert!(LoginSubmitCommand.is_relevant(&context, &key(KeyCode::Enter)));
        assert!(LoginBackspaceCommand.is_relevant(&context, &key(KeyCode::Backspace)));
    }
}
