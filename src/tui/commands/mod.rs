//! # Commands
//!
//! Key bindings. Each command decides from a [`CommandContext`] snapshot
//! whether a key event concerns it and, if so, produces [`CommandEvent`]s
//! for the controller to apply. The registry runs the first relevant
//! command only.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub mod app;
pub mod context;
pub mod edit;
pub mod events;
pub mod listing;
pub mod login;
pub mod search;

pub use context::{CommandContext, ViewModelSnapshot};
pub use events::CommandEvent;

/// A key binding
pub trait Command {
    /// Check if this command should handle the given key event
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events this key press stands for
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging and logging
    fn name(&self) -> &'static str;
}

/// Printable character typed without Ctrl/Alt
pub(crate) fn typed_char(event: &KeyEvent) -> Option<char> {
    match event.code {
        KeyCode::Char(ch)
            if !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

/// Registry of every key binding, in priority order
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command + Send>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let commands: Vec<Box<dyn Command + Send>> = vec![
            // Global bindings first so they win in every screen
            Box::new(app::AppTerminateCommand),
            Box::new(app::AcknowledgeCommand),
            // Login form
            Box::new(login::LoginSubmitCommand),
            Box::new(login::LoginFocusCommand),
            Box::new(login::LoginBackspaceCommand),
            Box::new(login::LoginInputCommand),
            // Edit modal
            Box::new(edit::SaveEditCommand),
            Box::new(edit::CancelEditCommand),
            Box::new(edit::EditFocusCommand),
            Box::new(edit::EditBackspaceCommand),
            Box::new(edit::EditInputCommand),
            // Search bar
            Box::new(search::SearchFinishCommand),
            Box::new(search::SearchClearCommand),
            Box::new(search::SearchBackspaceCommand),
            Box::new(search::SearchInputCommand),
            // Listing
            Box::new(listing::SelectionMoveCommand),
            Box::new(listing::PageChangeCommand),
            Box::new(listing::SearchStartCommand),
            Box::new(listing::EditStartCommand),
            Box::new(listing::DeleteCommand),
            Box::new(listing::LogoutCommand),
            Box::new(listing::QuitCommand),
        ];
        Self { commands }
    }

    /// Run the first command relevant to `event`
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Found relevant command: {} for key {:?}", command.name(), event);
                return command.execute(event, context);
            }
        }
        tracing::debug!("No relevant command for key {:?}", event);
        Ok(Vec::new())
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::events::ListingMode;
    use crate::tui::models::{PageStep, UserField};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn browse_context() -> CommandContext {
        let mut state = ViewModelSnapshot::listing_screen(ListingMode::Browse);
        state.selected_user_id = Some(3);
        CommandContext::new(state)
    }

    #[test]
    fn registry_should_register_every_binding() {
        assert_eq!(CommandRegistry::new().command_count(), 22);
    }

    #[test]
    fn ctrl_c_should_quit_from_any_screen() {
        let registry = CommandRegistry::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        for state in [
            ViewModelSnapshot::login_screen(),
            ViewModelSnapshot::listing_screen(ListingMode::Edit),
            ViewModelSnapshot::listing_screen(ListingMode::Search),
        ] {
            let events = registry
                .process_event(ctrl_c, &CommandContext::new(state))
                .unwrap();
            assert_eq!(events, vec![CommandEvent::QuitRequested]);
        }
    }

    #[test]
    fn same_key_should_mean_different_things_per_mode() {
        let registry = CommandRegistry::new();

        let browse = registry.process_event(key(KeyCode::Char('n')), &browse_context());
        assert_eq!(
            browse.unwrap(),
            vec![CommandEvent::PageChangeRequested {
                step: PageStep::Next
            }]
        );

        let search = CommandContext::new(ViewModelSnapshot::listing_screen(ListingMode::Search));
        let typed = registry.process_event(key(KeyCode::Char('n')), &search);
        assert_eq!(
            typed.unwrap(),
            vec![CommandEvent::SearchCharRequested { ch: 'n' }]
        );

        let mut edit_state = ViewModelSnapshot::listing_screen(ListingMode::Edit);
        edit_state.editing_user_id = Some(3);
        edit_state.edit_focus = Some((UserField::FirstName, "Em".to_string()));
        let edited = registry.process_event(key(KeyCode::Char('n')), &CommandContext::new(edit_state));
        assert_eq!(
            edited.unwrap(),
            vec![CommandEvent::DraftFieldChangeRequested {
                field: UserField::FirstName,
                value: "Emn".to_string()
            }]
        );

        let login = CommandContext::new(ViewModelSnapshot::login_screen());
        let login_typed = registry.process_event(key(KeyCode::Char('n')), &login);
        assert_eq!(
            login_typed.unwrap(),
            vec![CommandEvent::LoginCharRequested { ch: 'n' }]
        );
    }

    #[test]
    fn acknowledgement_should_swallow_other_keys() {
        let registry = CommandRegistry::new();
        let mut state = ViewModelSnapshot::login_screen();
        state.acknowledging = true;

        let events = registry
            .process_event(key(KeyCode::Char('x')), &CommandContext::new(state))
            .unwrap();
        assert_eq!(events, vec![CommandEvent::AcknowledgeRequested]);
    }

    #[test]
    fn unbound_key_should_produce_no_events() {
        let registry = CommandRegistry::new();
        let events = registry
            .process_event(key(KeyCode::F(5)), &browse_context())
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn typed_char_should_ignore_control_combinations() {
        assert_eq!(typed_char(&key(KeyCode::Char('a'))), Some('a'));
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some('A')
        );
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(typed_char(&key(KeyCode::Enter)), None);
    }
}
