//! # Edit Modal Commands
//!
//! Typing into an input produces the field's complete new value, which the
//! controller merges into the draft.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{typed_char, Command, CommandContext, CommandEvent};
use crate::tui::events::ListingMode;

fn editing(context: &CommandContext) -> bool {
    context.in_listing_mode(ListingMode::Edit)
}

/// Type into the focused input
pub struct EditInputCommand;

impl Command for EditInputCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        editing(context) && context.state.edit_focus.is_some() && typed_char(event).is_some()
    }

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let (Some(ch), Some((field, current))) = (typed_char(&event), &context.state.edit_focus)
        else {
            return Ok(Vec::new());
        };
        let mut value = current.clone();
        value.push(ch);
        Ok(vec![CommandEvent::DraftFieldChangeRequested {
            field: *field,
            value,
        }])
    }

    fn name(&self) -> &'static str {
        "EditInput"
    }
}

/// Delete the last character of the focused input
pub struct EditBackspaceCommand;

impl Command for EditBackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        editing(context) && context.state.edit_focus.is_some() && event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let Some((field, current)) = &context.state.edit_focus else {
            return Ok(Vec::new());
        };
        let mut value = current.clone();
        value.pop();
        Ok(vec![CommandEvent::DraftFieldChangeRequested {
            field: *field,
            value,
        }])
    }

    fn name(&self) -> &'static str {
        "EditBackspace"
    }
}

/// Move between inputs (Tab/Down forward, BackTab/Up back)
pub struct EditFocusCommand;

impl EditFocusCommand {
    fn direction(event: &KeyEvent) -> Option<bool> {
        match event.code {
            KeyCode::Tab | KeyCode::Down => Some(true),
            KeyCode::BackTab | KeyCode::Up => Some(false),
            _ => None,
        }
    }
}

impl Command for EditFocusCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        editing(context) && Self::direction(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(Self::direction(&event)
            .map(|forward| vec![CommandEvent::EditFocusRequested { forward }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "EditFocus"
    }
}

/// Save the draft (Enter)
pub struct SaveEditCommand;

impl Command for SaveEditCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        editing(context) && context.state.editing_user_id.is_some() && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(context
            .state
            .editing_user_id
            .map(|user_id| vec![CommandEvent::SaveRequested { user_id }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "SaveEdit"
    }
}

/// Close the modal without saving (Esc)
pub struct CancelEditCommand;

impl Command for CancelEditCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        editing(context) && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::CancelEditRequested])
    }

    fn name(&self) -> &'static str {
        "CancelEdit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::commands::ViewModelSnapshot;
    use crate::tui::models::UserField;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn edit_context(field: UserField, current: &str) -> CommandContext {
        let mut state = ViewModelSnapshot::listing_screen(ListingMode::Edit);
        state.editing_user_id = Some(2);
        state.edit_focus = Some((field, current.to_string()));
        CommandContext::new(state)
    }

    #[test]
    fn input_should_produce_full_field_value() {
        let context = edit_context(UserField::LastName, "Le");
        assert_eq!(
            EditInputCommand
                .execute(key(KeyCode::Char('e')), &context)
                .unwrap(),
            vec![CommandEvent::DraftFieldChangeRequested {
                field: UserField::LastName,
                value: "Lee".to_string()
            }]
        );
    }

    #[test]
    fn backspace_should_shorten_field_value() {
        let context = edit_context(UserField::Email, "b@x.com");
        assert_eq!(
            EditBackspaceCommand
                .execute(key(KeyCode::Backspace), &context)
                .unwrap(),
            vec![CommandEvent::DraftFieldChangeRequested {
                field: UserField::Email,
                value: "b@x.co".to_string()
            }]
        );
    }

    #[test]
    fn backspace_on_empty_field_should_keep_it_empty() {
        let context = edit_context(UserField::FirstName, "");
        assert_eq!(
            EditBackspaceCommand
                .execute(key(KeyCode::Backspace), &context)
                .unwrap(),
            vec![CommandEvent::DraftFieldChangeRequested {
                field: UserField::FirstName,
                value: String::new()
            }]
        );
    }

    #[test]
    fn enter_should_save_the_record_under_edit() {
        let context = edit_context(UserField::FirstName, "Bob");
        assert_eq!(
            SaveEditCommand.execute(key(KeyCode::Enter), &context).unwrap(),
            vec![CommandEvent::SaveRequested { user_id: 2 }]
        );
    }

    #[test]
    fn focus_keys_should_map_to_directions() {
        let context = edit_context(UserField::FirstName, "");
        assert_eq!(
            EditFocusCommand.execute(key(KeyCode::BackTab), &context).unwrap(),
            vec![CommandEvent::EditFocusRequested { forward: false }]
        );
        assert!(CancelEditCommand.is_relevant(&context, &key(KeyCode::Esc)));
    }
}
