//! # Application Control Commands
//!
//! Bindings that apply regardless of screen: terminating the application
//! and dismissing the logout acknowledgement.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

/// Terminate application (Ctrl+C)
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('c')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Dismiss the logout acknowledgement (any key)
pub struct AcknowledgeCommand;

impl Command for AcknowledgeCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.state.acknowledging
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::AcknowledgeRequested])
    }

    fn name(&self) -> &'static str {
        "Acknowledge"
    }
}
