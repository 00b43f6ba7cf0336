//! # Mock I/O Implementations for Testing
//!
//! Scripted events in, recorded render commands out. The render record is
//! shared through [`RenderLog`] so a test can still inspect it after the
//! stream has been moved into a controller.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::Event;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Mock event stream yielding pre-programmed events
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(Vec<u8>),
    Flush,
}

#[derive(Debug, Default)]
struct Recording {
    commands: Vec<RenderCommand>,
    /// Bytes written since the last clear
    screen: Vec<u8>,
}

/// Shared view of everything a [`MockRenderStream`] has recorded
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    recording: Arc<Mutex<Recording>>,
}

impl RenderLog {
    pub fn commands(&self) -> Vec<RenderCommand> {
        self.lock().commands.clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().commands.contains(command)
    }

    /// Raw output written since the last screen clear, escape codes included
    pub fn screen(&self) -> String {
        String::from_utf8_lossy(&self.lock().screen).to_string()
    }

    pub fn clear(&self) {
        let mut recording = self.lock();
        recording.commands.clear();
        recording.screen.clear();
    }

    fn record(&self, command: RenderCommand) {
        let mut recording = self.lock();
        if let RenderCommand::Write(bytes) = &command {
            recording.screen.extend_from_slice(bytes);
        }
        if command == RenderCommand::ClearScreen {
            recording.screen.clear();
        }
        recording.commands.push(command);
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.recording.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Mock render stream recording every operation
pub struct MockRenderStream {
    log: RenderLog,
    terminal_size: TerminalSize,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            log: RenderLog::default(),
            terminal_size: size,
            cursor_visible: true,
            raw_mode: false,
            alternate_screen: false,
        }
    }

    /// Handle onto the recording that outlives moving the stream
    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.alternate_screen
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.log.record(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.log.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ClearScreen);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.log.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.log.record(RenderCommand::HideCursor);
        self.cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.log.record(RenderCommand::ShowCursor);
        self.cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::EnterAlternateScreen);
        self.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.log.record(RenderCommand::LeaveAlternateScreen);
        self.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.log.record(RenderCommand::EnableRawMode);
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.log.record(RenderCommand::DisableRawMode);
        self.raw_mode = false;
        Ok(())
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}
