//! # Terminal Streams
//!
//! crossterm-backed streams used by `roster` when it runs in a real
//! terminal. Keys typed into the login form, the listing and the edit
//! modal arrive through [`TerminalEventStream`]; every frame the renderer
//! queues goes out through [`TerminalRenderStream`].

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, Command};
use std::io::{self, Write};
use std::time::Duration;

/// Keys and resizes from the controlling terminal
#[derive(Default)]
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }
}

/// Screen output. Generic over the writer so frames can be captured.
pub struct TerminalRenderStream<W: Write = io::Stdout> {
    writer: W,
}

impl TerminalRenderStream {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderStream<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Run one screen-level crossterm command immediately
    fn apply(&mut self, command: impl Command) -> Result<()> {
        execute!(self.writer, command)?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn clear_screen(&mut self) -> Result<()> {
        self.apply(Clear(ClearType::All))
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.apply(cursor::MoveTo(x, y))
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.apply(cursor::Hide)
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.apply(cursor::Show)
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(terminal::size()?)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.apply(EnterAlternateScreen)
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.apply(LeaveAlternateScreen)
    }

    // Raw mode is process-wide in crossterm, not tied to the writer
    fn enable_raw_mode(&mut self) -> Result<()> {
        Ok(terminal::enable_raw_mode()?)
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        Ok(terminal::disable_raw_mode()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_commands_should_reach_the_writer() {
        let mut stream = TerminalRenderStream::with_writer(Vec::new());

        stream.clear_screen().unwrap();
        stream.move_cursor(4, 2).unwrap();
        stream.write_all(b"Users").unwrap();

        let output = String::from_utf8(stream.into_inner()).unwrap();
        assert!(output.starts_with("\x1b[2J"));
        assert!(output.contains("\x1b[3;5H"));
        assert!(output.ends_with("Users"));
    }
}
