//! # Terminal I/O
//!
//! The controller never touches crossterm directly. It reads keys from an
//! [`EventStream`] and the renderer draws onto a [`RenderStream`], so the
//! whole sign-in, browse and edit flow can run headless in tests.
//!
//! ```text
//! run:    AppController ─ keys ◀── TerminalEventStream  (crossterm events)
//!                       ─ frames ─▶ TerminalRenderStream (stdout)
//!
//! tests:  AppController ─ keys ◀── MockEventStream      (scripted keys)
//!                       ─ frames ─▶ MockRenderStream     (RenderLog)
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand, RenderLog};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// (columns, rows)
pub type TerminalSize = (u16, u16);

/// Source of key presses and resizes
pub trait EventStream: Send {
    /// Whether an event is ready within `timeout`. The event loop polls
    /// with a short timeout so it can service API responses in between.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event. Only called after `poll` returned true.
    fn read(&mut self) -> Result<Event>;
}

/// Destination for rendered frames
///
/// The renderer queues the table, modals and status bar as styled text
/// through `Write`. The methods below are the screen-level operations it
/// needs around a frame and at start-up and shutdown.
pub trait RenderStream: Write + Send {
    /// Wipe the frame before a full redraw
    fn clear_screen(&mut self) -> Result<()>;

    /// (column, row), zero based
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn get_size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;
}
