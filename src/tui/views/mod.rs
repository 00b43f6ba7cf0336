//! # Views
//!
//! Rendering of the view-model tree onto the terminal.

pub mod terminal_renderer;

pub use terminal_renderer::{display_width, fit, TerminalRenderer, ViewRenderer};
