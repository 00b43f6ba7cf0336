//! # Terminal Renderer
//!
//! Draws the application state onto a [`RenderStream`]. Every frame is a
//! pure function of the view model: the listing screen fills the terminal,
//! while the login form, edit modal and logout acknowledgement are drawn
//! as centered boxes.
//!
//! ```text
//! Users                                         [L] Logout
//! Search: jan_
//! User details updated successfully!
//!  ID  Name                    Email
//!   2  Janet Weaver            janet.weaver@reqres.in
//! ...
//! [p] Previous          Page 1 of 2              [n] Next
//! BROWSE | j/k select  n/p page  / search ...  Loading...
//! ```

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::events::{ListingMode, LoginField, Route, ViewEvent};
use crate::tui::io::{RenderStream, TerminalSize};
use crate::tui::models::UserField;
use crate::tui::view_models::{AppViewModel, ListingViewModel, LoginViewModel};

const ID_WIDTH: usize = 4;
const NAME_WIDTH: usize = 24;
/// Rows above the user table: header, search, flash, column titles
const TABLE_TOP: u16 = 4;
const MODAL_WIDTH: u16 = 56;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal for drawing
    fn initialize(&mut self) -> Result<()>;

    /// Render the full application state
    fn render_full(&mut self, view_model: &AppViewModel) -> Result<()>;

    /// Render only the bottom status line
    fn render_status_bar(&mut self, view_model: &AppViewModel) -> Result<()>;

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &AppViewModel) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;

    fn update_size(&mut self, width: u16, height: u16);

    fn terminal_size(&self) -> TerminalSize;
}

/// Visual width of `text` on a terminal
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate or pad `text` to exactly `width` columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

/// Renderer drawing onto any [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: TerminalSize,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    /// Create a renderer sized to the stream's terminal
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    fn width(&self) -> usize {
        self.terminal_size.0 as usize
    }

    fn height(&self) -> u16 {
        self.terminal_size.1
    }

    /// Print `text` at a position, clipped to the terminal width
    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        if y >= self.height() {
            return Ok(());
        }
        let room = self.width().saturating_sub(x as usize);
        let clipped = fit(text, room.min(display_width(text)));
        queue!(self.render_stream, MoveTo(x, y), Print(clipped))?;
        Ok(())
    }

    /// Print a full-width line
    fn print_line(&mut self, y: u16, text: &str) -> Result<()> {
        let line = fit(text, self.width());
        self.print_at(0, y, &line)
    }

    fn print_styled(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        color: Option<Color>,
        attribute: Option<Attribute>,
    ) -> Result<()> {
        if let Some(color) = color {
            queue!(self.render_stream, SetForegroundColor(color))?;
        }
        if let Some(attribute) = attribute {
            queue!(self.render_stream, SetAttribute(attribute))?;
        }
        self.print_at(x, y, text)?;
        queue!(
            self.render_stream,
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        Ok(())
    }

    // === Listing screen ===

    fn render_listing(&mut self, listing: &ListingViewModel) -> Result<()> {
        let width = self.width();

        // Header
        let logout = "[L] Logout";
        let title = fit("Users", width.saturating_sub(logout.len()));
        self.print_styled(0, 0, &title, None, Some(Attribute::Bold))?;
        self.print_at(display_width(&title) as u16, 0, logout)?;

        // Search bar
        let search_line = match listing.mode() {
            ListingMode::Search => format!("Search: {}_", listing.search_query()),
            _ if listing.search_query().is_empty() => "Search: (press / to filter)".to_string(),
            _ => format!("Search: {}", listing.search_query()),
        };
        self.print_line(1, &search_line)?;

        // Success message
        match listing.flash_text() {
            Some(text) => {
                let line = fit(text, width);
                self.print_styled(0, 2, &line, Some(Color::Green), None)?;
            }
            None => self.print_line(2, "")?,
        }

        // Table
        let header = self.table_row("ID", "Name", "Email");
        self.print_styled(0, 3, &header, None, Some(Attribute::Underlined))?;

        let table_rows = self.height().saturating_sub(TABLE_TOP + 2);
        let visible = listing.visible_users();
        // Scroll so the selection stays on screen
        let offset = listing
            .selected_index()
            .saturating_sub((table_rows as usize).saturating_sub(1));

        for row in 0..table_rows {
            let y = TABLE_TOP + row;
            let index = offset + row as usize;
            match visible.get(index) {
                Some(user) => {
                    let line = self.table_row(&user.id.to_string(), &user.full_name(), &user.email);
                    if index == listing.selected_index() && listing.mode() == ListingMode::Browse {
                        self.print_styled(0, y, &line, None, Some(Attribute::Reverse))?;
                    } else {
                        self.print_at(0, y, &line)?;
                    }
                }
                None if row == 0 && visible.is_empty() => {
                    let message = if listing.is_loading() {
                        "Loading..."
                    } else {
                        "No users found."
                    };
                    self.print_styled(0, y, &fit(message, width), None, Some(Attribute::Dim))?;
                }
                None => self.print_line(y, "")?,
            }
        }

        self.render_pagination(listing)?;

        if let Some(form) = listing.editing() {
            let rows = UserField::ALL
                .iter()
                .map(|field| {
                    let marker = if *field == form.focus() { ">" } else { " " };
                    let cursor = if *field == form.focus() { "_" } else { "" };
                    format!(
                        "{marker} {:<11} {}{cursor}",
                        format!("{}:", field.label()),
                        form.input(*field)
                    )
                })
                .collect::<Vec<_>>();
            let footer = if form.is_saving() {
                "Saving...".to_string()
            } else {
                "[Enter] Save  [Esc] Cancel".to_string()
            };
            let mut lines = vec![
                format!("Edit user #{}", form.user_id()),
                String::new(),
            ];
            lines.extend(rows);
            lines.push(String::new());
            lines.push(footer);
            self.render_box(&lines)?;
        }
        Ok(())
    }

    fn table_row(&self, id: &str, name: &str, email: &str) -> String {
        let email_width = self.width().saturating_sub(ID_WIDTH + NAME_WIDTH + 4);
        format!(
            "{:>id_w$}  {}  {}",
            fit(id, ID_WIDTH).trim_end(),
            fit(name, NAME_WIDTH),
            fit(email, email_width),
            id_w = ID_WIDTH
        )
    }

    fn render_pagination(&mut self, listing: &ListingViewModel) -> Result<()> {
        let y = self.height().saturating_sub(2);
        let previous = "[p] Previous";
        let next = "[n] Next";
        let label = match listing.total_pages() {
            Some(total) => format!("Page {} of {}", listing.page(), total),
            None => format!("Page {}", listing.page()),
        };

        self.print_line(y, "")?;
        let previous_attribute = if listing.can_go_back() {
            None
        } else {
            Some(Attribute::Dim)
        };
        self.print_styled(0, y, previous, None, previous_attribute)?;

        let center = self.width().saturating_sub(display_width(&label)) / 2;
        self.print_at(center as u16, y, &label)?;

        let right = self.width().saturating_sub(display_width(next));
        self.print_at(right as u16, y, next)?;
        Ok(())
    }

    // === Boxes ===

    fn render_login(&mut self, login: &LoginViewModel) -> Result<()> {
        let marker = |field: LoginField| if login.focus() == field { ">" } else { " " };
        let cursor = |field: LoginField| if login.focus() == field { "_" } else { "" };
        let footer = if login.is_submitting() {
            "Signing in...".to_string()
        } else {
            "[Enter] Sign in  [Tab] Switch field".to_string()
        };
        let lines = vec![
            "Sign in".to_string(),
            String::new(),
            format!(
                "{} Email:    {}{}",
                marker(LoginField::Email),
                login.email(),
                cursor(LoginField::Email)
            ),
            format!(
                "{} Password: {}{}",
                marker(LoginField::Password),
                login.masked_password(),
                cursor(LoginField::Password)
            ),
            login.error().unwrap_or_default().to_string(),
            footer,
        ];
        let top = self.render_box(&lines)?;
        if let Some(error) = login.error() {
            // Repaint the error line in red over the boxed text
            self.print_styled(self.box_left() + 2, top + 5, error, Some(Color::Red), None)?;
        }
        Ok(())
    }

    fn render_acknowledgement(&mut self, message: &str) -> Result<()> {
        let lines = vec![
            message.to_string(),
            String::new(),
            "Press any key to continue".to_string(),
        ];
        self.render_box(&lines)?;
        Ok(())
    }

    fn box_width(&self) -> u16 {
        MODAL_WIDTH.min(self.terminal_size.0.saturating_sub(2)).max(4)
    }

    fn box_left(&self) -> u16 {
        self.terminal_size.0.saturating_sub(self.box_width()) / 2
    }

    /// Draw a bordered, centered box around `lines`. Returns its top row.
    fn render_box(&mut self, lines: &[String]) -> Result<u16> {
        let width = self.box_width();
        let inner = width.saturating_sub(4) as usize;
        let height = lines.len() as u16 + 2;
        let left = self.box_left();
        let top = self.height().saturating_sub(height) / 2;

        let horizontal = "─".repeat(width.saturating_sub(2) as usize);
        self.print_at(left, top, &format!("┌{horizontal}┐"))?;
        for (i, line) in lines.iter().enumerate() {
            self.print_at(left, top + 1 + i as u16, &format!("│ {} │", fit(line, inner)))?;
        }
        self.print_at(left, top + height - 1, &format!("└{horizontal}┘"))?;
        Ok(top)
    }

    // === Status bar ===

    fn status_text(view_model: &AppViewModel) -> (String, String) {
        if view_model.acknowledgement().is_some() {
            return ("LOGGED OUT | any key to continue".to_string(), String::new());
        }
        match (view_model.current_route(), view_model.listing()) {
            (Route::Users, Some(listing)) => {
                let left = match listing.mode() {
                    ListingMode::Browse => {
                        "BROWSE | j/k select  n/p page  / search  e edit  d delete  L logout  q quit"
                    }
                    ListingMode::Search => "SEARCH | Enter keep  Esc clear",
                    ListingMode::Edit => "EDIT | Tab next field  Enter save  Esc cancel",
                };
                let right = if listing.editing().is_some_and(|form| form.is_saving()) {
                    "Saving..."
                } else if listing.is_loading() {
                    "Loading..."
                } else {
                    ""
                };
                (left.to_string(), right.to_string())
            }
            _ => {
                let right = if view_model.login().is_submitting() {
                    "Signing in..."
                } else {
                    ""
                };
                (
                    "LOGIN | Tab switch field  Enter sign in  Ctrl+C quit".to_string(),
                    right.to_string(),
                )
            }
        }
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &AppViewModel) -> Result<()> {
        self.render_stream.clear_screen()?;

        if let Some(message) = view_model.acknowledgement() {
            self.render_acknowledgement(message)?;
        } else {
            match (view_model.current_route(), view_model.listing()) {
                (Route::Users, Some(listing)) => self.render_listing(listing)?,
                _ => self.render_login(view_model.login())?,
            }
        }

        self.render_status_bar(view_model)?;
        Ok(())
    }

    fn render_status_bar(&mut self, view_model: &AppViewModel) -> Result<()> {
        let y = self.height().saturating_sub(1);
        let (left, right) = Self::status_text(view_model);
        let width = self.width();
        let left_width = width.saturating_sub(display_width(&right) + 1);
        let line = format!("{} {}", fit(&left, left_width), right);

        queue!(self.render_stream, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
        self.print_styled(0, y, &line, None, Some(Attribute::Dim))?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &AppViewModel) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => self.render_full(view_model),
            ViewEvent::StatusBarUpdateRequired => self.render_status_bar(view_model),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }

    fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    fn terminal_size(&self) -> TerminalSize {
        self.terminal_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::io::{MockRenderStream, RenderCommand};
    use crate::tui::models::user::sample_users;
    use crate::tui::models::{Session, SessionStore, UserPage};
    use crate::tui::services::{ApiResponse, DirectoryService, MockUserApi};
    use std::sync::Arc;
    use std::time::Instant;
    use tempfile::TempDir;

    fn signed_in_app(dir: &TempDir) -> AppViewModel {
        let store = SessionStore::new(dir.path().join("session"));
        store.save("token").unwrap();
        let session = Session::init(store).unwrap();
        let (service, responses) = DirectoryService::channel(Arc::new(MockUserApi::new()));
        let mut app = AppViewModel::new(session, service, responses);
        app.start();
        app
    }

    fn deliver_page(app: &mut AppViewModel) {
        let generation = app.listing().map_or(0, |listing| listing.generation());
        app.dispatch_response(
            ApiResponse::Page {
                generation,
                page: 1,
                result: Ok(UserPage {
                    data: sample_users(),
                    page: Some(1),
                    per_page: Some(6),
                    total: Some(12),
                    total_pages: Some(2),
                }),
            },
            Instant::now(),
        );
    }

    #[test]
    fn fit_should_pad_and_truncate() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn fit_should_count_wide_characters() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(fit("日本語", 5), "日本 ");
    }

    #[test]
    fn renderer_should_take_size_from_stream() {
        let renderer =
            TerminalRenderer::with_render_stream(MockRenderStream::with_size((100, 30))).unwrap();
        assert_eq!(renderer.terminal_size(), (100, 30));
    }

    #[test]
    fn initialize_and_cleanup_should_toggle_terminal_modes() {
        let stream = MockRenderStream::new();
        let log = stream.log();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();

        renderer.initialize().unwrap();
        renderer.cleanup().unwrap();

        assert!(log.has_command(&RenderCommand::EnableRawMode));
        assert!(log.has_command(&RenderCommand::EnterAlternateScreen));
        assert!(log.has_command(&RenderCommand::LeaveAlternateScreen));
        assert!(log.has_command(&RenderCommand::DisableRawMode));
    }

    #[tokio::test]
    async fn listing_should_show_rows_and_pagination() {
        let dir = TempDir::new().unwrap();
        let mut app = signed_in_app(&dir);
        deliver_page(&mut app);

        let stream = MockRenderStream::new();
        let log = stream.log();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
        renderer.render_full(&app).unwrap();

        let screen = log.screen();
        assert!(screen.contains("[L] Logout"));
        assert!(screen.contains("Janet Weaver"));
        assert!(screen.contains("emma.wong@reqres.in"));
        assert!(screen.contains("Page 1 of 2"));
        assert!(screen.contains("[p] Previous"));
        assert!(screen.contains("[n] Next"));
    }

    #[tokio::test]
    async fn listing_should_report_empty_filter_result() {
        let dir = TempDir::new().unwrap();
        let mut app = signed_in_app(&dir);
        deliver_page(&mut app);
        if let Some(listing) = app.listing_mut() {
            listing.set_search_query("nobody-matches-this");
        }

        let stream = MockRenderStream::new();
        let log = stream.log();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
        renderer.render_full(&app).unwrap();

        assert!(log.screen().contains("No users found."));
        assert!(!log.screen().contains("Janet Weaver"));
    }

    #[tokio::test]
    async fn edit_modal_should_show_field_inputs() {
        let dir = TempDir::new().unwrap();
        let mut app = signed_in_app(&dir);
        deliver_page(&mut app);
        if let Some(listing) = app.listing_mut() {
            assert!(listing.begin_edit(2));
        }

        let stream = MockRenderStream::new();
        let log = stream.log();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
        renderer.render_full(&app).unwrap();

        let screen = log.screen();
        assert!(screen.contains("Edit user #2"));
        assert!(screen.contains("Janet"));
        assert!(screen.contains("[Enter] Save  [Esc] Cancel"));
    }

    #[tokio::test]
    async fn signed_out_app_should_render_login_box() {
        let dir = TempDir::new().unwrap();
        let session = Session::init(SessionStore::new(dir.path().join("session"))).unwrap();
        let (service, responses) = DirectoryService::channel(Arc::new(MockUserApi::new()));
        let mut app = AppViewModel::new(session, service, responses);
        app.start();

        let stream = MockRenderStream::new();
        let log = stream.log();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
        renderer.render_full(&app).unwrap();

        assert!(log.screen().contains("Sign in"));
        assert!(log.screen().contains("Password:"));
        assert!(!log.screen().contains("[L] Logout"));
    }

    #[tokio::test]
    async fn status_bar_should_show_loading_indicator() {
        let dir = TempDir::new().unwrap();
        let app = signed_in_app(&dir);

        let stream = MockRenderStream::new();
        let log = stream.log();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
        renderer.render_status_bar(&app).unwrap();

        assert!(log.screen().contains("Loading..."));
        assert!(log.has_command(&RenderCommand::Flush));
    }
}
