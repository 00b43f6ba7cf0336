//! # Application Controller
//!
//! Owns the event loop. Key presses go through the command registry and
//! the resulting command events are applied to the view model; API
//! responses are drained and the success-message deadline is checked on
//! every pass; pending view events are then coalesced into one redraw.

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};

use crate::cmd_args::CommandLineArgs;
use crate::config::{self, IniProfileStore, Profile};
use crate::tui::{
    commands::{CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot},
    events::coalesce,
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    models::{Session, SessionStore},
    services::{DirectoryService, ReqresClient},
    view_models::AppViewModel,
    views::{TerminalRenderer, ViewRenderer},
};

/// How long to wait for terminal input before servicing responses and timers
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: AppViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<Stdout>> {
    /// Create a controller on the real terminal, configured from the
    /// selected profile and command-line overrides
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile = Self::load_profile(cmd_args)?;
        tracing::info!("Using directory at {}", profile.base_url);

        let api = ReqresClient::from_profile(&profile)?;
        let session = Session::init(SessionStore::new(profile.session_file.clone()))?;
        let (service, responses) = DirectoryService::channel(Arc::new(api));
        let view_model = AppViewModel::new(session, service, responses);

        Self::with_io_streams(
            view_model,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }

    /// Load profile from INI file or fall back to defaults, then apply
    /// command-line overrides
    fn load_profile(cmd_args: &CommandLineArgs) -> Result<Profile> {
        let profile_name = cmd_args.profile();
        let profile_path = config::get_profile_path();
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

        let mut profile = match IniProfileStore::new(&profile_path).get_profile(profile_name)? {
            Some(profile) => profile,
            None => {
                tracing::debug!("Profile '{}' not found, using defaults", profile_name);
                Profile::default()
            }
        };
        if let Some(base_url) = cmd_args.base_url() {
            profile.base_url = base_url.to_string();
        }
        Ok(profile)
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create a controller with injected I/O streams
    pub fn with_io_streams(
        mut view_model: AppViewModel,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    /// Run the main application loop until quit
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.start()?;

        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        self.view_renderer.cleanup()?;
        result
    }

    /// Initial navigation and first frame
    pub fn start(&mut self) -> Result<()> {
        self.view_model.start();
        self.view_model.collect_pending_view_events();
        self.view_renderer.render_full(&self.view_model)
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                match self.event_stream.read()? {
                    Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.process_key_event(key_event)?;
                    }
                    Event::Resize(width, height) => {
                        self.view_model.update_terminal_size(width, height);
                        self.view_renderer.update_size(width, height);
                    }
                    _ => {}
                }
            }

            // Let spawned API calls make progress on single-threaded runtimes
            tokio::task::yield_now().await;
            self.service_background(Instant::now())?;
        }
        Ok(())
    }

    /// Apply completed API calls, expire timers and redraw what went stale
    pub fn service_background(&mut self, now: Instant) -> Result<()> {
        let applied = self.view_model.drain_responses(now);
        if applied > 0 {
            tracing::debug!("Applied {} API responses", applied);
        }
        self.view_model.tick(now);
        self.render_pending()
    }

    /// Wait for one API response, apply it and redraw. Returns false once
    /// no response can arrive any more.
    pub async fn await_response(&mut self) -> Result<bool> {
        let received = self.view_model.wait_for_response().await;
        self.render_pending()?;
        Ok(received)
    }

    /// Process a single key event without running the full event loop
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::new(ViewModelSnapshot::from_view_model(&self.view_model));
        let events = self.command_registry.process_event(key_event, &context)?;
        tracing::debug!("Command events generated: {:?}", events);

        for event in events {
            self.apply_command_event(event);
        }

        if !self.should_quit {
            self.render_pending()?;
        }
        Ok(())
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent) {
        match event {
            CommandEvent::QuitRequested => {
                tracing::info!("Quit requested");
                self.should_quit = true;
            }
            CommandEvent::AcknowledgeRequested => self.view_model.acknowledge(),
            CommandEvent::LogoutRequested => self.view_model.logout(),

            CommandEvent::LoginCharRequested { ch } => self.view_model.login_mut().insert_char(ch),
            CommandEvent::LoginBackspaceRequested => self.view_model.login_mut().backspace(),
            CommandEvent::LoginFocusToggleRequested => self.view_model.login_mut().toggle_focus(),
            CommandEvent::LoginSubmitRequested => {
                self.view_model.login_mut().submit();
            }

            listing_event => {
                let Some(listing) = self.view_model.listing_mut() else {
                    tracing::warn!("Listing event without a mounted listing: {:?}", listing_event);
                    return;
                };
                match listing_event {
                    CommandEvent::SelectionMoveRequested { delta } => listing.move_selection(delta),
                    CommandEvent::PageChangeRequested { step } => {
                        listing.change_page(step);
                    }
                    CommandEvent::EditStartRequested { user_id } => {
                        listing.begin_edit(user_id);
                    }
                    CommandEvent::DeleteRequested { user_id } => {
                        listing.delete(user_id);
                    }
                    CommandEvent::SearchStartRequested => listing.start_search(),
                    CommandEvent::SearchCharRequested { ch } => listing.push_search_char(ch),
                    CommandEvent::SearchBackspaceRequested => listing.pop_search_char(),
                    CommandEvent::SearchFinishRequested => listing.finish_search(),
                    CommandEvent::SearchClearRequested => listing.clear_search(),
                    CommandEvent::DraftFieldChangeRequested { field, value } => {
                        listing.update_draft_field(field, value)
                    }
                    CommandEvent::EditFocusRequested { forward: true } => listing.focus_next_field(),
                    CommandEvent::EditFocusRequested { forward: false } => {
                        listing.focus_previous_field()
                    }
                    CommandEvent::SaveRequested { user_id } => {
                        listing.save_edit(user_id);
                    }
                    CommandEvent::CancelEditRequested => listing.cancel_edit(),
                    other => tracing::warn!("Unhandled command event: {:?}", other),
                }
            }
        }
    }

    /// Redraw whatever the view model reported stale since the last frame
    fn render_pending(&mut self) -> Result<()> {
        let view_events = self.view_model.collect_pending_view_events();
        match coalesce(&view_events) {
            Some(event) => self.view_renderer.handle_view_event(&event, &self.view_model),
            None => Ok(()),
        }
    }

    pub fn view_model(&self) -> &AppViewModel {
        &self.view_model
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
