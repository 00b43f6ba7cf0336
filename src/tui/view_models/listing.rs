//! # Listing View Model
//!
//! Owns the paginated user directory screen: the current page of records,
//! the page cursor, local search, the edit modal and the success message.
//!
//! Network calls go out through the [`DirectoryService`] and come back as
//! [`ApiResponse`]s routed here by the application view model. Failures are
//! logged and otherwise leave the screen at its last good state.

use std::time::Instant;

use crate::tui::events::{ListingMode, ViewEvent};
use crate::tui::models::{
    filter_users, EditDraft, FlashMessage, PageCursor, PageStep, User, UserField, UserPage,
};
use crate::tui::services::{ApiResponse, DirectoryService};
use crate::tui::view_models::edit_form::EditForm;

pub const USER_UPDATED_MESSAGE: &str = "User details updated successfully!";
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully!";

pub struct ListingViewModel {
    service: DirectoryService,
    generation: u64,
    users: Vec<User>,
    cursor: PageCursor,
    total_pages: Option<u32>,
    loading: bool,
    search: String,
    searching: bool,
    selected: usize,
    editing: Option<EditForm>,
    flash: FlashMessage,
    pending_view_events: Vec<ViewEvent>,
}

impl ListingViewModel {
    /// Mount the listing and request the first page. `generation` tags
    /// every request this mount issues.
    pub fn mount(service: DirectoryService, generation: u64) -> Self {
        let mut listing = Self {
            service,
            generation,
            users: Vec::new(),
            cursor: PageCursor::new(),
            total_pages: None,
            loading: false,
            search: String::new(),
            searching: false,
            selected: 0,
            editing: None,
            flash: FlashMessage::new(),
            pending_view_events: Vec::new(),
        };
        tracing::debug!("Listing mounted (generation {})", generation);
        listing.load_page(listing.cursor.get());
        listing
    }

    /// Tear the listing down. The pending success message is cancelled so
    /// nothing fires against a screen that no longer exists.
    pub fn unmount(mut self) {
        self.flash.cancel();
        tracing::debug!(
            "Listing generation {} unmounted at page {}",
            self.generation,
            self.cursor.get()
        );
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // === Pagination ===

    /// Request a page from the directory. The response replaces the list
    /// only if the cursor still points at `page` when it arrives.
    pub fn load_page(&mut self, page: u32) {
        self.loading = true;
        self.service.request_page(self.generation, page);
        self.emit(ViewEvent::StatusBarUpdateRequired);
    }

    /// Move the cursor one page and fetch the new page. No-op (returns
    /// false) when stepping back from the first page.
    pub fn change_page(&mut self, step: PageStep) -> bool {
        if !self.cursor.step(step) {
            tracing::debug!("Page change {:?} ignored at page {}", step, self.cursor.get());
            return false;
        }
        tracing::info!("Moved to page {}", self.cursor.get());
        self.selected = 0;
        self.load_page(self.cursor.get());
        self.emit(ViewEvent::FullRedrawRequired);
        true
    }

    pub fn page(&self) -> u32 {
        self.cursor.get()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.can_go_back()
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // === Records and selection ===

    /// Records of the last fetched page, with local edits and deletions
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Records matching the current search query
    pub fn visible_users(&self) -> Vec<&User> {
        filter_users(&self.users, &self.search)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.visible_users().get(self.selected).copied()
    }

    pub fn move_selection(&mut self, delta: isize) {
        let count = self.visible_users().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, count as isize - 1) as usize;
        self.emit(ViewEvent::FullRedrawRequired);
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_users().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    // === Editing ===

    /// Open the edit modal for a record. Any unsaved draft is discarded.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(user) = self.users.iter().find(|user| user.id == id) else {
            tracing::warn!("Cannot edit user {}: not on this page", id);
            return false;
        };
        if let Some(previous) = &self.editing {
            tracing::debug!(
                "Discarding draft for user {} ({} fields)",
                previous.user_id(),
                previous.draft().len()
            );
        }
        self.editing = Some(EditForm::new(user.clone()));
        self.searching = false;
        tracing::debug!("Editing user {}", id);
        self.emit(ViewEvent::FullRedrawRequired);
        true
    }

    /// Merge one field into the pending draft
    pub fn update_draft_field(&mut self, field: UserField, value: String) {
        match self.editing.as_mut() {
            Some(form) if form.is_saving() => {
                tracing::debug!("Ignoring {:?} change while save is in flight", field);
            }
            Some(form) => {
                form.set_field(field, value);
                self.emit(ViewEvent::FullRedrawRequired);
            }
            None => {}
        }
    }

    pub fn focus_next_field(&mut self) {
        if let Some(form) = self.editing.as_mut() {
            form.focus_next();
            self.emit(ViewEvent::FullRedrawRequired);
        }
    }

    pub fn focus_previous_field(&mut self) {
        if let Some(form) = self.editing.as_mut() {
            form.focus_previous();
            self.emit(ViewEvent::FullRedrawRequired);
        }
    }

    pub fn editing(&self) -> Option<&EditForm> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.editing.as_ref().map(EditForm::draft)
    }

    /// Send the draft as a partial update. The modal stays open until the
    /// update succeeds.
    pub fn save_edit(&mut self, id: u64) -> bool {
        let Some(form) = self.editing.as_mut() else {
            tracing::warn!("Save requested for user {} with no edit open", id);
            return false;
        };
        if form.user_id() != id {
            tracing::warn!(
                "Save requested for user {} while editing user {}",
                id,
                form.user_id()
            );
            return false;
        }
        if form.is_saving() {
            tracing::debug!("Save for user {} already in flight", id);
            return false;
        }
        form.set_saving(true);
        self.service
            .request_update(self.generation, id, form.draft().clone());
        self.emit(ViewEvent::FullRedrawRequired);
        true
    }

    /// Close the modal and drop the draft
    pub fn cancel_edit(&mut self) {
        if let Some(form) = self.editing.take() {
            tracing::debug!("Edit of user {} cancelled", form.user_id());
            self.emit(ViewEvent::FullRedrawRequired);
        }
    }

    // === Deletion ===

    /// Remove a record from the local list. There is no remote call.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        if self.users.len() == before {
            tracing::warn!("Cannot delete user {}: not on this page", id);
            return false;
        }
        tracing::info!("User {} removed from page {}", id, self.cursor.get());
        self.clamp_selection();
        self.flash.show(USER_DELETED_MESSAGE, Instant::now());
        self.emit(ViewEvent::FullRedrawRequired);
        true
    }

    // === Search ===

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn set_search_query<S: Into<String>>(&mut self, query: S) {
        self.search = query.into();
        self.selected = 0;
        self.emit(ViewEvent::FullRedrawRequired);
    }

    pub fn start_search(&mut self) {
        self.searching = true;
        self.emit(ViewEvent::FullRedrawRequired);
    }

    pub fn push_search_char(&mut self, ch: char) {
        let mut query = std::mem::take(&mut self.search);
        query.push(ch);
        self.set_search_query(query);
    }

    pub fn pop_search_char(&mut self) {
        let mut query = std::mem::take(&mut self.search);
        query.pop();
        self.set_search_query(query);
    }

    /// Leave search input, keeping the query
    pub fn finish_search(&mut self) {
        self.searching = false;
        self.emit(ViewEvent::FullRedrawRequired);
    }

    /// Leave search input and drop the query
    pub fn clear_search(&mut self) {
        self.searching = false;
        self.set_search_query(String::new());
    }

    pub fn mode(&self) -> ListingMode {
        if self.editing.is_some() {
            ListingMode::Edit
        } else if self.searching {
            ListingMode::Search
        } else {
            ListingMode::Browse
        }
    }

    // === Responses and time ===

    pub fn flash_text(&self) -> Option<&str> {
        self.flash.text()
    }

    /// Apply a completed API call
    pub fn handle_response(&mut self, response: ApiResponse, now: Instant) {
        match response {
            ApiResponse::Page { page, result, .. } => self.finish_page(page, result),
            ApiResponse::Updated {
                id, draft, result, ..
            } => self.finish_update(id, draft, result, now),
            ApiResponse::LoggedIn { .. } => {
                tracing::debug!("Listing ignoring login response");
            }
        }
    }

    fn finish_page(&mut self, page: u32, result: anyhow::Result<UserPage>) {
        if page != self.cursor.get() {
            tracing::debug!(
                "Discarding stale response for page {} (cursor at {})",
                page,
                self.cursor.get()
            );
            return;
        }
        self.loading = false;
        match result {
            Ok(user_page) => {
                tracing::info!("Loaded {} users for page {}", user_page.data.len(), page);
                self.users = user_page.data;
                self.total_pages = user_page.total_pages;
                self.clamp_selection();
                self.emit(ViewEvent::FullRedrawRequired);
            }
            Err(e) => {
                tracing::error!("Failed to load page {}: {:#}", page, e);
                self.emit(ViewEvent::StatusBarUpdateRequired);
            }
        }
    }

    fn finish_update(
        &mut self,
        id: u64,
        draft: EditDraft,
        result: anyhow::Result<()>,
        now: Instant,
    ) {
        let editing_this = self
            .editing
            .as_ref()
            .is_some_and(|form| form.user_id() == id);

        match result {
            Ok(()) => {
                match self.users.iter_mut().find(|user| user.id == id) {
                    Some(user) => user.apply(&draft),
                    None => tracing::debug!("Updated user {} is no longer listed", id),
                }
                if editing_this {
                    self.editing = None;
                }
                tracing::info!("User {} updated ({} fields)", id, draft.len());
                self.flash.show(USER_UPDATED_MESSAGE, now);
            }
            Err(e) => {
                tracing::error!("Failed to update user {}: {:#}", id, e);
                if let Some(form) = self.editing.as_mut().filter(|_| editing_this) {
                    form.set_saving(false);
                }
            }
        }
        self.emit(ViewEvent::FullRedrawRequired);
    }

    /// Expire the success message once its interval has passed
    pub fn tick(&mut self, now: Instant) {
        if self.flash.expire(now) {
            self.emit(ViewEvent::FullRedrawRequired);
        }
    }

    fn emit(&mut self, event: ViewEvent) {
        self.pending_view_events.push(event);
    }

    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }
}
