//! # Edit Form
//!
//! State of the edit modal: a snapshot of the record being edited, the text
//! of each input, the focused input, and the sparse draft of fields the user
//! actually touched. Inputs start from the record's current values; only
//! changed inputs end up in the draft.

use crate::tui::models::{EditDraft, User, UserField};

#[derive(Debug, Clone)]
pub struct EditForm {
    user: User,
    inputs: [String; 3],
    focus: UserField,
    draft: EditDraft,
    saving: bool,
}

fn slot(field: UserField) -> usize {
    match field {
        UserField::FirstName => 0,
        UserField::LastName => 1,
        UserField::Email => 2,
    }
}

impl EditForm {
    pub fn new(user: User) -> Self {
        let inputs = UserField::ALL.map(|field| user.field(field).to_string());
        Self {
            user,
            inputs,
            focus: UserField::FirstName,
            draft: EditDraft::new(),
            saving: false,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn input(&self, field: UserField) -> &str {
        &self.inputs[slot(field)]
    }

    pub fn focus(&self) -> UserField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Replace an input's text and record it in the draft
    pub fn set_field(&mut self, field: UserField, value: String) {
        self.draft.set(field, value.clone());
        self.inputs[slot(field)] = value;
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::models::user::sample_users;

    #[test]
    fn inputs_should_start_from_record_values() {
        let user = sample_users().remove(1);
        let form = EditForm::new(user.clone());

        assert_eq!(form.user_id(), 2);
        assert_eq!(form.input(UserField::FirstName), "Janet");
        assert_eq!(form.input(UserField::LastName), "Weaver");
        assert_eq!(form.input(UserField::Email), "janet.weaver@reqres.in");
        assert!(form.draft().is_empty());
        assert_eq!(form.focus(), UserField::FirstName);
    }

    #[test]
    fn set_field_should_touch_only_that_field() {
        let mut form = EditForm::new(sample_users().remove(0));
        form.set_field(UserField::Email, "gob@bluth.com".to_string());

        assert_eq!(form.input(UserField::Email), "gob@bluth.com");
        assert_eq!(form.input(UserField::FirstName), "George");
        assert_eq!(form.draft().len(), 1);
        assert_eq!(form.draft().get(UserField::Email), Some("gob@bluth.com"));
        // The snapshot itself is never modified by typing
        assert_eq!(form.user().email, "george.bluth@reqres.in");
    }

    #[test]
    fn focus_should_cycle_through_fields() {
        let mut form = EditForm::new(sample_users().remove(0));
        form.focus_next();
        assert_eq!(form.focus(), UserField::LastName);
        form.focus_previous();
        form.focus_previous();
        assert_eq!(form.focus(), UserField::Email);
    }
}
