//! # Edit Draft
//!
//! Sparse set of pending field changes for the record under edit.
//! Serializes to the JSON body of a partial update, e.g.
//! `{"first_name": "Jane"}`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Fields of a user record that can be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    FirstName,
    LastName,
    Email,
}

impl UserField {
    /// Form order of the editable fields
    pub const ALL: [UserField; 3] = [UserField::FirstName, UserField::LastName, UserField::Email];

    pub fn label(self) -> &'static str {
        match self {
            UserField::FirstName => "First Name",
            UserField::LastName => "Last Name",
            UserField::Email => "Email",
        }
    }

    pub fn next(self) -> Self {
        match self {
            UserField::FirstName => UserField::LastName,
            UserField::LastName => UserField::Email,
            UserField::Email => UserField::FirstName,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            UserField::FirstName => UserField::Email,
            UserField::LastName => UserField::FirstName,
            UserField::Email => UserField::LastName,
        }
    }
}

/// Pending field changes, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EditDraft {
    fields: BTreeMap<UserField, String>,
}

impl EditDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a single field, replacing any earlier value for it
    pub fn set<S: Into<String>>(&mut self, field: UserField, value: S) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: UserField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_should_not_touch_other_fields() {
        let mut draft = EditDraft::new();
        draft.set(UserField::FirstName, "Jane");
        draft.set(UserField::Email, "jane@x.com");
        draft.set(UserField::FirstName, "Janet");

        assert_eq!(draft.len(), 2);
        assert_eq!(draft.get(UserField::FirstName), Some("Janet"));
        assert_eq!(draft.get(UserField::Email), Some("jane@x.com"));
        assert_eq!(draft.get(UserField::LastName), None);
    }

    #[test]
    fn draft_should_serialize_as_partial_update_body() {
        let mut draft = EditDraft::new();
        draft.set(UserField::LastName, "Lee");
        draft.set(UserField::FirstName, "Jane");

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"first_name": "Jane", "last_name": "Lee"})
        );
    }

    #[test]
    fn empty_draft_should_serialize_as_empty_object() {
        let body = serde_json::to_string(&EditDraft::new()).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn field_cycle_should_wrap_both_ways() {
        assert_eq!(UserField::Email.next(), UserField::FirstName);
        assert_eq!(UserField::FirstName.previous(), UserField::Email);
        for field in UserField::ALL {
            assert_eq!(field.next().previous(), field);
        }
    }
}
