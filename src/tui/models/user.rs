//! # User Model
//!
//! User records and page envelopes as returned by the directory API,
//! plus the pure search filter over a page of records.

use serde::{Deserialize, Serialize};

use super::draft::{EditDraft, UserField};

/// A single directory entry, deserialized verbatim from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

impl User {
    /// Current value of an editable field
    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::FirstName => &self.first_name,
            UserField::LastName => &self.last_name,
            UserField::Email => &self.email,
        }
    }

    /// Merge a draft into this record, leaving unmentioned fields untouched
    pub fn apply(&mut self, draft: &EditDraft) {
        for (field, value) in draft.iter() {
            let slot = match field {
                UserField::FirstName => &mut self.first_name,
                UserField::LastName => &mut self.last_name,
                UserField::Email => &mut self.email,
            };
            *slot = value.to_string();
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match against first name, last name or email.
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// One page of the remote user collection
///
/// Only `data` is required. Pages past the end of the collection may come
/// back with an empty or missing `data` array; both decode to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub data: Vec<User>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Filter records by a search query. An empty query matches everything.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.to_lowercase();
    users.iter().filter(|user| user.matches(&needle)).collect()
}

#[cfg(test)]
pub(crate) fn sample_users() -> Vec<User> {
    [
        (1, "George", "Bluth", "george.bluth@reqres.in"),
        (2, "Janet", "Weaver", "janet.weaver@reqres.in"),
        (3, "Emma", "Wong", "emma.wong@reqres.in"),
        (4, "Eve", "Holt", "eve.holt@reqres.in"),
        (5, "Charles", "Morris", "charles.morris@reqres.in"),
    ]
    .into_iter()
    .map(|(id, first, last, email)| User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
    })
    .collect()
}
