//! # Domain records for accounts and feedback
//!
//! Plain data carried between the repository traits in [`crate::repo`] and the
//! request handlers. They hold no behaviour beyond construction; ownership rules
//! are enforced by the callers, not by these types.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | An account row. `username` is the primary key and `password` is always a PHC-format hash. |
//! | [`Feedback`] | A stored feedback row with its assigned `id` and owning `username`. |
//! | [`NewFeedback`] | A feedback row that has not been assigned an `id` yet. |

use serde::{Deserialize, Serialize};

/// An account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key, unique.
    pub username: String,
    /// Salted password hash, never plaintext.
    pub password: String,
    /// Unique across all users.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// "First Last", used by the profile page.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A feedback row owned by `username`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub username: String,
}

/// Feedback waiting to be inserted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub title: String,
    pub content: String,
    pub username: String,
}

impl NewFeedback {
    /// Attach the id assigned by storage.
    pub fn with_id(self, id: i32) -> Feedback {
        Feedback {
            id,
            title: self.title,
            content: self.content,
            username: self.username,
        }
    }
}
