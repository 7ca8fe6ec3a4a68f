//! # API crate: handlers and storage for the feedback application
//!
//! Everything behind the HTTP surface lives here. The `web` crate resolves the
//! session into a [`RequestContext`], calls one function from [`handlers`], and
//! turns the returned [`Outcome`] into a response.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2 password hashing, session keys, the request context and the access gate |
//! | [`forms`] | Registration, login and feedback forms with pure validation |
//! | [`handlers`] | One operation per route, producing an [`Outcome`] |
//! | [`paths`] | Links to user pages with the username percent-encoded |
//! | [`db`] | PostgreSQL pool, embedded migrations and the [`db::PgStore`] repository |
//!
//! ## Routes served by [`handlers`]
//!
//! - **Accounts**: `home`, `register_page`, `register`, `login_page`, `login`, `logout`
//! - **Profiles**: `show_user`, `delete_user`
//! - **Feedback**: `add_feedback_page`, `add_feedback`, `edit_feedback_page`,
//!   `edit_feedback`, `delete_feedback`

pub mod auth;
pub mod db;
mod error;
pub mod forms;
pub mod handlers;
pub mod paths;

pub use auth::RequestContext;
pub use error::Error;
pub use handlers::{Outcome, Page, SessionChange};
