//! # Repository contract for users and feedback
//!
//! Handlers never talk to a database directly. Everything goes through the two
//! async traits in this module, so the same handler code runs against
//! PostgreSQL in production and against [`crate::MemoryStore`] in tests.
//!
//! ## [`UserStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`get_user`](UserStore::get_user) | Look up an account by username. |
//! | [`insert_user`](UserStore::insert_user) | Insert a new account. A duplicate username or email yields [`StoreError::Conflict`] and writes nothing. |
//! | [`delete_user`](UserStore::delete_user) | Remove an account together with every feedback row it owns. |
//!
//! ## [`FeedbackStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`list_feedback`](FeedbackStore::list_feedback) | All rows owned by a username, ordered by id. |
//! | [`get_feedback`](FeedbackStore::get_feedback) | One row by id. |
//! | [`insert_feedback`](FeedbackStore::insert_feedback) | Insert and return the row with its assigned id. |
//! | [`update_feedback`](FeedbackStore::update_feedback) | Overwrite `title` and `content` of an existing row. |
//! | [`delete_feedback`](FeedbackStore::delete_feedback) | Remove one row by id. |
//!
//! The returned futures are `Send` so handlers generic over a [`Store`] can be
//! mounted directly as axum routes.

use std::future::Future;

use crate::models::{Feedback, NewFeedback, User};

/// Boxed error from a storage backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A username or email is already taken.
    #[error("username or email already taken")]
    Conflict,
    /// Feedback referenced an owner that does not exist.
    #[error("no user named {0:?}")]
    UnknownUser(String),
    #[error("storage backend failed: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }
}

/// Account storage.
pub trait UserStore {
    fn get_user(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
    fn insert_user(&self, user: User) -> impl Future<Output = Result<(), StoreError>> + Send;
    /// Returns `false` when no such user existed.
    fn delete_user(&self, username: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Feedback storage.
pub trait FeedbackStore {
    fn list_feedback(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<Feedback>, StoreError>> + Send;
    fn get_feedback(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<Feedback>, StoreError>> + Send;
    fn insert_feedback(
        &self,
        feedback: NewFeedback,
    ) -> impl Future<Output = Result<Feedback, StoreError>> + Send;
    /// Only `title` and `content` are written. Returns `false` when the row is gone.
    fn update_feedback(
        &self,
        feedback: &Feedback,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
    fn delete_feedback(&self, id: i32) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Everything a request handler needs from storage.
pub trait Store: UserStore + FeedbackStore + Clone + Send + Sync + 'static {}

impl<T> Store for T where T: UserStore + FeedbackStore + Clone + Send + Sync + 'static {}
