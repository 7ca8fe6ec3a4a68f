use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::{Feedback, NewFeedback, User};
use crate::repo::{FeedbackStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<String, User>,
    feedback: BTreeMap<i32, Feedback>,
    last_feedback_id: i32,
}

/// In-memory store for tests and local runs without PostgreSQL.
///
/// Mirrors the constraints the SQL schema enforces: unique usernames and emails,
/// feedback owners must exist, and deleting a user cascades to its feedback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }

    pub fn feedback_count(&self) -> usize {
        self.tables().feedback.len()
    }
}

impl UserStore for MemoryStore {
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.get(username).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let taken = tables.users.contains_key(&user.username)
            || tables.users.values().any(|u| u.email == user.email);
        if taken {
            return Err(StoreError::Conflict);
        }
        tables.users.insert(user.username.clone(), user);
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        if tables.users.remove(username).is_none() {
            return Ok(false);
        }
        tables.feedback.retain(|_, f| f.username != username);
        Ok(true)
    }
}

impl FeedbackStore for MemoryStore {
    async fn list_feedback(&self, username: &str) -> Result<Vec<Feedback>, StoreError> {
        Ok(self
            .tables()
            .feedback
            .values()
            .filter(|f| f.username == username)
            .cloned()
            .collect())
    }

    async fn get_feedback(&self, id: i32) -> Result<Option<Feedback>, StoreError> {
        Ok(self.tables().feedback.get(&id).cloned())
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let mut tables = self.tables();
        if !tables.users.contains_key(&feedback.username) {
            return Err(StoreError::UnknownUser(feedback.username));
        }
        tables.last_feedback_id += 1;
        let row = feedback.with_id(tables.last_feedback_id);
        tables.feedback.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_feedback(&self, feedback: &Feedback) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let Some(row) = tables.feedback.get_mut(&feedback.id) else {
            return Ok(false);
        };
        row.title = feedback.title.clone();
        row.content = feedback.content.clone();
        Ok(true)
    }

    async fn delete_feedback(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables().feedback.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User {
            username: username.to_string(),
            password: "$argon2id$placeholder".to_string(),
            email: email.to_string(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
        }
    }

    fn draft(username: &str, title: &str) -> NewFeedback {
        NewFeedback {
            title: title.to_string(),
            content: "Some content".to_string(),
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let store = MemoryStore::new();

        assert!(store.get_user("alice").await.unwrap().is_none());

        store.insert_user(user("alice", "a@x.com")).await.unwrap();

        let loaded = store.get_user("alice").await.unwrap().unwrap();
        assert_eq!(loaded.email, "a@x.com");
        assert_eq!(loaded.full_name(), "First Last");
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_conflicts() {
        let store = MemoryStore::new();
        store.insert_user(user("alice", "a@x.com")).await.unwrap();

        let same_name = store.insert_user(user("alice", "other@x.com")).await;
        assert!(matches!(same_name, Err(StoreError::Conflict)));

        let same_email = store.insert_user(user("bob", "a@x.com")).await;
        assert!(matches!(same_email, Err(StoreError::Conflict)));

        assert_eq!(store.user_count(), 1);
        assert_eq!(
            store.get_user("alice").await.unwrap().unwrap().email,
            "a@x.com"
        );
    }

    #[tokio::test]
    async fn test_feedback_ids_are_assigned_in_order() {
        let store = MemoryStore::new();
        store.insert_user(user("alice", "a@x.com")).await.unwrap();

        let first = store.insert_feedback(draft("alice", "one")).await.unwrap();
        let second = store.insert_feedback(draft("alice", "two")).await.unwrap();
        assert!(second.id > first.id);

        let listed = store.list_feedback("alice").await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_feedback_requires_existing_owner() {
        let store = MemoryStore::new();

        let result = store.insert_feedback(draft("ghost", "boo")).await;
        assert!(matches!(result, Err(StoreError::UnknownUser(name)) if name == "ghost"));
        assert_eq!(store.feedback_count(), 0);
    }

    #[tokio::test]
    async fn test_update_feedback_only_touches_title_and_content() {
        let store = MemoryStore::new();
        store.insert_user(user("alice", "a@x.com")).await.unwrap();
        let row = store.insert_feedback(draft("alice", "old")).await.unwrap();

        let mut edited = row.clone();
        edited.title = "new".to_string();
        edited.content = "new content".to_string();
        edited.username = "mallory".to_string();
        assert!(store.update_feedback(&edited).await.unwrap());

        let loaded = store.get_feedback(row.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, row.id);
        assert_eq!(loaded.username, "alice");
        assert_eq!(loaded.title, "new");
        assert_eq!(loaded.content, "new content");

        let missing = Feedback { id: 999, ..edited };
        assert!(!store.update_feedback(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_to_feedback() {
        let store = MemoryStore::new();
        store.insert_user(user("alice", "a@x.com")).await.unwrap();
        store.insert_user(user("bob", "b@x.com")).await.unwrap();
        let mine = store.insert_feedback(draft("alice", "mine")).await.unwrap();
        store.insert_feedback(draft("alice", "also mine")).await.unwrap();
        let theirs = store.insert_feedback(draft("bob", "theirs")).await.unwrap();

        assert!(store.delete_user("alice").await.unwrap());

        assert!(store.get_user("alice").await.unwrap().is_none());
        assert!(store.list_feedback("alice").await.unwrap().is_empty());
        assert!(store.get_feedback(mine.id).await.unwrap().is_none());
        assert_eq!(store.get_feedback(theirs.id).await.unwrap(), Some(theirs));

        assert!(!store.delete_user("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_feedback() {
        let store = MemoryStore::new();
        store.insert_user(user("alice", "a@x.com")).await.unwrap();
        let row = store.insert_feedback(draft("alice", "bye")).await.unwrap();

        assert!(store.delete_feedback(row.id).await.unwrap());
        assert!(!store.delete_feedback(row.id).await.unwrap());
        assert_eq!(store.feedback_count(), 0);
    }
}
