pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use models::{Feedback, NewFeedback, User};
pub use repo::{FeedbackStore, Store, StoreError, UserStore};
