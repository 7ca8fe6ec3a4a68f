//! # Database module: PostgreSQL pool, schema and store
//!
//! - [`connect`] opens the shared [`sqlx::PgPool`]; the HTTP binary creates it
//!   once at startup and clones it into the router state and the session store.
//! - [`MIGRATOR`] embeds the SQL files under `migrations/`. They create `users`
//!   (username primary key, unique email) and `feedback`, whose `username` column
//!   references `users` with `ON DELETE CASCADE`.
//! - [`PgStore`] implements the `feedback_store` repository traits on top of the
//!   pool, translating unique and foreign-key violations into
//!   [`feedback_store::StoreError`] variants.

mod pool;
mod postgres;

pub use pool::connect;
pub use postgres::PgStore;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
