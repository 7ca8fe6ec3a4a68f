//! Session plumbing: identity, sign-in/out and the flash queue.

use feedback_api::auth::{FLASH_KEY, SESSION_USERNAME_KEY};
use feedback_api::{RequestContext, SessionChange};
use tower_sessions::Session;

use crate::AppError;

/// Resolve the identity stored in the session.
pub(crate) async fn context(session: &Session) -> Result<RequestContext, AppError> {
    let username: Option<String> = session.get(SESSION_USERNAME_KEY).await?;
    Ok(RequestContext { username })
}

pub(crate) async fn apply_change(session: &Session, change: SessionChange) -> Result<(), AppError> {
    match change {
        SessionChange::Keep => {}
        SessionChange::SignIn(username) => {
            session.cycle_id().await?;
            session.insert(SESSION_USERNAME_KEY, username).await?;
        }
        SessionChange::SignOut => {
            session.remove::<String>(SESSION_USERNAME_KEY).await?;
        }
    }
    Ok(())
}

/// Queue a message for the next rendered page.
pub(crate) async fn push_flash(session: &Session, message: String) -> Result<(), AppError> {
    let mut flashes: Vec<String> = session.get(FLASH_KEY).await?.unwrap_or_default();
    flashes.push(message);
    session.insert(FLASH_KEY, flashes).await?;
    Ok(())
}

/// Drain queued messages; each is shown exactly once.
pub(crate) async fn take_flashes(session: &Session) -> Result<Vec<String>, AppError> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}
