//! # Request handlers
//!
//! One async function per route. A handler receives the [`RequestContext`]
//! resolved by the HTTP layer, the store, and (for submissions) the raw form. It
//! runs the access gate, validates, performs at most one read-then-write against
//! the store and describes what should happen next as an [`Outcome`]. Applying
//! the outcome (session writes, flash queueing, HTML) is the caller's job, which
//! keeps these functions testable against [`feedback_store::MemoryStore`].
//!
//! Recoverable failures never surface as `Err`:
//!
//! - validation errors and a taken username/email re-render the form,
//! - access denials redirect to `/` with a flash,
//! - an unknown feedback id is [`Outcome::NotFound`].
//!
//! `Err` is reserved for storage or hashing failures.

use feedback_store::{Feedback, NewFeedback, Store, StoreError, User};

use crate::auth::{self, Denied, RequestContext};
use crate::forms::{FeedbackForm, FieldErrors, LoginForm, RegisterForm};
use crate::paths::profile_path;
use crate::Error;

pub const TAKEN: &str = "Username or Email taken, please pick another";
pub const INVALID_LOGIN: &str = "Invalid username/password";
pub const DOUBLE_CHECK: &str = "Double check feedback and send again";

/// A page to render in response to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Register {
        form: RegisterForm,
        errors: FieldErrors,
    },
    Login {
        form: LoginForm,
        errors: FieldErrors,
    },
    Profile {
        user: User,
        feedback: Vec<Feedback>,
    },
    AddFeedback {
        username: String,
        form: FeedbackForm,
    },
    EditFeedback {
        id: i32,
        form: FeedbackForm,
    },
}

/// How the session identity changes with a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Keep,
    SignIn(String),
    SignOut,
}

/// What the HTTP layer should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Render `page`, showing `notice` alongside any queued flashes.
    Render { page: Page, notice: Option<String> },
    /// Apply `session`, queue `flash` for the next request and redirect.
    Redirect {
        to: String,
        flash: Option<String>,
        session: SessionChange,
    },
    NotFound,
}

impl Outcome {
    fn render(page: Page) -> Self {
        Self::Render { page, notice: None }
    }

    fn redirect(to: impl Into<String>, flash: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            flash: Some(flash.into()),
            session: SessionChange::Keep,
        }
    }

    fn denied(denied: Denied) -> Self {
        Self::redirect("/", denied.message())
    }
}

fn parse_feedback_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

/// `GET /`
pub fn home() -> Outcome {
    Outcome::Redirect {
        to: "/register".to_string(),
        flash: None,
        session: SessionChange::Keep,
    }
}

/// `GET /register`
pub fn register_page() -> Outcome {
    Outcome::render(Page::Register {
        form: RegisterForm::default(),
        errors: FieldErrors::new(),
    })
}

/// `POST /register`
pub async fn register<S: Store>(store: &S, form: RegisterForm) -> Result<Outcome, Error> {
    let account = match form.validate() {
        Ok(account) => account,
        Err(errors) => {
            return Ok(Outcome::render(Page::Register {
                form: form.without_password(),
                errors,
            }))
        }
    };

    let user = User {
        password: auth::hash_password(&account.password)?,
        username: account.username,
        email: account.email,
        first_name: account.first_name,
        last_name: account.last_name,
    };
    let username = user.username.clone();

    match store.insert_user(user).await {
        Ok(()) => {}
        Err(StoreError::Conflict) => {
            tracing::info!(%username, "registration rejected, username or email taken");
            let mut errors = FieldErrors::new();
            errors.add("username", TAKEN);
            return Ok(Outcome::render(Page::Register {
                form: form.without_password(),
                errors,
            }));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(%username, "registered new user");
    Ok(Outcome::Redirect {
        to: profile_path(&username),
        flash: Some("Welcome!".to_string()),
        session: SessionChange::SignIn(username),
    })
}

/// `GET /login`
pub fn login_page() -> Outcome {
    Outcome::render(Page::Login {
        form: LoginForm::default(),
        errors: FieldErrors::new(),
    })
}

/// `POST /login`
pub async fn login<S: Store>(store: &S, form: LoginForm) -> Result<Outcome, Error> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            return Ok(Outcome::render(Page::Login {
                form: form.without_password(),
                errors,
            }))
        }
    };

    let user = store.get_user(&credentials.username).await?;
    let authenticated = match user {
        Some(ref user) => auth::verify_password(&credentials.password, &user.password)?,
        None => false,
    };

    if !authenticated {
        tracing::warn!(username = %credentials.username, "failed login");
        let mut errors = FieldErrors::new();
        errors.add("username", INVALID_LOGIN);
        return Ok(Outcome::render(Page::Login {
            form: form.without_password(),
            errors,
        }));
    }

    let username = credentials.username;
    tracing::info!(%username, "logged in");
    Ok(Outcome::Redirect {
        to: profile_path(&username),
        flash: Some(format!("Welcome Back, {username}")),
        session: SessionChange::SignIn(username),
    })
}

/// `GET /users/{username}`
pub async fn show_user<S: Store>(
    ctx: &RequestContext,
    store: &S,
    username: &str,
) -> Result<Outcome, Error> {
    if let Err(denied) = ctx.authorize(None) {
        return Ok(Outcome::denied(denied));
    }

    let Some(user) = store.get_user(username).await? else {
        return Ok(Outcome::redirect("/", "That User does not exist!!"));
    };
    let feedback = store.list_feedback(username).await?;
    Ok(Outcome::render(Page::Profile { user, feedback }))
}

/// `GET|POST /users/{username}/delete`
///
/// Deleting the account also signs the session out, so a stale identity never
/// outlives the row it names.
pub async fn delete_user<S: Store>(
    ctx: &RequestContext,
    store: &S,
    username: &str,
) -> Result<Outcome, Error> {
    if let Err(denied) = ctx.authorize(Some(username)) {
        tracing::warn!(target_user = %username, identity = ?ctx.username, "denied account deletion");
        return Ok(Outcome::denied(denied));
    }

    store.delete_user(username).await?;
    tracing::info!(%username, "deleted user and their feedback");
    Ok(Outcome::Redirect {
        to: "/".to_string(),
        flash: Some("User deleted!".to_string()),
        session: SessionChange::SignOut,
    })
}

/// `GET /users/{username}/feedback/add`
pub fn add_feedback_page(ctx: &RequestContext, username: &str) -> Outcome {
    if let Err(denied) = ctx.authorize(Some(username)) {
        return Outcome::denied(denied);
    }
    Outcome::render(Page::AddFeedback {
        username: username.to_string(),
        form: FeedbackForm::default(),
    })
}

/// `POST /users/{username}/feedback/add`
pub async fn add_feedback<S: Store>(
    ctx: &RequestContext,
    store: &S,
    username: &str,
    form: FeedbackForm,
) -> Result<Outcome, Error> {
    if let Err(denied) = ctx.authorize(Some(username)) {
        tracing::warn!(target_user = %username, identity = ?ctx.username, "denied feedback creation");
        return Ok(Outcome::denied(denied));
    }

    let Ok(fields) = form.validate() else {
        return Ok(Outcome::Render {
            page: Page::AddFeedback {
                username: username.to_string(),
                form,
            },
            notice: Some(DOUBLE_CHECK.to_string()),
        });
    };

    let feedback = store
        .insert_feedback(NewFeedback {
            title: fields.title,
            content: fields.content,
            username: username.to_string(),
        })
        .await?;
    tracing::info!(%username, id = feedback.id, "added feedback");
    Ok(Outcome::redirect(profile_path(username), "Feedback added!"))
}

/// Resolve the feedback an edit or delete targets, in the order: session,
/// existence, ownership.
async fn owned_feedback<S: Store>(
    ctx: &RequestContext,
    store: &S,
    raw_id: &str,
) -> Result<Result<Feedback, Outcome>, Error> {
    if ctx.username().is_none() {
        return Ok(Err(Outcome::denied(Denied::NotAuthenticated)));
    }

    let feedback = match parse_feedback_id(raw_id) {
        Some(id) => store.get_feedback(id).await?,
        None => None,
    };
    let Some(feedback) = feedback else {
        return Ok(Err(Outcome::NotFound));
    };

    if let Err(denied) = ctx.authorize(Some(&feedback.username)) {
        tracing::warn!(id = feedback.id, identity = ?ctx.username, "denied access to feedback");
        return Ok(Err(Outcome::denied(denied)));
    }
    Ok(Ok(feedback))
}

/// `GET /feedback/{id}/update`
pub async fn edit_feedback_page<S: Store>(
    ctx: &RequestContext,
    store: &S,
    raw_id: &str,
) -> Result<Outcome, Error> {
    let feedback = match owned_feedback(ctx, store, raw_id).await? {
        Ok(feedback) => feedback,
        Err(outcome) => return Ok(outcome),
    };
    Ok(Outcome::render(Page::EditFeedback {
        id: feedback.id,
        form: FeedbackForm::from(&feedback),
    }))
}

/// `POST /feedback/{id}/update`
pub async fn edit_feedback<S: Store>(
    ctx: &RequestContext,
    store: &S,
    raw_id: &str,
    form: FeedbackForm,
) -> Result<Outcome, Error> {
    let mut feedback = match owned_feedback(ctx, store, raw_id).await? {
        Ok(feedback) => feedback,
        Err(outcome) => return Ok(outcome),
    };

    let Ok(fields) = form.validate() else {
        return Ok(Outcome::Render {
            page: Page::EditFeedback {
                id: feedback.id,
                form,
            },
            notice: Some(DOUBLE_CHECK.to_string()),
        });
    };

    feedback.title = fields.title;
    feedback.content = fields.content;
    if !store.update_feedback(&feedback).await? {
        return Ok(Outcome::NotFound);
    }
    tracing::info!(id = feedback.id, username = %feedback.username, "edited feedback");
    Ok(Outcome::redirect(
        profile_path(&feedback.username),
        "Feedback edited!",
    ))
}

/// `GET|POST /feedback/{id}/delete`
pub async fn delete_feedback<S: Store>(
    ctx: &RequestContext,
    store: &S,
    raw_id: &str,
) -> Result<Outcome, Error> {
    let feedback = match owned_feedback(ctx, store, raw_id).await? {
        Ok(feedback) => feedback,
        Err(outcome) => return Ok(outcome),
    };

    store.delete_feedback(feedback.id).await?;
    tracing::info!(id = feedback.id, username = %feedback.username, "deleted feedback");
    Ok(Outcome::redirect(
        profile_path(&feedback.username),
        "Feedback deleted!",
    ))
}

/// `POST /logout`
pub fn logout(ctx: &RequestContext) -> Outcome {
    if let Some(username) = ctx.username() {
        tracing::info!(%username, "logged out");
    }
    Outcome::Redirect {
        to: "/".to_string(),
        flash: Some("Goodbye!".to_string()),
        session: SessionChange::SignOut,
    }
}
