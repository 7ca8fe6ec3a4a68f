use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use feedback_api::forms::{FeedbackForm, LoginForm, RegisterForm};
use feedback_api::{handlers, Outcome, RequestContext};
use feedback_store::Store;
use tower_sessions::Session;

use crate::session::{apply_change, context, push_flash, take_flashes};
use crate::{views, AppError};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
}

/// Build the application routes over `store`.
///
/// Requires a `tower_sessions::SessionManagerLayer` to be added by the caller.
pub fn router<S: Store>(store: S) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/register", get(register_page).post(register::<S>))
        .route("/login", get(login_page).post(login::<S>))
        .route("/logout", post(logout))
        .route("/users/{username}", get(show_user::<S>))
        .route(
            "/users/{username}/delete",
            get(delete_user::<S>).post(delete_user::<S>),
        )
        .route(
            "/users/{username}/feedback/add",
            get(add_feedback_page).post(add_feedback::<S>),
        )
        .route(
            "/feedback/{id}/update",
            get(edit_feedback_page::<S>).post(edit_feedback::<S>),
        )
        .route(
            "/feedback/{id}/delete",
            get(delete_feedback::<S>).post(delete_feedback::<S>),
        )
        .with_state(AppState { store })
}

/// Turn a handler outcome into a response.
async fn respond(
    session: &Session,
    ctx: &RequestContext,
    outcome: Outcome,
) -> Result<Response, AppError> {
    match outcome {
        Outcome::Redirect {
            to,
            flash,
            session: change,
        } => {
            apply_change(session, change).await?;
            if let Some(message) = flash {
                push_flash(session, message).await?;
            }
            Ok(Redirect::to(&to).into_response())
        }
        Outcome::Render { page, notice } => {
            let mut flashes = take_flashes(session).await?;
            flashes.extend(notice);
            Ok(Html(views::render(page, ctx.username(), flashes)).into_response())
        }
        Outcome::NotFound => Ok((
            StatusCode::NOT_FOUND,
            Html(views::not_found(ctx.username())),
        )
            .into_response()),
    }
}

async fn home(session: Session) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    respond(&session, &ctx, handlers::home()).await
}

async fn register_page(session: Session) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    respond(&session, &ctx, handlers::register_page()).await
}

async fn register<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::register(&state.store, form).await?;
    respond(&session, &ctx, outcome).await
}

async fn login_page(session: Session) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    respond(&session, &ctx, handlers::login_page()).await
}

async fn login<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::login(&state.store, form).await?;
    respond(&session, &ctx, outcome).await
}

async fn logout(session: Session) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    respond(&session, &ctx, handlers::logout(&ctx)).await
}

async fn show_user<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::show_user(&ctx, &state.store, &username).await?;
    respond(&session, &ctx, outcome).await
}

async fn delete_user<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::delete_user(&ctx, &state.store, &username).await?;
    respond(&session, &ctx, outcome).await
}

async fn add_feedback_page(
    session: Session,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    respond(&session, &ctx, handlers::add_feedback_page(&ctx, &username)).await
}

async fn add_feedback<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Path(username): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::add_feedback(&ctx, &state.store, &username, form).await?;
    respond(&session, &ctx, outcome).await
}

async fn edit_feedback_page<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::edit_feedback_page(&ctx, &state.store, &id).await?;
    respond(&session, &ctx, outcome).await
}

async fn edit_feedback<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::edit_feedback(&ctx, &state.store, &id, form).await?;
    respond(&session, &ctx, outcome).await
}

async fn delete_feedback<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let ctx = context(&session).await?;
    let outcome = handlers::delete_feedback(&ctx, &state.store, &id).await?;
    respond(&session, &ctx, outcome).await
}
