//! Server-rendered HTML pages.
//!
//! Each page body is built with `rsx!` inside a root `Body` component (navigation
//! bar, queued flash messages, page content) on a fresh `VirtualDom`, serialised
//! with `dioxus-ssr` and wrapped in a static document shell. There is no
//! client-side runtime.
//!
//! `dioxus-ssr` escapes text nodes but writes attribute values verbatim, so every
//! dynamic attribute goes through [`escape_attr`] first.

use dioxus::prelude::*;
use feedback_api::forms::FieldErrors;
use feedback_api::paths;
use feedback_api::Page;

mod feedback;
mod login;
mod profile;
mod register;

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 40rem; margin: 0 auto; padding: 1rem; color: #37352f; }
nav { display: flex; gap: 1rem; align-items: center; margin-bottom: 1.5rem; }
nav form { margin: 0; }
.flash { padding: 0.5rem; background: #eef6ee; border: 1px solid #9c9; border-radius: 4px; }
.field { display: flex; flex-direction: column; margin-bottom: 0.75rem; }
.error { color: #c33; }
";

/// Render a handler page as a complete HTML document.
pub fn render(page: Page, identity: Option<&str>, flashes: Vec<String>) -> String {
    document(Content::Page(page), identity, flashes)
}

pub fn not_found(identity: Option<&str>) -> String {
    document(Content::NotFound, identity, Vec::new())
}

pub fn server_error() -> String {
    document(Content::ServerError, None, Vec::new())
}

#[derive(Clone, PartialEq)]
enum Content {
    Page(Page),
    NotFound,
    ServerError,
}

impl Content {
    fn heading(&self) -> &'static str {
        match self {
            Content::Page(Page::Register { .. }) => "Register",
            Content::Page(Page::Login { .. }) => "Login",
            Content::Page(Page::Profile { .. }) => "Profile",
            Content::Page(Page::AddFeedback { .. }) => "Add Feedback",
            Content::Page(Page::EditFeedback { .. }) => "Edit Feedback",
            Content::NotFound => "Not Found",
            Content::ServerError => "Error",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct BodyProps {
    content: Content,
    identity: Option<String>,
    flashes: Vec<String>,
}

fn document(content: Content, identity: Option<&str>, flashes: Vec<String>) -> String {
    let heading = content.heading();
    let mut dom = VirtualDom::new_with_props(
        Body,
        BodyProps {
            content,
            identity: identity.map(str::to_string),
            flashes,
        },
    );
    dom.rebuild_in_place();
    let body = dioxus_ssr::render(&dom);

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\
         <head><meta charset=\"utf-8\"><title>{heading} | Feedback</title><style>{STYLE}</style></head>\
         <body>{body}</body>\
         </html>"
    )
}

#[allow(non_snake_case)]
fn Body(props: BodyProps) -> Element {
    let identity = props.identity.as_deref();
    let main_content = match &props.content {
        Content::Page(Page::Register { form, errors }) => register::view(form, errors),
        Content::Page(Page::Login { form, errors }) => login::view(form, errors),
        Content::Page(Page::Profile { user, feedback }) => profile::view(user, feedback, identity),
        Content::Page(Page::AddFeedback { username, form }) => feedback::add(username, form),
        Content::Page(Page::EditFeedback { id, form }) => feedback::edit(*id, form),
        Content::NotFound => rsx! {
            h1 { "Not Found" }
            p { "The requested resource does not exist." }
        },
        Content::ServerError => rsx! {
            h1 { "Something went wrong" }
            p { "Please try again later." }
        },
    };

    rsx! {
        {nav(identity)}
        main {
            for message in props.flashes.iter() {
                p { class: "flash", "{message}" }
            }
            {main_content}
        }
    }
}

/// Escape a value for use inside a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn nav(identity: Option<&str>) -> Element {
    rsx! {
        nav {
            a { href: "/", "Feedback" }
            if let Some(username) = identity {
                a { href: escape_attr(&paths::profile_path(username)), "{username}" }
                form {
                    method: "post",
                    action: "/logout",
                    button { r#type: "submit", "Logout" }
                }
            } else {
                a { href: "/login", "Login" }
                a { href: "/register", "Register" }
            }
        }
    }
}

/// Labelled input followed by its validation messages.
fn field(label: &str, name: &str, kind: &str, value: &str, errors: &FieldErrors) -> Element {
    let messages = errors.get(name);
    let value = escape_attr(value);
    rsx! {
        div {
            class: "field",
            label {
                "{label}"
                input { r#type: "{kind}", name: "{name}", value: "{value}" }
            }
            for message in messages.iter() {
                small { class: "error", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_api::forms::{FeedbackForm, LoginForm, RegisterForm};
    use feedback_store::{Feedback, User};

    fn alice() -> User {
        User {
            username: "alice".into(),
            password: "$argon2id$v=19$secret-hash".into(),
            email: "a@x.com".into(),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
        }
    }

    #[test]
    fn test_register_page_shows_errors_and_flashes() {
        let mut errors = FieldErrors::new();
        errors.add("username", "Username or Email taken, please pick another");
        let page = Page::Register {
            form: RegisterForm {
                username: "alice".into(),
                ..Default::default()
            },
            errors,
        };

        let html = render(page, None, vec!["Please login first!".to_string()]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Username or Email taken, please pick another"));
        assert!(html.contains("Please login first!"));
        assert!(html.contains(r#"action="/register""#));
        assert!(html.contains(r#"href="/login""#));
    }

    #[test]
    fn test_nav_offers_logout_form_when_signed_in() {
        let page = Page::Login {
            form: LoginForm::default(),
            errors: FieldErrors::new(),
        };
        let html = render(page, Some("alice"), Vec::new());
        assert!(html.contains(r#"action="/logout""#));
        assert!(html.contains(r#"method="post""#));
        assert!(html.contains(r#"href="/users/alice""#));
    }

    #[test]
    fn test_profile_lists_feedback_without_password() {
        let feedback = vec![Feedback {
            id: 7,
            title: "Great service".into(),
            content: "Loved it".into(),
            username: "alice".into(),
        }];
        let page = Page::Profile {
            user: alice(),
            feedback,
        };

        let own = render(page.clone(), Some("alice"), Vec::new());
        assert!(own.contains("Alice Liddell"));
        assert!(own.contains("Great service"));
        assert!(own.contains("/feedback/7/update"));
        assert!(own.contains("/users/alice/delete"));
        assert!(!own.contains("secret-hash"));

        let visitor = render(page, Some("bob"), Vec::new());
        assert!(visitor.contains("Great service"));
        assert!(!visitor.contains("/feedback/7/update"));
        assert!(!visitor.contains("/users/alice/delete"));
    }

    #[test]
    fn test_edit_page_is_prefilled() {
        let page = Page::EditFeedback {
            id: 3,
            form: FeedbackForm {
                title: "Old title".into(),
                content: "Old content".into(),
            },
        };
        let html = render(page, Some("alice"), Vec::new());
        assert!(html.contains("/feedback/3/update"));
        assert!(html.contains("Old title"));
        assert!(html.contains("Old content"));
    }

    #[test]
    fn test_textarea_content_is_escaped() {
        let page = Page::AddFeedback {
            username: "alice".into(),
            form: FeedbackForm {
                title: String::new(),
                content: "<script>alert(1)</script>".into(),
            },
        };
        let html = render(page, Some("alice"), Vec::new());
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let page = Page::Register {
            form: RegisterForm {
                username: r#""><script>alert(document.cookie)</script>"#.into(),
                ..Default::default()
            },
            errors: FieldErrors::new(),
        };
        let html = render(page, None, Vec::new());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));

        let page = Page::EditFeedback {
            id: 1,
            form: FeedbackForm {
                title: r#""><img src=x onerror=alert(1)>"#.into(),
                content: "fine".into(),
            },
        };
        let html = render(page, Some("alice"), Vec::new());
        assert!(!html.contains("<img"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;img src=x onerror=alert(1)&gt;""#));
    }

    #[test]
    fn test_usernames_in_links_are_encoded() {
        let user = User {
            username: r#"a"b c"#.into(),
            ..alice()
        };
        let page = Page::Profile {
            user,
            feedback: Vec::new(),
        };
        let html = render(page, Some(r#"a"b c"#), Vec::new());
        assert!(html.contains(r#"href="/users/a%22b%20c""#));
        assert!(html.contains(r#"href="/users/a%22b%20c/feedback/add""#));
        assert!(html.contains(r#"action="/users/a%22b%20c/delete""#));
        assert!(!html.contains(r#"/users/a"b"#));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("plain"), "plain");
        assert_eq!(escape_attr(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_document_shell() {
        let html = not_found(None);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\"><head>"));
        assert!(html.contains("<title>Not Found | Feedback</title>"));
        assert!(html.contains("<body><nav"));
        assert!(html.ends_with("</body></html>"));
    }
}
