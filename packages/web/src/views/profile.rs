//! Profile page: account details and the user's feedback.

use dioxus::prelude::*;
use feedback_api::paths;
use feedback_store::{Feedback, User};

use super::escape_attr;

pub(super) fn view(user: &User, feedback: &[Feedback], identity: Option<&str>) -> Element {
    // Edit and delete controls are only offered to the owner.
    let own = identity == Some(user.username.as_str());
    let username = &user.username;
    let add_href = escape_attr(&paths::add_feedback_path(username));
    let delete_action = escape_attr(&paths::delete_user_path(username));
    let full_name = user.full_name();
    let email = &user.email;

    rsx! {
        h1 { "{username}" }
        ul {
            li { b { "Name: " } "{full_name}" }
            li { b { "Email: " } "{email}" }
        }

        h2 { "Feedback" }
        if feedback.is_empty() {
            p { "No feedback yet." }
        }
        ul {
            for item in feedback.iter() {
                {entry(item, own)}
            }
        }

        if own {
            p {
                a { href: "{add_href}", "Add feedback" }
            }
            form {
                method: "post",
                action: "{delete_action}",
                button { r#type: "submit", "Delete account" }
            }
        }
    }
}

fn entry(item: &Feedback, own: bool) -> Element {
    let id = item.id;
    let title = &item.title;
    let content = &item.content;

    rsx! {
        li {
            h3 { "{title}" }
            p { "{content}" }
            if own {
                a { href: "/feedback/{id}/update", "Edit" }
                form {
                    method: "post",
                    action: "/feedback/{id}/delete",
                    button { r#type: "submit", "Delete" }
                }
            }
        }
    }
}
