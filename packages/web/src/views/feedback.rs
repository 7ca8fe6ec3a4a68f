//! Add and edit forms for feedback.

use dioxus::prelude::*;
use feedback_api::forms::FeedbackForm;
use feedback_api::paths;

use super::escape_attr;

pub(super) fn add(username: &str, form: &FeedbackForm) -> Element {
    let action = escape_attr(&paths::add_feedback_path(username));
    rsx! {
        h1 { "Add Feedback" }
        {feedback_form(&action, form, "Add")}
    }
}

pub(super) fn edit(id: i32, form: &FeedbackForm) -> Element {
    let action = format!("/feedback/{id}/update");
    rsx! {
        h1 { "Edit Feedback" }
        {feedback_form(&action, form, "Save")}
    }
}

fn feedback_form(action: &str, form: &FeedbackForm, submit: &str) -> Element {
    let title = escape_attr(&form.title);
    let content = &form.content;

    rsx! {
        form {
            method: "post",
            action: "{action}",
            div {
                class: "field",
                label {
                    "Title"
                    input { r#type: "text", name: "title", value: "{title}" }
                }
            }
            div {
                class: "field",
                label {
                    "Content"
                    textarea { name: "content", "{content}" }
                }
            }
            button { r#type: "submit", "{submit}" }
        }
    }
}
