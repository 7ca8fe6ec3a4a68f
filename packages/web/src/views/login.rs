//! Login page.

use dioxus::prelude::*;
use feedback_api::forms::{FieldErrors, LoginForm};

use super::field;

pub(super) fn view(form: &LoginForm, errors: &FieldErrors) -> Element {
    rsx! {
        h1 { "Log In" }
        form {
            method: "post",
            action: "/login",
            {field("Username", "username", "text", &form.username, errors)}
            {field("Password", "password", "password", "", errors)}
            button { r#type: "submit", "Log in" }
        }
        p {
            "No account yet? "
            a { href: "/register", "Register" }
        }
    }
}
