//! Registration page.

use dioxus::prelude::*;
use feedback_api::forms::{FieldErrors, RegisterForm};

use super::field;

pub(super) fn view(form: &RegisterForm, errors: &FieldErrors) -> Element {
    rsx! {
        h1 { "Create Account" }
        form {
            method: "post",
            action: "/register",
            {field("Username", "username", "text", &form.username, errors)}
            {field("Password", "password", "password", "", errors)}
            {field("Email", "email", "text", &form.email, errors)}
            {field("First Name", "first_name", "text", &form.first_name, errors)}
            {field("Last Name", "last_name", "text", &form.last_name, errors)}
            button { r#type: "submit", "Register" }
        }
        p {
            "Already have an account? "
            a { href: "/login", "Log in" }
        }
    }
}
