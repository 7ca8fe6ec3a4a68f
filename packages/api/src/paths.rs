//! Links into the `/users/{username}` tree.
//!
//! Usernames are free text, so they go into URLs as a single percent-encoded
//! path segment. The router's `Path` extractor decodes them back.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes that may not appear raw inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// `/users/{username}`
pub fn profile_path(username: &str) -> String {
    format!("/users/{}", utf8_percent_encode(username, SEGMENT))
}

/// `/users/{username}/delete`
pub fn delete_user_path(username: &str) -> String {
    format!("{}/delete", profile_path(username))
}

/// `/users/{username}/feedback/add`
pub fn add_feedback_path(username: &str) -> String {
    format!("{}/feedback/add", profile_path(username))
}
