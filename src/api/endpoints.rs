//! API paths, relative to the configured base URL.

use reqwest::Url;

pub const REGISTER: &str = "/user/register";
pub const LOGIN: &str = "/user/login";
pub const CREATE_POST: &str = "/post/create";
pub const LIST_POSTS: &str = "/post";

#[must_use]
pub fn update_post(id: &str) -> String {
    format!("/post/update/{}", segment(id))
}

#[must_use]
pub fn delete_post(id: &str) -> String {
    format!("/post/delete/{}", segment(id))
}

#[must_use]
pub fn apply_post(id: &str) -> String {
    format!("/post/apply/{}", segment(id))
}

#[must_use]
pub fn post_detail(id: &str) -> String {
    format!("/post/{}", segment(id))
}

#[must_use]
pub fn update_user(id: &str) -> String {
    format!("/user/update/{}", segment(id))
}

#[must_use]
pub fn update_password(id: &str) -> String {
    format!("/user/updatePassword/{}", segment(id))
}

#[must_use]
pub fn user_detail(id: &str) -> String {
    format!("/user/{}", segment(id))
}

/// Percent-encodes `id` as one path segment, so `/`, `?`, `#` and `%` in
/// it cannot change the shape of the path.
fn segment(id: &str) -> String {
    // A fixed special-scheme base always parses and always has path segments.
    let Ok(mut url) = Url::parse("http://localhost") else {
        return id.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(id);
    }
    let path = url.path();
    path.strip_prefix('/').unwrap_or(path).to_string()
}
