//! Flash-message redirects
//!
//! With no server-rendered templates, flash messages ride the redirect
//! itself as a url-encoded `flash` query parameter on the target.

use axum::response::{IntoResponse, Redirect, Response};

pub fn redirect_with_flash(target: &str, message: &str) -> Response {
    let sep = if target.contains('?') { '&' } else { '?' };
    let location = format!("{}{}flash={}", target, sep, urlencoding::encode(message));
    Redirect::to(&location).into_response()
}
