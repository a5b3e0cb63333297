//! Helpers shared by the list and todo handlers
//!
//! A browser navigation gets a `303 See Other` to the page it should show
//! next, with the outcome stored as a flash message. A script-driven request
//! gets a bare status instead.

use actix_web::{http::header, HttpRequest, HttpResponse};
use session_manager::Session;
use todo_core::{ListId, NotFoundError, TodoError, TodoId};

pub const LISTS_PATH: &str = "/lists";

const XHR_HEADER: &str = "X-Requested-With";
const XHR_VALUE: &str = "XMLHttpRequest";

/// True when the request was sent by a script rather than a page navigation
pub fn is_xhr(req: &HttpRequest) -> bool {
    req.headers()
        .get(XHR_HEADER)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v == XHR_VALUE)
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn list_path(id: ListId) -> String {
    format!("{LISTS_PATH}/{id}")
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

/// Path segment to list id; anything malformed names no list
pub fn parse_list_id(raw: &str) -> Result<ListId, TodoError> {
    parse_id(raw).ok_or_else(|| NotFoundError::ListNotFound.into())
}

/// Path segment to todo id; anything malformed names no todo
pub fn parse_todo_id(raw: &str) -> Result<TodoId, TodoError> {
    parse_id(raw).ok_or_else(|| NotFoundError::TodoNotFound.into())
}

/// Store the outcome of an operation for the next page.
///
/// Validation failures are answered in the same response, so only success
/// and not-found outcomes are kept.
pub fn record_outcome<T>(session: &mut Session, result: &Result<T, TodoError>, success: &str) {
    match result {
        Ok(_) => session.set_success(success),
        Err(err) if err.is_not_found() => session.set_error(err.to_string()),
        Err(_) => {}
    }
}

/// Where to send the browser after a failed lookup: the list when only the
/// todo was missing, otherwise the overview.
pub fn not_found_location(err: &TodoError, raw_list_id: &str) -> String {
    match (err, parse_id(raw_list_id)) {
        (TodoError::NotFound(NotFoundError::TodoNotFound), Some(list_id)) => list_path(list_id),
        _ => LISTS_PATH.to_string(),
    }
}
