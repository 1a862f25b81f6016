//! The catch-all 404 for routes outside `/states`.
//!
//! The body follows the client's `Accept` header: an HTML page when HTML is
//! acceptable (including when no header is sent), JSON when JSON is, and
//! plain text otherwise.

use axum::{
  Json,
  http::{HeaderMap, StatusCode, header},
  response::{Html, IntoResponse, Response},
};
use serde_json::json;

const NOT_FOUND: &str = "404 Not Found";

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>404 Not Found</title></head>
<body><h1>404 Not Found</h1><p>The requested resource does not exist.</p></body>
</html>
";

/// Whether an `Accept` header value admits `mime` with a non-zero quality.
fn accepts(accept: &str, mime: &str) -> bool {
  let (kind, _) = mime.split_once('/').unwrap_or((mime, ""));

  accept.split(',').any(|range| {
    let mut parts = range.split(';').map(str::trim);
    let media = parts.next().unwrap_or_default().to_ascii_lowercase();
    let refused = parts.any(|p| {
      p.strip_prefix("q=")
        .and_then(|q| q.parse::<f32>().ok())
        .is_some_and(|q| q <= 0.0)
    });

    !refused
      && (media == "*/*" || media == mime || media == format!("{kind}/*"))
  })
}

pub async fn not_found(headers: HeaderMap) -> Response {
  let accept = headers
    .get(header::ACCEPT)
    .and_then(|v| v.to_str().ok());

  match accept {
    None => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
    Some(a) if accepts(a, "text/html") => {
      (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
    }
    Some(a) if accepts(a, "application/json") => {
      (StatusCode::NOT_FOUND, Json(json!({ "error": NOT_FOUND }))).into_response()
    }
    Some(_) => (StatusCode::NOT_FOUND, NOT_FOUND).into_response(),
  }
}
