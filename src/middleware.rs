use super::errors::ServerError;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Handlers return bare `String`s of HTML; label those as such, and leave
/// alone anything (like the PDF download) that already says what it is.
pub async fn html_headers<B>(
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, ServerError> {
    let mut response = next.run(request).await;
    let succeeded = response.status().is_success();
    let headers = response.headers_mut();
    let is_plain_text = headers
        .get(CONTENT_TYPE)
        .map(|ct| ct.as_bytes().starts_with(b"text/plain"))
        .unwrap_or(true);
    if is_plain_text && succeeded {
        headers.insert(CONTENT_TYPE, HeaderValue::from_str("text/html")?);
    }

    Ok(response)
}
