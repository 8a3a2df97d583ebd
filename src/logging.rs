//! Middleware for logging requests and responses.

use axum::{extract::Request, middleware::Next, response::Response};

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = extract_parts_and_body_text_from_request(request).await;
    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = extract_parts_and_body_text_from_response(response).await;
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn extract_parts_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_parts_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

/// Truncate `body` to at most `limit` bytes without splitting a multibyte
/// UTF-8 character.
fn truncate_body(body: &str, limit: usize) -> &str {
    let mut end = limit.min(body.len());

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {:}...",
            truncate_body(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {:}...",
            truncate_body(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod logging_tests {
    use axum::{body::Body, extract::Request, http::Response};

    use super::{LOG_BODY_LENGTH_LIMIT, log_request, log_response, truncate_body};

    #[test]
    fn truncate_body_keeps_short_bodies_whole() {
        assert_eq!(truncate_body("hello", LOG_BODY_LENGTH_LIMIT), "hello");
    }

    #[test]
    fn truncate_body_stops_at_a_char_boundary() {
        // "é" is two bytes, so the truncation point lands inside it.
        let body = format!("{}é tail that pushes past the limit", "a".repeat(63));

        let truncated = truncate_body(&body, LOG_BODY_LENGTH_LIMIT);

        assert_eq!(truncated, "a".repeat(63));
    }

    #[test]
    fn logs_multibyte_body_longer_than_limit_without_panicking() {
        let body = format!("{}é tail that pushes past the limit", "a".repeat(63));
        assert!(body.len() > LOG_BODY_LENGTH_LIMIT);
        assert!(!body.is_char_boundary(LOG_BODY_LENGTH_LIMIT));

        // The log macros only evaluate their arguments when a subscriber is
        // active, so install one for the duration of the calls.
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let (request_parts, _) = Request::new(Body::empty()).into_parts();
            log_request(&request_parts, &body);

            let (response_parts, _) = Response::new(Body::empty()).into_parts();
            log_response(&response_parts, &body);
        });
    }
}
