use axum::extract::Request;
use tracing::{Span, info_span};

pub fn make_log_span(request: &Request) -> Span {
    info_span!(
        "request",
        method = ?request.method(),
        uri = ?request.uri(),
        version = ?request.version(),
    )
}
