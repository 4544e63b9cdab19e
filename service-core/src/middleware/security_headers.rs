use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Content policy for the server-rendered pages: same-origin resources only,
/// inline styles allowed, forms may only post back to this origin.
const PAGE_CSP: &str = "default-src 'self'; \
                        style-src 'self' 'unsafe-inline'; \
                        img-src 'self' data:; \
                        form-action 'self'; \
                        frame-ancestors 'none'";

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        header::HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        header::HeaderValue::from_static(PAGE_CSP),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );

    response
}
