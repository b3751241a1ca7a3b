//! Language negotiation middleware.
//! Applies the engine's decision to the request and response.

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{ACCEPT_LANGUAGE, HOST, LOCATION},
        HeaderMap, HeaderValue, Request,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::negotiation::engine::web_scheme;
use crate::negotiation::{Flow, Negotiation, NegotiationEngine, RequestView};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The combined `Accept-Language` value.
///
/// Repeated field lines are joined with `", "`. Bytes that are not valid
/// UTF-8 are replaced, so only the token containing them is lost.
pub fn accept_language(headers: &HeaderMap) -> Option<String> {
    let lines: Vec<_> = headers
        .get_all(ACCEPT_LANGUAGE)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(", "))
    }
}

/// Scheme announced by a proxy, first hop only, `http` or `https`.
fn forwarded_scheme(headers: &HeaderMap) -> Option<&'static str> {
    let value = headers.get(X_FORWARDED_PROTO)?.to_str().ok()?;
    web_scheme(value)
}

/// Build the engine's view of an HTTP request.
///
/// `accept_language` is the value from [`accept_language`], owned by the caller.
pub fn request_view<'a>(
    req: &'a Request<Body>,
    accept_language: Option<&'a str>,
) -> RequestView<'a> {
    let headers = req.headers();
    let uri = req.uri();

    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()));

    let scheme = forwarded_scheme(headers)
        .or_else(|| uri.scheme_str().and_then(web_scheme))
        .unwrap_or("http");

    RequestView {
        path: uri.path(),
        query: uri.query(),
        host,
        scheme,
        accept_language,
    }
}

/// Negotiate the request language.
///
/// - Not acceptable: answers with the terminal status, handler not run
/// - Redirect: answers with the redirect, handler not run
/// - Otherwise: inserts the `NegotiationResult` into request extensions,
///   runs the handler and adds `Content-Language` / `Vary` to its response
pub async fn negotiate_language(
    State(engine): State<Arc<NegotiationEngine>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let accept = accept_language(req.headers());
    let Negotiation {
        result,
        instructions,
        flow,
    } = engine.negotiate(&request_view(&req, accept.as_deref()));

    if let Flow::Halt(status) = flow {
        let mut response = status.into_response();
        instructions.apply(response.headers_mut());
        return response;
    }

    if let Some(redirect) = &instructions.redirect {
        match HeaderValue::try_from(redirect.location.as_str()) {
            Ok(location) => {
                let mut response = redirect.status.into_response();
                response.headers_mut().insert(LOCATION, location);
                instructions.apply(response.headers_mut());
                return response;
            }
            Err(e) => {
                tracing::warn!(
                    location = %redirect.location,
                    error = %e,
                    "Invalid redirect location, serving in place"
                );
            }
        }
    }

    req.extensions_mut().insert(result);

    let mut response = next.run(req).await;
    instructions.apply(response.headers_mut());
    response
}
