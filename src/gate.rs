use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};

use crate::{
    access::{self, Decision, RedirectTarget},
    auth::SessionDecoderState,
    config::AppConfig,
};

/// access_gate
///
/// Runs the access rules in front of every page.
///
/// *Mechanism*: paths outside the guarded pattern set pass straight through.
/// For guarded paths the session is decoded through the configured
/// `SessionDecoder`; a decode failure is logged and the request continues as
/// anonymous. The resulting `Decision` either forwards the request (with the
/// session stored in its extensions for `CurrentSession`) or answers with a
/// 307 redirect.
pub async fn access_gate(
    State(sessions): State<SessionDecoderState>,
    State(config): State<AppConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if !access::is_guarded(&path) || access::is_bypassed(&path) {
        return next.run(request).await;
    }

    let session = match sessions.decode(request.headers()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "session rejected, continuing as anonymous");
            None
        }
    };

    match access::decide(&path, session.as_ref()) {
        Decision::Allow => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        Decision::Redirect(target) => {
            tracing::info!(
                path = %path,
                role = session.as_ref().map(|s| s.role.as_str()).unwrap_or("anonymous"),
                redirect_to = %target.path(),
                "access gate redirect"
            );
            redirect(&config, &target)
        }
    }
}

/// Temporary redirect, matching what the browser-side router expects.
/// A target that cannot be carried in a header falls back to the not-found page.
fn redirect(config: &AppConfig, target: &RedirectTarget) -> Response {
    let location = HeaderValue::from_str(&config.redirect_location(target.path()))
        .unwrap_or_else(|_| {
            tracing::warn!(
                redirect_to = %target.path(),
                "redirect target is not a valid header value"
            );
            HeaderValue::from_static(access::NOT_FOUND_PATH)
        });

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
    response.headers_mut().insert(header::LOCATION, location);
    response
}
