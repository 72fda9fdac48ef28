use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{error::AppError, routes::AppState};

use super::{cookie::SessionCookie, token::TokenCodec};

/// The authenticated caller, resolved from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

/// Missing, malformed, tampered and expired tokens are indistinguishable to the
/// caller.
pub fn authenticate(jar: &CookieJar, tokens: &TokenCodec) -> Result<AuthUser, AppError> {
    let token = SessionCookie::extract(jar).ok_or(AppError::Unauthenticated)?;
    let id = tokens
        .verify(&token)
        .map_err(|_| AppError::Unauthenticated)?;

    Ok(AuthUser { id })
}

/// Route layer for groups where every handler requires a session.
pub async fn require_auth(
    State(app): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&jar, &app.tokens)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, app: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let user = authenticate(&jar, &app.tokens)?;
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
