//! Cookie transport for the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::token::SESSION_TTL_SECS;

pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Attributes applied to every session cookie the server sets or clears.
///
/// In production the frontend lives on another origin, so the cookie must be
/// `Secure` with `SameSite=None` to be sent on cross-site requests. Local
/// development runs over plain HTTP with `SameSite=Lax`.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    secure: bool,
    same_site: SameSite,
}

impl SessionCookie {
    pub fn new(production: bool) -> Self {
        Self {
            secure: production,
            same_site: if production {
                SameSite::None
            } else {
                SameSite::Lax
            },
        }
    }

    fn build(&self, value: String) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
            .build()
    }

    pub fn attach(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(self.build(token))
    }

    pub fn extract(jar: &CookieJar) -> Option<String> {
        jar.get(AUTH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
    }

    /// Always emits a removal cookie, even when the request carried none.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.build(String::new());
        cookie.make_removal();

        jar.add(cookie)
    }
}
