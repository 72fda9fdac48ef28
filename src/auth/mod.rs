//! Session and authorization core.
//!
//! Provides signed session tokens carried in an HTTP-only cookie, the
//! authentication gate that turns that cookie into an [`AuthUser`], and the
//! ownership gate restricting a resource to the user who created it.

pub mod cookie;
pub mod gate;
pub mod ownership;
pub mod token;

pub use cookie::{AUTH_COOKIE_NAME, SessionCookie};
pub use gate::{AuthUser, authenticate, require_auth};
pub use ownership::{Owned, OwnedForm, ResourceStore, authorize};
pub use token::{Claims, InvalidToken, SESSION_TTL_SECS, TokenCodec};
