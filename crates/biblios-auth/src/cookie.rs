//! Session cookie construction.
//!
//! The session token travels in an httpOnly cookie so it is never
//! exposed to page scripts. `SameSite=Strict` keeps it off cross-site
//! requests; the `Secure` flag follows configuration so local
//! development over plain HTTP still works.

use axum_extra::extract::cookie::{Cookie, SameSite};

use biblios_core::config::AuthConfig;

/// Builds the session cookie carrying a signed session token.
pub fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .build()
}

/// Builds a removal cookie that expires the session cookie in the browser.
pub fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = AuthConfig::default();
        let cookie = session_cookie(&config, "tok".to_string());

        assert_eq!(cookie.name(), config.cookie_name);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_removal_cookie_clears_value() {
        let config = AuthConfig::default();
        let cookie = removal_cookie(&config);

        assert_eq!(cookie.name(), config.cookie_name);
        assert_eq!(cookie.value(), "");
    }
}
