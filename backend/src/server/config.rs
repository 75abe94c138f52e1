//! Inputs the server bootstrap needs, gathered in one place.

use actix_web::cookie::{Key, SameSite};
use backend::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// How the session cookie is issued: the signing key plus the transport
/// attributes the middleware stamps on it.
#[derive(Clone)]
pub struct CookiePolicy {
    pub(crate) key: Key,
    pub(crate) secure: bool,
    pub(crate) same_site: SameSite,
}

/// Everything `create_server` consumes.
///
/// The pool is mandatory. Every port behind the API is backed by a
/// persistence adapter, so a server without a pool could not answer
/// anything.
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) cookies: CookiePolicy,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pool: DbPool,
}

impl ServerConfig {
    /// The address the listener binds to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by bootstrap tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
