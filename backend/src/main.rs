//! Backend entry-point: parses configuration, builds the pool, and serves the API.

mod server;

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroize;

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};

use crate::server::{CookiePolicy, ServerConfig, create_server};

/// Minimum key material for a file-backed session key. `Key::derive_from`
/// needs 32 bytes; operators provision 64 so rotation can split the file.
const SESSION_KEY_MIN_LEN: usize = 64;

/// `backend` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "backend",
    about = "Disaster relief coordination REST API server",
    version
)]
struct Cli {
    /// Socket address the HTTP listener binds to.
    #[arg(
        long = "bind",
        value_name = "addr:port",
        env = "BIND_ADDR",
        default_value = "0.0.0.0:8080"
    )]
    bind_addr: SocketAddr,
    /// PostgreSQL connection URL.
    #[arg(long = "database-url", value_name = "url", env = "DATABASE_URL")]
    database_url: String,
    /// Path to the session signing key file.
    #[arg(
        long = "session-key-file",
        value_name = "path",
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    session_key_file: PathBuf,
    /// Whether session cookies carry the `Secure` attribute.
    #[arg(
        long = "cookie-secure",
        value_name = "bool",
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    #[arg(
        long = "same-site",
        value_name = "Strict|Lax|None",
        env = "SESSION_SAMESITE",
        default_value = "strict",
        value_parser = parse_same_site
    )]
    same_site: SameSite,
    /// Fall back to a generated session key when the key file is unreadable.
    #[arg(
        long = "allow-ephemeral-key",
        value_name = "bool",
        env = "SESSION_ALLOW_EPHEMERAL",
        default_value_t = false,
        action = clap::ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    allow_ephemeral_key: bool,
}

/// Build mode for session settings validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BuildMode {
    /// Debug builds tolerate missing key material and emit warnings.
    Debug,
    /// Release builds require a provisioned session key.
    Release,
}

impl BuildMode {
    fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

fn parse_same_site(raw: &str) -> Result<SameSite, String> {
    match raw.to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" => Ok(SameSite::None),
        _ => Err(format!(
            "unrecognised SameSite policy '{raw}'; expected Strict, Lax or None"
        )),
    }
}

/// Reject `SameSite=None` without `Secure` outside debug builds; browsers
/// drop such cookies, which would silently break every login.
fn validate_cookie_policy(
    cookie_secure: bool,
    same_site: SameSite,
    mode: BuildMode,
) -> io::Result<()> {
    if matches!(same_site, SameSite::None) && !cookie_secure {
        if mode.is_debug() {
            warn!("SameSite=None without Secure; browsers may reject the session cookie");
        } else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "SameSite=None requires --cookie-secure true",
            ));
        }
    }
    Ok(())
}

/// Load the session signing key from `path`.
///
/// Debug builds and explicitly permitted deployments fall back to an
/// ephemeral key when the file is unreadable or too short, which invalidates
/// every session on restart.
fn load_session_key(path: &Path, allow_ephemeral: bool, mode: BuildMode) -> io::Result<Key> {
    let fallback = |error: io::Error| {
        if mode.is_debug() || allow_ephemeral {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        } else {
            Err(error)
        }
    };

    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return fallback(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "session key at {} too short: need >= {SESSION_KEY_MIN_LEN} bytes, got {length}",
                        path.display()
                    ),
                ));
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => fallback(io::Error::new(
            error.kind(),
            format!("failed to read session key at {}: {error}", path.display()),
        )),
    }
}

/// Parse the CLI, open the pool, and run the server to completion.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "could not initialise the tracing subscriber");
    }

    let cli = Cli::parse();
    let mode = BuildMode::from_debug_assertions();
    validate_cookie_policy(cli.cookie_secure, cli.same_site, mode)?;
    let key = load_session_key(&cli.session_key_file, cli.allow_ephemeral_key, mode)?;

    let pool = DbPool::new(PoolConfig::new(&cli.database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig {
        cookies: CookiePolicy {
            key,
            secure: cli.cookie_secure,
            same_site: cli.same_site,
        },
        bind_addr: cli.bind_addr,
        pool,
    };
    create_server(health_state, config)?.await
}
