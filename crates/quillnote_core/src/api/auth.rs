//! Bearer token sources.
//!
//! Session issuance belongs to an external auth provider; core only asks
//! for the current token before each call.

use std::env;

/// Environment variable read by `EnvToken::default()`.
pub const TOKEN_ENV_VAR: &str = "QUILLNOTE_TOKEN";

/// Supplies the bearer token for backend calls.
pub trait TokenSource {
    /// Current token, or `None` when the user is signed out.
    fn token(&self) -> Option<String>;
}

/// Fixed token, e.g. from a CLI flag.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }

    pub fn signed_out() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        normalize_token(self.0.as_deref())
    }
}

/// Token read from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

impl TokenSource for EnvToken {
    fn token(&self) -> Option<String> {
        normalize_token(env::var(&self.var).ok().as_deref())
    }
}

fn normalize_token(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
