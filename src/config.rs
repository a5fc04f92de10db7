//! Host configuration parsed from environment variables.

use std::net::{IpAddr, SocketAddr};

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_SITE_ROOT: &str = "target/site";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub addr: SocketAddr,
    /// Directory holding the built `pkg/` bundle.
    pub site_root: String,
}

impl HostConfig {
    /// Build typed host config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `STOREFRONT_BIND`: default `0.0.0.0`
    /// - `SITE_ROOT`: default `target/site`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `PORT` or `STOREFRONT_BIND` is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] over an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `PORT` or `STOREFRONT_BIND` is malformed.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let bind = var("STOREFRONT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let ip = bind.parse::<IpAddr>().map_err(|_| ConfigError::InvalidBind(bind))?;
        let site_root = var("SITE_ROOT").unwrap_or_else(|| DEFAULT_SITE_ROOT.to_owned());

        Ok(Self { addr: SocketAddr::new(ip, port), site_root })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
