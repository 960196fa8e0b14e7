//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `COURSES_*` environment variables and an
//! optional configuration file, with unset values falling back to the
//! defaults below. Field names start with distinct letters so each gets its
//! own short flag.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_ID_ALLOCATION_ATTEMPTS;
use crate::outbound::persistence::DEFAULT_POOL_SIZE;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the course service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSES")]
pub struct AppSettings {
    /// Interface to bind.
    pub listen_host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Courses are kept in memory when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub max_connections: Option<u32>,
    /// Identifier candidates tried before a create fails.
    pub id_allocation_attempts: Option<u32>,
}

impl AppSettings {
    /// Configured interface, defaulting to all IPv4 interfaces.
    pub fn listen_host(&self) -> IpAddr {
        self.listen_host.unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, defaulting to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_host(), self.port())
    }

    /// Database URL when one is configured and not blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to ten connections.
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Identifier allocation bound, never below one.
    pub fn id_allocation_attempts(&self) -> u32 {
        self.id_allocation_attempts
            .unwrap_or(DEFAULT_ID_ALLOCATION_ATTEMPTS)
            .max(1)
    }
}
