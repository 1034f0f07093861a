use crate::constants::{
    DEFAULT_LISTEN_ADDRESS, DEFAULT_LISTEN_PORT, DEFAULT_MAX_COMMAND_LENGTH,
    DEFAULT_PASV_ADDRESS, DEFAULT_PASV_OPEN_ATTEMPTS, DEFAULT_PASV_PORT_HIGH,
    DEFAULT_PASV_PORT_LOW, DEFAULT_SYSTEM_NAME,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: Ipv4Addr,
    pub listen_port: u16,
    pub pasv_address: Ipv4Addr, // Address the passive listeners bind to
    pub pasv_advertised_address: Option<Ipv4Addr>, // Address sent in the 227 reply (NAT)
    pub pasv_port_low: u16,
    pub pasv_port_high: u16, // Exclusive
    pub pasv_open_attempts: u32,
    pub max_command_length: usize,
    pub system_name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS,
            listen_port: DEFAULT_LISTEN_PORT,
            pasv_address: DEFAULT_PASV_ADDRESS,
            pasv_advertised_address: None,
            pasv_port_low: DEFAULT_PASV_PORT_LOW,
            pasv_port_high: DEFAULT_PASV_PORT_HIGH,
            pasv_open_attempts: DEFAULT_PASV_OPEN_ATTEMPTS,
            max_command_length: DEFAULT_MAX_COMMAND_LENGTH,
            system_name: String::from(DEFAULT_SYSTEM_NAME),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config_str)
    }

    pub fn listen_socket(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.server.listen_address, self.server.listen_port)
    }

    /// Validates the whole configuration and extracts what a session needs.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        if self.server.listen_port == 0 {
            return Err(ConfigError::ZeroPort("listen_port"));
        }
        if self.server.max_command_length == 0 {
            return Err(ConfigError::ZeroCommandLength);
        }
        Ok(SessionConfig::new(
            self.server.pasv_address,
            self.server.pasv_advertised_address,
            self.server.pasv_port_low,
            self.server.pasv_port_high,
            self.server.pasv_open_attempts,
        )?
        .with_system_name(&self.server.system_name))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be in range 1..65535")]
    ZeroPort(&'static str),

    #[error("pasv_port_low ({low}) must not be greater than pasv_port_high ({high})")]
    InvertedPortRange { low: u16, high: u16 },

    #[error("pasv_open_attempts must be positive")]
    ZeroOpenAttempts,

    #[error("max_command_length must be positive")]
    ZeroCommandLength,
}

/// Immutable per-session settings, shared by every session of a server.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    bind_address: Ipv4Addr,
    advertised_address: Ipv4Addr,
    passive_ports: Range<u16>,
    max_bind_attempts: u32,
    system_name: String,
}

impl SessionConfig {
    /// Builds a validated session configuration.
    ///
    /// The advertised address defaults to the bind address. The passive
    /// range is `[lowest_port, highest_port)`.
    pub fn new(
        bind_address: Ipv4Addr,
        advertised_address: Option<Ipv4Addr>,
        lowest_port: u16,
        highest_port: u16,
        max_bind_attempts: u32,
    ) -> Result<Self, ConfigError> {
        if lowest_port == 0 {
            return Err(ConfigError::ZeroPort("pasv_port_low"));
        }
        if highest_port == 0 {
            return Err(ConfigError::ZeroPort("pasv_port_high"));
        }
        if lowest_port > highest_port {
            return Err(ConfigError::InvertedPortRange {
                low: lowest_port,
                high: highest_port,
            });
        }
        if max_bind_attempts == 0 {
            return Err(ConfigError::ZeroOpenAttempts);
        }

        Ok(Self {
            bind_address,
            advertised_address: advertised_address.unwrap_or(bind_address),
            passive_ports: lowest_port..highest_port,
            max_bind_attempts,
            system_name: String::from(DEFAULT_SYSTEM_NAME),
        })
    }

    pub fn with_system_name(mut self, system_name: &str) -> Self {
        self.system_name = system_name.to_string();
        self
    }

    pub fn bind_address(&self) -> Ipv4Addr {
        self.bind_address
    }

    pub fn advertised_address(&self) -> Ipv4Addr {
        self.advertised_address
    }

    pub fn passive_ports(&self) -> Range<u16> {
        self.passive_ports.clone()
    }

    pub fn max_bind_attempts(&self) -> u32 {
        self.max_bind_attempts
    }

    pub fn system_name(&self) -> &str {
        &self.system_name
    }
}
