// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Runtime Configuration
//!
//! This module defines environment variable names, fixed network constants,
//! and the connection-profile loader. The profile is read once at startup and
//! is immutable for the lifetime of the process.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CONNECTION_PROFILE` | Path to the JSON connection profile | `connection.json` |
//! | `WALLET_DIR` | Root directory of the filesystem wallet | `wallet` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `4141` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Environment variable naming the connection profile path.
pub const CONNECTION_PROFILE_ENV: &str = "CONNECTION_PROFILE";

/// Default connection profile path, relative to the working directory.
pub const DEFAULT_CONNECTION_PROFILE: &str = "connection.json";

/// Environment variable naming the wallet root directory.
pub const WALLET_DIR_ENV: &str = "WALLET_DIR";

/// Default wallet root, relative to the working directory.
pub const DEFAULT_WALLET_DIR: &str = "wallet";

/// Default TCP port for the HTTP front end.
pub const DEFAULT_PORT: u16 = 4141;

// =============================================================================
// Fixed network constants
// =============================================================================
// The donation network uses a single organization with a bootstrap admin and
// one application user. These values mirror the network's crypto material and
// chaincode deployment; they are not caller-supplied.

/// Wallet label of the CA bootstrap administrator.
pub const ADMIN_LABEL: &str = "admin";

/// Bootstrap secret registered with the CA for the admin identity.
pub const ADMIN_BOOTSTRAP_SECRET: &str = "adminpw";

/// Wallet label of the application user that signs transactions.
pub const USER_LABEL: &str = "user1";

/// MSP identifier of the organization both identities belong to.
pub const ORG_MSP_ID: &str = "Org1MSP";

/// Affiliation under which the application user is registered.
pub const USER_AFFILIATION: &str = "org1.department1";

/// CA role assigned to the application user.
pub const USER_ROLE: &str = "client";

/// Name of the certificate authority in the connection profile.
pub const CA_NAME: &str = "ca.example.com";

/// Name of the endorsing peer in the connection profile.
pub const PEER_NAME: &str = "peer0.org1.example.com";

/// Channel the donation chaincode is deployed to.
pub const CHANNEL_NAME: &str = "mychannel";

/// Name of the donation chaincode.
pub const CONTRACT_NAME: &str = "addDonation";

/// Errors raised while loading or querying the connection profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read connection profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection profile is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("certificate authority \"{0}\" is not listed in the connection profile")]
    MissingCa(String),

    #[error("peer \"{0}\" is not listed in the connection profile")]
    MissingPeer(String),
}

/// A certificate authority endpoint from the connection profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CaEndpoint {
    pub url: String,
    #[serde(rename = "caName", default)]
    pub ca_name: Option<String>,
}

/// A peer endpoint from the connection profile.
#[derive(Debug, Clone, Deserialize)]
pub struct PeerEndpoint {
    pub url: String,
}

/// Static description of the network topology.
///
/// Only the keys this gateway actually reads are modeled; the profile format
/// itself is owned by the network operators and unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "certificateAuthorities", default)]
    certificate_authorities: HashMap<String, CaEndpoint>,
    #[serde(default)]
    peers: HashMap<String, PeerEndpoint>,
}

impl ConnectionProfile {
    /// Load and parse a connection profile from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// URL of a named certificate authority.
    pub fn ca_url(&self, ca_name: &str) -> Result<&str, ProfileError> {
        self.certificate_authorities
            .get(ca_name)
            .map(|ca| ca.url.as_str())
            .ok_or_else(|| ProfileError::MissingCa(ca_name.to_string()))
    }

    /// URL of a named peer.
    pub fn peer_url(&self, peer_name: &str) -> Result<&str, ProfileError> {
        self.peers
            .get(peer_name)
            .map(|peer| peer.url.as_str())
            .ok_or_else(|| ProfileError::MissingPeer(peer_name.to_string()))
    }
}
