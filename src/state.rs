// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::Path;
use std::sync::Arc;

use crate::ca::{CaClient, CaError};
use crate::config::{ConnectionProfile, ProfileError, CA_NAME, PEER_NAME};
use crate::gateway::{GatewayError, PeerGateway};
use crate::wallet::FileSystemWallet;

/// Errors raised while wiring the application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Ca(#[from] CaError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Shared application state, generic over the CA and gateway seams so the
/// handlers can be exercised against in-memory collaborators. Everything is
/// cheap to clone: the profile is behind an `Arc`, the clients share their
/// HTTP connection pools.
#[derive(Clone)]
pub struct AppState<C = CaClient, G = PeerGateway> {
    pub profile: Arc<ConnectionProfile>,
    pub wallet: FileSystemWallet,
    pub ca: C,
    pub gateway: G,
}

impl AppState {
    /// Build the state from a loaded connection profile and a wallet root,
    /// with the HTTP clients pointed at the profile's endpoints.
    pub fn new(
        profile: ConnectionProfile,
        wallet_root: impl AsRef<Path>,
    ) -> Result<Self, BootstrapError> {
        let ca = CaClient::new(profile.ca_url(CA_NAME)?)?;
        let gateway = PeerGateway::new(profile.peer_url(PEER_NAME)?)?;

        Ok(Self::with_clients(profile, wallet_root, ca, gateway))
    }
}

impl<C, G> AppState<C, G> {
    /// Build the state around explicit CA and gateway implementations.
    pub fn with_clients(
        profile: ConnectionProfile,
        wallet_root: impl AsRef<Path>,
        ca: C,
        gateway: G,
    ) -> Self {
        Self {
            profile: Arc::new(profile),
            wallet: FileSystemWallet::new(wallet_root),
            ca,
            gateway,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const SAMPLE_PROFILE: &str = r#"{
        "certificateAuthorities": {
            "ca.example.com": { "url": "http://localhost:7054" }
        },
        "peers": {
            "peer0.org1.example.com": { "url": "http://localhost:7051" }
        }
    }"#;

    pub(crate) fn test_state(wallet_root: &Path) -> AppState {
        let profile: ConnectionProfile = serde_json::from_str(SAMPLE_PROFILE).unwrap();
        AppState::new(profile, wallet_root).unwrap()
    }

    /// State wired to in-memory collaborators, for handler-level tests.
    pub(crate) fn test_state_with<C, G>(wallet_root: &Path, ca: C, gateway: G) -> AppState<C, G> {
        let profile: ConnectionProfile = serde_json::from_str(SAMPLE_PROFILE).unwrap();
        AppState::with_clients(profile, wallet_root, ca, gateway)
    }

    #[test]
    fn state_builds_from_profile_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        assert!(!state.wallet.exists("admin"));
    }

    #[test]
    fn state_requires_ca_in_profile() {
        let profile: ConnectionProfile = serde_json::from_str(r#"{"peers":{}}"#).unwrap();
        let result = AppState::new(profile, "/tmp/wallet");
        assert!(matches!(
            result,
            Err(BootstrapError::Profile(ProfileError::MissingCa(_)))
        ));
    }
}
