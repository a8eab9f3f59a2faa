// SPDX-License-Identifier: AGPL-3.0-or-later

//! Path layout of the filesystem wallet.

use std::path::{Path, PathBuf};

/// Path utilities for the wallet directory layout.
///
/// Each identity lives in its own directory keyed by label:
///
/// ```text
/// <root>/
///   admin/
///     identity.json   # MSP ID + certificate PEM
///     key.pem         # private key (never exposed via API)
///   user1/
///     identity.json
///     key.pem
/// ```
#[derive(Debug, Clone)]
pub struct WalletPaths {
    root: PathBuf,
}

impl WalletPaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the wallet.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one identity's files.
    pub fn identity_dir(&self, label: &str) -> PathBuf {
        self.root.join(label)
    }

    /// Path to an identity's metadata file.
    pub fn identity_file(&self, label: &str) -> PathBuf {
        self.identity_dir(label).join("identity.json")
    }

    /// Path to an identity's private key file.
    pub fn key_file(&self, label: &str) -> PathBuf {
        self.identity_dir(label).join("key.pem")
    }
}
