// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Identity Enrollment Flows
//!
//! Two operations against the certificate authority:
//!
//! - [`enroll_admin`]: obtain the bootstrap admin credential and import it
//!   into the wallet.
//! - [`enroll_peer`]: using the admin credential, register and enroll the
//!   application user.
//!
//! Both are idempotent: an identity that already exists in the wallet makes
//! the flow a no-op with an [`EnrollmentOutcome::AlreadyEnrolled`] result.
//! The flows are not atomic across the CA call and the wallet import; a
//! crash in between leaves the CA-side registration orphaned and requires
//! manual cleanup.

use tracing::info;

use crate::ca::{CertificateAuthority, EnrollmentRequest, RegistrationRequest};
use crate::config::{
    ADMIN_BOOTSTRAP_SECRET, ADMIN_LABEL, ORG_MSP_ID, USER_AFFILIATION, USER_LABEL, USER_ROLE,
};
use crate::error::FlowError;
use crate::wallet::{FileSystemWallet, WalletError, WalletIdentity};

/// Result of an enrollment flow that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    /// A credential was obtained from the CA and imported into the wallet.
    /// `registered` is true if the identity was also registered first.
    Enrolled {
        label: &'static str,
        registered: bool,
    },
    /// The wallet already holds the identity; nothing was done.
    AlreadyEnrolled { label: &'static str },
}

impl EnrollmentOutcome {
    /// Human-readable result string returned to HTTP callers.
    pub fn message(&self) -> String {
        match self {
            Self::Enrolled {
                label,
                registered: false,
            } => format!("Successfully enrolled admin user \"{label}\" and imported it into the wallet"),
            Self::Enrolled {
                label,
                registered: true,
            } => format!(
                "Successfully registered and enrolled user \"{label}\" and imported it into the wallet"
            ),
            Self::AlreadyEnrolled { label } => {
                format!("An identity for \"{label}\" already exists in the wallet")
            }
        }
    }
}

/// Enroll the bootstrap admin identity.
///
/// No-op if `admin` is already in the wallet. Otherwise enrolls against the
/// CA with the fixed bootstrap secret and imports the credential under the
/// organization MSP.
pub async fn enroll_admin(
    ca: &impl CertificateAuthority,
    wallet: &FileSystemWallet,
) -> Result<EnrollmentOutcome, FlowError> {
    if wallet.exists(ADMIN_LABEL) {
        info!(label = ADMIN_LABEL, "identity already exists in the wallet");
        return Ok(EnrollmentOutcome::AlreadyEnrolled { label: ADMIN_LABEL });
    }

    let enrollment = ca
        .enroll(EnrollmentRequest {
            enrollment_id: ADMIN_LABEL,
            secret: ADMIN_BOOTSTRAP_SECRET,
        })
        .await
        .map_err(|e| FlowError::external(format!("enroll admin user \"{ADMIN_LABEL}\""), e))?;

    let identity = WalletIdentity {
        msp_id: ORG_MSP_ID.to_string(),
        certificate: enrollment.certificate,
        private_key: enrollment.private_key,
    };

    import_enrolled(wallet, ADMIN_LABEL, &identity, false)
}

/// Register and enroll the application user identity.
///
/// Requires `admin` in the wallet; no-op if `user1` is already present. The
/// admin credential authorizes the registration, whose one-time secret is
/// then used to enroll.
pub async fn enroll_peer(
    ca: &impl CertificateAuthority,
    wallet: &FileSystemWallet,
) -> Result<EnrollmentOutcome, FlowError> {
    if wallet.exists(USER_LABEL) {
        info!(label = USER_LABEL, "identity already exists in the wallet");
        return Ok(EnrollmentOutcome::AlreadyEnrolled { label: USER_LABEL });
    }

    if !wallet.exists(ADMIN_LABEL) {
        return Err(FlowError::PreconditionNotMet {
            label: ADMIN_LABEL,
            hint: "call /enrollAdmin before registering users",
        });
    }

    let admin = wallet
        .get(ADMIN_LABEL)
        .map_err(|e| FlowError::external("load admin identity from the wallet", e))?;

    let secret = ca
        .register(
            RegistrationRequest {
                enrollment_id: USER_LABEL,
                affiliation: USER_AFFILIATION,
                role: USER_ROLE,
            },
            &admin,
        )
        .await
        .map_err(|e| FlowError::external(format!("register user \"{USER_LABEL}\""), e))?;

    let enrollment = ca
        .enroll(EnrollmentRequest {
            enrollment_id: USER_LABEL,
            secret: &secret,
        })
        .await
        .map_err(|e| FlowError::external(format!("enroll user \"{USER_LABEL}\""), e))?;

    let identity = WalletIdentity {
        msp_id: ORG_MSP_ID.to_string(),
        certificate: enrollment.certificate,
        private_key: enrollment.private_key,
    };

    import_enrolled(wallet, USER_LABEL, &identity, true)
}

fn import_enrolled(
    wallet: &FileSystemWallet,
    label: &'static str,
    identity: &WalletIdentity,
    registered: bool,
) -> Result<EnrollmentOutcome, FlowError> {
    match wallet.import(label, identity) {
        Ok(()) => {
            info!(label, "enrolled identity and imported it into the wallet");
            Ok(EnrollmentOutcome::Enrolled { label, registered })
        }
        // A concurrent enrollment won the create; treat ours as the no-op,
        // but only once its credential is actually readable. A label
        // directory without a credential (a crash remnant) must surface as
        // an error, not masquerade as an enrolled identity.
        Err(WalletError::AlreadyExists(_)) => {
            if wallet.exists(label) {
                Ok(EnrollmentOutcome::AlreadyEnrolled { label })
            } else {
                Err(FlowError::external(
                    format!("import identity \"{label}\" into the wallet"),
                    format!(
                        "wallet entry \"{label}\" is present but holds no credential; \
                         remove its directory and retry"
                    ),
                ))
            }
        }
        Err(e) => Err(FlowError::external(
            format!("import identity \"{label}\" into the wallet"),
            e,
        )),
    }
}
