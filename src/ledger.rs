// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Transaction Flows
//!
//! `invoke` submits a chaincode transaction for commitment; `query` evaluates
//! one read-only. Both share the same sequence: require the application user
//! in the wallet, open a fresh single-call gateway session as that user with
//! discovery disabled, and address the fixed channel and contract. The
//! session is dropped on every exit path; there is no pooling, retry, or
//! cross-request reuse.

use crate::config::{CHANNEL_NAME, CONTRACT_NAME, USER_LABEL};
use crate::error::FlowError;
use crate::gateway::{ConnectOptions, ContractGateway, ContractSession, TransactionProposal};
use crate::wallet::{FileSystemWallet, WalletIdentity};

/// Fixed acknowledgement returned for a committed transaction.
pub const SUBMIT_ACK: &str = "Transaction has been submitted";

/// Submit a named transaction with ordered string arguments.
pub async fn invoke(
    gateway: &impl ContractGateway,
    wallet: &FileSystemWallet,
    function: &str,
    args: &[String],
) -> Result<String, FlowError> {
    let identity = require_user_identity(wallet)?;

    let session = gateway
        .connect(identity, ConnectOptions::default())
        .await
        .map_err(|e| FlowError::external("connect to the network gateway", e))?;

    session
        .submit(TransactionProposal {
            channel: CHANNEL_NAME,
            contract: CONTRACT_NAME,
            function,
            args,
        })
        .await
        .map_err(|e| FlowError::external("submit transaction", e))?;

    Ok(SUBMIT_ACK.to_string())
}

/// Evaluate a named transaction read-only and return the payload as text.
pub async fn query(
    gateway: &impl ContractGateway,
    wallet: &FileSystemWallet,
    function: &str,
    args: &[String],
) -> Result<String, FlowError> {
    let identity = require_user_identity(wallet)?;

    let session = gateway
        .connect(identity, ConnectOptions::default())
        .await
        .map_err(|e| FlowError::external("connect to the network gateway", e))?;

    let payload = session
        .evaluate(TransactionProposal {
            channel: CHANNEL_NAME,
            contract: CONTRACT_NAME,
            function,
            args,
        })
        .await
        .map_err(|e| FlowError::external("evaluate transaction", e))?;

    Ok(String::from_utf8_lossy(&payload).into_owned())
}

/// Load the application user's credential, failing the flow before any
/// connection is opened if it is missing.
fn require_user_identity(wallet: &FileSystemWallet) -> Result<WalletIdentity, FlowError> {
    if !wallet.exists(USER_LABEL) {
        return Err(FlowError::PreconditionNotMet {
            label: USER_LABEL,
            hint: "call /enrollPeer before issuing transactions",
        });
    }
    wallet
        .get(USER_LABEL)
        .map_err(|e| FlowError::external("load user identity from the wallet", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gateway::testing::{FakeGateway, FakeState};

    fn enrolled_wallet() -> (tempfile::TempDir, FileSystemWallet) {
        let dir = tempfile::tempdir().unwrap();
        let wallet = FileSystemWallet::new(dir.path());
        wallet
            .import(
                USER_LABEL,
                &WalletIdentity {
                    msp_id: "Org1MSP".to_string(),
                    certificate: "CERT-user1".to_string(),
                    private_key: "KEY-user1".to_string(),
                },
            )
            .unwrap();
        (dir, wallet)
    }

    #[tokio::test]
    async fn invoke_without_user_identity_opens_no_connection() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = FileSystemWallet::new(dir.path());
        let gateway = FakeGateway::default();

        let result = invoke(&gateway, &wallet, "createCampaign", &["X".to_string()]).await;

        assert!(matches!(
            result,
            Err(FlowError::PreconditionNotMet { label: "user1", .. })
        ));
        assert_eq!(gateway.connects(), 0);
    }

    #[tokio::test]
    async fn query_without_user_identity_opens_no_connection() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = FileSystemWallet::new(dir.path());
        let gateway = FakeGateway::default();

        let result = query(&gateway, &wallet, "retrieveCampaign", &["X".to_string()]).await;

        assert!(matches!(result, Err(FlowError::PreconditionNotMet { .. })));
        assert_eq!(gateway.connects(), 0);
    }

    #[tokio::test]
    async fn invoke_submits_and_returns_acknowledgement() {
        let (_dir, wallet) = enrolled_wallet();
        let gateway = FakeGateway::default();

        let result = invoke(&gateway, &wallet, "createCampaign", &["X".to_string()])
            .await
            .unwrap();

        assert_eq!(result, SUBMIT_ACK);
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, "submit");
        assert_eq!(calls[0].channel, "mychannel");
        assert_eq!(calls[0].contract, "addDonation");
        assert_eq!(calls[0].function, "createCampaign");
        assert_eq!(calls[0].args, vec!["X".to_string()]);
    }

    #[tokio::test]
    async fn query_returns_payload_as_text() {
        let (_dir, wallet) = enrolled_wallet();
        let gateway = FakeGateway::with_state(FakeState {
            evaluate_payload: br#"{"name":"X","open":true}"#.to_vec(),
            ..FakeState::default()
        });

        let result = query(&gateway, &wallet, "retrieveCampaign", &["X".to_string()])
            .await
            .unwrap();

        assert_eq!(result, r#"{"name":"X","open":true}"#);
        assert_eq!(gateway.calls()[0].kind, "evaluate");
    }

    #[tokio::test]
    async fn each_call_opens_a_fresh_connection() {
        let (_dir, wallet) = enrolled_wallet();
        let gateway = FakeGateway::default();

        invoke(&gateway, &wallet, "createCampaign", &["A".to_string()])
            .await
            .unwrap();
        invoke(&gateway, &wallet, "closeCampaign", &["A".to_string()])
            .await
            .unwrap();

        assert_eq!(gateway.connects(), 2);
    }

    #[tokio::test]
    async fn submit_failure_maps_to_external_call_error() {
        let (_dir, wallet) = enrolled_wallet();
        let gateway = FakeGateway::with_state(FakeState {
            fail_submit: true,
            ..FakeState::default()
        });

        let result = invoke(&gateway, &wallet, "createCampaign", &["X".to_string()]).await;

        match result {
            Err(FlowError::ExternalCall { action, message }) => {
                assert_eq!(action, "submit transaction");
                assert!(message.contains("endorsement failed"));
            }
            other => panic!("expected ExternalCall error, got {other:?}"),
        }
    }
}
