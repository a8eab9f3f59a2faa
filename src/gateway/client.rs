// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTTP client for the peer gateway.
//!
//! Transactions are posted to the peer's gateway API, addressed by channel
//! and contract. The caller's certificate travels with every proposal; the
//! peer performs identity validation, endorsement, and (for submit) ordering
//! and commitment. A fresh session is opened per call; dropping the session
//! releases the connection.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::wallet::WalletIdentity;

use super::types::{
    ConnectOptions, ContractGateway, ContractSession, GatewayError, TransactionProposal,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection factory for the peer named in the connection profile.
#[derive(Debug, Clone)]
pub struct PeerGateway {
    peer_url: String,
    http: Client,
}

/// A single-call session. Holds the identity it was opened with; torn down
/// by drop.
#[derive(Debug)]
pub struct PeerSession {
    peer_url: String,
    http: Client,
    identity: WalletIdentity,
    discovery: bool,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    message: String,
}

impl PeerGateway {
    /// Create a gateway for the peer at the given URL (from the connection
    /// profile).
    pub fn new(peer_url: &str) -> Result<Self, GatewayError> {
        let parsed: Url = peer_url
            .parse()
            .map_err(|e: url::ParseError| GatewayError::InvalidEndpoint(e.to_string()))?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            peer_url: parsed.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl ContractGateway for PeerGateway {
    type Session = PeerSession;

    async fn connect(
        &self,
        identity: WalletIdentity,
        options: ConnectOptions,
    ) -> Result<Self::Session, GatewayError> {
        debug!(msp_id = %identity.msp_id, discovery = options.discovery, "opening gateway session");
        Ok(PeerSession {
            peer_url: self.peer_url.clone(),
            http: self.http.clone(),
            identity,
            discovery: options.discovery,
        })
    }
}

impl PeerSession {
    async fn transact(
        &self,
        kind: &str,
        proposal: TransactionProposal<'_>,
    ) -> Result<Vec<u8>, GatewayError> {
        // Client-generated transaction id, for correlation in peer logs.
        let transaction_id = Uuid::new_v4();

        let body = json!({
            "type": kind,
            "transactionId": transaction_id,
            "function": proposal.function,
            "args": proposal.args,
            "discovery": self.discovery,
            "identity": {
                "mspId": self.identity.msp_id,
                "certificate": self.identity.certificate,
            },
        });

        let url = format!(
            "{}/api/v1/channels/{}/chaincodes/{}",
            self.peer_url, proposal.channel, proposal.contract
        );

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<GatewayErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("HTTP {status}"),
            };
            return Err(GatewayError::Rejected(detail));
        }

        let payload = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        debug!(
            %transaction_id,
            function = proposal.function,
            bytes = payload.len(),
            "transaction completed"
        );
        Ok(payload.to_vec())
    }
}

impl ContractSession for PeerSession {
    async fn submit(&self, proposal: TransactionProposal<'_>) -> Result<Vec<u8>, GatewayError> {
        self.transact("submit", proposal).await
    }

    async fn evaluate(&self, proposal: TransactionProposal<'_>) -> Result<Vec<u8>, GatewayError> {
        self.transact("evaluate", proposal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_normalizes_trailing_slash() {
        let gateway = PeerGateway::new("http://localhost:7051/").unwrap();
        assert_eq!(gateway.peer_url, "http://localhost:7051");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = PeerGateway::new("::not-a-url::");
        assert!(matches!(result, Err(GatewayError::InvalidEndpoint(_))));
    }

    #[tokio::test]
    async fn connect_carries_identity_and_options() {
        let gateway = PeerGateway::new("http://localhost:7051").unwrap();
        let identity = WalletIdentity {
            msp_id: "Org1MSP".to_string(),
            certificate: "CERT".to_string(),
            private_key: "KEY".to_string(),
        };

        let session = gateway
            .connect(identity, ConnectOptions::default())
            .await
            .unwrap();

        assert_eq!(session.identity.msp_id, "Org1MSP");
        assert!(!session.discovery);
    }
}
