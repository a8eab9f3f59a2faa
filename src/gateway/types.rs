// SPDX-License-Identifier: AGPL-3.0-or-later

//! Gateway types and the collaborator seams.

use std::future::Future;

use crate::wallet::WalletIdentity;

/// Errors raised by gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid peer endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("gateway request failed: {0}")]
    Request(String),

    #[error("transaction was rejected: {0}")]
    Rejected(String),
}

/// Options applied when opening a connection.
///
/// Peer discovery defaults to disabled: the connection profile's static
/// topology is authoritative for this network.
#[derive(Debug, Clone, Copy)]
pub struct ConnectOptions {
    pub discovery: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self { discovery: false }
    }
}

/// A named chaincode transaction with ordered string arguments, addressed to
/// a channel and contract.
#[derive(Debug, Clone, Copy)]
pub struct TransactionProposal<'a> {
    pub channel: &'a str,
    pub contract: &'a str,
    pub function: &'a str,
    pub args: &'a [String],
}

/// Seam over the network gateway. `connect` is the only entry point; all
/// transaction traffic goes through the session it returns. The futures are
/// `Send` so handlers can stay generic over the implementation.
pub trait ContractGateway {
    type Session: ContractSession + Send;

    /// Open a connection scoped to a single call, authenticated by the given
    /// identity. The session is released by drop on every exit path.
    fn connect(
        &self,
        identity: WalletIdentity,
        options: ConnectOptions,
    ) -> impl Future<Output = Result<Self::Session, GatewayError>> + Send;
}

/// A connected, identity-scoped session against the network.
pub trait ContractSession {
    /// Submit a transaction for endorsement, ordering, and commitment.
    fn submit(
        &self,
        proposal: TransactionProposal<'_>,
    ) -> impl Future<Output = Result<Vec<u8>, GatewayError>> + Send;

    /// Evaluate a transaction read-only against the peer's current state.
    fn evaluate(
        &self,
        proposal: TransactionProposal<'_>,
    ) -> impl Future<Output = Result<Vec<u8>, GatewayError>> + Send;
}
