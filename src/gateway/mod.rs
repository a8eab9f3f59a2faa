// SPDX-License-Identifier: AGPL-3.0-or-later

//! Peer gateway integration.
//!
//! This module provides the connection to the blockchain network:
//! - Per-call connection setup authenticated by a wallet identity
//! - Transaction submission (endorse + order + commit)
//! - Transaction evaluation (read-only, single peer)

pub mod client;
pub mod types;

pub use client::PeerGateway;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory gateway shared by the flow- and handler-level tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::{
        ConnectOptions, ContractGateway, ContractSession, GatewayError, TransactionProposal,
    };
    use crate::wallet::WalletIdentity;

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedCall {
        pub(crate) kind: &'static str,
        pub(crate) channel: String,
        pub(crate) contract: String,
        pub(crate) function: String,
        pub(crate) args: Vec<String>,
    }

    #[derive(Default)]
    pub(crate) struct FakeState {
        pub(crate) connects: AtomicUsize,
        pub(crate) calls: Mutex<Vec<RecordedCall>>,
        pub(crate) evaluate_payload: Vec<u8>,
        pub(crate) fail_submit: bool,
    }

    /// In-memory gateway that counts connections and records proposals.
    #[derive(Clone, Default)]
    pub(crate) struct FakeGateway {
        state: Arc<FakeState>,
    }

    impl FakeGateway {
        pub(crate) fn with_state(state: FakeState) -> Self {
            Self {
                state: Arc::new(state),
            }
        }

        pub(crate) fn connects(&self) -> usize {
            self.state.connects.load(Ordering::SeqCst)
        }

        pub(crate) fn calls(&self) -> Vec<RecordedCall> {
            self.state.calls.lock().unwrap().clone()
        }
    }

    pub(crate) struct FakeSession {
        state: Arc<FakeState>,
        #[allow(dead_code)]
        identity: WalletIdentity,
    }

    impl ContractGateway for FakeGateway {
        type Session = FakeSession;

        async fn connect(
            &self,
            identity: WalletIdentity,
            options: ConnectOptions,
        ) -> Result<Self::Session, GatewayError> {
            assert!(!options.discovery, "discovery must stay disabled");
            self.state.connects.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                state: Arc::clone(&self.state),
                identity,
            })
        }
    }

    impl ContractSession for FakeSession {
        async fn submit(
            &self,
            proposal: TransactionProposal<'_>,
        ) -> Result<Vec<u8>, GatewayError> {
            if self.state.fail_submit {
                return Err(GatewayError::Rejected("endorsement failed".to_string()));
            }
            self.state.calls.lock().unwrap().push(RecordedCall {
                kind: "submit",
                channel: proposal.channel.to_string(),
                contract: proposal.contract.to_string(),
                function: proposal.function.to_string(),
                args: proposal.args.to_vec(),
            });
            Ok(Vec::new())
        }

        async fn evaluate(
            &self,
            proposal: TransactionProposal<'_>,
        ) -> Result<Vec<u8>, GatewayError> {
            self.state.calls.lock().unwrap().push(RecordedCall {
                kind: "evaluate",
                channel: proposal.channel.to_string(),
                contract: proposal.contract.to_string(),
                function: proposal.function.to_string(),
                args: proposal.args.to_vec(),
            });
            Ok(self.state.evaluate_payload.clone())
        }
    }
}
