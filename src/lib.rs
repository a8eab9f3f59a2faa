// SPDX-License-Identifier: AGPL-3.0-or-later

//! Fabric Donation Gateway - REST facade over a permissioned Fabric network.
//!
//! This crate enrolls identities against a certificate authority, keeps the
//! resulting credentials in a filesystem wallet, and submits or evaluates
//! donation-campaign chaincode transactions on behalf of HTTP callers. All
//! the hard problems (enrollment cryptography, endorsement, consensus) live
//! in the external CA and peer network; this service is orchestration.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `ca` - Certificate authority client
//! - `enrollment` - Admin and user enrollment flows
//! - `gateway` - Peer gateway client for transaction traffic
//! - `ledger` - Invoke/query transaction flows
//! - `wallet` - Filesystem identity wallet

pub mod api;
pub mod ca;
pub mod config;
pub mod enrollment;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod models;
pub mod state;
pub mod wallet;
