// SPDX-License-Identifier: AGPL-3.0-or-later

//! # API Data Models
//!
//! Request bodies for the campaign and donation routes. Field names are
//! camelCase on the wire, matching the chaincode's argument vocabulary.
//! Transaction results are plain text (or, for `getCampaign`, the JSON the
//! chaincode returned), so there are no structured response models beyond
//! the error body in [`crate::error`].

use serde::Deserialize;
use utoipa::ToSchema;

/// Body of the campaign routes (`getCampaign`, `createCampaign`,
/// `closeCampaign`).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRequest {
    /// Name of the campaign the transaction addresses.
    pub campaign_name: String,
}

/// Body of `addDonation`.
///
/// The donation timestamp is not part of the body; it is generated
/// server-side at request time.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub donation_type: String,
    pub campaign_name: String,
    pub donor_name: String,
    /// Donation amount, passed through to the chaincode as a string.
    pub amount: String,
}
