// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    ca::CertificateAuthority, error::ApiError, gateway::ContractGateway, ledger,
    models::DonationRequest, state::AppState,
};

/// Marshal a donation request into the chaincode argument order. The
/// timestamp is appended server-side; callers never supply it.
fn donation_args(request: DonationRequest, timestamp_millis: i64) -> Vec<String> {
    vec![
        request.donation_type,
        request.campaign_name,
        request.donor_name,
        request.amount,
        timestamp_millis.to_string(),
    ]
}

#[utoipa::path(
    post,
    path = "/addDonation",
    request_body = DonationRequest,
    tag = "Donations",
    responses(
        (status = 200, description = "Transaction acknowledgement", body = String),
        (status = 422, description = "User identity missing"),
        (status = 502, description = "Submission failed")
    )
)]
pub async fn add_donation<C, G>(
    State(state): State<AppState<C, G>>,
    Json(request): Json<DonationRequest>,
) -> Result<String, ApiError>
where
    C: CertificateAuthority + Clone + Send + Sync + 'static,
    G: ContractGateway + Clone + Send + Sync + 'static,
{
    let args = donation_args(request, Utc::now().timestamp_millis());
    let result = ledger::invoke(&state.gateway, &state.wallet, "addDonation", &args).await?;
    Ok(result)
}
