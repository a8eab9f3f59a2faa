// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    ca::CertificateAuthority, error::ApiError, gateway::ContractGateway, ledger,
    models::CampaignRequest, state::AppState,
};

/// Decode a campaign query payload. Only reached on a successful query, so a
/// decode failure means the chaincode returned something other than JSON.
fn parse_campaign_payload(raw: &str) -> Result<Value, ApiError> {
    serde_json::from_str(raw)
        .map_err(|e| ApiError::bad_gateway(format!("Failed to decode campaign payload: {e}")))
}

#[utoipa::path(
    post,
    path = "/getCampaign",
    request_body = CampaignRequest,
    tag = "Campaigns",
    responses(
        (status = 200, description = "Campaign state as returned by the chaincode"),
        (status = 422, description = "User identity missing"),
        (status = 502, description = "Query failed")
    )
)]
pub async fn get_campaign<C, G>(
    State(state): State<AppState<C, G>>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<Value>, ApiError>
where
    C: CertificateAuthority + Clone + Send + Sync + 'static,
    G: ContractGateway + Clone + Send + Sync + 'static,
{
    let raw = ledger::query(
        &state.gateway,
        &state.wallet,
        "retrieveCampaign",
        &[request.campaign_name],
    )
    .await?;

    Ok(Json(parse_campaign_payload(&raw)?))
}

#[utoipa::path(
    post,
    path = "/createCampaign",
    request_body = CampaignRequest,
    tag = "Campaigns",
    responses(
        (status = 200, description = "Transaction acknowledgement", body = String),
        (status = 422, description = "User identity missing"),
        (status = 502, description = "Submission failed")
    )
)]
pub async fn create_campaign<C, G>(
    State(state): State<AppState<C, G>>,
    Json(request): Json<CampaignRequest>,
) -> Result<String, ApiError>
where
    C: CertificateAuthority + Clone + Send + Sync + 'static,
    G: ContractGateway + Clone + Send + Sync + 'static,
{
    let result = ledger::invoke(
        &state.gateway,
        &state.wallet,
        "createCampaign",
        &[request.campaign_name],
    )
    .await?;
    Ok(result)
}

#[utoipa::path(
    post,
    path = "/closeCampaign",
    request_body = CampaignRequest,
    tag = "Campaigns",
    responses(
        (status = 200, description = "Transaction acknowledgement", body = String),
        (status = 422, description = "User identity missing"),
        (status = 502, description = "Submission failed")
    )
)]
pub async fn close_campaign<C, G>(
    State(state): State<AppState<C, G>>,
    Json(request): Json<CampaignRequest>,
) -> Result<String, ApiError>
where
    C: CertificateAuthority + Clone + Send + Sync + 'static,
    G: ContractGateway + Clone + Send + Sync + 'static,
{
    let result = ledger::invoke(
        &state.gateway,
        &state.wallet,
        "closeCampaign",
        &[request.campaign_name],
    )
    .await?;
    Ok(result)
}
