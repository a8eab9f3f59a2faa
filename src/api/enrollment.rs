// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::extract::State;

use crate::{
    ca::CertificateAuthority, enrollment, error::ApiError, gateway::ContractGateway,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/enrollAdmin",
    tag = "Enrollment",
    responses(
        (status = 200, description = "Admin identity enrolled (or already present)", body = String),
        (status = 502, description = "CA call failed")
    )
)]
pub async fn enroll_admin<C, G>(State(state): State<AppState<C, G>>) -> Result<String, ApiError>
where
    C: CertificateAuthority + Clone + Send + Sync + 'static,
    G: ContractGateway + Clone + Send + Sync + 'static,
{
    let outcome = enrollment::enroll_admin(&state.ca, &state.wallet).await?;
    Ok(outcome.message())
}

#[utoipa::path(
    get,
    path = "/enrollPeer",
    tag = "Enrollment",
    responses(
        (status = 200, description = "User identity enrolled (or already present)", body = String),
        (status = 422, description = "Admin identity missing"),
        (status = 502, description = "CA call failed")
    )
)]
pub async fn enroll_peer<C, G>(State(state): State<AppState<C, G>>) -> Result<String, ApiError>
where
    C: CertificateAuthority + Clone + Send + Sync + 'static,
    G: ContractGateway + Clone + Send + Sync + 'static,
{
    let outcome = enrollment::enroll_peer(&state.ca, &state.wallet).await?;
    Ok(outcome.message())
}
