// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    ca::CertificateAuthority,
    gateway::ContractGateway,
    models::{CampaignRequest, DonationRequest},
    state::AppState,
};

pub mod campaigns;
pub mod donations;
pub mod enrollment;
pub mod health;

pub fn router<C, G>(state: AppState<C, G>) -> Router
where
    C: CertificateAuthority + Clone + Send + Sync + 'static,
    G: ContractGateway + Clone + Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/enrollAdmin", get(enrollment::enroll_admin))
        .route("/enrollPeer", get(enrollment::enroll_peer))
        .route("/getCampaign", post(campaigns::get_campaign))
        .route("/createCampaign", post(campaigns::create_campaign))
        .route("/closeCampaign", post(campaigns::close_campaign))
        .route("/addDonation", post(donations::add_donation))
        .route("/health", get(health::health))
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        enrollment::enroll_admin,
        enrollment::enroll_peer,
        campaigns::get_campaign,
        campaigns::create_campaign,
        campaigns::close_campaign,
        donations::add_donation,
        health::health
    ),
    components(schemas(
        CampaignRequest,
        DonationRequest,
        health::HealthResponse,
        health::HealthChecks
    )),
    tags(
        (name = "Enrollment", description = "Identity enrollment against the CA"),
        (name = "Campaigns", description = "Campaign chaincode transactions"),
        (name = "Donations", description = "Donation chaincode transactions"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;
