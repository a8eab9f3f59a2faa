// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Overall status ("ok" or "degraded").
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Whether the wallet root directory is present on disk. "missing" is
    /// normal before the first enrollment.
    pub wallet_dir: String,
}

/// Health check endpoint handler.
///
/// The wallet directory being absent does not fail the check; it only means
/// no identity has been enrolled yet.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health<C, G>(State(state): State<AppState<C, G>>) -> (StatusCode, Json<HealthResponse>)
where
    C: Clone + Send + Sync + 'static,
    G: Clone + Send + Sync + 'static,
{
    let wallet_dir = if state.wallet.paths().root().is_dir() {
        "ok"
    } else {
        "missing"
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            wallet_dir: wallet_dir.to_string(),
        },
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::test_state;

    #[tokio::test]
    async fn health_reports_missing_wallet_before_enrollment() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir.path().join("wallet"));

        let (status, Json(response)) = health(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "ok");
        assert_eq!(response.checks.wallet_dir, "missing");
    }

    #[tokio::test]
    async fn health_reports_wallet_dir_once_present() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let (_, Json(response)) = health(State(state)).await;
        assert_eq!(response.checks.wallet_dir, "ok");
    }
}
