// SPDX-License-Identifier: AGPL-3.0-or-later

//! Certificate authority client.
//!
//! The CA is an external collaborator exposing `enroll` and `register` over
//! an HTTP JSON API with the Fabric CA response envelope
//! (`{success, result, errors}`). Enrollment returns a certificate and
//! private key; registration returns a one-time enrollment secret. All
//! certificate handling happens on the CA side; this client only marshals.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::wallet::WalletIdentity;

const ENROLL_PATH: &str = "/api/v1/enroll";
const REGISTER_PATH: &str = "/api/v1/register";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors raised by CA operations.
#[derive(Debug, thiserror::Error)]
pub enum CaError {
    #[error("invalid CA endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("CA request failed: {0}")]
    Request(String),

    #[error("CA rejected the request: {0}")]
    Rejected(String),

    #[error("CA response was invalid: {0}")]
    InvalidResponse(String),
}

/// Parameters for enrolling an identity.
#[derive(Debug, Clone, Copy)]
pub struct EnrollmentRequest<'a> {
    pub enrollment_id: &'a str,
    pub secret: &'a str,
}

/// Parameters for registering a new identity before enrollment.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationRequest<'a> {
    pub enrollment_id: &'a str,
    pub affiliation: &'a str,
    pub role: &'a str,
}

/// A signed credential returned by the CA.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub certificate: String,
    pub private_key: String,
}

/// Seam over the certificate authority, so the enrollment flows can be
/// exercised against an in-memory fake. The futures are `Send` so handlers
/// can stay generic over the implementation.
pub trait CertificateAuthority {
    /// Obtain a certificate and private key for a registered identity.
    fn enroll(
        &self,
        request: EnrollmentRequest<'_>,
    ) -> impl Future<Output = Result<Enrollment, CaError>> + Send;

    /// Declare a new identity to the CA, authorized by the registrar's
    /// credential. Returns the one-time enrollment secret.
    fn register(
        &self,
        request: RegistrationRequest<'_>,
        registrar: &WalletIdentity,
    ) -> impl Future<Output = Result<String, CaError>> + Send;
}

/// HTTP client for the Fabric CA service.
#[derive(Debug, Clone)]
pub struct CaClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct CaEnvelope<T> {
    #[serde(default)]
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<CaMessage>,
}

#[derive(Debug, Deserialize)]
struct CaMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct EnrollResult {
    certificate: String,
    #[serde(rename = "privateKey")]
    private_key: String,
}

#[derive(Debug, Deserialize)]
struct RegisterResult {
    secret: String,
}

impl CaClient {
    /// Create a client for the CA at the given URL (from the connection
    /// profile).
    pub fn new(ca_url: &str) -> Result<Self, CaError> {
        let parsed: Url = ca_url
            .parse()
            .map_err(|e: url::ParseError| CaError::InvalidEndpoint(e.to_string()))?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CaError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn post_envelope<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, CaError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| CaError::Request(e.to_string()))?;

        let status = response.status();
        let envelope: CaEnvelope<T> = response
            .json()
            .await
            .map_err(|e| CaError::InvalidResponse(format!("HTTP {status}: {e}")))?;

        if !envelope.success {
            let detail = if envelope.errors.is_empty() {
                format!("HTTP {status}")
            } else {
                envelope
                    .errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            return Err(CaError::Rejected(detail));
        }

        envelope
            .result
            .ok_or_else(|| CaError::InvalidResponse("missing result in CA response".to_string()))
    }
}

impl CertificateAuthority for CaClient {
    async fn enroll(&self, request: EnrollmentRequest<'_>) -> Result<Enrollment, CaError> {
        let body = json!({
            "enrollmentId": request.enrollment_id,
            "enrollmentSecret": request.secret,
        });

        let result: EnrollResult = self.post_envelope(ENROLL_PATH, &body).await?;
        Ok(Enrollment {
            certificate: result.certificate,
            private_key: result.private_key,
        })
    }

    async fn register(
        &self,
        request: RegistrationRequest<'_>,
        registrar: &WalletIdentity,
    ) -> Result<String, CaError> {
        let body = json!({
            "id": request.enrollment_id,
            "affiliation": request.affiliation,
            "type": request.role,
            "registrar": {
                "mspId": registrar.msp_id,
                "certificate": registrar.certificate,
            },
        });

        let result: RegisterResult = self.post_envelope(REGISTER_PATH, &body).await?;
        Ok(result.secret)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_normalizes_trailing_slash() {
        let client = CaClient::new("http://localhost:7054/").unwrap();
        assert_eq!(client.base_url, "http://localhost:7054");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = CaClient::new("not a url");
        assert!(matches!(result, Err(CaError::InvalidEndpoint(_))));
    }

    #[test]
    fn envelope_surfaces_ca_errors() {
        let raw = r#"{
            "success": false,
            "result": null,
            "errors": [{ "code": 20, "message": "Authentication failure" }]
        }"#;
        let envelope: CaEnvelope<EnrollResult> = serde_json::from_str(raw).unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.errors[0].message, "Authentication failure");
    }

    #[test]
    fn enroll_result_parses_camel_case_key() {
        let raw = r#"{
            "success": true,
            "result": { "certificate": "CERT", "privateKey": "KEY" }
        }"#;
        let envelope: CaEnvelope<EnrollResult> = serde_json::from_str(raw).unwrap();
        let result = envelope.result.unwrap();

        assert_eq!(result.certificate, "CERT");
        assert_eq!(result.private_key, "KEY");
    }
}
