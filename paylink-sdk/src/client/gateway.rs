//! Merchant API client (merchant frontend → PayGlobal backend).
//!
//! Both endpoints authenticate with the `apiKey` / `x-api-secret` header
//! pair and answer with a `{ success, ... }` JSON envelope.

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::ClientError;
use crate::credentials::{API_KEY_HEADER, API_SECRET_HEADER, Credentials};
use crate::objects::refund::{RefundReceipt, RefundRequest, RefundResponse};
use crate::objects::transaction::{CreateTransaction, PaymentLink, TransactionResponse};

/// Typed HTTP client for the PayGlobal **merchant API**.
///
/// Endpoints are resolved relative to `base_url`, which usually carries the
/// API version prefix (e.g. `https://backend.payglobal.co.in/api/v1`).
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl GatewayClient {
    /// Create a new `GatewayClient`.
    ///
    /// * `base_url` – API root; a missing trailing `/` is added so endpoint
    ///   paths land under it instead of replacing its last segment.
    /// * `credentials` – merchant key and secret sent on every request.
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            base_url: with_trailing_slash(base_url),
            credentials,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /transaction/create` – request a hosted payment link.
    ///
    /// Succeeds only when the backend answers `{ "success": true, "url": ... }`.
    pub async fn create_transaction(
        &self,
        request: &CreateTransaction,
    ) -> Result<PaymentLink, ClientError> {
        let url = self.base_url.join("transaction/create")?;
        tracing::debug!(
            amount = %request.amount,
            currency = %request.currency_type,
            "requesting payment link"
        );

        let resp = self
            .http
            .get(url)
            .query(&request.query_pairs())
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(API_SECRET_HEADER, &self.credentials.api_secret)
            .send()
            .await?;

        let body: TransactionResponse =
            parse_response(resp, TransactionResponse::failure_message).await?;
        let message = body.failure_message();
        body.into_link().ok_or(ClientError::Rejected { message })
    }

    /// `POST /refund` – file a refund request.
    pub async fn submit_refund(
        &self,
        request: &RefundRequest,
    ) -> Result<RefundReceipt, ClientError> {
        let url = self.base_url.join("refund")?;
        tracing::debug!(currency = %request.currency_type, "submitting refund request");

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(API_SECRET_HEADER, &self.credentials.api_secret)
            .json(request)
            .send()
            .await?;

        let body: RefundResponse = parse_response(resp, RefundResponse::failure_message).await?;
        if body.success {
            Ok(RefundReceipt {
                message: body.message,
            })
        } else {
            Err(ClientError::Rejected {
                message: body.message,
            })
        }
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Decode the JSON envelope, turning non-2xx statuses into
/// [`ClientError::Api`] with whatever explanation the body carried.
async fn parse_response<T: DeserializeOwned>(
    resp: reqwest::Response,
    failure_message: fn(&T) -> Option<String>,
) -> Result<T, ClientError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<T>(&bytes)
            .ok()
            .as_ref()
            .and_then(failure_message);
        tracing::debug!(%status, ?message, "gateway returned an error status");
        return Err(ClientError::Api { status, message });
    }
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
