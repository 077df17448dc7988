//! The seam between the checkout view and the payment backend.

use async_trait::async_trait;
use paylink_sdk::client::{ClientError, GatewayClient};
use paylink_sdk::credentials::Credentials;
use paylink_sdk::objects::refund::{RefundReceipt, RefundRequest};
use paylink_sdk::objects::transaction::{CreateTransaction, PaymentLink};
use url::Url;

/// Backend operations the checkout view drives.
///
/// Credentials are passed on every call because the view lets the user edit
/// them at any time.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_transaction(
        &self,
        credentials: &Credentials,
        request: &CreateTransaction,
    ) -> Result<PaymentLink, ClientError>;

    async fn submit_refund(
        &self,
        credentials: &Credentials,
        request: &RefundRequest,
    ) -> Result<RefundReceipt, ClientError>;
}

/// [`PaymentGateway`] backed by the real HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Share a preconfigured `reqwest::Client` (timeouts, proxy, ...).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    fn client(&self, credentials: &Credentials) -> GatewayClient {
        GatewayClient::new(self.base_url.clone(), credentials.clone())
            .with_http_client(self.http.clone())
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_transaction(
        &self,
        credentials: &Credentials,
        request: &CreateTransaction,
    ) -> Result<PaymentLink, ClientError> {
        self.client(credentials).create_transaction(request).await
    }

    async fn submit_refund(
        &self,
        credentials: &Credentials,
        request: &RefundRequest,
    ) -> Result<RefundReceipt, ClientError> {
        self.client(credentials).submit_refund(request).await
    }
}
