//! The stateful checkout component.

use super::{
    ComplaintField, ComplaintForm, ComplaintStatus, PaymentForm, ViewMode, ViewState,
};
use crate::gateway::PaymentGateway;
use crate::launch::{AUTO_SUBMIT_DELAY, AutoSubmit, LaunchParams};
use crate::navigator::Navigator;
use crate::validation::{self, ValidationError};
use paylink_sdk::client::ClientError;
use paylink_sdk::credentials::Credentials;
use paylink_sdk::objects::currency::CurrencyType;
use paylink_sdk::objects::refund::RefundReceipt;
use paylink_sdk::objects::transaction::PaymentLink;
use thiserror::Error;
use tracing::{debug, error, info, warn};

const PAYMENT_REQUEST_FAILED: &str = "Failed to create transaction";
const PAYMENT_REJECTED: &str = "Transaction creation failed";
const COMPLAINT_REQUEST_FAILED: &str = "Failed to submit complaint";
const COMPLAINT_REJECTED: &str = "Complaint submission failed";

/// Why a submission did not go through. The message is already the text
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Request(String),
}

/// Payment / complaint view.
///
/// Owns all form state; every mutation goes through `&mut self`, so at most
/// one request per view is ever in flight.
pub struct CheckoutView<G, N> {
    gateway: G,
    navigator: N,
    mode: ViewMode,
    credentials: Credentials,
    payment: PaymentForm,
    payment_url: Option<String>,
    payment_error: Option<String>,
    complaint: ComplaintForm,
    complaint_status: ComplaintStatus,
    auto_submit: AutoSubmit,
}

impl<G: PaymentGateway, N: Navigator> CheckoutView<G, N> {
    /// Mount the view, pre-filling it from the launch parameters.
    ///
    /// The auto-submit latch is armed only when the amount and both
    /// credentials were supplied; call [`run_auto_submit`](Self::run_auto_submit)
    /// to let it fire.
    pub fn mount(gateway: G, navigator: N, params: LaunchParams) -> Self {
        let auto_submit = AutoSubmit::new(params.should_auto_submit());
        debug!(?params, armed = auto_submit.is_armed(), "mounting checkout view");
        Self {
            gateway,
            navigator,
            mode: ViewMode::Payment,
            credentials: Credentials::new(params.api_key, params.api_secret),
            payment: PaymentForm {
                amount: params.amount,
                ..Default::default()
            },
            payment_url: None,
            payment_error: None,
            complaint: ComplaintForm::default(),
            complaint_status: ComplaintStatus::Idle,
            auto_submit,
        }
    }

    // -- accessors ------------------------------------------------------

    pub fn state(&self) -> ViewState {
        match self.mode {
            ViewMode::Payment => match &self.payment_url {
                Some(url) => ViewState::PaymentReady { url: url.clone() },
                None => ViewState::PaymentForm,
            },
            ViewMode::Complaint => ViewState::ComplaintForm(self.complaint_status.clone()),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn payment_form(&self) -> &PaymentForm {
        &self.payment
    }

    pub fn payment_url(&self) -> Option<&str> {
        self.payment_url.as_deref()
    }

    pub fn payment_error(&self) -> Option<&str> {
        self.payment_error.as_deref()
    }

    pub fn complaint_form(&self) -> &ComplaintForm {
        &self.complaint
    }

    pub fn complaint_status(&self) -> &ComplaintStatus {
        &self.complaint_status
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Mirrors the enabled state of the "Generate QR Code" button.
    pub fn can_submit_payment(&self) -> bool {
        !self.payment.amount.is_empty() && self.credentials.is_complete()
    }

    // -- edits ----------------------------------------------------------

    pub fn select_tab(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn set_api_key(&mut self, value: impl Into<String>) {
        self.credentials.api_key = value.into();
    }

    pub fn set_api_secret(&mut self, value: impl Into<String>) {
        self.credentials.api_secret = value.into();
    }

    pub fn set_amount(&mut self, value: impl Into<String>) {
        self.payment.amount = value.into();
    }

    pub fn set_currency_type(&mut self, currency: CurrencyType) {
        self.payment.currency_type = currency;
    }

    pub fn set_callback_url(&mut self, value: impl Into<String>) {
        self.payment.callback_url = value.into();
    }

    pub fn edit_complaint(&mut self, field: ComplaintField, value: impl Into<String>) {
        self.complaint.set(field, value.into());
    }

    pub fn set_complaint_currency_type(&mut self, currency: CurrencyType) {
        self.complaint.currency_type = currency;
    }

    // -- payment --------------------------------------------------------

    /// Request a payment link and, on success, redirect to it.
    ///
    /// Validation failures never reach the gateway. Any failure is stored
    /// as the payment error and the form keeps its contents.
    pub async fn submit_payment(&mut self) -> Result<PaymentLink, SubmitError> {
        let request = match validation::payment_request(&self.credentials, &self.payment) {
            Ok(request) => request,
            Err(e) => {
                warn!("payment not submitted: {}", e);
                self.payment_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        self.payment_error = None;
        info!(
            amount = %request.amount,
            currency = %request.currency_type,
            "generating payment link"
        );

        match self
            .gateway
            .create_transaction(&self.credentials, &request)
            .await
        {
            Ok(link) => {
                info!(url = %link.url, "payment link ready");
                self.payment_url = Some(link.url.clone());
                self.navigator.redirect(&link.url);
                Ok(link)
            }
            Err(e) => {
                error!("Transaction creation error: {}", e);
                let message = user_message(&e, PAYMENT_REQUEST_FAILED, PAYMENT_REJECTED);
                self.payment_error = Some(message.clone());
                Err(SubmitError::Request(message))
            }
        }
    }

    /// Fire the launch-time submission if it is still pending.
    ///
    /// Waits [`AUTO_SUBMIT_DELAY`] first. Returns `None` when there was
    /// nothing to fire, which is the case on every call after the first.
    pub async fn run_auto_submit(&mut self) -> Option<Result<PaymentLink, SubmitError>> {
        if !self.auto_submit.take() {
            return None;
        }
        tokio::time::sleep(AUTO_SUBMIT_DELAY).await;
        debug!("auto-submitting payment from launch parameters");
        Some(self.submit_payment().await)
    }

    /// Leave the ready screen: forget the link, the error and the amount.
    pub fn reset_transaction(&mut self) {
        self.payment_url = None;
        self.payment_error = None;
        self.payment.amount.clear();
    }

    /// Open the current payment link in a new window. Returns `false` when
    /// there is no link.
    pub fn open_payment_url(&self) -> bool {
        match &self.payment_url {
            Some(url) => {
                self.navigator.open_new_window(url);
                true
            }
            None => false,
        }
    }

    // -- complaint ------------------------------------------------------

    /// File the refund request. On success the form is cleared.
    pub async fn submit_complaint(&mut self) -> Result<RefundReceipt, SubmitError> {
        let request = match validation::refund_request(&self.credentials, &self.complaint) {
            Ok(request) => request,
            Err(e) => {
                warn!("complaint not submitted: {}", e);
                self.complaint_status = ComplaintStatus::Failed(e.to_string());
                return Err(e.into());
            }
        };

        self.complaint_status = ComplaintStatus::Idle;
        info!(currency = %request.currency_type, "submitting complaint");

        match self
            .gateway
            .submit_refund(&self.credentials, &request)
            .await
        {
            Ok(receipt) => {
                info!("complaint accepted");
                self.complaint = ComplaintForm::default();
                self.complaint_status = ComplaintStatus::Submitted;
                Ok(receipt)
            }
            Err(e) => {
                error!("Complaint submission error: {}", e);
                let message = user_message(&e, COMPLAINT_REQUEST_FAILED, COMPLAINT_REJECTED);
                self.complaint_status = ComplaintStatus::Failed(message.clone());
                Err(SubmitError::Request(message))
            }
        }
    }

    /// Clear the complaint form and its outcome.
    pub fn reset_complaint(&mut self) {
        self.complaint = ComplaintForm::default();
        self.complaint_status = ComplaintStatus::Idle;
    }
}

/// Text to show for a failed request: the backend's own message when it sent
/// one, otherwise a fallback matching the kind of failure.
fn user_message(err: &ClientError, request_failed: &str, rejected: &str) -> String {
    if let Some(message) = err.backend_message() {
        return message.to_owned();
    }
    match err {
        ClientError::Api { .. } => request_failed.to_owned(),
        ClientError::Rejected { .. } => rejected.to_owned(),
        other => format!("{request_failed}: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::recording::{Navigation, RecordingNavigator};
    use crate::view::COMPLAINT_SUBMITTED;
    use async_trait::async_trait;
    use paylink_sdk::objects::refund::RefundRequest;
    use paylink_sdk::objects::transaction::CreateTransaction;
    use reqwest::StatusCode;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    enum Reply {
        Ok(&'static str),
        Status(StatusCode, Option<&'static str>),
        Rejected(Option<&'static str>),
        Malformed,
    }

    impl Reply {
        fn error(&self) -> ClientError {
            match self {
                Reply::Ok(_) => unreachable!(),
                Reply::Status(status, message) => ClientError::Api {
                    status: *status,
                    message: message.map(str::to_owned),
                },
                Reply::Rejected(message) => ClientError::Rejected {
                    message: message.map(str::to_owned),
                },
                Reply::Malformed => {
                    ClientError::Json(serde_json::from_str::<u8>("{").unwrap_err())
                }
            }
        }
    }

    struct FakeGateway {
        reply: Mutex<Reply>,
        payment_calls: AtomicUsize,
        refund_calls: AtomicUsize,
        last_payment: Mutex<Option<(Credentials, CreateTransaction)>>,
        last_refund: Mutex<Option<RefundRequest>>,
    }

    impl FakeGateway {
        fn new(reply: Reply) -> Self {
            Self {
                reply: Mutex::new(reply),
                payment_calls: AtomicUsize::new(0),
                refund_calls: AtomicUsize::new(0),
                last_payment: Mutex::new(None),
                last_refund: Mutex::new(None),
            }
        }

        fn reply_with(&self, reply: Reply) {
            *self.reply.lock().unwrap() = reply;
        }

        fn payment_calls(&self) -> usize {
            self.payment_calls.load(Ordering::SeqCst)
        }

        fn refund_calls(&self) -> usize {
            self.refund_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_transaction(
            &self,
            credentials: &Credentials,
            request: &CreateTransaction,
        ) -> Result<PaymentLink, ClientError> {
            self.payment_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payment.lock().unwrap() = Some((credentials.clone(), request.clone()));
            match &*self.reply.lock().unwrap() {
                Reply::Ok(url) => Ok(PaymentLink {
                    url: (*url).to_owned(),
                }),
                other => Err(other.error()),
            }
        }

        async fn submit_refund(
            &self,
            _credentials: &Credentials,
            request: &RefundRequest,
        ) -> Result<RefundReceipt, ClientError> {
            self.refund_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_refund.lock().unwrap() = Some(request.clone());
            match &*self.reply.lock().unwrap() {
                Reply::Ok(_) => Ok(RefundReceipt { message: None }),
                other => Err(other.error()),
            }
        }
    }

    type TestView = CheckoutView<FakeGateway, RecordingNavigator>;

    fn view(reply: Reply, params: LaunchParams) -> TestView {
        CheckoutView::mount(FakeGateway::new(reply), RecordingNavigator::default(), params)
    }

    fn ready_params() -> LaunchParams {
        LaunchParams::from_query("api_key=pk&api_secret=sk&amount=10")
    }

    #[tokio::test]
    async fn test_payment_blocked_when_fields_missing() {
        for (key, secret, amount) in [("", "sk", "5"), ("pk", "", "5"), ("pk", "sk", "")] {
            let mut v = view(Reply::Ok("https://x"), LaunchParams::default());
            v.set_api_key(key);
            v.set_api_secret(secret);
            v.set_amount(amount);
            assert!(!v.can_submit_payment());

            let err = v.submit_payment().await.unwrap_err();
            assert_eq!(
                err,
                SubmitError::Validation(ValidationError::MissingPaymentParameters)
            );
            assert_eq!(v.gateway().payment_calls(), 0);
            assert_eq!(
                v.payment_error(),
                Some("Missing required parameters (amount, API key, or API secret)")
            );
            assert_eq!(v.state(), ViewState::PaymentForm);
        }
    }

    #[tokio::test]
    async fn test_payment_success_sets_url_and_redirects() {
        let mut v = view(Reply::Ok("https://x"), ready_params());
        v.set_currency_type(CurrencyType::UsdtTrc20);
        v.set_callback_url("https://shop.example.com/cb");

        let link = v.submit_payment().await.unwrap();
        assert_eq!(link.url, "https://x");
        assert_eq!(v.payment_url(), Some("https://x"));
        assert_eq!(v.payment_error(), None);
        assert_eq!(
            v.state(),
            ViewState::PaymentReady {
                url: "https://x".to_owned()
            }
        );
        assert_eq!(
            v.navigator().visits(),
            vec![Navigation::Redirect("https://x".to_owned())]
        );

        let (creds, req) = v.gateway().last_payment.lock().unwrap().clone().unwrap();
        assert_eq!(creds, Credentials::new("pk", "sk"));
        assert_eq!(req.currency_type, CurrencyType::UsdtTrc20);
        assert_eq!(
            req.callback_url.map(|u| u.to_string()),
            Some("https://shop.example.com/cb".to_owned())
        );
    }

    #[tokio::test]
    async fn test_payment_error_status_keeps_form() {
        let mut v = view(
            Reply::Status(StatusCode::UNAUTHORIZED, Some("Invalid API key")),
            ready_params(),
        );
        v.set_callback_url("https://shop.example.com/cb");

        let err = v.submit_payment().await.unwrap_err();
        assert_eq!(err, SubmitError::Request("Invalid API key".to_owned()));
        assert_eq!(v.payment_error(), Some("Invalid API key"));
        assert_eq!(v.state(), ViewState::PaymentForm);
        assert_eq!(v.payment_form().amount, "10");
        assert_eq!(v.payment_form().callback_url, "https://shop.example.com/cb");
        assert!(v.navigator().visits().is_empty());
    }

    #[tokio::test]
    async fn test_payment_failure_fallback_messages() {
        let cases = [
            (
                Reply::Status(StatusCode::INTERNAL_SERVER_ERROR, None),
                "Failed to create transaction".to_owned(),
            ),
            (Reply::Rejected(None), "Transaction creation failed".to_owned()),
            (Reply::Rejected(Some("Amount too low")), "Amount too low".to_owned()),
        ];
        for (reply, expected) in cases {
            let mut v = view(reply, ready_params());
            assert_eq!(
                v.submit_payment().await.unwrap_err(),
                SubmitError::Request(expected.clone())
            );
            assert_eq!(v.payment_error(), Some(expected.as_str()));
        }

        let mut v = view(Reply::Malformed, ready_params());
        v.submit_payment().await.unwrap_err();
        assert!(
            v.payment_error()
                .unwrap()
                .starts_with("Failed to create transaction: json error")
        );
    }

    #[tokio::test]
    async fn test_error_cleared_on_next_attempt() {
        let mut v = view(Reply::Ok("https://x"), LaunchParams::default());
        v.submit_payment().await.unwrap_err();
        assert!(v.payment_error().is_some());

        v.set_api_key("pk");
        v.set_api_secret("sk");
        v.set_amount("1");
        v.submit_payment().await.unwrap();
        assert_eq!(v.payment_error(), None);
    }

    #[tokio::test]
    async fn test_invalid_amount_is_not_sent() {
        let mut v = view(Reply::Ok("https://x"), ready_params());
        v.set_amount("-1");
        assert_eq!(
            v.submit_payment().await.unwrap_err(),
            SubmitError::Validation(ValidationError::InvalidAmount)
        );
        assert_eq!(v.gateway().payment_calls(), 0);
    }

    #[tokio::test]
    async fn test_reset_and_reopen() {
        let mut v = view(Reply::Ok("https://x"), ready_params());
        assert!(!v.open_payment_url());
        v.submit_payment().await.unwrap();

        assert!(v.open_payment_url());
        assert_eq!(
            v.navigator().visits().last(),
            Some(&Navigation::NewWindow("https://x".to_owned()))
        );

        v.reset_transaction();
        assert_eq!(v.state(), ViewState::PaymentForm);
        assert_eq!(v.payment_form().amount, "");
        assert_eq!(v.credentials(), &Credentials::new("pk", "sk"));
    }

    #[tokio::test]
    async fn test_tabs_switch_unconditionally() {
        let mut v = view(Reply::Ok("https://x"), ready_params());
        v.submit_payment().await.unwrap();

        v.select_tab(ViewMode::Complaint);
        assert_eq!(v.state(), ViewState::ComplaintForm(ComplaintStatus::Idle));

        v.select_tab(ViewMode::Payment);
        assert!(matches!(v.state(), ViewState::PaymentReady { .. }));
    }

    #[tokio::test]
    async fn test_complaint_requires_wallet_address() {
        let mut v = view(Reply::Ok(""), ready_params());
        v.select_tab(ViewMode::Complaint);
        v.edit_complaint(ComplaintField::Amount, "3");

        let err = v.submit_complaint().await.unwrap_err();
        assert_eq!(err.to_string(), "Wallet address is required");
        assert_eq!(v.gateway().refund_calls(), 0);
        assert_eq!(
            v.state(),
            ViewState::ComplaintForm(ComplaintStatus::Failed(
                "Wallet address is required".to_owned()
            ))
        );
    }

    #[tokio::test]
    async fn test_complaint_requires_credentials() {
        let mut v = view(Reply::Ok(""), LaunchParams::default());
        v.edit_complaint(ComplaintField::WalletAddress, "0xabc");
        let err = v.submit_complaint().await.unwrap_err();
        assert_eq!(err.to_string(), "API Key and API Secret are required");
        assert_eq!(v.gateway().refund_calls(), 0);
    }

    #[tokio::test]
    async fn test_complaint_success_clears_form() {
        let mut v = view(Reply::Ok(""), ready_params());
        v.select_tab(ViewMode::Complaint);
        v.edit_complaint(ComplaintField::WalletAddress, "0xabc");
        v.edit_complaint(ComplaintField::Amount, "7");
        v.edit_complaint(ComplaintField::Subject, "Double charge");
        v.edit_complaint(ComplaintField::Message, "Paid twice");
        v.set_complaint_currency_type(CurrencyType::UsdtTrc20);

        v.submit_complaint().await.unwrap();
        assert_eq!(v.complaint_form(), &ComplaintForm::default());
        assert_eq!(v.complaint_status(), &ComplaintStatus::Submitted);

        let sent = v.gateway().last_refund.lock().unwrap().clone().unwrap();
        assert_eq!(sent.wallet_address, "0xabc");
        assert_eq!(sent.amount, "7");
        assert_eq!(sent.subject, "Double charge");
        assert_eq!(sent.message, "Paid twice");
        assert_eq!(sent.currency_type, CurrencyType::UsdtTrc20);
        assert!(COMPLAINT_SUBMITTED.starts_with("Complaint submitted successfully"));
    }

    #[tokio::test]
    async fn test_complaint_failure_keeps_form() {
        let mut v = view(
            Reply::Status(StatusCode::BAD_REQUEST, None),
            ready_params(),
        );
        v.edit_complaint(ComplaintField::WalletAddress, "0xabc");

        v.submit_complaint().await.unwrap_err();
        assert_eq!(
            v.complaint_status(),
            &ComplaintStatus::Failed("Failed to submit complaint".to_owned())
        );
        assert_eq!(v.complaint_form().wallet_address, "0xabc");

        v.reset_complaint();
        assert_eq!(v.complaint_status(), &ComplaintStatus::Idle);
        assert_eq!(v.complaint_form(), &ComplaintForm::default());
    }

    #[tokio::test]
    async fn test_complaint_outcome_resets_on_resubmit() {
        let mut v = view(Reply::Rejected(Some("Unknown wallet")), ready_params());
        v.select_tab(ViewMode::Complaint);
        v.edit_complaint(ComplaintField::WalletAddress, "0xabc");
        v.edit_complaint(ComplaintField::Amount, "2");

        v.submit_complaint().await.unwrap_err();
        assert_eq!(
            v.state(),
            ViewState::ComplaintForm(ComplaintStatus::Failed("Unknown wallet".to_owned()))
        );
        assert_eq!(v.complaint_form().amount, "2");

        v.gateway().reply_with(Reply::Ok(""));
        v.submit_complaint().await.unwrap();
        assert_eq!(
            v.state(),
            ViewState::ComplaintForm(ComplaintStatus::Submitted)
        );
        assert_eq!(v.complaint_form(), &ComplaintForm::default());
        assert_eq!(v.gateway().refund_calls(), 2);
        assert_eq!(
            v.gateway().last_refund.lock().unwrap().clone().unwrap().amount,
            "2"
        );
    }

    #[tokio::test]
    async fn test_complaint_rejected_fallback() {
        let mut v = view(Reply::Rejected(None), ready_params());
        v.edit_complaint(ComplaintField::WalletAddress, "0xabc");
        assert_eq!(
            v.submit_complaint().await.unwrap_err(),
            SubmitError::Request("Complaint submission failed".to_owned())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_submit_fires_once() {
        let mut v = view(Reply::Ok("https://x"), ready_params());

        let first = v.run_auto_submit().await;
        assert!(matches!(first, Some(Ok(_))));
        assert!(v.run_auto_submit().await.is_none());
        assert_eq!(v.gateway().payment_calls(), 1);
        assert_eq!(
            v.navigator().visits(),
            vec![Navigation::Redirect("https://x".to_owned())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_submit_needs_all_launch_params() {
        for query in [
            "",
            "api_key=pk&api_secret=sk",
            "api_key=pk&amount=10",
            "api_secret=sk&amount=10",
        ] {
            let mut v = view(Reply::Ok("https://x"), LaunchParams::from_query(query));
            assert!(v.run_auto_submit().await.is_none(), "{query:?}");
            assert_eq!(v.gateway().payment_calls(), 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_submit_waits_for_delay() {
        let mut v = view(Reply::Ok("https://x"), ready_params());
        let start = tokio::time::Instant::now();
        v.run_auto_submit().await;
        assert!(start.elapsed() >= AUTO_SUBMIT_DELAY);
    }
}
