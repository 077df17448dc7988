//! The checkout view: payment link generation and refund requests.
//!
//! The view has two tabs. The payment tab is either showing its form or,
//! once the backend handed out a link, the "ready" screen. The complaint
//! tab always shows its form, decorated with the outcome of the last
//! submission.
//!
//! ```text
//!   PaymentForm --submit ok--> PaymentReady --reset--> PaymentForm
//!        ^                                                  |
//!        +-------------- select_tab (either way) -----------+--> ComplaintForm
//! ```

mod checkout;

pub use checkout::{CheckoutView, SubmitError};

use paylink_sdk::objects::currency::CurrencyType;

/// Which tab is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Payment,
    Complaint,
}

/// What the view is currently displaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    PaymentForm,
    PaymentReady { url: String },
    ComplaintForm(ComplaintStatus),
}

/// Outcome of the most recent complaint submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComplaintStatus {
    #[default]
    Idle,
    Submitted,
    Failed(String),
}

/// Editable fields of the payment tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    /// Decimal amount as typed.
    pub amount: String,
    pub currency_type: CurrencyType,
    /// Optional; empty means "not provided".
    pub callback_url: String,
}

/// Editable fields of the complaint tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintForm {
    pub amount: String,
    pub wallet_address: String,
    pub message: String,
    pub subject: String,
    pub currency_type: CurrencyType,
}

/// Free-text fields of [`ComplaintForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintField {
    Amount,
    WalletAddress,
    Message,
    Subject,
}

impl ComplaintForm {
    pub fn set(&mut self, field: ComplaintField, value: String) {
        let slot = match field {
            ComplaintField::Amount => &mut self.amount,
            ComplaintField::WalletAddress => &mut self.wallet_address,
            ComplaintField::Message => &mut self.message,
            ComplaintField::Subject => &mut self.subject,
        };
        *slot = value;
    }
}

/// Confirmation shown after an accepted complaint.
pub const COMPLAINT_SUBMITTED: &str =
    "Complaint submitted successfully! Your refund request is being processed.";
