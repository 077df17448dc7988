//! Plain-text rendering of the checkout view.

use paylink_core::gateway::PaymentGateway;
use paylink_core::navigator::Navigator;
use paylink_core::view::{COMPLAINT_SUBMITTED, CheckoutView, ComplaintStatus, ViewMode, ViewState};
use std::fmt::Write;

pub fn render<G: PaymentGateway, N: Navigator>(view: &CheckoutView<G, N>) -> String {
    let mut out = String::new();
    let (payment_tab, complaint_tab) = match view.mode() {
        ViewMode::Payment => ("[ Generate Payment ]", "  File Complaint  "),
        ViewMode::Complaint => ("  Generate Payment  ", "[ File Complaint ]"),
    };
    let _ = writeln!(out, "{payment_tab} {complaint_tab}");

    let credentials = view.credentials();
    match view.state() {
        ViewState::PaymentForm => {
            let form = view.payment_form();
            let _ = writeln!(out, "-- Generate Payment QR Code --");
            field(&mut out, "api-key", &credentials.api_key);
            field(&mut out, "api-secret", &mask(&credentials.api_secret));
            field(&mut out, "currency", form.currency_type.label());
            field(&mut out, "amount", &form.amount);
            field(&mut out, "callback-url", &form.callback_url);
            if let Some(error) = view.payment_error() {
                let _ = writeln!(out, "  ! {error}");
            }
            if view.can_submit_payment() {
                let _ = writeln!(out, "  `submit` to generate the payment link");
            } else {
                let _ = writeln!(out, "  amount, api-key and api-secret are required");
            }
        }
        ViewState::PaymentReady { url } => {
            let _ = writeln!(out, "-- Payment Link Ready --");
            let _ = writeln!(out, "  {url}");
            let _ = writeln!(out, "  `open` to open it again, `reset` to start over");
        }
        ViewState::ComplaintForm(status) => {
            let form = view.complaint_form();
            let _ = writeln!(out, "-- Withdrawal Request --");
            field(&mut out, "api-key", &credentials.api_key);
            field(&mut out, "api-secret", &mask(&credentials.api_secret));
            field(&mut out, "currency", form.currency_type.label());
            field(&mut out, "amount", &form.amount);
            field(&mut out, "wallet-address", &form.wallet_address);
            field(&mut out, "subject", &form.subject);
            field(&mut out, "message", &form.message);
            match status {
                ComplaintStatus::Idle => {}
                ComplaintStatus::Submitted => {
                    let _ = writeln!(out, "  {COMPLAINT_SUBMITTED}");
                }
                ComplaintStatus::Failed(error) => {
                    let _ = writeln!(out, "  ! {error}");
                }
            }
        }
    }
    out
}

fn field(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(out, "  {name:<15}: {value}");
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "*".repeat(8)
    }
}
