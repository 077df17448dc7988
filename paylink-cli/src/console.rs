//! Interactive console driving the checkout view.
//!
//! Reads one command per line from stdin until `quit`, end of input, or
//! Ctrl-C.

use crate::command::{Command, CommandError, Field, HELP};
use crate::render::render;
use paylink_core::gateway::PaymentGateway;
use paylink_core::navigator::Navigator;
use paylink_core::view::{CheckoutView, ComplaintField, ViewMode, ViewState};
use paylink_sdk::objects::currency::CurrencyType;
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// A well-formed command that does not apply to the current view.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("`{field}` is not part of the {tab} tab")]
    FieldNotOnTab { field: Field, tab: &'static str },

    #[error(transparent)]
    Currency(#[from] paylink_sdk::objects::currency::UnknownCurrencyType),
}

/// Creates a future that completes when Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl-C, closing session");
}

/// Run the read-eval-print loop on stdin until the user leaves.
pub async fn run<G: PaymentGateway, N: Navigator>(
    view: &mut CheckoutView<G, N>,
) -> std::io::Result<()> {
    session(view, BufReader::new(tokio::io::stdin()), shutdown_signal()).await
}

/// Read commands from `input` until `quit`, end of input, or `shutdown`
/// completes. `shutdown` also cuts short a command still waiting on the
/// gateway.
async fn session<G, N, R, S>(
    view: &mut CheckoutView<G, N>,
    input: R,
    shutdown: S,
) -> std::io::Result<()>
where
    G: PaymentGateway,
    N: Navigator,
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    print!("{}", render(view));

    tokio::pin!(shutdown);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown => break,
        };
        let Some(line) = line else {
            tracing::debug!("stdin closed");
            break;
        };

        match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(command)) => {
                let outcome = tokio::select! {
                    outcome = dispatch(view, command) => outcome,
                    _ = &mut shutdown => {
                        tracing::info!("Abandoning in-flight request");
                        break;
                    }
                };
                match outcome {
                    Ok(()) => print!("{}", render(view)),
                    Err(e) => println!("error: {e}"),
                }
            }
            Err(e) => println!("error: {e}"),
        }
    }
    Ok(())
}

/// Apply one command to the view. Submission failures are not errors here:
/// they are part of the view state and show up in the next render.
pub async fn dispatch<G: PaymentGateway, N: Navigator>(
    view: &mut CheckoutView<G, N>,
    command: Command,
) -> Result<(), DispatchError> {
    match command {
        Command::Tab(mode) => view.select_tab(mode),
        Command::Set(field, value) => set_field(view, field, value)?,
        Command::Submit => match view.state() {
            ViewState::PaymentForm => {
                let _ = view.submit_payment().await;
            }
            ViewState::PaymentReady { .. } => {
                println!("A payment link is already ready; `reset` to create another.");
            }
            ViewState::ComplaintForm(_) => {
                let _ = view.submit_complaint().await;
            }
        },
        Command::Reset => match view.mode() {
            ViewMode::Payment => view.reset_transaction(),
            ViewMode::Complaint => view.reset_complaint(),
        },
        Command::Open => {
            if !view.open_payment_url() {
                println!("No payment link yet.");
            }
        }
        Command::Show | Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn set_field<G: PaymentGateway, N: Navigator>(
    view: &mut CheckoutView<G, N>,
    field: Field,
    value: String,
) -> Result<(), DispatchError> {
    let mode = view.mode();
    match (field, mode) {
        (Field::ApiKey, _) => view.set_api_key(value),
        (Field::ApiSecret, _) => view.set_api_secret(value),
        (Field::Amount, ViewMode::Payment) => view.set_amount(value),
        (Field::Amount, ViewMode::Complaint) => view.edit_complaint(ComplaintField::Amount, value),
        (Field::Currency, _) => {
            let currency: CurrencyType = value.parse()?;
            match mode {
                ViewMode::Payment => view.set_currency_type(currency),
                ViewMode::Complaint => view.set_complaint_currency_type(currency),
            }
        }
        (Field::CallbackUrl, ViewMode::Payment) => view.set_callback_url(value),
        (Field::WalletAddress, ViewMode::Complaint) => {
            view.edit_complaint(ComplaintField::WalletAddress, value)
        }
        (Field::Subject, ViewMode::Complaint) => view.edit_complaint(ComplaintField::Subject, value),
        (Field::Message, ViewMode::Complaint) => view.edit_complaint(ComplaintField::Message, value),
        (field, mode) => {
            return Err(DispatchError::FieldNotOnTab {
                field,
                tab: match mode {
                    ViewMode::Payment => "payment",
                    ViewMode::Complaint => "complaint",
                },
            });
        }
    }
    Ok(())
}
