//! Console command parsing.

use paylink_core::view::ViewMode;
use std::fmt;
use thiserror::Error;

/// A form field addressable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    ApiSecret,
    Amount,
    Currency,
    CallbackUrl,
    WalletAddress,
    Subject,
    Message,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        let field = match name {
            "key" | "api-key" => Field::ApiKey,
            "secret" | "api-secret" => Field::ApiSecret,
            "amount" => Field::Amount,
            "currency" => Field::Currency,
            "callback" | "callback-url" => Field::CallbackUrl,
            "wallet" | "wallet-address" => Field::WalletAddress,
            "subject" => Field::Subject,
            "message" => Field::Message,
            _ => return None,
        };
        Some(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::ApiKey => "api-key",
            Field::ApiSecret => "api-secret",
            Field::Amount => "amount",
            Field::Currency => "currency",
            Field::CallbackUrl => "callback-url",
            Field::WalletAddress => "wallet-address",
            Field::Subject => "subject",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(ViewMode),
    Set(Field, String),
    Submit,
    Reset,
    Open,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown tab `{0}`, expected `payment` or `complaint`")]
    UnknownTab(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),
}

pub const HELP: &str = "\
commands:
  tab payment|complaint     switch tab
  set <field> <value>       edit a field (empty value clears it)
      fields: api-key, api-secret, amount, currency,
              callback-url (payment), wallet-address, subject, message (complaint)
  submit                    generate the payment link / file the complaint
  reset                     clear the current tab
  open                      open the payment link again
  show                      print the current view
  help                      this text
  quit                      leave";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "tab" => match rest {
                "payment" => Command::Tab(ViewMode::Payment),
                "complaint" => Command::Tab(ViewMode::Complaint),
                "" => return Err(CommandError::MissingArgument("tab")),
                other => return Err(CommandError::UnknownTab(other.to_owned())),
            },
            "set" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("set"));
                }
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                let field =
                    Field::parse(name).ok_or_else(|| CommandError::UnknownField(name.to_owned()))?;
                Command::Set(field, value.to_owned())
            }
            "submit" => Command::Submit,
            "reset" => Command::Reset,
            "open" => Command::Open,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_owned())),
        };
        Ok(Some(command))
    }
}
