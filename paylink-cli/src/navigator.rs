//! Terminal-side navigation: print the link, optionally hand it to a browser.

use paylink_core::navigator::Navigator;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct TerminalNavigator {
    open_browser: bool,
    browser_command: String,
}

impl TerminalNavigator {
    pub fn new(open_browser: bool, browser_command: impl Into<String>) -> Self {
        Self {
            open_browser,
            browser_command: browser_command.into(),
        }
    }

    /// Spawn the browser command on the tokio runtime, which reaps the child
    /// once it exits even though the handle is dropped here.
    fn launch(&self, url: &str) {
        if !self.open_browser {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::warn!("No async runtime, not launching `{}`", self.browser_command);
            return;
        }
        let spawned = Command::new(&self.browser_command)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            tracing::warn!("Failed to launch `{}`: {}", self.browser_command, e);
        }
    }
}

impl Navigator for TerminalNavigator {
    fn redirect(&self, url: &str) {
        println!("Redirecting to payment page: {url}");
        self.launch(url);
    }

    fn open_new_window(&self, url: &str) {
        println!("Payment link: {url}");
        self.launch(url);
    }
}
