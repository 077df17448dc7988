//! Where the view sends the user once a payment link exists.

/// Side effects that leave the checkout view.
///
/// Both calls are fire-and-forget: implementations report their own
/// failures, the view never waits on them.
pub trait Navigator: Send + Sync {
    /// Replace the current page with `url`. Called once, right after a
    /// payment link is created.
    fn redirect(&self, url: &str);

    /// Open `url` alongside the current page.
    fn open_new_window(&self, url: &str);
}
