//! Navigation shell: the header and the single routed view under it.

/// One entry of the header navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub to: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[NavItem {
    to: "/",
    label: "Payment Interface",
    description: "Process Transactions",
}];

/// Views the shell can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Payment link generation and refund requests.
    Checkout,
}

/// Resolve a path to the view mounted there. Only `/` has a view.
pub fn route(path: &str) -> Option<Route> {
    match path {
        "" | "/" => Some(Route::Checkout),
        _ => None,
    }
}

/// Plain-text header listing the navigation entries.
pub fn header(title: &str) -> String {
    let mut out = format!("== {title} ==\n");
    for item in NAV_ITEMS {
        out.push_str(&format!("  [{}] {} - {}\n", item.to, item.label, item.description));
    }
    out
}
