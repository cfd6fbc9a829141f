pub mod controller;
pub mod resolver;

pub use controller::WhitelistSession;
pub use resolver::{ConnectionResolver, ConsoleAlerter, ProviderOrSigner, ReadOnly};

/// UI state for one page view. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub wallet_connected: bool,
    pub joined_whitelist: bool,
    pub loading: bool,
    pub whitelisted_count: u8,
    /// Display text of the last failure swallowed by an operation.
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn summary(&self) -> String {
        format!("{} have already joined the Whitelist", self.whitelisted_count)
    }
}

/// The four mutually exclusive button presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonView {
    ConnectWallet,
    Loading,
    Joined,
    JoinWhitelist,
}

impl ButtonView {
    pub fn label(&self) -> &'static str {
        match self {
            ButtonView::ConnectWallet => "Connect your wallet",
            ButtonView::Loading => "Loading...",
            ButtonView::Joined => "Thanks for joining the Whitelist!",
            ButtonView::JoinWhitelist => "Join the Whitelist",
        }
    }

    /// Whether clicking the button triggers an operation.
    pub fn is_actionable(&self) -> bool {
        matches!(self, ButtonView::ConnectWallet | ButtonView::JoinWhitelist)
    }
}

pub fn render_button(state: &SessionState) -> ButtonView {
    if !state.wallet_connected {
        return ButtonView::ConnectWallet;
    }
    if state.loading {
        return ButtonView::Loading;
    }
    if state.joined_whitelist {
        ButtonView::Joined
    } else {
        ButtonView::JoinWhitelist
    }
}
