//! Wallet session
//!
//! Explicit connection state handed to the evaluator. Created disconnected,
//! set on connect, cleared on disconnect, never persisted.

use fundline_campaign::Address;
use fundline_lifecycle::Viewer;
use rand::Rng;

/// Connected wallet, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    address: Option<Address>,
}

impl WalletSession {
    /// Disconnected session
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already connected as `address`
    #[inline]
    #[must_use]
    pub fn connected_as(address: impl Into<Address>) -> Self {
        Self {
            address: Some(address.into()),
        }
    }

    /// Connect with a freshly generated mock address
    pub fn connect(&mut self) -> &Address {
        let address = mock_address();
        tracing::info!(%address, "wallet connected");
        self.address.insert(address)
    }

    /// Connect as a known address
    pub fn connect_as(&mut self, address: impl Into<Address>) -> &Address {
        let address = address.into();
        tracing::info!(%address, "wallet connected");
        self.address.insert(address)
    }

    /// Drop the connection
    pub fn disconnect(&mut self) {
        if let Some(address) = self.address.take() {
            tracing::info!(%address, "wallet disconnected");
        }
    }

    /// Check if a wallet is connected
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Connected address
    #[inline]
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Viewer identity for the evaluator
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer::from(self.address.clone())
    }
}

/// `0x` followed by 40 random lowercase hex digits
fn mock_address() -> Address {
    let mut rng = rand::rng();
    let digits: String = (0..40)
        .map(|_| format!("{:x}", rng.random_range(0..16u8)))
        .collect();
    Address::new(format!("0x{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        let session = WalletSession::new();
        assert!(!session.is_connected());
        assert_eq!(session.viewer(), Viewer::Anonymous);
    }

    #[test]
    fn connect_generates_hex_address() {
        let mut session = WalletSession::new();
        let address = session.connect().clone();

        let raw = address.as_str();
        assert_eq!(raw.len(), 42);
        assert!(raw.starts_with("0x"));
        assert!(raw[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(session.viewer(), Viewer::Connected(address));
    }

    #[test]
    fn disconnect_clears_identity() {
        let mut session = WalletSession::connected_as("0xabc");
        assert!(session.is_connected());

        session.disconnect();
        assert!(session.address().is_none());
        assert_eq!(session.viewer(), Viewer::Anonymous);
    }

    #[test]
    fn connect_as_replaces_previous() {
        let mut session = WalletSession::new();
        session.connect();
        session.connect_as("0xBEEF");
        assert_eq!(session.address(), Some(&Address::from("0xbeef")));
    }
}
