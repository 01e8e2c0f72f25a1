//! Viewer identity and role derivation

use fundline_campaign::Address;
use serde::{Deserialize, Serialize};

/// Identity of whoever is looking at a campaign
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Viewer {
    /// No wallet connected
    #[default]
    Anonymous,
    /// Wallet connected with this address
    Connected(Address),
}

impl Viewer {
    /// Connected viewer
    #[inline]
    #[must_use]
    pub fn connected(address: impl Into<Address>) -> Self {
        Viewer::Connected(address.into())
    }

    /// Address, if connected
    #[inline]
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Connected(address) => Some(address),
        }
    }

    /// Check if a wallet is connected
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Viewer::Connected(_))
    }
}

impl From<Option<Address>> for Viewer {
    fn from(value: Option<Address>) -> Self {
        value.map_or(Viewer::Anonymous, Viewer::Connected)
    }
}

/// Role of a viewer relative to one campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewerRole {
    /// Not connected
    Anonymous,
    /// Connected as the campaign creator
    Creator,
    /// Connected as anyone else
    Backer,
}

impl ViewerRole {
    /// Derive the role; creator matching ignores ASCII case
    #[must_use]
    pub fn derive(viewer: &Viewer, creator: &Address) -> Self {
        match viewer {
            Viewer::Anonymous => ViewerRole::Anonymous,
            Viewer::Connected(address) if address.matches(creator) => ViewerRole::Creator,
            Viewer::Connected(_) => ViewerRole::Backer,
        }
    }

    /// Check if this role is the creator
    #[inline]
    #[must_use]
    pub fn is_creator(&self) -> bool {
        matches!(self, ViewerRole::Creator)
    }
}

impl std::fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewerRole::Anonymous => "anonymous",
            ViewerRole::Creator => "creator",
            ViewerRole::Backer => "backer",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_viewer() {
        let creator = Address::from("0xABC");
        assert_eq!(ViewerRole::derive(&Viewer::Anonymous, &creator), ViewerRole::Anonymous);
        assert!(!ViewerRole::Anonymous.is_creator());
    }

    #[test]
    fn creator_match_ignores_case() {
        let creator = Address::from("0xABC");
        let role = ViewerRole::derive(&Viewer::connected("0xabc"), &creator);
        assert_eq!(role, ViewerRole::Creator);
        assert!(role.is_creator());
    }

    #[test]
    fn anyone_else_is_backer() {
        let creator = Address::from("0xABC");
        let role = ViewerRole::derive(&Viewer::connected("0xabd"), &creator);
        assert_eq!(role, ViewerRole::Backer);
    }

    #[test]
    fn viewer_from_option() {
        assert_eq!(Viewer::from(None), Viewer::Anonymous);
        let viewer = Viewer::from(Some(Address::from("0x1")));
        assert!(viewer.is_connected());
        assert_eq!(viewer.address().map(Address::as_str), Some("0x1"));
    }
}
