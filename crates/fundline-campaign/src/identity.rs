//! Campaign and creator identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque campaign identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl CampaignId {
    /// Create a campaign id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CampaignId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CampaignId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wallet address surrogate identifying creators and backers
///
/// The original spelling is kept for display. Equality and hashing ignore
/// ASCII case, so `0xABC` and `0xabc` are the same identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create an address
    #[inline]
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the address as written
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive identity comparison
    #[inline]
    #[must_use]
    pub fn matches(&self, other: &Address) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Shortened form for display, e.g. `0x1A2B...9I0J`
    #[must_use]
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn address_matches_ignoring_case() {
        let creator = Address::from("0xABC");
        assert!(creator.matches(&Address::from("0xabc")));
        assert_eq!(creator, Address::from("0xAbC"));
        assert_ne!(creator, Address::from("0xabd"));
    }

    #[test]
    fn address_hash_is_case_insensitive() {
        let mut set = HashSet::new();
        set.insert(Address::from("0xDEAD"));
        assert!(set.contains(&Address::from("0xdead")));
    }

    #[test]
    fn address_keeps_original_spelling() {
        let addr = Address::from("0x1A2B3C4D5E6F7G8H9I0J");
        assert_eq!(addr.to_string(), "0x1A2B3C4D5E6F7G8H9I0J");
        assert_eq!(addr.short(), "0x1A2B...9I0J");
    }

    #[test]
    fn short_address_left_alone() {
        assert_eq!(Address::from("0xabc").short(), "0xabc");
    }

    #[test]
    fn campaign_id_serializes_as_string() {
        let id = CampaignId::from("6");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"6\"");
    }
}
