//! Error types for donation input

/// Donation input rejected before any transfer is attempted
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DonationError {
    /// Missing, non-numeric, non-finite or not strictly positive
    #[error("invalid donation amount: {input:?}")]
    InvalidDonationAmount {
        /// Raw input, if any
        input: Option<String>,
    },

    /// Below the selected tier's minimum pledge
    #[error("the minimum pledge for the \"{tier}\" tier is {minimum} ETH, got {amount}")]
    BelowTierMinimum {
        /// Tier title
        tier: String,
        /// Tier minimum
        minimum: f64,
        /// Parsed amount
        amount: f64,
    },
}

impl DonationError {
    /// Invalid amount error for raw input
    #[inline]
    pub fn invalid(input: Option<&str>) -> Self {
        Self::InvalidDonationAmount {
            input: input.map(str::to_string),
        }
    }
}
