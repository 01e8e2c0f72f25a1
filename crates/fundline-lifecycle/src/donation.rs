//! Donation amount validation
//!
//! Values are never clamped. A rejected amount is reported as-is so the
//! caller can show it inline.

use crate::error::DonationError;
use fundline_campaign::RewardTier;

/// Validate raw donation input, optionally against a selected reward tier
///
/// # Errors
/// - `DonationError::InvalidDonationAmount` if the input is absent, empty,
///   non-numeric, non-finite or `<= 0`
/// - `DonationError::BelowTierMinimum` if a tier is selected and the amount
///   is below its pledge amount
pub fn validate_donation(
    input: Option<&str>,
    tier: Option<&RewardTier>,
) -> Result<f64, DonationError> {
    let raw = input.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(DonationError::invalid(input));
    };

    let amount: f64 = raw.parse().map_err(|_| DonationError::invalid(input))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DonationError::invalid(input));
    }

    if let Some(tier) = tier {
        if amount < tier.pledge_amount {
            return Err(DonationError::BelowTierMinimum {
                tier: tier.title.clone(),
                minimum: tier.pledge_amount,
                amount,
            });
        }
    }

    Ok(amount)
}

/// Donation form state: raw amount plus the selected tier
///
/// Selecting a tier pre-fills the amount with the tier minimum; the backer
/// may raise it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationForm {
    /// Raw amount as typed
    pub amount: String,
    /// Selected reward tier
    pub tier: Option<RewardTier>,
}

impl DonationForm {
    /// Empty form
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled for a tier
    #[must_use]
    pub fn for_tier(tier: RewardTier) -> Self {
        Self {
            amount: tier.pledge_amount.to_string(),
            tier: Some(tier),
        }
    }

    /// With amount
    #[inline]
    #[must_use]
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Validate the current form
    ///
    /// # Errors
    /// See [`validate_donation`]
    pub fn validate(&self) -> Result<f64, DonationError> {
        validate_donation(Some(&self.amount), self.tier.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bronze() -> RewardTier {
        RewardTier::new("r1-1", "Bronze Supporter NFT", "Early support NFT", 0.1)
    }

    #[test]
    fn accepts_positive_amounts() {
        assert_eq!(validate_donation(Some("0.5"), None), Ok(0.5));
        assert_eq!(validate_donation(Some(" 2 "), None), Ok(2.0));
    }

    #[test]
    fn rejects_absent_and_empty() {
        assert!(matches!(
            validate_donation(None, None),
            Err(DonationError::InvalidDonationAmount { input: None })
        ));
        assert!(matches!(
            validate_donation(Some("   "), None),
            Err(DonationError::InvalidDonationAmount { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_and_non_positive() {
        for input in ["abc", "12abc", "-5", "0", "-0.0", "NaN", "inf"] {
            assert!(
                matches!(
                    validate_donation(Some(input), None),
                    Err(DonationError::InvalidDonationAmount { .. })
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn below_tier_minimum() {
        let err = validate_donation(Some("0.05"), Some(&bronze())).unwrap_err();
        assert_eq!(
            err,
            DonationError::BelowTierMinimum {
                tier: "Bronze Supporter NFT".to_string(),
                minimum: 0.1,
                amount: 0.05,
            }
        );
    }

    #[test]
    fn tier_minimum_is_inclusive() {
        assert_eq!(validate_donation(Some("0.1"), Some(&bronze())), Ok(0.1));
    }

    #[test]
    fn invalid_amount_checked_before_tier() {
        assert!(matches!(
            validate_donation(Some("-5"), Some(&bronze())),
            Err(DonationError::InvalidDonationAmount { .. })
        ));
    }

    #[test]
    fn form_prefills_tier_minimum() {
        let form = DonationForm::for_tier(bronze());
        assert_eq!(form.amount, "0.1");
        assert_eq!(form.validate(), Ok(0.1));

        let raised = form.with_amount("0.75");
        assert_eq!(raised.validate(), Ok(0.75));
    }
}
