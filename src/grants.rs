//! Monthly vesting grants
//!
//! One `MonthlyGrant` per calendar month pairs the gross vested share count
//! with the net count left after shares withheld for tax. A `GrantSchedule`
//! is the validated set of twelve, replacing the positional gross/net arrays
//! the inputs arrive as.

use rust_decimal::Decimal;

use crate::error::{Result, VestError};

/// Shares vested in one month: gross grant and net-of-withholding remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyGrant {
    /// Calendar month, 1-12
    pub month: u32,
    pub gross_shares: Decimal,
    pub net_shares: Decimal,
}

impl MonthlyGrant {
    /// Shares withheld to cover the tax obligation (gross minus net).
    pub fn withheld_shares(&self) -> Decimal {
        self.gross_shares - self.net_shares
    }
}

/// Twelve monthly grants, one per month in order 1-12.
#[derive(Debug, Clone)]
pub struct GrantSchedule {
    grants: Vec<MonthlyGrant>,
}

impl GrantSchedule {
    /// Validate and wrap twelve grants. Months must be exactly 1..=12 in
    /// order, counts non-negative, net never above gross.
    pub fn new(grants: Vec<MonthlyGrant>) -> Result<Self> {
        if grants.len() != 12 {
            return Err(VestError::Config(format!(
                "expected 12 monthly grants, got {}",
                grants.len()
            ))
            .into());
        }
        for (i, grant) in grants.iter().enumerate() {
            let expected_month = i as u32 + 1;
            if grant.month != expected_month {
                return Err(VestError::Config(format!(
                    "grant at position {} has month {}, expected {}",
                    i, grant.month, expected_month
                ))
                .into());
            }
            if grant.gross_shares < Decimal::ZERO || grant.net_shares < Decimal::ZERO {
                return Err(VestError::Config(format!(
                    "month {}: share counts must be non-negative",
                    grant.month
                ))
                .into());
            }
            if grant.net_shares > grant.gross_shares {
                return Err(VestError::Config(format!(
                    "month {}: net shares {} exceed gross shares {}",
                    grant.month, grant.net_shares, grant.gross_shares
                ))
                .into());
            }
        }
        Ok(Self { grants })
    }

    /// Build from the two parallel month-positional sequences the original
    /// inputs use. Index 0 is January.
    pub fn from_parallel(gross: &[Decimal], net: &[Decimal]) -> Result<Self> {
        if gross.len() != 12 || net.len() != 12 {
            return Err(VestError::Config(format!(
                "expected 12 gross and 12 net share counts, got {} and {}",
                gross.len(),
                net.len()
            ))
            .into());
        }
        let grants = gross
            .iter()
            .zip(net.iter())
            .enumerate()
            .map(|(i, (&gross_shares, &net_shares))| MonthlyGrant {
                month: i as u32 + 1,
                gross_shares,
                net_shares,
            })
            .collect();
        Self::new(grants)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyGrant> {
        self.grants.iter()
    }

    pub fn for_month(&self, month: u32) -> Option<&MonthlyGrant> {
        self.grants.get(month.checked_sub(1)? as usize)
    }
}
