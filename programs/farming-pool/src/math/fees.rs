//! Withdrawal fee calculations

/// Basis-point denominator for `withdrawal_fee_bps`.
pub const FEE_RATE_DENOMINATOR_VALUE: u64 = 10_000;

/// Returns true when `fee_bps` is a representable fraction of the principal.
pub fn is_valid_fee_bps(fee_bps: u16) -> bool {
    u64::from(fee_bps) <= FEE_RATE_DENOMINATOR_VALUE
}

/// Principal split applied on withdraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    /// Amount retained by the pool for the owner, rounded down.
    pub fee: u64,
    /// Amount returned to the staker.
    pub net_amount: u64,
}

impl FeeSplit {
    /// `fee = floor(amount * fee_bps / 10000)`, `net_amount = amount - fee`.
    pub fn for_withdrawal(amount: u64, fee_bps: u16) -> Option<FeeSplit> {
        if !is_valid_fee_bps(fee_bps) {
            return None;
        }
        let fee = u128::from(amount)
            .checked_mul(u128::from(fee_bps))?
            .checked_div(u128::from(FEE_RATE_DENOMINATOR_VALUE))?;
        let fee = u64::try_from(fee).ok()?;
        Some(FeeSplit {
            fee,
            net_amount: amount.checked_sub(fee)?,
        })
    }
}
