use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Withdraw amount exceeds staked balance")]
    InsufficientStake,

    #[msg("Invalid reward rate")]
    InvalidRewardRate,

    #[msg("Caller is not the pool owner")]
    Unauthorized,

    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("Reward vault balance is too low to settle pending rewards")]
    InsufficientRewardReserve,

    #[msg("Withdrawal fee must be at most 10000 basis points")]
    InvalidWithdrawalFee,

    #[msg("New owner must not be the default pubkey")]
    InvalidOwner,

    #[msg("No staking record exists for this user")]
    UserNotFound,

    #[msg("Current block is older than the pool checkpoint")]
    BlockHeightRegressed,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Token account does not belong to the expected owner")]
    InvalidTokenAccount,
}
